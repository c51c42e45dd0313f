//! Upstream client code for the comics service.
//!
//! This crate provides the HTTP client for the xkcd JSON API and its
//! implementation of [`comics_core::ComicSource`].

pub mod xkcd;

pub use xkcd::{RawComic, XkcdClient, XkcdConfig, XkcdError};

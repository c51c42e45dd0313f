//! comic_* tool implementations.
//!
//! Thin wrappers over [`ComicService`]; search parameters go through the same
//! validation as the HTTP query string.

use super::json_result;
use crate::error::ApiError;
use crate::validation;
use comics_core::ComicService;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the comic_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComicGetParams {
    /// Comic number, starting at 1.
    pub id: i64,
}

/// Parameters for the comic_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ComicSearchParams {
    /// Case-insensitive text matched against titles and transcripts (1-100 characters).
    pub query: String,

    /// Page number, starting at 1 (default: 1).
    #[serde(default)]
    pub page: Option<u32>,

    /// Results per page, 1-50 (default: 10).
    #[serde(default)]
    pub limit: Option<u32>,
}

pub async fn latest_impl(service: &ComicService) -> Result<CallToolResult, McpError> {
    let comic = service.get_latest().await?;
    json_result(&*comic)
}

pub async fn get_impl(service: &ComicService, params: ComicGetParams) -> Result<CallToolResult, McpError> {
    let comic = service.get_by_id(params.id).await?;
    json_result(&*comic)
}

pub async fn random_impl(service: &ComicService) -> Result<CallToolResult, McpError> {
    let comic = service.get_random().await?;
    json_result(&*comic)
}

pub async fn search_impl(service: &ComicService, params: ComicSearchParams) -> Result<CallToolResult, McpError> {
    let query = validation::validate_query(Some(params.query.as_str())).map_err(ApiError::Validation)?;
    let page = validation::validate_page(params.page).map_err(ApiError::Validation)?;
    let limit = validation::validate_limit(params.limit).map_err(ApiError::Validation)?;

    let result = service.search(&query, page, limit).await?;
    json_result(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubSource, make_service};
    use crate::tools::result_json;

    #[tokio::test]
    async fn test_latest_impl() {
        let service = make_service(StubSource::archive());
        let output = result_json(&latest_impl(&service).await.unwrap());
        assert_eq!(output["id"], 3);
    }

    #[tokio::test]
    async fn test_get_impl() {
        let service = make_service(StubSource::archive());
        let output = result_json(&get_impl(&service, ComicGetParams { id: 2 }).await.unwrap());
        assert_eq!(output["title"], "Python Love");
    }

    #[tokio::test]
    async fn test_get_impl_errors() {
        let service = make_service(StubSource::archive());

        let err = get_impl(&service, ComicGetParams { id: 0 }).await.unwrap_err();
        assert_eq!(err.code.0, -32602);

        let err = get_impl(&service, ComicGetParams { id: 42 }).await.unwrap_err();
        assert_eq!(err.code.0, -32001);
    }

    #[tokio::test]
    async fn test_random_impl() {
        let service = make_service(StubSource::archive());
        let output = result_json(&random_impl(&service).await.unwrap());
        let id = output["id"].as_u64().unwrap();
        assert!((1..=3).contains(&id));
    }

    #[tokio::test]
    async fn test_search_impl() {
        let service = make_service(StubSource::archive());
        let params = ComicSearchParams { query: "  PYTHON ".into(), page: None, limit: None };

        let output = result_json(&search_impl(&service, params).await.unwrap());
        assert_eq!(output["query"], "PYTHON");
        assert_eq!(output["total"], 1);
        assert_eq!(output["pagination"]["limit"], 10);
    }

    #[tokio::test]
    async fn test_search_impl_validation() {
        let service = make_service(StubSource::archive());

        let params = ComicSearchParams { query: "python".into(), page: None, limit: Some(51) };
        let err = search_impl(&service, params).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert!(err.message.contains("Limit must be between 1 and 50"));

        let params = ComicSearchParams { query: " ".into(), page: None, limit: None };
        assert!(search_impl(&service, params).await.is_err());
    }
}

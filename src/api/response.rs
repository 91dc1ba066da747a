//! # Response Shapes
//!
//! Wire representations for the read-many endpoint. Single-piece endpoints
//! respond with the rendered piece directly.

use serde::Serialize;
use serde_json::Value;

/// List response with resolved pagination state
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    /// Total matching pieces across all pages
    pub total: usize,

    /// Total pages at the effective page size
    pub pages: usize,

    /// Effective page size, after the configured cap
    pub per_page: usize,

    /// Rendered pieces for the requested page, in store order
    pub results: Vec<Value>,
}

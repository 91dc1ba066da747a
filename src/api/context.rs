//! # Request Context
//!
//! Everything one in-flight request carries: the caller identity, the
//! laundered query parameters, the request body for writes, and the piece
//! slot the update path fills before conversion. Owned exclusively by the
//! request's task; never shared across requests.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::auth::Caller;
use crate::pieces::Piece;

/// Per-request state carried through an endpoint's pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request id for operator logs
    pub request_id: Uuid,

    /// Who is asking
    pub caller: Caller,

    /// Raw query-string parameters
    pub query: HashMap<String, String>,

    /// Request body, for the write endpoints
    pub body: Option<Value>,

    /// The existing piece, attached by the update path after its
    /// edit-scoped fetch and before conversion runs.
    pub piece: Option<Piece>,
}

impl RequestContext {
    pub fn new(caller: Caller) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            caller,
            query: HashMap::new(),
            body: None,
            piece: None,
        }
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Caller::anonymous())
    }
}

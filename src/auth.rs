//! # Caller Identity & Permissions
//!
//! Who is asking, and what may they do. Session mechanics live outside this
//! crate; the caller's role arrives on the request (an `apikey` header with
//! an `editor_` prefix marks an edit-capable caller) and the permission
//! oracle turns that role into per-collection decisions.

use axum::http::HeaderMap;

/// Caller role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Unprivileged caller: public visibility only
    #[default]
    Anonymous,
    /// Edit-capable caller: manage visibility, write access
    Editor,
}

/// The identity behind one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caller {
    pub role: Role,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self {
            role: Role::Anonymous,
        }
    }

    pub fn editor() -> Self {
        Self { role: Role::Editor }
    }

    /// Derive the caller from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        if let Some(key) = headers.get("apikey").and_then(|v| v.to_str().ok()) {
            if key.starts_with("editor_") {
                return Self::editor();
            }
        }
        Self::anonymous()
    }
}

/// Decides whether a caller may perform an action on a resource class.
pub trait PermissionOracle: Send + Sync {
    /// May this caller edit pieces of the given collection?
    fn can_edit(&self, caller: &Caller, collection: &str) -> bool;
}

/// Role-based oracle: editors may edit every collection.
pub struct RoleOracle;

impl PermissionOracle for RoleOracle {
    fn can_edit(&self, caller: &Caller, _collection: &str) -> bool {
        caller.role == Role::Editor
    }
}

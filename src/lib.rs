//! piecebox - a headless REST server exposing content-piece collections
//!
//! Each collection gets a uniform CRUD surface: list with allow-listed
//! filters and capped pagination, get-by-id, create, update, and soft
//! delete through a three-phase trash lifecycle.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod launder;
pub mod observability;
pub mod pieces;

//! Observability for piecebox
//!
//! Structured JSON logging only. Observability is read-only: it never
//! affects request outcomes, and a logging failure is swallowed.

mod logger;

pub use logger::{Logger, Severity};

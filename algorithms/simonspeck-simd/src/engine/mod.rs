//! Execution Engine
//!
//! Runtime CPU dispatch: picks the fastest [`crate::backend::Backend`]
//! available on the host and exposes safe, slice-based entry points per
//! cipher direction for callers that don't want to pick a `Backend` type
//! themselves (`cli`, `benches`, `verification`).

pub mod dispatcher;

pub use dispatcher::active_backend_name;

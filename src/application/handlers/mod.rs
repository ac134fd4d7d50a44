//! Command and query handlers, one per boundary operation.

pub mod interview;
pub mod session;

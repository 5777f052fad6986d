//! Shared ambient pieces for marketplace services: response envelope,
//! health handlers, tracing setup, request-id middleware, pagination,
//! and serde helpers.

pub mod health;
pub mod middleware;
pub mod pagination;
pub mod response;
pub mod serde;
pub mod tracing;

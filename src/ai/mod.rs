//! Language-model provider implementations.

mod http;

pub use http::HttpAi;

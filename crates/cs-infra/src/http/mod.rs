//! REST adapter for the content inbox service.

mod client;
mod dto;
mod error;

pub use client::{HttpContentService, HttpServiceConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

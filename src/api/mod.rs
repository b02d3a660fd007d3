//! Market API clients.
//!
//! - [`client`]: the [`MarketApi`] trait and the [`ApiResponse`] event payload
//! - [`http`]: [`HttpMarket`], JSON over HTTP via `reqwest`
//! - [`json`]: [`JsonMarket`], local catalog file plus an atomic order log
//! - [`models`]: wire envelopes and CDN path resolution

pub mod client;
pub mod http;
pub mod json;
pub mod models;

pub use client::{ApiResponse, MarketApi};
pub use http::HttpMarket;
pub use json::JsonMarket;
pub use models::{resolve_image, ApiErrorBody, ApiListResponse, OrderRecord};

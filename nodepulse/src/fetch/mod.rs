//! Subscription source download.

mod client;
mod error;
mod sources;

pub use client::{AsyncHttpClient, AsyncReqwestClient};
pub use error::FetchError;
pub use sources::fetch_sources;

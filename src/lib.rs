//! Async client for the Disney parks facility-service API.
//!
//! Handles the public bearer token (fetched on demand, reused until 30 seconds
//! before it expires), issues authenticated GETs, and tidies the JSON that
//! comes back: numeric ids, numeric coordinates, and ready-made map links.

pub mod config;
pub mod wdpro;

pub use config::Config;
pub use wdpro::auth::Credentials;
pub use wdpro::client::DisneyClient;
pub use wdpro::clock::{Clock, ManualClock, SystemClock};
pub use wdpro::error::{Error, Result};
pub use wdpro::http::ApiResponse;
pub use wdpro::normalize::{normalize, normalize_response};
pub use wdpro::parks::Park;

//! Facility-service API interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer token fetching and expiry-aware caching
//! - [`client`] - Main client and resource URL building
//! - [`clock`] - Time source for token expiry
//! - [`error`] - Error kinds
//! - [`http`] - Authenticated GETs and response decoding
//! - [`normalize`] - In-place tidying of response payloads
//! - [`parks`] - Wait-time shortcuts for the known parks
//!
//! # Example
//!
//! ```no_run
//! use wdpro::{DisneyClient, Park};
//!
//! async fn example() -> wdpro::Result<()> {
//!     let client = DisneyClient::new()?;
//!     let times = client.get_park_times(Park::Epcot).await?;
//!     if let Some(json) = times.as_json() {
//!         println!("{}", json["entries"]);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod clock;
pub mod error;
pub mod http;
pub mod normalize;
pub mod parks;

//! Types for the College Football Data API.
//!
//! - **Request types**: builder-pattern structs for each parameterized endpoint
//!   (e.g. [`request::GamesRequest`], [`request::PlaysRequest`]).
//! - **Response types**: the typed entities the client returns
//!   (e.g. [`response::Game`], [`response::Drive`], [`response::Venue`]).
//!
//! # Request Building
//!
//! All request types use the builder pattern via the [`bon`](https://docs.rs/bon) crate:
//!
//! ```
//! use cfb_data_sdk::types::SeasonType;
//! use cfb_data_sdk::types::request::GamesRequest;
//!
//! // Current season, regular season games
//! let games = GamesRequest::builder().build();
//!
//! // Bowl games involving Oregon in 2018
//! let bowls = GamesRequest::builder()
//!     .year(2018)
//!     .season_type(SeasonType::Postseason)
//!     .team("Oregon")
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

/// Calendar date type used by [`response::Game::start_date`].
pub use chrono::NaiveDate;

pub mod request;
pub mod response;

/// Wire value of [`SeasonType::Regular`].
pub const REGULAR_SEASON: &str = "regular";
/// Wire value of [`SeasonType::Postseason`].
pub const POST_SEASON: &str = "postseason";

#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum SeasonType {
    #[default]
    Regular,
    Postseason,
    /// Unknown season type from the API (captures the raw value for debugging).
    #[serde(untagged)]
    Unknown(String),
}

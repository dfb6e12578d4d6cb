#![allow(
    clippy::module_name_repetitions,
    reason = "Request suffix is intentional for clarity"
)]

//! Request types for the parameterized endpoints.
//!
//! Fields use Rust names; the client serializes them and converts each key to
//! the wire convention, dropping any filter left unset. `year` and
//! `season_type`, where present, fall back to the current year and the regular
//! season when left unset.

use bon::Builder;
use serde::Serialize;

use crate::types::SeasonType;

#[derive(Debug, Clone, Builder, Default, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct TeamsRequest {
    pub conference: Option<String>,
}

#[derive(Debug, Clone, Builder, Default, Serialize)]
#[non_exhaustive]
pub struct FbsTeamsRequest {
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct MatchupRequest {
    pub team1: String,
    pub team2: String,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct RosterRequest {
    pub team: String,
}

#[derive(Debug, Clone, Builder, Default, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct GamesRequest {
    pub year: Option<i32>,
    pub season_type: Option<SeasonType>,
    pub week: Option<i32>,
    pub team: Option<String>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub conference: Option<String>,
}

#[derive(Debug, Clone, Builder, Default, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct PlaysRequest {
    pub year: Option<i32>,
    pub season_type: Option<SeasonType>,
    pub week: Option<i32>,
    pub team: Option<String>,
    pub offense: Option<String>,
    pub defense: Option<String>,
    pub conference: Option<String>,
    pub offense_conference: Option<String>,
    pub defense_conference: Option<String>,
    pub play_type: Option<String>,
}

#[derive(Debug, Clone, Builder, Default, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct DrivesRequest {
    pub year: Option<i32>,
    pub season_type: Option<SeasonType>,
    pub week: Option<i32>,
    pub team: Option<String>,
    pub offense: Option<String>,
    pub defense: Option<String>,
    pub conference: Option<String>,
    pub offense_conference: Option<String>,
    pub defense_conference: Option<String>,
}

#[derive(Debug, Clone, Builder, Serialize)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct PlayerSearchRequest {
    pub search_term: String,
    pub position: Option<String>,
    pub team: Option<String>,
}

/// Query for a single game by id.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct GameByIdRequest {
    pub id: i64,
}

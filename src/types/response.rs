#![allow(
    clippy::module_name_repetitions,
    reason = "Entity names mirror the API's resource names"
)]

//! Typed entities returned by the client.
//!
//! Every field is optional on the wire, so scalar fields are `Option`s and list
//! fields default to empty. Each entity declares its [`Schema`], which the
//! decoder in [`crate::schema`] uses to fold aliases, decode scalars and parse
//! dates before the struct itself is built.

use std::fmt;

use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::Result;
use crate::client::Client;
use crate::error::Error;
use crate::schema::{Entity, Field, FieldType, Schema, parse_date};
use crate::types::SeasonType;

/// A point on the map, as reported for venues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[non_exhaustive]
pub struct LatLng {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

static LAT_LNG_SCHEMA: Schema = Schema {
    name: "LatLng",
    fields: &[
        Field::new("x", FieldType::Float),
        Field::new("y", FieldType::Float),
    ],
};

impl Entity for LatLng {
    fn schema() -> &'static Schema {
        &LAT_LNG_SCHEMA
    }
}

/// Time remaining on the game clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[non_exhaustive]
pub struct ClockTime {
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
}

static CLOCK_TIME_SCHEMA: Schema = Schema {
    name: "ClockTime",
    fields: &[
        Field::new("minutes", FieldType::Integer),
        Field::new("seconds", FieldType::Integer),
    ],
};

impl Entity for ClockTime {
    fn schema() -> &'static Schema {
        &CLOCK_TIME_SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Conference {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub abbreviation: Option<String>,
}

static CONFERENCE_SCHEMA: Schema = Schema {
    name: "Conference",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("name", FieldType::String),
        Field::new("short_name", FieldType::String),
        Field::new("abbreviation", FieldType::String),
    ],
};

impl Entity for Conference {
    fn schema() -> &'static Schema {
        &CONFERENCE_SCHEMA
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Team {
    pub id: Option<i64>,
    pub school: Option<String>,
    pub mascot: Option<String>,
    pub abbreviation: Option<String>,
    pub alt_name_1: Option<String>,
    pub alt_name_2: Option<String>,
    pub alt_name_3: Option<String>,
    pub conference: Option<String>,
    pub division: Option<String>,
    pub color: Option<String>,
    pub alt_color: Option<String>,
    /// Logo URLs, in the order the API lists them.
    #[serde(default)]
    #[builder(default)]
    pub logos: Vec<String>,
}

static TEAM_SCHEMA: Schema = Schema {
    name: "Team",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("school", FieldType::String),
        Field::new("mascot", FieldType::String),
        Field::new("abbreviation", FieldType::String),
        Field::aliased("alt_name_1", FieldType::String, &["alt_name1"]),
        Field::aliased("alt_name_2", FieldType::String, &["alt_name2"]),
        Field::aliased("alt_name_3", FieldType::String, &["alt_name3"]),
        Field::new("conference", FieldType::String),
        Field::new("division", FieldType::String),
        Field::new("color", FieldType::String),
        Field::new("alt_color", FieldType::String),
        Field::new("logos", FieldType::List(&FieldType::String)),
    ],
};

impl Entity for Team {
    fn schema() -> &'static Schema {
        &TEAM_SCHEMA
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.school.as_deref().unwrap_or_default())
    }
}

/// A single game.
///
/// `start_date` is always a parsed date. The API also reports it as `date`,
/// and reports `home_points`/`away_points` as `home_score`/`away_score`; the
/// aliases decode exactly like the canonical fields, and the alias setters
/// below behave like their canonical counterparts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Game {
    pub id: Option<i64>,
    pub season: Option<i64>,
    pub week: Option<i64>,
    pub season_type: Option<SeasonType>,
    pub start_date: Option<NaiveDate>,
    pub neutral_site: Option<bool>,
    pub conference_game: Option<bool>,
    pub attendance: Option<i64>,
    pub venue_id: Option<i64>,
    pub venue: Option<String>,
    pub home_team: Option<String>,
    pub home_conference: Option<String>,
    pub home_points: Option<i64>,
    pub home_line_scores: Option<Vec<i64>>,
    pub away_team: Option<String>,
    pub away_conference: Option<String>,
    pub away_points: Option<i64>,
    pub away_line_scores: Option<Vec<i64>>,
}

static GAME_SCHEMA: Schema = Schema {
    name: "Game",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("season", FieldType::Integer),
        Field::new("week", FieldType::Integer),
        Field::new("season_type", FieldType::String),
        Field::aliased("start_date", FieldType::Date, &["date"]),
        Field::new("neutral_site", FieldType::Boolean),
        Field::new("conference_game", FieldType::Boolean),
        Field::new("attendance", FieldType::Integer),
        Field::new("venue_id", FieldType::Integer),
        Field::new("venue", FieldType::String),
        Field::new("home_team", FieldType::String),
        Field::new("home_conference", FieldType::String),
        Field::aliased("home_points", FieldType::Integer, &["home_score"]),
        Field::new("home_line_scores", FieldType::List(&FieldType::Integer)),
        Field::new("away_team", FieldType::String),
        Field::new("away_conference", FieldType::String),
        Field::aliased("away_points", FieldType::Integer, &["away_score"]),
        Field::new("away_line_scores", FieldType::List(&FieldType::Integer)),
    ],
};

static GAME_TYPE: FieldType = FieldType::Object(&GAME_SCHEMA);

impl Entity for Game {
    fn schema() -> &'static Schema {
        &GAME_SCHEMA
    }
}

impl Game {
    /// Parses `value` as an ISO-8601 date and stores it.
    ///
    /// The stored date is left unchanged if `value` does not parse.
    pub fn set_start_date(&mut self, value: &str) -> Result<()> {
        self.start_date = Some(parse_date(value)?);
        Ok(())
    }

    /// Alias of [`Game::set_start_date`].
    pub fn set_date(&mut self, value: &str) -> Result<()> {
        self.set_start_date(value)
    }

    pub fn set_home_points(&mut self, points: Option<i64>) {
        self.home_points = points;
    }

    /// Alias of [`Game::set_home_points`].
    pub fn set_home_score(&mut self, points: Option<i64>) {
        self.set_home_points(points);
    }

    pub fn set_away_points(&mut self, points: Option<i64>) {
        self.away_points = points;
    }

    /// Alias of [`Game::set_away_points`].
    pub fn set_away_score(&mut self, points: Option<i64>) {
        self.set_away_points(points);
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opt = |value: Option<i64>| value.map(|v| v.to_string()).unwrap_or_default();
        write!(
            f,
            "{} @ {} (Week {}, {})",
            self.away_team.as_deref().unwrap_or_default(),
            self.home_team.as_deref().unwrap_or_default(),
            opt(self.week),
            opt(self.season)
        )
    }
}

/// Head-to-head record between two teams, with the games that make it up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct MatchupHistory {
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub start_year: Option<i64>,
    pub end_year: Option<i64>,
    pub team1_wins: Option<i64>,
    pub team2_wins: Option<i64>,
    pub ties: Option<i64>,
    #[serde(default)]
    #[builder(default)]
    pub games: Vec<Game>,
}

static MATCHUP_HISTORY_SCHEMA: Schema = Schema {
    name: "MatchupHistory",
    fields: &[
        Field::new("team1", FieldType::String),
        Field::new("team2", FieldType::String),
        Field::new("start_year", FieldType::Integer),
        Field::new("end_year", FieldType::Integer),
        Field::new("team1_wins", FieldType::Integer),
        Field::new("team2_wins", FieldType::Integer),
        Field::new("ties", FieldType::Integer),
        Field::new("games", FieldType::List(&GAME_TYPE)),
    ],
};

impl Entity for MatchupHistory {
    fn schema() -> &'static Schema {
        &MATCHUP_HISTORY_SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Player {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub jersey: Option<i64>,
    pub year: Option<i64>,
    pub position: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

static PLAYER_SCHEMA: Schema = Schema {
    name: "Player",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("first_name", FieldType::String),
        Field::new("last_name", FieldType::String),
        Field::new("height", FieldType::Integer),
        Field::new("weight", FieldType::Integer),
        Field::new("jersey", FieldType::Integer),
        Field::new("year", FieldType::Integer),
        Field::new("position", FieldType::String),
        Field::new("city", FieldType::String),
        Field::new("state", FieldType::String),
        Field::new("country", FieldType::String),
    ],
};

impl Entity for Player {
    fn schema() -> &'static Schema {
        &PLAYER_SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Venue {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub capacity: Option<i64>,
    pub grass: Option<bool>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Postal code. Kept as text; leading zeros matter.
    pub zip: Option<String>,
    pub country_code: Option<String>,
    pub location: Option<LatLng>,
    pub elevation: Option<i64>,
    pub year: Option<i64>,
    pub dome: Option<bool>,
}

static VENUE_SCHEMA: Schema = Schema {
    name: "Venue",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("name", FieldType::String),
        Field::new("capacity", FieldType::Integer),
        Field::new("grass", FieldType::Boolean),
        Field::new("city", FieldType::String),
        Field::new("state", FieldType::String),
        Field::new("zip", FieldType::String),
        Field::new("country_code", FieldType::String),
        Field::new("location", FieldType::Object(&LAT_LNG_SCHEMA)),
        Field::new("elevation", FieldType::Integer),
        Field::new("year", FieldType::Integer),
        Field::new("dome", FieldType::Boolean),
    ],
};

impl Entity for Venue {
    fn schema() -> &'static Schema {
        &VENUE_SCHEMA
    }
}

/// A drive, with a lazily resolved link to the game it belongs to.
///
/// Drives returned by [`Client::drives`] remember that client. The first call
/// to [`Drive::game`] fetches the game by `game_id`; later calls return the
/// cached value without another request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Drive {
    pub id: Option<i64>,
    pub game_id: Option<i64>,
    pub offense: Option<String>,
    pub offense_conference: Option<String>,
    pub defense: Option<String>,
    pub defense_conference: Option<String>,
    pub scoring: Option<bool>,
    pub start_period: Option<i64>,
    pub start_yardline: Option<i64>,
    pub start_time: Option<ClockTime>,
    pub end_period: Option<i64>,
    pub end_yardline: Option<i64>,
    pub end_time: Option<ClockTime>,
    pub plays: Option<i64>,
    pub yards: Option<i64>,
    pub drive_result: Option<String>,
    #[serde(skip)]
    #[builder(skip)]
    game: GameLink,
}

static DRIVE_SCHEMA: Schema = Schema {
    name: "Drive",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("game_id", FieldType::Integer),
        Field::new("offense", FieldType::String),
        Field::new("offense_conference", FieldType::String),
        Field::new("defense", FieldType::String),
        Field::new("defense_conference", FieldType::String),
        Field::new("scoring", FieldType::Boolean),
        Field::new("start_period", FieldType::Integer),
        Field::new("start_yardline", FieldType::Integer),
        Field::new("start_time", FieldType::Object(&CLOCK_TIME_SCHEMA)),
        Field::new("end_period", FieldType::Integer),
        Field::new("end_yardline", FieldType::Integer),
        Field::new("end_time", FieldType::Object(&CLOCK_TIME_SCHEMA)),
        Field::new("plays", FieldType::Integer),
        Field::new("yards", FieldType::Integer),
        Field::new("drive_result", FieldType::String),
    ],
};

impl Entity for Drive {
    fn schema() -> &'static Schema {
        &DRIVE_SCHEMA
    }
}

impl Drive {
    /// Returns the game this drive belongs to, fetching it on first use.
    ///
    /// Concurrent callers share a single in-flight lookup. A failed lookup is
    /// not cached, so a later call retries it.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the drive has no `game_id` or was not
    /// produced by a [`Client`], and otherwise any error from [`Client::game`].
    pub async fn game(&self) -> Result<&Game> {
        let game_id = self
            .game_id
            .ok_or_else(|| Error::validation("drive has no game_id"))?;
        let client = self
            .game
            .client
            .as_ref()
            .ok_or_else(|| Error::validation("drive is not attached to a client"))?;

        self.game.cell.get_or_try_init(|| client.game(game_id)).await
    }

    /// Points [`Drive::game`] at `client`.
    pub fn attach(&mut self, client: Client) {
        self.game.client = Some(client);
    }
}

/// Lazily resolved back-reference from a drive to its game.
#[derive(Debug, Clone, Default)]
struct GameLink {
    client: Option<Client>,
    cell: OnceCell<Game>,
}

/// The link is not part of a drive's data.
impl PartialEq for GameLink {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
#[non_exhaustive]
pub struct Play {
    pub id: Option<i64>,
    pub drive_id: Option<i64>,
    pub offense: Option<String>,
    pub offense_conference: Option<String>,
    pub offense_score: Option<i64>,
    pub defense: Option<String>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub defense_conference: Option<String>,
    pub defense_points: Option<i64>,
    pub period: Option<i64>,
    pub clock: Option<ClockTime>,
    pub yard_line: Option<i64>,
    pub down: Option<i64>,
    pub distance: Option<i64>,
    pub yards_gained: Option<i64>,
    pub play_type: Option<String>,
    pub play_text: Option<String>,
}

static PLAY_SCHEMA: Schema = Schema {
    name: "Play",
    fields: &[
        Field::new("id", FieldType::Integer),
        Field::new("drive_id", FieldType::Integer),
        Field::new("offense", FieldType::String),
        Field::new("offense_conference", FieldType::String),
        Field::new("offense_score", FieldType::Integer),
        Field::new("defense", FieldType::String),
        Field::new("home", FieldType::String),
        Field::new("away", FieldType::String),
        Field::new("defense_conference", FieldType::String),
        Field::new("defense_points", FieldType::Integer),
        Field::new("period", FieldType::Integer),
        Field::new("clock", FieldType::Object(&CLOCK_TIME_SCHEMA)),
        Field::new("yard_line", FieldType::Integer),
        Field::new("down", FieldType::Integer),
        Field::new("distance", FieldType::Integer),
        Field::new("yards_gained", FieldType::Integer),
        Field::new("play_type", FieldType::String),
        Field::new("play_text", FieldType::String),
    ],
};

impl Entity for Play {
    fn schema() -> &'static Schema {
        &PLAY_SCHEMA
    }
}

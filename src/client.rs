//! Client for the College Football Data API.
//!
//! # Example
//!
//! ```no_run
//! use cfb_data_sdk::Client;
//! use cfb_data_sdk::types::request::GamesRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::default();
//!
//! let request = GamesRequest::builder().year(2018).team("Oregon").build();
//! for game in client.games(&request).await? {
//!     println!("{game}");
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use bon::Builder;
use chrono::{Datelike as _, Utc};
use reqwest::{
    Client as ReqwestClient, Method, Request, StatusCode,
    header::{HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Error, StatusKind};
use crate::params::ToQueryParams as _;
use crate::schema::{self, Entity};
use crate::types::request::{
    DrivesRequest, FbsTeamsRequest, GameByIdRequest, GamesRequest, MatchupRequest,
    PlayerSearchRequest, PlaysRequest, RosterRequest, TeamsRequest,
};
use crate::types::response::{
    Conference, Drive, Game, MatchupHistory, Play, Player, Team, Venue,
};
use crate::{DEFAULT_HOST, Result};

const DEFAULT_USER_AGENT: &str = "cfb_data_sdk";

/// Transport settings applied to every request a [`Client`] sends.
///
/// ```
/// use std::time::Duration;
///
/// use cfb_data_sdk::client::Config;
///
/// let config = Config::builder()
///     .timeout(Duration::from_secs(10))
///     .user_agent("my-app/1.0")
///     .build();
/// ```
#[derive(Debug, Clone, Default, Builder)]
#[non_exhaustive]
pub struct Config {
    /// Overall timeout per request. No timeout when unset.
    timeout: Option<Duration>,
    /// Sent as `User-Agent`. Defaults to `cfb_data_sdk`.
    #[builder(into)]
    user_agent: Option<String>,
}

/// HTTP client for the College Football Data API.
///
/// Every endpoint is a `GET` returning JSON. Responses are normalized to
/// `snake_case` keys and decoded into the entities of
/// [`crate::types::response`].
///
/// The default endpoint is `https://api.collegefootballdata.com`.
///
/// ```no_run
/// use cfb_data_sdk::Client;
///
/// let client = Client::default();
/// let local = Client::new("http://localhost:8080").unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    client: ReqwestClient,
}

impl Default for Client {
    fn default() -> Self {
        Client::new(DEFAULT_HOST).expect("Client with default endpoint should succeed")
    }
}

impl Client {
    /// Creates a client for `host` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn new(host: &str) -> Result<Client> {
        Self::with_config(host, Config::default())
    }

    /// Creates a client for `host` with explicit transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the user agent is not a valid
    /// header value, or the HTTP client cannot be created.
    pub fn with_config(host: &str, config: Config) -> Result<Client> {
        let mut headers = HeaderMap::new();

        let user_agent = match config.user_agent {
            Some(agent) => HeaderValue::try_from(agent)?,
            None => HeaderValue::from_static(DEFAULT_USER_AGENT),
        };
        headers.insert("User-Agent", user_agent);
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let mut builder = ReqwestClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let mut host = Url::parse(host)?;
        if !host.path().ends_with('/') {
            let path = format!("{}/", host.path());
            host.set_path(&path);
        }

        Ok(Self {
            host,
            client: builder.build()?,
        })
    }

    /// Returns the base URL of the API.
    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    /// Parses a raw response body and normalizes its keys to `snake_case`.
    ///
    /// # Errors
    ///
    /// Returns an [`Internal`](crate::error::Kind::Internal) error if `body`
    /// is not JSON.
    pub fn parse_response(body: &str) -> Result<Value> {
        crate::parse_response(body)
    }

    fn build_get<Req: Serialize>(&self, path: &str, req: &Req) -> Result<Request> {
        let query = req.query_params()?;
        Ok(self
            .client
            .request(Method::GET, self.host.join(path)?)
            .query(&query)
            .build()?)
    }

    async fn get_value<Req: Serialize>(&self, path: &str, req: &Req) -> Result<Value> {
        let request = self.build_get(path, req)?;
        crate::request(&self.client, request).await
    }

    async fn get_list<Req: Serialize, Res: Entity>(&self, path: &str, req: &Req) -> Result<Vec<Res>> {
        let value = self.get_value(path, req).await?;
        schema::deserialize_list(&value)
    }

    async fn get_one<Req: Serialize, Res: Entity>(&self, path: &str, req: &Req) -> Result<Res> {
        let value = self.get_value(path, req).await?;
        schema::deserialize(&value)
    }

    /// Lists every conference.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn conferences(&self) -> Result<Vec<Conference>> {
        self.get_list("conferences", &()).await
    }

    /// Lists teams, optionally restricted to one conference.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn teams(&self, request: &TeamsRequest) -> Result<Vec<Team>> {
        self.get_list("teams", request).await
    }

    /// Lists FBS teams for a year, the current one if unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn fbs_teams(&self, request: &FbsTeamsRequest) -> Result<Vec<Team>> {
        let mut request = request.clone();
        request.year.get_or_insert_with(current_year);

        self.get_list("teams/fbs", &request).await
    }

    /// Head-to-head history between two teams.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn matchup(&self, request: &MatchupRequest) -> Result<MatchupHistory> {
        self.get_one("teams/matchup", request).await
    }

    /// Lists the roster of a team.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn roster(&self, request: &RosterRequest) -> Result<Vec<Player>> {
        self.get_list("roster", request).await
    }

    /// Lists games matching the filters.
    ///
    /// `year` defaults to the current year and `season_type` to the regular
    /// season.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn games(&self, request: &GamesRequest) -> Result<Vec<Game>> {
        let mut request = request.clone();
        request.year.get_or_insert_with(current_year);
        request.season_type.get_or_insert_with(Default::default);

        self.get_list("games", &request).await
    }

    /// Looks up a single game by id.
    ///
    /// The API answers with a list; the first element is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`StatusKind::NotFound`] error if the API returns no game, or
    /// any error of the underlying request.
    pub async fn game(&self, id: i64) -> Result<Game> {
        let request = self.build_get("games", &GameByIdRequest { id })?;
        let url = request.url().to_string();

        let value = crate::request(&self.client, request).await?;
        let games: Vec<Game> = schema::deserialize_list(&value)?;

        games.into_iter().next().ok_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::warn!(id, url = %url, "no game with requested id");

            Error::status(
                StatusKind::NotFound,
                StatusCode::NOT_FOUND,
                Method::GET,
                url.clone(),
                format!("GET {url}: 404: no game with id {id}"),
            )
        })
    }

    /// Lists plays matching the filters.
    ///
    /// `year` defaults to the current year and `season_type` to the regular
    /// season.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn play_by_play(&self, request: &PlaysRequest) -> Result<Vec<Play>> {
        let mut request = request.clone();
        request.year.get_or_insert_with(current_year);
        request.season_type.get_or_insert_with(Default::default);

        self.get_list("plays", &request).await
    }

    /// Lists drives matching the filters.
    ///
    /// Each returned drive can resolve its game through [`Drive::game`] using
    /// this client. `year` defaults to the current year and `season_type` to
    /// the regular season.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn drives(&self, request: &DrivesRequest) -> Result<Vec<Drive>> {
        let mut request = request.clone();
        request.year.get_or_insert_with(current_year);
        request.season_type.get_or_insert_with(Default::default);

        let mut drives: Vec<Drive> = self.get_list("drives", &request).await?;
        for drive in &mut drives {
            drive.attach(self.clone());
        }

        Ok(drives)
    }

    /// Searches players by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn player_search(&self, request: &PlayerSearchRequest) -> Result<Vec<Player>> {
        self.get_list("player/search", request).await
    }

    /// Lists every venue.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn venues(&self) -> Result<Vec<Venue>> {
        self.get_list("venues", &()).await
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

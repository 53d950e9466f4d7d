//! Navigation surface: the five views and their path form.
//!
//! Paths keep the backend-era shape (`/game?nickname=ann&category=fruit`) so a
//! route can be given on the command line and logged in a readable way.

use reqwest::Url;
use tracing::{debug, instrument, warn};
use wordgame_core::SessionSetup;

use crate::error::{ClientError, ClientErrorKind};

/// Placeholder origin used to parse relative routes.
const ROUTE_BASE: &str = "http://wordgame.local";

/// One of the five views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Setup: nickname and category selection. Path `/`.
    Home,
    /// Active game for a validated nickname and category. Path `/game`.
    Game(SessionSetup),
    /// Ranked scores. Path `/leaderboard`.
    Leaderboard,
    /// Word catalog administration. Path `/manage-words`.
    ManageWords,
    /// Project description. Path `/about`.
    About,
}

impl Route {
    /// Parses a path with optional query string.
    ///
    /// `/game` without a non-empty `nickname` and `category` is a
    /// [`ClientErrorKind::MissingParameter`] error. Unknown paths are `Home`.
    #[instrument]
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let base = Url::parse(ROUTE_BASE)
            .map_err(|e| ClientError::new(ClientErrorKind::Validation, e.to_string()))?;
        let url = base
            .join(input.trim())
            .map_err(|e| ClientError::new(ClientErrorKind::Validation, format!("Invalid route: {}", e)))?;

        let route = match url.path().trim_end_matches('/') {
            "" => Self::Home,
            "/game" => {
                let mut nickname = String::new();
                let mut category = String::new();
                for (key, value) in url.query_pairs() {
                    match key.as_ref() {
                        "nickname" => nickname = value.into_owned(),
                        "category" => category = value.into_owned(),
                        _ => {}
                    }
                }
                Self::Game(SessionSetup::new(nickname, category)?)
            }
            "/leaderboard" => Self::Leaderboard,
            "/manage-words" => Self::ManageWords,
            "/about" => Self::About,
            other => {
                debug!(path = %other, "Unknown route, using home");
                Self::Home
            }
        };
        Ok(route)
    }

    /// Parses a route, falling back to `Home` when parameters are missing.
    #[instrument]
    pub fn resolve(input: &str) -> Self {
        match Self::parse(input) {
            Ok(route) => route,
            Err(e) => {
                warn!(error = %e, "Redirecting to home");
                Self::Home
            }
        }
    }

    /// Renders the route back into path form with an encoded query.
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Game(setup) => Url::parse_with_params(
                &format!("{}/game", ROUTE_BASE),
                [
                    ("nickname", setup.nickname().as_str()),
                    ("category", setup.category().as_str()),
                ],
            )
            .ok()
            .and_then(|url| url.query().map(|query| format!("/game?{}", query)))
            .unwrap_or_else(|| "/game".to_string()),
            Self::Leaderboard => "/leaderboard".to_string(),
            Self::ManageWords => "/manage-words".to_string(),
            Self::About => "/about".to_string(),
        }
    }

    /// Title shown in the navigation bar.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Game(_) => "Game",
            Self::Leaderboard => "Leaderboard",
            Self::ManageWords => "Manage Words",
            Self::About => "About",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_path())
    }
}

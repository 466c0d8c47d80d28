pub mod roster;

pub use roster::{write_roster_file, RosterWrite};

use dugout_core::{CoreError, StatsApiError};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

const STATS_API_BASE: &str = "https://statsapi.mlb.com/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Teams whose active rosters feed the combined roster file.
pub const TEAMS: [(u32, &str); 3] = [(144, "Braves"), (143, "Phillies"), (121, "Mets")];

#[derive(Debug, Clone, Deserialize)]
pub struct RosterResponse {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterEntry {
    pub person: Option<Person>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
}

impl RosterResponse {
    /// Trimmed full names of every roster entry that has one.
    pub fn player_names(self) -> Vec<String> {
        self.roster
            .into_iter()
            .filter_map(|entry| entry.person)
            .filter_map(|person| person.full_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

#[derive(Debug)]
pub struct StatsApiClient {
    http_client: reqwest::Client,
}

impl StatsApiClient {
    pub fn new() -> Result<Self, CoreError> {
        let http_client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http_client })
    }

    /// Fetch the current active roster of one team. No authentication,
    /// no retry; a failed team is the caller's problem to skip.
    pub async fn fetch_active_roster(&self, team_id: u32) -> Result<Vec<String>, CoreError> {
        let url = format!("{}/teams/{}/roster/Active", STATS_API_BASE, team_id);
        debug!("Fetching active roster for team {}", team_id);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            error!("Network error fetching roster for team {}: {}", team_id, e);
            if e.is_timeout() {
                CoreError::Stats(StatsApiError::RequestTimeout)
            } else {
                CoreError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Roster request for team {} returned {}", team_id, status);
            return match status.as_u16() {
                404 => Err(CoreError::Stats(StatsApiError::RosterNotFound { team_id })),
                code if status.is_server_error() => {
                    Err(CoreError::Stats(StatsApiError::ServerError {
                        status_code: code,
                    }))
                }
                _ => Err(CoreError::Stats(StatsApiError::InvalidResponse {
                    details: format!("Unexpected status {} for team {}", status, team_id),
                })),
            };
        }

        let roster: RosterResponse = response.json().await.map_err(|e| {
            error!("Failed to parse roster for team {}: {}", team_id, e);
            CoreError::Stats(StatsApiError::InvalidResponse {
                details: format!("Failed to parse roster for team {}", team_id),
            })
        })?;

        Ok(roster.player_names())
    }
}

//! Mirror the active rosters of the configured teams into a combined
//! roster file, one full name per line, sorted and deduplicated.

use dugout_core::{CoreError, ErrorExt, RosterConfig};
use stats_client::{write_roster_file, RosterWrite, StatsApiClient, TEAMS};
use std::collections::BTreeSet;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = RosterConfig::from_env().map_err(|e| {
        e.log_error();
        e
    })?;
    let client = StatsApiClient::new()?;

    let mut all_names: BTreeSet<String> = BTreeSet::new();
    for (team_id, label) in TEAMS {
        match client.fetch_active_roster(team_id).await {
            Ok(names) => {
                tracing::info!("{}: {} players", label, names.len());
                all_names.extend(names);
            }
            // A failed team is skipped; the others still contribute.
            Err(e) => tracing::error!("Error fetching {}: {}", label, e),
        }
    }

    if all_names.is_empty() {
        tracing::error!(
            "No names fetched; leaving {} untouched",
            config.roster_file.display()
        );
        std::process::exit(1);
    }

    match write_roster_file(&config.roster_file, &all_names)? {
        RosterWrite::Written { names } => {
            tracing::info!("Wrote {} with {} names", config.roster_file.display(), names)
        }
        RosterWrite::Unchanged => {
            tracing::info!("{} unchanged", config.roster_file.display())
        }
    }

    Ok(())
}

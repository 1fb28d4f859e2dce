use crate::cli::Cli;
use std::path::PathBuf;
use std::time::Duration;
use yf_stats::client::FantasyApi;

/// Connection settings resolved from flags and their environment fallbacks.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub api_base: Option<String>,
    pub token: Option<String>,
    pub snapshot: Option<PathBuf>,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_base: cli.api_base.clone().filter(|s| !s.trim().is_empty()),
            token: cli.token.clone(),
            snapshot: cli.snapshot.clone(),
            timeout: Duration::from_secs(cli.timeout_secs.max(1)),
        }
    }

    pub fn api(&self) -> FantasyApi {
        let api = FantasyApi::new()
            .with_token(self.token.clone())
            .with_snapshot(self.snapshot.clone())
            .with_timeout(self.timeout);
        match &self.api_base {
            Some(base) => api.with_base_url(base.as_str()),
            None => api,
        }
    }
}

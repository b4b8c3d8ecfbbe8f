//! Runtime wiring for the CLI.
//!
//! Builds the shared [`ApiClient`] and the four stores from the
//! environment: `PETCARE_API_URL` overrides the server address, and the
//! session file lives under `PETCARE_HOME` (default `~/.petcare`).

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use petcare_client::ApiClient;
use petcare_store::{AuthStore, PetStore, ScheduleStore, TokenFile, VisitStore};
use tracing::debug;

/// Server address used when `PETCARE_API_URL` is not set.
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

/// Session file name inside the PetCare home directory.
const SESSION_FILE: &str = "session.json";

/// The client and stores a command runs against.
pub struct Context {
    pub auth: AuthStore,
    pub pets: PetStore,
    pub schedules: ScheduleStore,
    pub visits: VisitStore,
}

impl Context {
    /// Wire up the client and stores from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("PETCARE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let client = ApiClient::with_base_url(&base_url)
            .with_context(|| format!("invalid PETCARE_API_URL `{base_url}`"))?;
        debug!(base_url = %base_url, "api client configured");

        let session_path = home_dir().join(SESSION_FILE);
        let auth = AuthStore::new(client.clone(), TokenFile::new(session_path));

        Ok(Self {
            auth,
            pets: PetStore::new(client.clone()),
            schedules: ScheduleStore::new(client.clone()),
            visits: VisitStore::new(client),
        })
    }
}

/// Directory holding CLI state: `PETCARE_HOME`, else `~/.petcare`, else
/// `.petcare` next to the working directory.
fn home_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("PETCARE_HOME") {
        return PathBuf::from(home);
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".petcare");
    }
    PathBuf::from(".petcare")
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_dir_prefers_petcare_home() {
        // Environment mutation is process-wide; keep assertions independent
        // of ambient HOME by only checking the override branch.
        std::env::set_var("PETCARE_HOME", "/tmp/petcare-test-home");
        assert_eq!(home_dir(), PathBuf::from("/tmp/petcare-test-home"));
        std::env::remove_var("PETCARE_HOME");
    }
}

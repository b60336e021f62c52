//! Dashboard configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_ACTIVITY_LIMIT;

const DEFAULT_USER_ID: &str = "officer-01";
const DEFAULT_EMAIL: &str = "officer01@example.com";
const DEFAULT_PASSWORD: &str = "changeme";

fn default_snapshot_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("snapshot.json")
}

/// Configuration for the dashboard binary.
///
/// Every value can be set through `DASHBOARD_*` environment variables or the
/// configuration file; absent values fall back to the bundled fixtures.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DASHBOARD")]
pub struct DashboardSettings {
    /// JSON snapshot served as the document store.
    pub snapshot_path: Option<PathBuf>,
    /// Identity signed in at startup.
    pub user_id: Option<String>,
    /// Email of the signed-in identity.
    pub email: Option<String>,
    /// Password of the signed-in identity.
    pub password: Option<String>,
    /// Maximum number of recent-activity items on the profile.
    pub activity_limit: Option<usize>,
    /// Emit logs as JSON lines.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl DashboardSettings {
    /// Return the configured snapshot path, falling back to the fixture.
    #[must_use]
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(default_snapshot_path)
    }

    /// Identity to sign in, defaulting to the fixture officer.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_deref().unwrap_or(DEFAULT_USER_ID)
    }

    /// Email of that identity.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    /// Password of that identity.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD)
    }

    /// Activity items shown on the profile, [`DEFAULT_ACTIVITY_LIMIT`] unless set.
    #[must_use]
    pub fn activity_limit(&self) -> usize {
        self.activity_limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for dashboard configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> DashboardSettings {
        DashboardSettings::load_from_iter([OsString::from("dashboard")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("DASHBOARD_SNAPSHOT_PATH", None::<String>),
            ("DASHBOARD_USER_ID", None::<String>),
            ("DASHBOARD_EMAIL", None::<String>),
            ("DASHBOARD_PASSWORD", None::<String>),
            ("DASHBOARD_ACTIVITY_LIMIT", None::<String>),
            ("DASHBOARD_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.snapshot_path(), default_snapshot_path());
        assert_eq!(settings.user_id(), DEFAULT_USER_ID);
        assert_eq!(settings.email(), DEFAULT_EMAIL);
        assert_eq!(settings.activity_limit(), DEFAULT_ACTIVITY_LIMIT);
        assert!(!settings.json_logs);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DASHBOARD_SNAPSHOT_PATH", Some("/tmp/dashboard.json".to_owned())),
            ("DASHBOARD_USER_ID", Some("checker-07".to_owned())),
            ("DASHBOARD_EMAIL", Some("checker07@example.com".to_owned())),
            ("DASHBOARD_PASSWORD", Some("s3cret!".to_owned())),
            ("DASHBOARD_ACTIVITY_LIMIT", Some("8".to_owned())),
            ("DASHBOARD_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.snapshot_path(), PathBuf::from("/tmp/dashboard.json"));
        assert_eq!(settings.user_id(), "checker-07");
        assert_eq!(settings.email(), "checker07@example.com");
        assert_eq!(settings.password(), "s3cret!");
        assert_eq!(settings.activity_limit(), 8);
        assert!(settings.json_logs);
    }
}

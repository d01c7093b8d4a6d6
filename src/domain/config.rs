//! Domain types and validators for bootstrap configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access. Reading the
//! manifest file and the environment is `infra::config`'s job; resolution here
//! takes everything as arguments and returns data.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

/// Environment variable overriding the plugin archive channel.
pub const CHANNEL_ENV: &str = "BOSUN_CHANNEL";

pub const DEFAULT_RELEASE: &str = "0.1.0-snapshot";
pub const DEFAULT_CHANNEL: &str = "main";
pub const DEFAULT_ASSET_DIR: &str = "/usr/share/bosun";
pub const DEFAULT_WORK_DIR_NAME: &str = "bosun-work";
pub const DEFAULT_STARTUP_TIMEOUT_SECS: u64 = 10;

// ── Manifest schema ──────────────────────────────────────────────────────────

/// Optional on-disk manifest (`bosun.yaml`). Every field may be omitted;
/// missing fields fall back to env/defaults during resolution.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Manifest {
    pub working_dir: Option<PathBuf>,
    pub release: Option<String>,
    pub channel: Option<String>,
    pub remote: Option<String>,
    pub asset_dir: Option<PathBuf>,
    pub startup_timeout_secs: Option<u64>,
}

/// Per-invocation overrides collected from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub working_dir: Option<PathBuf>,
    pub release: Option<String>,
    pub channel: Option<String>,
    pub remote: Option<String>,
    pub asset_dir: Option<PathBuf>,
}

// ── Resolved configuration ───────────────────────────────────────────────────

/// Fully-resolved configuration the pipeline runs against. The CLI resolves
/// flags, manifest, and environment into this before any step executes.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Directory holding downloaded artifacts and service state.
    pub working_dir: PathBuf,
    /// Orchestrator release to install.
    pub release: String,
    /// Plugin archive channel (git ref of the plugin repositories).
    pub channel: String,
    /// Target host for remote provisioning; `None` provisions locally.
    pub remote: Option<String>,
    /// Directory shipped alongside the CLI holding config templates.
    pub asset_dir: PathBuf,
    /// Bound on the beacon readiness wait.
    pub startup_timeout_secs: u64,
}

impl BootstrapConfig {
    /// Resolve a configuration from its sources, in increasing precedence:
    /// defaults, manifest, `BOSUN_CHANNEL` (channel only), CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory is available for the default
    /// working dir, if the working dir is relative, or if release/channel
    /// resolve to empty strings.
    pub fn resolve(
        manifest: &Manifest,
        env_channel: Option<String>,
        home: Option<PathBuf>,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        let working_dir = match overrides
            .working_dir
            .clone()
            .or_else(|| manifest.working_dir.clone())
        {
            Some(dir) => dir,
            None => home.ok_or(ConfigError::NoHomeDir)?.join(DEFAULT_WORK_DIR_NAME),
        };

        let release = overrides
            .release
            .clone()
            .or_else(|| manifest.release.clone())
            .unwrap_or_else(|| DEFAULT_RELEASE.to_string());

        let channel = overrides
            .channel
            .clone()
            .or(env_channel)
            .or_else(|| manifest.channel.clone())
            .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());

        let config = Self {
            working_dir,
            release,
            channel,
            remote: overrides.remote.clone().or_else(|| manifest.remote.clone()),
            asset_dir: overrides
                .asset_dir
                .clone()
                .or_else(|| manifest.asset_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_DIR)),
            startup_timeout_secs: manifest
                .startup_timeout_secs
                .unwrap_or(DEFAULT_STARTUP_TIMEOUT_SECS),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.working_dir.is_absolute() {
            return Err(ConfigError::RelativeWorkingDir(
                self.working_dir.display().to_string(),
            ));
        }
        if self.release.trim().is_empty() {
            return Err(ConfigError::EmptyRelease);
        }
        if self.channel.trim().is_empty() {
            return Err(ConfigError::EmptyChannel);
        }
        Ok(())
    }

    /// A from-scratch bootstrap launches the beacon as a local child process
    /// and supervises its stdout pipe, so it only makes sense on the host
    /// being provisioned. Update and status shell out through the runner and
    /// stay remote-capable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RemoteBootstrap`] when a remote target is set.
    pub fn ensure_local_target(&self) -> Result<(), ConfigError> {
        if self.remote.is_some() {
            return Err(ConfigError::RemoteBootstrap);
        }
        Ok(())
    }

    // ── Derived locations ────────────────────────────────────────────────────

    #[must_use]
    pub fn beacon_work_dir(&self) -> PathBuf {
        self.working_dir.join("beacon")
    }

    #[must_use]
    pub fn beacon_config_path(&self) -> PathBuf {
        self.beacon_work_dir().join("beacon.config")
    }

    #[must_use]
    pub fn beacon_template_path(&self) -> PathBuf {
        self.beacon_work_dir().join("beacon.config.template")
    }

    /// Base name (no extension) of the orchestrator release jar.
    #[must_use]
    pub fn orchestrator_jar_name(&self) -> String {
        format!("bosun-orchestrator-{}-all", self.release)
    }

    /// Archive URL for a plugin repository on the configured channel.
    #[must_use]
    pub fn plugin_archive_url(&self, repo: &str) -> String {
        format!(
            "https://github.com/bosun-dev/{repo}/archive/{}.zip",
            self.channel
        )
    }

    #[must_use]
    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────

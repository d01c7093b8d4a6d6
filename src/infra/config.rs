//! Manifest loading and effective-configuration assembly.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::config::CHANNEL_ENV;
use crate::domain::{BootstrapConfig, Manifest, Overrides};

/// Manifest location when `--config` is not given.
fn default_manifest_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bosun").join("bosun.yaml"))
}

/// Read the YAML manifest. An explicit path must exist; the default
/// location is optional and falls back to an empty manifest.
pub fn load_manifest(explicit: Option<&Path>) -> Result<Manifest> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("manifest not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => match default_manifest_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Manifest::default()),
        },
    };
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

/// Assemble the effective configuration: defaults, then manifest, then the
/// channel environment variable, then CLI overrides.
///
/// # Errors
///
/// Returns an error when the manifest cannot be read or parsed, or when the
/// resolved configuration fails validation.
pub fn resolve_config(manifest_path: Option<&Path>, overrides: &Overrides) -> Result<BootstrapConfig> {
    let manifest = load_manifest(manifest_path)?;
    let env_channel = std::env::var(CHANNEL_ENV).ok().filter(|v| !v.is_empty());
    let config = BootstrapConfig::resolve(&manifest, env_channel, dirs::home_dir(), overrides)?;
    Ok(config)
}

// ── Unit tests ───────────────────────────────────────────────────────────────

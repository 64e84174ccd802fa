use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Tunables read from `config.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Norm / phase-equivalence tolerance.
    pub tolerance: f64,
    /// Advisory bound on operator rows and columns.
    pub max_dim: usize,
    /// Digits printed per amplitude component.
    pub precision: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { tolerance: 1e-9, max_dim: 6, precision: 8 }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: SimConfig = toml::from_str(text).context("Parse config TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance > 0.0 && self.tolerance.is_finite()) {
            bail!("tolerance must be a positive number, got {}", self.tolerance);
        }
        Ok(())
    }

    /// Apply command-line overrides and re-check the result.
    pub fn with_overrides(mut self, tolerance: Option<f64>, max_dim: Option<usize>) -> Result<Self> {
        if let Some(tol) = tolerance {
            self.tolerance = tol;
        }
        if let Some(max_dim) = max_dim {
            self.max_dim = max_dim;
        }
        self.validate().context("invalid command-line override")?;
        Ok(self)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    // ~\Users\you\.qstate\config.toml on Windows; ~/.qstate/config.toml elsewhere
    dirs_next::home_dir().map(|h| h.join(".qstate").join("config.toml"))
}

pub fn resolve_config_path(cli_path: &Option<PathBuf>) -> Option<PathBuf> {
    if let Some(p) = cli_path {
        return Some(p.clone());
    }
    default_config_path()
}

/// Load the config. An explicitly named file must exist; a missing default
/// file means defaults.
pub fn load_config(cli_path: &Option<PathBuf>) -> Result<SimConfig> {
    let Some(path) = resolve_config_path(cli_path) else {
        return Ok(SimConfig::default());
    };
    if cli_path.is_none() && !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(SimConfig::default());
    }
    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<SimConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Read config {}", path.display()))?;
    let cfg = SimConfig::from_toml_str(&text)
        .with_context(|| format!("Load config {}", path.display()))?;
    debug!(path = %path.display(), ?cfg, "loaded config");
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = SimConfig::from_toml_str("max_dim = 16\n").unwrap();
        assert_eq!(cfg.max_dim, 16);
        assert_eq!(cfg.tolerance, 1e-9);
        assert_eq!(cfg.precision, 8);
    }

    #[test]
    fn rejects_bad_tolerance() {
        assert!(SimConfig::from_toml_str("tolerance = -1.0\n").is_err());
        assert!(SimConfig::from_toml_str("tolerance = \"tight\"\n").is_err());
    }

    #[test]
    fn overrides_are_validated() {
        let cfg = SimConfig::default().with_overrides(Some(1e-6), Some(16)).unwrap();
        assert_eq!((cfg.tolerance, cfg.max_dim), (1e-6, 16));
        assert_eq!(SimConfig::default().with_overrides(None, None).unwrap(), SimConfig::default());
        assert!(SimConfig::default().with_overrides(Some(-1.0), None).is_err());
        assert!(SimConfig::default().with_overrides(Some(f64::NAN), None).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Some(dir.path().join("nope.toml"));
        assert!(load_config(&missing).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tolerance = 1e-6\nprecision = 4\n").unwrap();
        let cfg = load_config(&Some(path)).unwrap();
        assert_eq!(cfg, SimConfig { tolerance: 1e-6, max_dim: 6, precision: 4 });
    }
}

//! Configuration file support for pwconfigure.
//!
//! Two optional locations are read:
//! - Global: `~/.pwconfigure/config.toml` - User-wide defaults
//! - Project: `.pwconfigure/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::process::DEFAULT_SHELL;

/// Default qmake invocation.
pub const DEFAULT_QMAKE: &str = "qmake";

/// Command that cleans the make build tree.
pub const DEFAULT_CLEAN: &str = "make clean";

/// Command that test-builds an OpenMP program.
pub const DEFAULT_OMP_TEST: &str = "make omp_test";

/// pwconfigure configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Replacement defaults for command-line options
    pub defaults: DefaultsConfig,

    /// Commands used while probing
    pub probe: ProbeConfig,
}

/// Defaults applied when the corresponding flag is absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Compiler used instead of the per-OS default
    pub cxx: Option<String>,

    /// qmake used instead of `qmake`
    pub qmake: Option<String>,
}

/// Shell and make targets used by the probes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProbeConfig {
    /// Shell that runs every probe (default: bash)
    pub shell: Option<String>,

    /// Clean command (default: `make clean`)
    pub clean: Option<String>,

    /// OpenMP test command (default: `make omp_test`)
    pub omp_test: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.defaults.cxx.is_some() {
            self.defaults.cxx = other.defaults.cxx;
        }
        if other.defaults.qmake.is_some() {
            self.defaults.qmake = other.defaults.qmake;
        }
        if other.probe.shell.is_some() {
            self.probe.shell = other.probe.shell;
        }
        if other.probe.clean.is_some() {
            self.probe.clean = other.probe.clean;
        }
        if other.probe.omp_test.is_some() {
            self.probe.omp_test = other.probe.omp_test;
        }
    }

    pub fn shell(&self) -> &str {
        self.probe.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }

    pub fn clean_command(&self) -> &str {
        self.probe.clean.as_deref().unwrap_or(DEFAULT_CLEAN)
    }

    pub fn omp_test_command(&self) -> &str {
        self.probe.omp_test.as_deref().unwrap_or(DEFAULT_OMP_TEST)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.pwconfigure/config.toml)
/// 2. Global config (~/.pwconfigure/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.pwconfigure).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".pwconfigure"))
}

/// Get the global config path (~/.pwconfigure/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.pwconfigure/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".pwconfigure").join("config.toml")
}

//! The configure pipeline.
//!
//! Resolves every setting in a fixed order, checking each external tool with
//! a [`Probe`], then writes `Makefile.conf` twice: once assuming OpenMP works
//! (so `make` can run against it) and once more after `make omp_test` has
//! said whether it really does. All fatal checks happen before the first
//! write, so a failed run never leaves a half-resolved file behind.

use std::path::{Path, PathBuf};

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::configuration::make_bool;
use crate::core::platform::host_os_name;
use crate::core::{Configuration, Os, Toolchain};
use crate::ops::makefile_conf::write_conf;
use crate::util::config::{
    global_config_path, load_config, project_config_path, Config, DEFAULT_QMAKE,
};
use crate::util::diagnostic::Diagnostic;
use crate::util::process::{which_command, Probe};
use crate::util::shell::{Shell, Status};

/// Fatal configure errors.
///
/// Every variant is raised before `Makefile.conf` is touched, except
/// [`ConfigureError::Write`].
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ConfigureError {
    #[error("failed locating {shell}")]
    #[diagnostic(
        code(pwconfigure::shell_not_found),
        help("install the shell, or set `probe.shell` in .pwconfigure/config.toml")
    )]
    ShellNotFound { shell: String },

    #[error("unsupported OS ({os}). Supported = {supported}")]
    #[diagnostic(
        code(pwconfigure::unsupported_os),
        help("pass a supported OS explicitly with `--os <name>`")
    )]
    UnsupportedOs { os: String, supported: String },

    #[error("cannot locate compiler `{cxx}`")]
    #[diagnostic(
        code(pwconfigure::compiler_not_found),
        help("pass the compiler explicitly with `--cxx <path>`")
    )]
    CompilerNotFound { cxx: String },

    #[error("cannot locate qmake `{qmake}`")]
    #[diagnostic(
        code(pwconfigure::qmake_not_found),
        help("pass qmake explicitly with `--qmake <path>`")
    )]
    QmakeNotFound { qmake: String },

    #[error("failed to write {}", .path.display())]
    #[diagnostic(code(pwconfigure::write_failed))]
    Write {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ConfigureError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());

        match self {
            ConfigureError::ShellNotFound { shell } => {
                diag = diag.with_context(format!("`{}` failed", which_command(shell)));
            }
            ConfigureError::UnsupportedOs { .. } => {}
            ConfigureError::CompilerNotFound { cxx } => {
                diag = diag.with_context(format!("`{}` failed", which_command(cxx)));
            }
            ConfigureError::QmakeNotFound { qmake } => {
                diag = diag.with_context(format!("`{}` failed", which_command(qmake)));
            }
            ConfigureError::Write { source, .. } => {
                diag = diag.with_context(format!("{:#}", source));
            }
        }

        if let Some(help) = MietteDiagnostic::help(self) {
            diag = diag.with_suggestion(help.to_string());
        }

        diag
    }
}

/// Command-line overrides. `None` means "use the default".
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    pub debug: bool,
    pub cxx: Option<String>,
    pub qmake: Option<String>,
    /// Accepted for compatibility; the toolchain inferred from the compiler wins.
    pub toolchain: Option<Toolchain>,
    pub os: Option<String>,
}

/// Everything the pipeline reads from outside the command line.
#[derive(Debug, Clone)]
pub struct ConfigureEnv {
    /// Project root; `Makefile.conf` is written here.
    pub root: PathBuf,
    /// Lower-cased host OS name used when `--os` is absent.
    pub host_os: String,
    /// Merged defaults files.
    pub config: Config,
}

impl ConfigureEnv {
    /// Detect the host and load the global and project defaults files.
    pub fn detect(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = load_config(
            global_config_path().as_deref(),
            &project_config_path(&root),
        );

        ConfigureEnv {
            host_os: host_os_name(),
            root,
            config,
        }
    }
}

/// Receives progress from [`configure`].
pub trait Reporter {
    /// A setting has been resolved.
    fn setting(&mut self, label: &str, value: &str);

    /// A non-fatal problem.
    fn warn(&mut self, message: &str);

    /// `Makefile.conf` was (re)written.
    fn wrote(&mut self, path: &Path, speculative: bool);
}

impl Reporter for Shell {
    fn setting(&mut self, label: &str, value: &str) {
        Shell::setting(self, label, value);
    }

    fn warn(&mut self, message: &str) {
        Shell::warn(self, message);
    }

    fn wrote(&mut self, path: &Path, speculative: bool) {
        if !speculative {
            self.status(Status::Writing, path.display());
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ConfigureReport {
    pub config: Configuration,
    /// Path of the generated `Makefile.conf`.
    pub conf_path: PathBuf,
    /// Whether the clean step succeeded.
    pub cleaned: bool,
}

/// Resolve, validate and write the build configuration.
pub fn configure(
    opts: &ConfigureOptions,
    env: &ConfigureEnv,
    probe: &dyn Probe,
    reporter: &mut dyn Reporter,
) -> Result<ConfigureReport, ConfigureError> {
    let shell = env.config.shell();
    if !probe.probe(&which_command(shell)) {
        return Err(ConfigureError::ShellNotFound {
            shell: shell.to_string(),
        });
    }

    let os = resolve_os(opts.os.as_deref(), &env.host_os)?;
    reporter.setting("Operating System", os.as_str());

    let cxx = opts
        .cxx
        .clone()
        .or_else(|| env.config.defaults.cxx.clone())
        .unwrap_or_else(|| os.default_cxx().to_string());
    reporter.setting("CXX", &cxx);
    require_tool(probe, &cxx).map_err(|cxx| ConfigureError::CompilerNotFound { cxx })?;

    let toolchain = Toolchain::infer(&cxx);
    if let Some(requested) = opts.toolchain {
        if requested != toolchain {
            let message = format!(
                "--toolchain {} ignored; `{}` is a {} compiler",
                requested, cxx, toolchain
            );
            tracing::warn!("{}", message);
            reporter.warn(&message);
        }
    }
    reporter.setting("Toolchain", toolchain.as_str());

    let qmake = opts
        .qmake
        .clone()
        .or_else(|| env.config.defaults.qmake.clone())
        .unwrap_or_else(|| DEFAULT_QMAKE.to_string());
    require_tool(probe, &qmake).map_err(|qmake| ConfigureError::QmakeNotFound { qmake })?;
    reporter.setting("QMake", &qmake);

    let mut config = Configuration::new(os, cxx, qmake, opts.debug);
    reporter.setting("Optimization", config.optimization.as_str());
    tracing::info!(
        "resolved os={} cxx={} toolchain={} qmake={} opt={}",
        config.os,
        config.cxx,
        config.toolchain,
        config.qmake,
        config.optimization
    );

    // `make` needs a Makefile.conf to exist before it can clean or test.
    config.omp = true;
    let conf_path = write(env, &config)?;
    reporter.wrote(&conf_path, true);

    let cleaned = probe.probe(env.config.clean_command());
    if !cleaned {
        reporter.warn("encountered errors when cleaning build environment");
    }

    config.omp = probe.probe(env.config.omp_test_command());
    tracing::info!("openmp supported: {}", config.omp);
    reporter.setting("OpenMP Supported", make_bool(config.omp));

    let conf_path = write(env, &config)?;
    reporter.wrote(&conf_path, false);

    Ok(ConfigureReport {
        config,
        conf_path,
        cleaned,
    })
}

/// Pick the OS from the override or the host, rejecting anything unsupported.
pub fn resolve_os(requested: Option<&str>, host_os: &str) -> Result<Os, ConfigureError> {
    let name = requested.unwrap_or(host_os);
    name.parse::<Os>()
        .map_err(|os| ConfigureError::UnsupportedOs {
            os,
            supported: Os::supported_display(),
        })
}

/// Check that `tool` can be located; the tool name is handed back on failure.
fn require_tool(probe: &dyn Probe, tool: &str) -> Result<(), String> {
    if probe.probe(&which_command(tool)) {
        Ok(())
    } else {
        Err(tool.to_string())
    }
}

fn write(env: &ConfigureEnv, config: &Configuration) -> Result<PathBuf, ConfigureError> {
    write_conf(&env.root, config).map_err(|source| ConfigureError::Write {
        path: env.root.join(crate::ops::makefile_conf::CONF_FILE),
        source,
    })
}

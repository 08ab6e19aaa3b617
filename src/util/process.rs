//! Subprocess execution and presence probes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Shell used for probes unless configured otherwise.
pub const DEFAULT_SHELL: &str = "bash";

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute with output discarded and return the exit status only.
    pub fn status_quiet(&self) -> Result<ExitStatus> {
        let mut cmd = self.build_command();
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        cmd.status()
            .with_context(|| format!("failed to execute `{}`", self.display_command()))
    }

    /// Display the command for log and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Checks whether a shell command can be run successfully.
///
/// Only the exit status matters; output is never inspected.
pub trait Probe {
    fn probe(&self, command: &str) -> bool;
}

/// Runs each probe as `<shell> -c <command>` in a fresh subprocess.
#[derive(Debug, Clone)]
pub struct ShellProbe {
    shell: PathBuf,
    cwd: Option<PathBuf>,
}

impl ShellProbe {
    pub fn new(shell: impl AsRef<Path>) -> Self {
        ShellProbe {
            shell: shell.as_ref().to_path_buf(),
            cwd: None,
        }
    }

    /// Run probes from the given directory instead of the process cwd.
    pub fn in_dir(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }
}

impl Default for ShellProbe {
    fn default() -> Self {
        ShellProbe::new(DEFAULT_SHELL)
    }
}

impl Probe for ShellProbe {
    fn probe(&self, command: &str) -> bool {
        let mut pb = ProcessBuilder::new(&self.shell).args(["-c", command]);
        if let Some(ref cwd) = self.cwd {
            pb = pb.cwd(cwd);
        }

        match pb.status_quiet() {
            Ok(status) => {
                tracing::debug!("probe `{}` exited with {:?}", command, status.code());
                status.success()
            }
            Err(e) => {
                tracing::debug!("probe `{}` failed: {:#}", command, e);
                false
            }
        }
    }
}

/// Build the presence check for a tool, e.g. `which g++`.
pub fn which_command(tool: &str) -> String {
    format!("which {}", tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_status_quiet_reports_exit_code() {
        let status = ProcessBuilder::new("sh")
            .args(["-c", "echo hidden; exit 4"])
            .status_quiet()
            .unwrap();
        assert_eq!(status.code(), Some(4));
    }

    #[test]
    fn test_status_quiet_spawn_error_names_command() {
        let err = ProcessBuilder::new("/nonexistent/pwconfigure-tool")
            .args(["-c", "true"])
            .status_quiet()
            .unwrap_err();
        assert!(format!("{:#}", err).contains("`/nonexistent/pwconfigure-tool -c true`"));
    }

    #[test]
    fn test_display_command() {
        let pb = ProcessBuilder::new("bash").args(["-c", "which qmake"]);

        assert_eq!(pb.display_command(), "bash -c which qmake");
    }

    #[test]
    fn test_which_command() {
        assert_eq!(which_command("/usr/bin/g++-4.9"), "which /usr/bin/g++-4.9");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_probe_exit_status() {
        let probe = ShellProbe::new("sh");
        assert!(probe.probe("true"));
        assert!(!probe.probe("false"));
        assert!(!probe.probe("exit 3"));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_probe_ignores_output() {
        let probe = ShellProbe::new("sh");
        assert!(probe.probe("echo noisy; echo louder >&2"));
    }

    #[test]
    fn test_shell_probe_missing_shell_is_failure() {
        let probe = ShellProbe::new("/nonexistent/pwconfigure-shell");
        assert!(!probe.probe("true"));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_probe_runs_in_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker"), "").unwrap();

        let probe = ShellProbe::new("sh").in_dir(tmp.path());
        assert!(probe.probe("test -f marker"));
    }
}

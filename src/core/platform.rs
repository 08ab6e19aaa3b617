//! Host operating system detection.

use std::fmt;
use std::str::FromStr;

/// Operating systems the make-based build knows how to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Darwin,
}

impl Os {
    /// Every supported OS, in the order they are listed to users.
    pub const SUPPORTED: [Os; 2] = [Os::Linux, Os::Darwin];

    /// Name as written into `Makefile.conf`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
        }
    }

    /// Compiler used when none is given on the command line.
    pub fn default_cxx(&self) -> &'static str {
        match self {
            Os::Linux => "g++",
            Os::Darwin => "clang++",
        }
    }

    /// Comma-separated allow-list, e.g. `linux,darwin`.
    pub fn supported_display() -> String {
        Self::SUPPORTED
            .iter()
            .map(Os::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Lower-cased name of the platform this process runs on.
///
/// Uses the kernel-style name (`darwin`) rather than Rust's `macos`.
pub fn host_os_name() -> String {
    match std::env::consts::OS {
        "macos" => "darwin".to_string(),
        other => other.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cxx_per_os() {
        assert_eq!(Os::Linux.default_cxx(), "g++");
        assert_eq!(Os::Darwin.default_cxx(), "clang++");
    }

    #[test]
    fn test_parse_supported() {
        assert_eq!("linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("darwin".parse::<Os>().unwrap(), Os::Darwin);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("Linux".parse::<Os>().unwrap_err(), "Linux");
        assert_eq!("windows".parse::<Os>().unwrap_err(), "windows");
    }

    #[test]
    fn test_supported_display() {
        assert_eq!(Os::supported_display(), "linux,darwin");
    }

    #[test]
    fn test_host_os_name_is_lowercase() {
        let name = host_os_name();
        assert_eq!(name, name.to_lowercase());
        assert_ne!(name, "macos");
    }
}

//! CLI definitions using clap.

use clap::Parser;

use pwconfigure::util::shell::ColorChoice;
use pwconfigure::{ConfigureOptions, Toolchain};

/// Probe the host toolchain and write Makefile.conf
#[derive(Parser)]
#[command(name = "pwconfigure")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Debug build
    #[arg(short = 'g', long)]
    pub debug: bool,

    /// Compiler with optional path (e.g. clang++, /usr/bin/g++-4.9)
    #[arg(short, long, value_name = "PATH")]
    pub cxx: Option<String>,

    /// qmake with optional path (e.g. qmake, /usr/bin/qmake)
    #[arg(short, long, value_name = "PATH")]
    pub qmake: Option<String>,

    /// Toolchain (ignored: always inferred from the compiler)
    #[arg(long, value_enum)]
    pub toolchain: Option<Toolchain>,

    /// Operating system (linux, darwin)
    #[arg(long, value_name = "NAME")]
    pub os: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Coloring: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}

impl Cli {
    pub fn options(&self) -> ConfigureOptions {
        ConfigureOptions {
            debug: self.debug,
            cxx: self.cxx.clone(),
            qmake: self.qmake.clone(),
            toolchain: self.toolchain,
            os: self.os.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["pwconfigure", "-g", "-c", "clang++", "-q", "qmake-qt5"]).unwrap();
        let opts = cli.options();
        assert!(opts.debug);
        assert_eq!(opts.cxx.as_deref(), Some("clang++"));
        assert_eq!(opts.qmake.as_deref(), Some("qmake-qt5"));
        assert_eq!(opts.os, None);
        assert_eq!(opts.toolchain, None);
    }

    #[test]
    fn test_toolchain_values() {
        let cli = Cli::try_parse_from(["pwconfigure", "--toolchain", "llvm"]).unwrap();
        assert_eq!(cli.toolchain, Some(Toolchain::Llvm));

        assert!(Cli::try_parse_from(["pwconfigure", "--toolchain", "msvc"]).is_err());
    }

    #[test]
    fn test_os_is_free_form() {
        let cli = Cli::try_parse_from(["pwconfigure", "--os", "windows"]).unwrap();
        assert_eq!(cli.os.as_deref(), Some("windows"));
    }
}

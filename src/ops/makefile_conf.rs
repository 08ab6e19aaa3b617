//! `Makefile.conf` generation.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::configuration::{make_bool, Configuration};
use crate::util::fs::{normalize_path, write_string};

/// Name of the generated file at the project root.
pub const CONF_FILE: &str = "Makefile.conf";

/// Build rules included at the end of the generated file, relative to `PWHOME`.
pub const INCLUDE_PATH: &str = "etc/bld/Makefile.conf";

/// Render the file contents for `config` rooted at `home`.
///
/// Line order is fixed; the makefiles rely on `PWHOME` being defined before
/// the trailing include.
pub fn render(home: &Path, config: &Configuration) -> String {
    let mut out = String::new();
    let mut line = |key: &str, value: &str| {
        let _ = writeln!(out, "{} = {}", key, value);
    };

    line("PWHOME", &home.display().to_string());
    line("PWOS", config.os.as_str());
    line("PWTOOLCHAIN", config.toolchain.as_str());
    line("PWOMP", make_bool(config.omp));
    line("PWOPT", config.optimization.as_str());
    line("PWQMAKE", &config.qmake);
    line("CXX", &config.cxx);

    let _ = writeln!(out, "include ${{PWHOME}}/{}", INCLUDE_PATH);
    out
}

/// Overwrite `<root>/Makefile.conf` and return the path written.
pub fn write_conf(root: &Path, config: &Configuration) -> Result<PathBuf> {
    let home = normalize_path(root);
    let path = home.join(CONF_FILE);
    write_string(&path, &render(&home, config))?;
    tracing::debug!("wrote {} (PWOMP = {})", path.display(), make_bool(config.omp));
    Ok(path)
}

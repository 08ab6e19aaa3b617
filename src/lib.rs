//! pwconfigure - generates `Makefile.conf` for the make-based build
//!
//! Detects the host OS, locates the C++ compiler and qmake, checks whether
//! OpenMP programs build, and records the result as `KEY = VALUE` lines for
//! the makefiles to include.

pub mod core;
pub mod ops;
pub mod util;

/// Test doubles for the probe and reporter seams.
#[cfg(test)]
pub mod test_support;

pub use self::core::{Configuration, Optimization, Os, Toolchain};
pub use ops::{configure, ConfigureEnv, ConfigureError, ConfigureOptions, ConfigureReport};
pub use util::process::{Probe, ShellProbe};

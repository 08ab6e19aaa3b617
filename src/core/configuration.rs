//! The resolved build configuration for one run.

use crate::core::{Optimization, Os, Toolchain};

/// Every setting written to `Makefile.conf`.
///
/// Built once per run by the configure pipeline; the typed `os` and
/// `toolchain` fields can only hold supported values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub os: Os,
    pub cxx: String,
    pub toolchain: Toolchain,
    pub qmake: String,
    pub optimization: Optimization,
    pub omp: bool,
}

impl Configuration {
    /// Create a configuration with the toolchain inferred from `cxx`.
    ///
    /// OpenMP is assumed to work until probed.
    pub fn new(os: Os, cxx: impl Into<String>, qmake: impl Into<String>, debug: bool) -> Self {
        let cxx = cxx.into();
        Configuration {
            os,
            toolchain: Toolchain::infer(&cxx),
            cxx,
            qmake: qmake.into(),
            optimization: Optimization::from_debug(debug),
            omp: true,
        }
    }
}

/// Makefile spelling of a boolean.
pub(crate) fn make_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

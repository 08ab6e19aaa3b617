//! Compiler family classification.

use std::fmt;

use clap::ValueEnum;

/// Compiler family, as understood by the build makefiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Toolchain {
    Gcc,
    Llvm,
}

impl Toolchain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Toolchain::Gcc => "gcc",
            Toolchain::Llvm => "llvm",
        }
    }

    /// Infer the family from a compiler invocation.
    ///
    /// Anything mentioning `clang` is LLVM; everything else is treated as GCC.
    pub fn infer(cxx: &str) -> Self {
        if cxx.contains("clang") {
            Toolchain::Llvm
        } else {
            Toolchain::Gcc
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

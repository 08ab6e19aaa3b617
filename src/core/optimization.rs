use std::fmt;

/// Optimization label passed to the makefiles as `PWOPT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Optimization {
    Debug,
    #[default]
    Optimized,
}

impl Optimization {
    pub fn from_debug(debug: bool) -> Self {
        if debug {
            Optimization::Debug
        } else {
            Optimization::Optimized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Optimization::Debug => "debug",
            Optimization::Optimized => "optimized",
        }
    }
}

impl fmt::Display for Optimization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

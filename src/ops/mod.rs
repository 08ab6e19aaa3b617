//! High-level operations.

pub mod configure;
pub mod makefile_conf;

pub use configure::{
    configure, resolve_os, ConfigureEnv, ConfigureError, ConfigureOptions, ConfigureReport,
    Reporter,
};
pub use makefile_conf::{render, write_conf, CONF_FILE, INCLUDE_PATH};

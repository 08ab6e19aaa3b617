//! Core types describing a build configuration.

pub mod configuration;
pub mod optimization;
pub mod platform;
pub mod toolchain;

pub use configuration::Configuration;
pub use optimization::Optimization;
pub use platform::Os;
pub use toolchain::Toolchain;

//! Error types for the simulation driver.
//!
//! [`SimError`] wraps every failure mode of startup and the scripted run so
//! `main` can propagate with `?`.

/// Top-level error for the `reap-sim` binary.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: reap_core::ConfigError,
    },

    /// The demo farm could not be built.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: reap_world::WorldError,
    },

    /// The `sim` section of the config file is malformed.
    #[error("sim settings error: {message}")]
    Settings {
        /// Description of the problem.
        message: String,
    },
}

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or built-in defaults)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → read once at startup by main
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; pins are claimed once per process
//! - All fields have defaults so the daemon runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    ButtonsConfig, CommandSpec, CommandsConfig, LogFormat, MonitorConfig, ObservabilityConfig,
    RuntimeConfig,
};
pub use validation::{validate_config, ValidationError};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → DispatchConfig::to_options → SharedDispatcher
//!
//! On www root change (changes_reload):
//!     watcher.rs detects change
//!     → SharedDispatcher::rebuild
//!     → atomic swap of the routing tree
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only the routing tree reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{AppConfig, DispatchConfig, ListenerConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::SourceWatcher;

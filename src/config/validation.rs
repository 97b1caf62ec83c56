//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the www root exists and is a directory
//! - Check index names and dynamic extensions are plain file name parts
//! - Check addresses parse and the log level is known
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::schema::AppConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("www root {} does not exist", .0.display())]
    MissingRoot(PathBuf),

    #[error("www root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("index name {0:?} must be a non-empty file name")]
    InvalidIndex(String),

    #[error("dynamic extension {0:?} must be non-empty without '/' or '.'")]
    InvalidExtension(String),

    #[error("{field} {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Validate `config`, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let dispatch = &config.dispatch;

    if !dispatch.www_root.exists() {
        errors.push(ValidationError::MissingRoot(dispatch.www_root.clone()));
    } else if !dispatch.www_root.is_dir() {
        errors.push(ValidationError::RootNotDirectory(dispatch.www_root.clone()));
    }

    for index in &dispatch.indices {
        if index.is_empty() || index.contains('/') {
            errors.push(ValidationError::InvalidIndex(index.clone()));
        }
    }

    for ext in &dispatch.dynamic_extensions {
        if ext.is_empty() || ext.contains('/') || ext.contains('.') {
            errors.push(ValidationError::InvalidExtension(ext.clone()));
        }
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! dispatcher service. All types derive Serde traits for deserialization
//! from config files, and every field has a default so an empty file is a
//! valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dispatch::{
    CollisionPolicy, DispatcherOptions, DynamicExtensions, SkipHidden, SkipNothing,
    DEFAULT_INDICES,
};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Routing tree construction.
    pub dispatch: DispatchConfig,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How the www root is turned into a routing tree.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Directory holding the resources.
    pub www_root: PathBuf,

    /// Index file candidates, first present wins.
    pub indices: Vec<String>,

    /// File extensions marking dynamic resources.
    pub dynamic_extensions: Vec<String>,

    /// Names accepted as the typecast part of `%name.type` entries.
    pub typecasters: Vec<String>,

    /// What to do when two entries answer to the same name.
    pub collision_policy: CollisionPolicy,

    /// Leave dot files out of the tree (`.well-known` is always kept).
    pub skip_hidden: bool,

    /// Rebuild the tree when the www root changes.
    pub changes_reload: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            www_root: PathBuf::from("www"),
            indices: DEFAULT_INDICES.iter().map(|name| name.to_string()).collect(),
            dynamic_extensions: vec!["spt".to_string()],
            typecasters: vec!["int".to_string(), "float".to_string()],
            collision_policy: CollisionPolicy::Permissive,
            skip_hidden: true,
            changes_reload: false,
        }
    }
}

impl DispatchConfig {
    /// Build options for a dispatcher from this section.
    pub fn to_options(&self) -> DispatcherOptions {
        let options = DispatcherOptions::new(&self.www_root)
            .is_dynamic(DynamicExtensions::new(self.dynamic_extensions.iter().cloned()))
            .indices(self.indices.iter().cloned())
            .typecasters(self.typecasters.clone())
            .collisions(self.collision_policy);
        if self.skip_hidden {
            options.skipper(SkipHidden)
        } else {
            options.skipper(SkipNothing)
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use crate::types::Config;

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

/// Every variable is optional; the tool takes no CLI flags and runs entirely
/// off the ambient cluster configuration.
pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let output_dir = env
        .get_var("OUTPUT_DIR")
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let cluster_name = env.get_var("CLUSTER_NAME").filter(|v| !v.trim().is_empty());

    let events_limit: usize = env
        .get_var("EVENTS_LIMIT")
        .and_then(|v| v.parse().ok())
        .unwrap_or(50);

    Ok(Config {
        output_dir,
        cluster_name,
        events_limit,
    })
}

//! # Configuration
//!
//! A minimal, framework-agnostic configuration store based on string
//! key/value pairs. Crates read what they need from a snapshot and turn it
//! into typed settings.
//!
//! ## Setting and reading values
//! ```rust
//! use crm_core::CrmConfig;
//! let mut config = CrmConfig::new();
//!
//! config.set("notify.from", "admin@test.com");
//!
//! assert_eq!(config.get("notify.from"), Some("admin@test.com"));
//! ```
//!
//! ## Environment overrides
//! [`load_env_config`] copies every variable starting with a prefix into
//! the store, lowercased, with `__` mapped to `.`:
//!
//! ```bash
//! export CRM__NOTIFY__FROM=crm@example.com   # -> notify.from
//! ```

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct CrmConfig {
    values: HashMap<String, String>,
}

impl CrmConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn snapshot(&self) -> CrmConfigSnapshot {
        CrmConfigSnapshot::new(self.values.clone())
    }
}

/// Overlay environment variables that start with `prefix` onto `config`.
///
/// `CRM__LEADS__OTP_LENGTH=24` with prefix `CRM__` becomes `leads.otp_length`.
pub fn load_env_config(config: &mut CrmConfig, prefix: &str) {
    load_config_from(config, prefix, std::env::vars());
}

fn load_config_from<I>(config: &mut CrmConfig, prefix: &str, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        if let Some(stripped) = key.strip_prefix(prefix) {
            let normalized = stripped.to_lowercase().replace("__", ".");
            if normalized.is_empty() {
                continue;
            }
            tracing::debug!(key = %normalized, "config override from environment");
            config.set(normalized, value);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrmConfigSnapshot {
    map: HashMap<String, String>,
}

impl CrmConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.trim().parse::<usize>().ok())
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse::<u32>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.trim().parse::<bool>().ok())
    }

    /// Comma separated list; blank entries are skipped.
    pub fn get_list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|v| {
            v.split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect()
        })
    }
}

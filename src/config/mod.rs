// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::mockup::{PlacementRule, PlacementTable};

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Default image fetch timeout (30 seconds)
fn default_fetch_timeout() -> u64 {
    30
}

/// Default maximum accepted image payload (25 MB)
fn default_max_image_bytes() -> usize {
    25 * 1024 * 1024
}

/// Default store upload timeout (60 seconds)
fn default_store_timeout() -> u64 {
    60
}

fn default_store_folder() -> String {
    "mockups".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub store: StoreConfig,
    /// Product-type name to placement geometry. Falls back to the built-in
    /// table when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placements: Option<HashMap<String, PlacementRule>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout for image fetches in seconds (default: 30)
    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u64,

    /// Maximum accepted image payload in bytes (default: 25 MB)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_fetch_timeout(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Unsigned upload endpoint of the external image store
    pub upload_url: String,

    /// Upload preset forwarded with each upload, if the store requires one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_preset: Option<String>,

    /// Folder composites are stored under (default: "mockups")
    #[serde(default = "default_store_folder")]
    pub folder: String,

    /// Request timeout for uploads in seconds (default: 60)
    #[serde(default = "default_store_timeout")]
    pub timeout_seconds: u64,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        // Now perform the substitution (we know all vars exist)
        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap() // Safe because we checked above
        });

        let config: Config = serde_yaml::from_str(&substituted).map_err(|e| e.to_string())?;

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.store.upload_url.is_empty() {
            return Err("Store upload_url cannot be empty".to_string());
        }

        if !self.store.upload_url.starts_with("https://")
            && !self.store.upload_url.starts_with("http://")
        {
            return Err(format!(
                "Store upload_url '{}' must be an http(s) URL",
                self.store.upload_url
            ));
        }

        if self.fetch.timeout_seconds == 0 {
            return Err("Fetch timeout must be > 0 seconds".to_string());
        }

        if self.fetch.max_image_bytes == 0 {
            return Err("Fetch max_image_bytes must be > 0".to_string());
        }

        if self.store.timeout_seconds == 0 {
            return Err("Store timeout must be > 0 seconds".to_string());
        }

        if let Some(placements) = &self.placements {
            if placements.is_empty() {
                return Err(
                    "Placement table cannot be empty. Omit the placements section to use the built-in catalog.".to_string(),
                );
            }

            for (name, rule) in placements {
                if name.trim().is_empty() {
                    return Err("Placement rule name cannot be empty".to_string());
                }

                if rule.width == 0 || rule.height == 0 {
                    return Err(format!(
                        "Placement rule '{}' has a degenerate {}x{} box",
                        name, rule.width, rule.height
                    ));
                }
            }
        }

        Ok(())
    }

    /// The placement table this process runs with: configured rules when
    /// present, the built-in catalog otherwise.
    pub fn placement_table(&self) -> PlacementTable {
        match &self.placements {
            Some(rules) => PlacementTable::new(rules.clone()),
            None => PlacementTable::builtin(),
        }
    }
}

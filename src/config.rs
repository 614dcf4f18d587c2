//! Configuration for the generator and its remote service

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str
  = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Environment variables searched for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const MODEL_ENV_VAR: &str = "SKETCHFORGE_MODEL";
const API_BASE_ENV_VAR: &str = "SKETCHFORGE_API_BASE";

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig
{   /// Model identifier
    pub model: String
  , /// API base URL
    pub api_base: String
  , /// Explicit API key; when unset the environment is read on
    /// first use
    #[serde(skip_serializing)]
    pub api_key: Option<String>
  , /// Environment variables consulted for the key
    pub api_key_env: Vec<String>
  , /// Sampling temperature
    pub temperature: f32
  , /// Transport timeout in seconds; none by default
    pub timeout_secs: Option<u64>
  , /// Enable detailed logging of requests
    pub verbose: bool
}

impl Default for GeneratorConfig
{   fn default() -> Self
    {   GeneratorConfig
        {   model: DEFAULT_MODEL.to_string()
          , api_base: DEFAULT_API_BASE.to_string()
          , api_key: None
          , api_key_env: API_KEY_ENV_VARS
              .iter()
              .map(|v| v.to_string())
              .collect()
          , temperature: DEFAULT_TEMPERATURE
          , timeout_secs: None
          , verbose: false
        }
    }
}

impl GeneratorConfig
{   /// Load overrides from a JSON file; missing fields keep defaults
    pub fn from_json_file(path: impl AsRef<Path>)
      -> Result<Self, crate::error::Error>
    {   let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        let config: GeneratorConfig = serde_json::from_str(&text)
          .map_err(|e| {
            crate::error::Error::InvalidConfiguration(
              format!("{}: {}", path.display(), e)
            )
          })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply model and endpoint overrides from the environment
    pub fn apply_env(mut self) -> Self
    {   if let Ok(model) = std::env::var(MODEL_ENV_VAR)
        {   debug!("Model overridden by {}", MODEL_ENV_VAR);
            self.model = model;
        }
        if let Ok(base) = std::env::var(API_BASE_ENV_VAR)
        {   debug!("API base overridden by {}", API_BASE_ENV_VAR);
            self.api_base = base;
        }
        self
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if !(0.0..=2.0).contains(&self.temperature)
        {   return Err(crate::error::Error::InvalidConfiguration(
              format!(
                "temperature {} outside 0.0..=2.0",
                self.temperature
              )
            ));
        }
        if self.model.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model must not be empty".to_string()
            ));
        }
        if self.api_key_env.is_empty() && self.api_key.is_none()
        {   warn!("No API key and no key environment variables configured");
        }
        Ok(())
    }

    /// Resolve the API key: explicit value first, then each
    /// configured environment variable in order
    pub fn resolve_api_key(&self) -> Result<String, crate::error::Error>
    {   if let Some(key) = &self.api_key
        {   debug!("Using configured API key");
            return Ok(key.clone());
        }
        for var in &self.api_key_env
        {   match std::env::var(var)
            {   Ok(key) if !key.trim().is_empty() => {
                  debug!("Using API key from {}", var);
                  return Ok(key);
                }
              , _ => continue
            }
        }
        Err(crate::error::Error::MissingApiKey(
          format!("set one of: {}", self.api_key_env.join(", "))
        ))
    }
}

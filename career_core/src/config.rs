//! Agent configuration
//!
//! Loaded from an optional YAML file. Every field has a default so an empty
//! file (or no file) reproduces the built-in behaviour.
//!
//! ```yaml
//! max_gap_items: 2
//! credential_env: GEMINI_API_KEY
//! lookup:
//!   type: command
//!   program: ./market_lookup.sh
//!   args: []
//!   timeout_ms: 5000
//! knowledge_base:
//!   - category: Visualization
//!     keywords: [Tableau]
//!     resource: Tableau Desktop Specialist Training
//!     kind: course
//! ```

use crate::command_lookup::CommandMarketLookup;
use crate::knowledge::{self, KnowledgeBase, KnowledgeEntry};
use crate::lookup::{self, MarketDataLookup, MarketEntry, StaticMarketLookup};
use crate::market::{AnalyzerConfig, MAX_GAP_ITEMS};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CREDENTIAL_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LookupSettings {
    /// Table lookup; `entries` replaces the built-in table when present
    Static {
        #[serde(default)]
        entries: Option<Vec<MarketEntry>>,
    },
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

impl Default for LookupSettings {
    fn default() -> Self {
        LookupSettings::Static { entries: None }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_max_gap_items() -> usize {
    MAX_GAP_ITEMS
}

fn default_credential_env() -> String {
    DEFAULT_CREDENTIAL_ENV.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_max_gap_items")]
    pub max_gap_items: usize,
    #[serde(default = "default_credential_env")]
    pub credential_env: String,
    #[serde(default)]
    pub lookup: LookupSettings,
    /// Replaces the built-in knowledge base when present
    #[serde(default)]
    pub knowledge_base: Option<Vec<KnowledgeEntry>>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_gap_items: default_max_gap_items(),
            credential_env: default_credential_env(),
            lookup: LookupSettings::default(),
            knowledge_base: None,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_GAP_ITEMS).contains(&self.max_gap_items) {
            return Err(ConfigError::Invalid(format!(
                "max_gap_items must be between 1 and {}, got {}",
                MAX_GAP_ITEMS, self.max_gap_items
            )));
        }
        if let LookupSettings::Command { program, timeout_ms, .. } = &self.lookup {
            if program.trim().is_empty() {
                return Err(ConfigError::Invalid("lookup.program is empty".to_string()));
            }
            if *timeout_ms == 0 {
                return Err(ConfigError::Invalid(
                    "lookup.timeout_ms must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            max_gap_items: self.max_gap_items,
        }
    }

    pub fn build_lookup(&self) -> Box<dyn MarketDataLookup> {
        match &self.lookup {
            LookupSettings::Static { entries } => {
                let entries = entries.clone().unwrap_or_else(lookup::default_market_table);
                Box::new(StaticMarketLookup::new(entries))
            }
            LookupSettings::Command { program, args, timeout_ms } => Box::new(
                CommandMarketLookup::new(program, args.clone(), Duration::from_millis(*timeout_ms)),
            ),
        }
    }

    pub fn build_knowledge_base(&self) -> KnowledgeBase {
        let entries = self
            .knowledge_base
            .clone()
            .unwrap_or_else(knowledge::default_entries);
        KnowledgeBase::new(entries)
    }

    /// Model credential from the environment, if set and non-empty
    pub fn credential(&self) -> Option<String> {
        std::env::var(&self.credential_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

pub fn load_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    // an empty document deserializes to unit, not a mapping
    let value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
    let config: AgentConfig = if value.is_null() {
        AgentConfig::default()
    } else {
        serde_yaml::from_value(value)?
    };
    config.validate()?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

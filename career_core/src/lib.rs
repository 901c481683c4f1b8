//! Career Gap Pipeline
//!
//! Three typed stages run in a fixed order:
//! - Profile Extractor: raw attributes → validated profile
//! - Market Analyzer: profile + market lookup → skill gap analysis
//! - Strategy Synthesizer: gap analysis + knowledge base → roadmap report

pub mod command_lookup;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod lookup;
pub mod market;
pub mod matching;
pub mod pipeline;
pub mod profile;
pub mod strategy;
pub mod types;

pub use command_lookup::CommandMarketLookup;
pub use config::{load_config, AgentConfig, ConfigError, LookupSettings};
pub use error::{CollaboratorError, PipelineError};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, ResourceKind};
pub use lookup::{LookupError, MarketDataLookup, MarketEntry, StaticMarketLookup};
pub use market::{analyze_market, AnalyzerConfig};
pub use pipeline::{CareerPipeline, PipelineOutcome};
pub use profile::{extract_profile, ValidationError};
pub use strategy::{synthesize_strategy, Report, Verdict};
pub use types::*;

pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        assert_eq!(get_version(), "0.1.0");
    }
}

//! Market Data Lookup
//!
//! The capability the Market Analyzer calls with a target role. The core
//! only depends on [`MarketDataLookup`]; implementations may be a static
//! table, an external command, or a test double.

use crate::matching::contains_term;
use crate::types::MarketSnapshot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Failed to execute lookup: {0}")]
    ExecutionFailed(String),

    #[error("Lookup timed out after {0} ms")]
    Timeout(u64),

    #[error("Invalid JSON output: {0}")]
    InvalidJson(String),

    #[error("Malformed snapshot: {0} required skills but {1} mandatory flags")]
    MalformedSnapshot(usize, usize),
}

/// Source of market data for a role
///
/// Must be deterministic for a given role and must not block indefinitely.
/// `Ok(None)` means the source has no data for the role.
pub trait MarketDataLookup {
    fn name(&self) -> &str;

    fn lookup(&self, role: &str) -> Result<Option<MarketSnapshot>, LookupError>;
}

/// Reject snapshots whose parallel sequences disagree
pub fn check_snapshot(snapshot: &MarketSnapshot) -> Result<(), LookupError> {
    if snapshot.is_well_formed() {
        Ok(())
    } else {
        Err(LookupError::MalformedSnapshot(
            snapshot.required_skills.len(),
            snapshot.mandatory_flags.len(),
        ))
    }
}

// ============================================================
// STATIC TABLE
// ============================================================

/// One row of the static market table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEntry {
    /// Matched as a case-insensitive substring of the requested role
    pub role_pattern: String,
    pub snapshot: MarketSnapshot,
}

/// Table-backed lookup; the first matching pattern wins
#[derive(Debug, Clone)]
pub struct StaticMarketLookup {
    entries: Vec<MarketEntry>,
}

impl StaticMarketLookup {
    pub fn new(entries: Vec<MarketEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MarketEntry] {
        &self.entries
    }
}

impl Default for StaticMarketLookup {
    fn default() -> Self {
        Self::new(default_market_table())
    }
}

impl MarketDataLookup for StaticMarketLookup {
    fn name(&self) -> &str {
        "static"
    }

    fn lookup(&self, role: &str) -> Result<Option<MarketSnapshot>, LookupError> {
        let found = self
            .entries
            .iter()
            .find(|e| contains_term(role, &e.role_pattern))
            .map(|e| e.snapshot.clone());

        if let Some(snapshot) = &found {
            check_snapshot(snapshot)?;
        }
        Ok(found)
    }
}

/// Built-in market data for the roles the agent knows about
pub fn default_market_table() -> Vec<MarketEntry> {
    vec![
        MarketEntry {
            role_pattern: "Data Analyst".to_string(),
            snapshot: MarketSnapshot::new(
                &[
                    ("Advanced SQL", true),
                    ("Tableau Visualization", true),
                    ("Python (Pandas/NumPy)", true),
                    ("Cloud Proficiency (AWS/Azure)", false),
                ],
                "$75,000 - $95,000",
            ),
        },
        MarketEntry {
            role_pattern: "Software Engineer".to_string(),
            snapshot: MarketSnapshot::new(
                &[
                    ("Python/GoLang", true),
                    ("Docker/Kubernetes", true),
                    ("AWS/GCP Services", true),
                ],
                "$120,000 - $160,000",
            ),
        },
    ]
}

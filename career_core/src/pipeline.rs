//! Career Pipeline
//!
//! Runs profile → market → strategy strictly in sequence. Each stage only
//! starts once the previous stage has produced its record; the first
//! failure aborts the run and no partial output is returned.

use crate::error::PipelineError;
use crate::knowledge::KnowledgeBase;
use crate::lookup::MarketDataLookup;
use crate::market::{analyze_market, AnalyzerConfig};
use crate::profile::extract_profile;
use crate::strategy::{synthesize_strategy, Report};
use crate::types::{MarketAnalysis, RawProfile, UserProfile};
use serde::Serialize;
use std::time::Instant;

/// Every stage record from a successful run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub profile: UserProfile,
    pub analysis: MarketAnalysis,
    pub report: Report,
    pub duration_ms: u64,
}

pub struct CareerPipeline<'a> {
    lookup: &'a dyn MarketDataLookup,
    knowledge: &'a KnowledgeBase,
    config: AnalyzerConfig,
}

impl<'a> CareerPipeline<'a> {
    pub fn new(
        lookup: &'a dyn MarketDataLookup,
        knowledge: &'a KnowledgeBase,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            lookup,
            knowledge,
            config,
        }
    }

    pub fn run(&self, raw: &RawProfile) -> Result<PipelineOutcome, PipelineError> {
        let start_time = Instant::now();
        log::info!("[pipeline] ========== RUN START ==========");

        let profile = extract_profile(raw).map_err(|e| {
            log::error!("[pipeline:profile] validation failed: {}", e);
            e
        })?;

        let analysis = analyze_market(&profile, self.lookup, &self.config).map_err(|e| {
            log::error!("[pipeline:market] {}", e);
            e
        })?;

        let report = synthesize_strategy(&analysis, self.knowledge).map_err(|e| {
            log::error!("[pipeline:strategy] {}", e);
            e
        })?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        log::info!("[pipeline] ========== RUN END ({} ms) ==========", duration_ms);

        Ok(PipelineOutcome {
            profile,
            analysis,
            report,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollaboratorError;
    use crate::lookup::LookupError;
    use crate::profile::ValidationError;
    use crate::types::MarketSnapshot;
    use std::cell::Cell;

    /// Counts calls so tests can prove stage 2 never ran
    struct CountingLookup {
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingLookup {
        fn new(fail: bool) -> Self {
            Self {
                calls: Cell::new(0),
                fail,
            }
        }
    }

    impl MarketDataLookup for CountingLookup {
        fn name(&self) -> &str {
            "counting"
        }

        fn lookup(&self, _role: &str) -> Result<Option<MarketSnapshot>, LookupError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(LookupError::ExecutionFailed("search API unavailable".to_string()))
            } else {
                Ok(Some(MarketSnapshot::new(&[("SQL", true)], "$1")))
            }
        }
    }

    #[test]
    fn test_validation_aborts_before_lookup() {
        let lookup = CountingLookup::new(false);
        let kb = KnowledgeBase::default();
        let pipeline = CareerPipeline::new(&lookup, &kb, AnalyzerConfig::default());

        let err = pipeline
            .run(&RawProfile::new("Python", "Analyst", "-3"))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::NegativeYears(-3))
        ));
        assert_eq!(lookup.calls.get(), 0);
    }

    #[test]
    fn test_lookup_failure_aborts() {
        let lookup = CountingLookup::new(true);
        let kb = KnowledgeBase::default();
        let pipeline = CareerPipeline::new(&lookup, &kb, AnalyzerConfig::default());

        let err = pipeline
            .run(&RawProfile::new("Python", "Analyst", "1"))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Collaborator(CollaboratorError::Lookup { .. })
        ));
        assert!(err.to_string().contains("search API unavailable"));
        assert_eq!(lookup.calls.get(), 1);
    }

    #[test]
    fn test_stage_records_are_linked() {
        let lookup = CountingLookup::new(false);
        let kb = KnowledgeBase::default();
        let pipeline = CareerPipeline::new(&lookup, &kb, AnalyzerConfig::default());

        let outcome = pipeline
            .run(&RawProfile::new("Python", "Analyst", "1"))
            .unwrap();
        assert_eq!(outcome.analysis.target_role, outcome.profile.target_role);
        assert_eq!(outcome.report.target_role, outcome.analysis.target_role);
        assert_eq!(outcome.analysis.critical_skill_gap, vec!["SQL"]);
        assert_eq!(
            outcome.report.resources[0].resource.as_deref(),
            Some("Advanced SQL Mastery for Data Science")
        );
    }
}

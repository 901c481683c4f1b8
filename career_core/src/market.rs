//! Market Analyzer
//!
//! Stage 2 of the pipeline. Compares the user's declared skills against the
//! lookup's snapshot for the target role and keeps the most salient gaps.
//!
//! Salience: mandatory requirements first, then optional ones, each group
//! in the order the snapshot lists them.

use crate::error::CollaboratorError;
use crate::lookup::MarketDataLookup;
use crate::matching::terms_overlap;
use crate::types::{MarketAnalysis, MarketSnapshot, SkillCoverage, UserProfile};

/// Upper bound on reported gap items
pub const MAX_GAP_ITEMS: usize = 3;

/// Requirements used when the lookup has nothing for a role
pub const GENERIC_REQUIREMENTS: [&str; 3] =
    ["communication", "problem-solving", "continuous learning"];

pub const FALLBACK_SALARY: &str = "Not available";

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Clamped to 1..=3
    pub max_gap_items: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_gap_items: MAX_GAP_ITEMS,
        }
    }
}

impl AnalyzerConfig {
    fn gap_limit(&self) -> usize {
        self.max_gap_items.clamp(1, MAX_GAP_ITEMS)
    }
}

pub fn fallback_snapshot() -> MarketSnapshot {
    MarketSnapshot {
        required_skills: GENERIC_REQUIREMENTS.iter().map(|s| s.to_string()).collect(),
        mandatory_flags: vec![true; GENERIC_REQUIREMENTS.len()],
        salary_range: FALLBACK_SALARY.to_string(),
    }
}

/// Run the gap analysis for a validated profile
pub fn analyze_market(
    profile: &UserProfile,
    lookup: &dyn MarketDataLookup,
    config: &AnalyzerConfig,
) -> Result<MarketAnalysis, CollaboratorError> {
    log::info!(
        "[pipeline:market] lookup '{}' activated for '{}'",
        lookup.name(),
        profile.target_role
    );

    let snapshot = lookup
        .lookup(&profile.target_role)
        .map_err(|error| CollaboratorError::Lookup {
            source_name: lookup.name().to_string(),
            role: profile.target_role.clone(),
            error,
        })?;

    // an empty requirement list carries no market data either
    let (snapshot, used_fallback) = match snapshot {
        Some(s) if !s.required_skills.is_empty() => (s, false),
        _ => {
            log::warn!(
                "[pipeline:market] no market data for '{}', using generic requirements",
                profile.target_role
            );
            (fallback_snapshot(), true)
        }
    };

    Ok(gap_analysis(profile, &snapshot, used_fallback, config))
}

/// Deterministic gap computation over a fixed snapshot
pub fn gap_analysis(
    profile: &UserProfile,
    snapshot: &MarketSnapshot,
    used_fallback: bool,
    config: &AnalyzerConfig,
) -> MarketAnalysis {
    let tokens = profile.skill_tokens();
    let is_covered = |skill: &str| tokens.iter().any(|t| terms_overlap(skill, t));

    let mut coverage = SkillCoverage::default();
    let mut mandatory_missing = Vec::new();
    let mut optional_missing = Vec::new();

    for (skill, mandatory) in snapshot.requirements() {
        coverage.required_total += 1;
        if mandatory {
            coverage.mandatory_total += 1;
        }
        if is_covered(skill) {
            continue;
        }
        coverage.missing_total += 1;
        if mandatory {
            coverage.mandatory_missing += 1;
            mandatory_missing.push(skill.to_string());
        } else {
            optional_missing.push(skill.to_string());
        }
    }

    let critical_skill_gap: Vec<String> = mandatory_missing
        .into_iter()
        .chain(optional_missing)
        .take(config.gap_limit())
        .collect();

    log::info!(
        "[pipeline:market] {} of {} requirements missing, reporting {}",
        coverage.missing_total,
        coverage.required_total,
        critical_skill_gap.len()
    );

    MarketAnalysis {
        target_role: profile.target_role.clone(),
        required_skills_found: snapshot.required_skills.clone(),
        critical_skill_gap,
        average_salary_range: snapshot.salary_range.clone(),
        coverage,
        used_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{LookupError, StaticMarketLookup};

    struct NoData;

    impl MarketDataLookup for NoData {
        fn name(&self) -> &str {
            "empty"
        }

        fn lookup(&self, _role: &str) -> Result<Option<MarketSnapshot>, LookupError> {
            Ok(None)
        }
    }

    struct Broken;

    impl MarketDataLookup for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn lookup(&self, _role: &str) -> Result<Option<MarketSnapshot>, LookupError> {
            Err(LookupError::Timeout(50))
        }
    }

    struct EmptySnapshot;

    impl MarketDataLookup for EmptySnapshot {
        fn name(&self) -> &str {
            "empty-snapshot"
        }

        fn lookup(&self, _role: &str) -> Result<Option<MarketSnapshot>, LookupError> {
            Ok(Some(MarketSnapshot::new(&[], "")))
        }
    }

    fn profile(skills: &str, role: &str) -> UserProfile {
        UserProfile {
            current_skills: skills.to_string(),
            target_role: role.to_string(),
            years_of_experience: 2,
        }
    }

    #[test]
    fn test_gap_orders_mandatory_first() {
        let snapshot = MarketSnapshot::new(
            &[("Cloud", false), ("SQL", true), ("Tableau", true), ("Python", false)],
            "$1",
        );
        let analysis = gap_analysis(
            &profile("Excel", "Analyst"),
            &snapshot,
            false,
            &AnalyzerConfig::default(),
        );
        assert_eq!(analysis.critical_skill_gap, vec!["SQL", "Tableau", "Cloud"]);
        assert_eq!(analysis.coverage.missing_total, 4);
        assert_eq!(analysis.coverage.mandatory_missing, 2);
    }

    #[test]
    fn test_gap_excludes_declared_skills() {
        let snapshot = MarketSnapshot::new(
            &[("Advanced SQL", true), ("Python (Pandas/NumPy)", true), ("Excel", false)],
            "$1",
        );
        let p = profile("python, basic excel", "Analyst");
        let analysis = gap_analysis(&p, &snapshot, false, &AnalyzerConfig::default());
        assert_eq!(analysis.critical_skill_gap, vec!["Advanced SQL"]);
        for gap in &analysis.critical_skill_gap {
            assert!(!p.skill_tokens().iter().any(|t| terms_overlap(gap, t)));
        }
    }

    #[test]
    fn test_gap_limit_is_clamped() {
        let snapshot = MarketSnapshot::new(
            &[("A1", true), ("B2", true), ("C3", true), ("D4", true)],
            "$1",
        );
        let p = profile("Rust", "Any");

        let wide = AnalyzerConfig { max_gap_items: 10 };
        assert_eq!(
            gap_analysis(&p, &snapshot, false, &wide).critical_skill_gap.len(),
            3
        );

        let zero = AnalyzerConfig { max_gap_items: 0 };
        assert_eq!(
            gap_analysis(&p, &snapshot, false, &zero).critical_skill_gap,
            vec!["A1"]
        );
    }

    #[test]
    fn test_no_data_falls_back_to_generic_set() {
        let analysis =
            analyze_market(&profile("Rust", "Pastry Chef"), &NoData, &AnalyzerConfig::default())
                .unwrap();
        assert!(analysis.used_fallback);
        assert_eq!(analysis.average_salary_range, FALLBACK_SALARY);
        assert_eq!(analysis.critical_skill_gap, GENERIC_REQUIREMENTS.to_vec());
    }

    #[test]
    fn test_empty_snapshot_falls_back_to_generic_set() {
        let p = profile("Baking", "Pastry Chef");
        let analysis = analyze_market(&p, &EmptySnapshot, &AnalyzerConfig::default()).unwrap();
        assert!(analysis.used_fallback);
        assert_eq!(analysis.average_salary_range, FALLBACK_SALARY);
        assert_eq!(analysis.critical_skill_gap, GENERIC_REQUIREMENTS.to_vec());
        assert_eq!(analysis.coverage.missing_total, 3);
    }

    #[test]
    fn test_fallback_respects_declared_skills() {
        let p = profile("good communication, continuous learning", "Pastry Chef");
        let analysis = analyze_market(&p, &NoData, &AnalyzerConfig::default()).unwrap();
        assert_eq!(analysis.critical_skill_gap, vec!["problem-solving"]);
    }

    #[test]
    fn test_lookup_error_is_collaborator_error() {
        let err = analyze_market(&profile("Rust", "Any"), &Broken, &AnalyzerConfig::default())
            .unwrap_err();
        match err {
            CollaboratorError::Lookup { source_name, role, .. } => {
                assert_eq!(source_name, "broken");
                assert_eq!(role, "Any");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_default_table_for_built_in_scenario() {
        let p = profile(
            "Python, basic Excel, strong theoretical statistics, good communication.",
            "Junior Data Analyst",
        );
        let analysis =
            analyze_market(&p, &StaticMarketLookup::default(), &AnalyzerConfig::default())
                .unwrap();
        assert_eq!(
            analysis.critical_skill_gap,
            vec!["Advanced SQL", "Tableau Visualization", "Cloud Proficiency (AWS/Azure)"]
        );
        assert_eq!(analysis.average_salary_range, "$75,000 - $95,000");
        assert!(!analysis.used_fallback);
    }
}

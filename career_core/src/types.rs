//! Career Pipeline Types
//!
//! Records handed from one pipeline stage to the next. Each record is
//! created by exactly one stage and never mutated afterwards.

use serde::{Deserialize, Serialize};

// ============================================================
// RAW INPUT
// ============================================================

/// Free-form user attributes before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfile {
    pub skills: String,
    pub target_role: String,
    pub years_of_experience: String,
}

impl RawProfile {
    pub fn new(skills: &str, target_role: &str, years_of_experience: &str) -> Self {
        Self {
            skills: skills.to_string(),
            target_role: target_role.to_string(),
            years_of_experience: years_of_experience.to_string(),
        }
    }
}

// ============================================================
// USER PROFILE (stage 1 output)
// ============================================================

/// Validated user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Delimited list of skills, stored verbatim
    pub current_skills: String,
    pub target_role: String,
    pub years_of_experience: u32,
}

impl UserProfile {
    /// Individual skills split on `,` or `;`, trimmed, empties dropped
    pub fn skill_tokens(&self) -> Vec<&str> {
        self.current_skills
            .split([',', ';'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

// ============================================================
// MARKET SNAPSHOT (lookup output)
// ============================================================

/// Point-in-time market data for a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub required_skills: Vec<String>,
    /// Parallel to `required_skills`
    pub mandatory_flags: Vec<bool>,
    pub salary_range: String,
}

impl MarketSnapshot {
    pub fn new(required: &[(&str, bool)], salary_range: &str) -> Self {
        Self {
            required_skills: required.iter().map(|(s, _)| s.to_string()).collect(),
            mandatory_flags: required.iter().map(|(_, m)| *m).collect(),
            salary_range: salary_range.to_string(),
        }
    }

    /// Whether the parallel sequences line up
    pub fn is_well_formed(&self) -> bool {
        self.required_skills.len() == self.mandatory_flags.len()
    }

    /// Skill/mandatory pairs in snapshot order
    pub fn requirements(&self) -> impl Iterator<Item = (&str, bool)> {
        self.required_skills
            .iter()
            .map(String::as_str)
            .zip(self.mandatory_flags.iter().copied())
    }
}

// ============================================================
// MARKET ANALYSIS (stage 2 output)
// ============================================================

/// Counters computed before the gap list is truncated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCoverage {
    pub required_total: usize,
    pub mandatory_total: usize,
    pub missing_total: usize,
    pub mandatory_missing: usize,
}

/// Gap analysis for the user's target role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub target_role: String,
    pub required_skills_found: Vec<String>,
    /// Most salient missing skills, mandatory first
    pub critical_skill_gap: Vec<String>,
    pub average_salary_range: String,
    pub coverage: SkillCoverage,
    /// True when the lookup had no data and the generic set was used
    pub used_fallback: bool,
}

impl MarketAnalysis {
    pub fn required_skills_text(&self) -> String {
        self.required_skills_found.join(", ")
    }

    pub fn critical_skill_gap_text(&self) -> String {
        self.critical_skill_gap.join(", ")
    }
}

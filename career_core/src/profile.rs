//! Profile Extractor
//!
//! Stage 1 of the pipeline. Turns raw user-supplied attributes into a
//! validated [`UserProfile`]. Validation is the only failure path here.

use crate::types::{RawProfile, UserProfile};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Years of experience must be non-negative, got {0}")]
    NegativeYears(i64),

    #[error("Years of experience is not a whole number: '{0}'")]
    InvalidYears(String),
}

/// Validate raw attributes into a profile
///
/// Skills and role are kept exactly as supplied; only the years field is
/// converted.
pub fn extract_profile(raw: &RawProfile) -> Result<UserProfile, ValidationError> {
    if raw.skills.trim().is_empty() {
        return Err(ValidationError::MissingField("current_skills"));
    }
    if raw.target_role.trim().is_empty() {
        return Err(ValidationError::MissingField("target_role"));
    }

    let years = parse_years(&raw.years_of_experience)?;

    log::debug!(
        "[pipeline:profile] validated profile for role '{}' ({} years)",
        raw.target_role,
        years
    );

    Ok(UserProfile {
        current_skills: raw.skills.clone(),
        target_role: raw.target_role.clone(),
        years_of_experience: years,
    })
}

fn parse_years(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("years_of_experience"));
    }

    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidYears(trimmed.to_string()))?;
    if value < 0 {
        return Err(ValidationError::NegativeYears(value));
    }
    u32::try_from(value).map_err(|_| ValidationError::InvalidYears(trimmed.to_string()))
}

//! Strategy Synthesizer
//!
//! Stage 3 of the pipeline. Turns a [`MarketAnalysis`] into a career
//! roadmap report with four sections:
//! - Executive summary with a verdict
//! - Skill gap restatement
//! - Ordered action plan (3 to 5 steps)
//! - Resource recommendations from the knowledge base
//!
//! Synthesis is read-only and consumes nothing but the analysis and the
//! knowledge base.

use crate::error::CollaboratorError;
use crate::knowledge::{KnowledgeBase, ResourceKind};
use crate::types::MarketAnalysis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use uuid::Uuid;

pub const NO_RESOURCE: &str = "no specific resource found";

const MIN_STEPS: usize = 3;
const MAX_STEPS: usize = 5;

// ============================================================
// VERDICT
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Gaps are few enough to close
    Invest,
    /// Already meets the requirements
    Hold,
    /// Gap is too wide for a short plan
    Reconsider,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Invest => "INVEST",
            Verdict::Hold => "HOLD",
            Verdict::Reconsider => "RECONSIDER",
        }
    }

    /// Rule over the untruncated gap counters
    pub fn classify(analysis: &MarketAnalysis) -> Self {
        let coverage = &analysis.coverage;
        if coverage.missing_total == 0 {
            Verdict::Hold
        } else if coverage.missing_total <= 3 && coverage.mandatory_missing <= 2 {
            Verdict::Invest
        } else {
            Verdict::Reconsider
        }
    }
}

// ============================================================
// REPORT STRUCTURES
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStep {
    /// 1 = first
    pub order: u32,
    pub title: String,
    pub description: String,
    /// Gap skill this step closes, if any
    pub skill: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRecommendation {
    pub skill: String,
    pub category: Option<String>,
    pub resource: Option<String>,
    pub kind: Option<ResourceKind>,
}

impl ResourceRecommendation {
    pub fn resource_text(&self) -> &str {
        self.resource.as_deref().unwrap_or(NO_RESOURCE)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub target_role: String,
    pub verdict: Verdict,
    pub summary: String,
    pub gap_summary: String,
    pub action_plan: Vec<ActionStep>,
    pub resources: Vec<ResourceRecommendation>,
}

// ============================================================
// SYNTHESIS
// ============================================================

pub fn synthesize_strategy(
    analysis: &MarketAnalysis,
    knowledge: &KnowledgeBase,
) -> Result<Report, CollaboratorError> {
    if knowledge.is_empty() {
        return Err(CollaboratorError::KnowledgeBaseUnavailable(
            "no entries loaded".to_string(),
        ));
    }

    let verdict = Verdict::classify(analysis);
    let resources = recommend_resources(analysis, knowledge);
    let action_plan = build_action_plan(analysis, &resources);

    log::info!(
        "[pipeline:strategy] verdict {} with {} steps for '{}'",
        verdict.as_str(),
        action_plan.len(),
        analysis.target_role
    );

    Ok(Report {
        id: Uuid::new_v4().to_string(),
        generated_at: Utc::now(),
        target_role: analysis.target_role.clone(),
        verdict,
        summary: executive_summary(verdict, analysis),
        gap_summary: gap_summary(analysis),
        action_plan,
        resources,
    })
}

fn recommend_resources(
    analysis: &MarketAnalysis,
    knowledge: &KnowledgeBase,
) -> Vec<ResourceRecommendation> {
    analysis
        .critical_skill_gap
        .iter()
        .map(|skill| match knowledge.best_match(skill) {
            Some(entry) => ResourceRecommendation {
                skill: skill.clone(),
                category: Some(entry.category.clone()),
                resource: Some(entry.resource.clone()),
                kind: Some(entry.kind),
            },
            None => ResourceRecommendation {
                skill: skill.clone(),
                category: None,
                resource: None,
                kind: None,
            },
        })
        .collect()
}

fn build_action_plan(
    analysis: &MarketAnalysis,
    resources: &[ResourceRecommendation],
) -> Vec<ActionStep> {
    let mut steps: Vec<ActionStep> = resources
        .iter()
        .map(|rec| {
            let description = match &rec.resource {
                Some(resource) => format!(
                    "Close the '{}' gap by completing '{}'.",
                    rec.skill, resource
                ),
                None => format!(
                    "Close the '{}' gap with a focused self-study plan and a small project.",
                    rec.skill
                ),
            };
            ActionStep {
                order: 0,
                title: format!("Learn {}", rec.skill),
                description,
                skill: Some(rec.skill.clone()),
            }
        })
        .collect();

    let fillers = [
        (
            "Build a portfolio project",
            format!(
                "Ship one project that a {} would be hired to deliver and publish it.",
                analysis.target_role
            ),
        ),
        (
            "Refresh your resume",
            "Rewrite your resume to lead with measurable outcomes for the skills you already have."
                .to_string(),
        ),
    ];
    for (title, description) in fillers {
        if steps.len() + 1 >= MIN_STEPS {
            break;
        }
        steps.push(ActionStep {
            order: 0,
            title: title.to_string(),
            description,
            skill: None,
        });
    }

    steps.truncate(MAX_STEPS - 1);
    steps.push(ActionStep {
        order: 0,
        title: format!("Apply to {} roles", analysis.target_role),
        description: format!(
            "Target postings in the {} salary range and track every response.",
            analysis.average_salary_range
        ),
        skill: None,
    });

    for (i, step) in steps.iter_mut().enumerate() {
        step.order = (i + 1) as u32;
    }
    steps
}

fn executive_summary(verdict: Verdict, analysis: &MarketAnalysis) -> String {
    let role = &analysis.target_role;
    let gap = analysis.critical_skill_gap_text();
    let mut summary = match verdict {
        Verdict::Hold => format!(
            "Verdict: HOLD. Your current skills already cover the market requirements for {}. \
             Keep your positioning and move straight to applications.",
            role
        ),
        Verdict::Invest => format!(
            "Verdict: INVEST. You are within reach of {}; closing {} is a focused, \
             achievable investment.",
            role, gap
        ),
        Verdict::Reconsider => format!(
            "Verdict: RECONSIDER. {} of {} market requirements for {} are missing \
             ({} mandatory). Consider a stepping-stone role before targeting this one.",
            analysis.coverage.missing_total,
            analysis.coverage.required_total,
            role,
            analysis.coverage.mandatory_missing
        ),
    };
    if analysis.used_fallback {
        summary.push_str(
            " No role-specific market data was found, so this is based on general requirements.",
        );
    }
    summary
}

fn gap_summary(analysis: &MarketAnalysis) -> String {
    if analysis.critical_skill_gap.is_empty() {
        "No critical skill gap identified.".to_string()
    } else {
        format!("Critical skill gap: {}.", analysis.critical_skill_gap_text())
    }
}

// ============================================================
// RENDERING
// ============================================================

impl Report {
    /// Markdown rendering of the four sections
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Career Roadmap: {}", self.target_role);
        let _ = writeln!(out, "_Generated {}_", self.generated_at.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(out);

        let _ = writeln!(out, "## I. Executive Summary");
        let _ = writeln!(out, "{}", self.summary);
        let _ = writeln!(out);

        let _ = writeln!(out, "## II. Skill Gap Analysis Summary");
        let _ = writeln!(out, "{}", self.gap_summary);
        let _ = writeln!(out);

        let _ = writeln!(out, "## III. Action Plan");
        for step in &self.action_plan {
            let _ = writeln!(out, "{}. **{}**: {}", step.order, step.title, step.description);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## IV. Resource Recommendations");
        if self.resources.is_empty() {
            let _ = writeln!(out, "- No gap skills to cover.");
        }
        for rec in &self.resources {
            match (&rec.resource, rec.kind) {
                (Some(resource), Some(kind)) => {
                    let _ = writeln!(out, "- {}: '{}' ({})", rec.skill, resource, kind.as_str());
                }
                _ => {
                    let _ = writeln!(out, "- {}: {}", rec.skill, rec.resource_text());
                }
            }
        }
        out
    }
}

//! Knowledge Base
//!
//! Static skill-category → resource table consulted by the Strategy
//! Synthesizer. Never mutated once built.

use crate::matching::{terms_equal, terms_overlap};
use serde::{Deserialize, Serialize};

/// Kind of learning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Certification,
    Course,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Certification => "Certification",
            ResourceKind::Course => "Course",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub category: String,
    /// Additional skill names this entry answers for
    #[serde(default)]
    pub keywords: Vec<String>,
    pub resource: String,
    pub kind: ResourceKind,
}

impl KnowledgeEntry {
    pub fn new(category: &str, keywords: &[&str], resource: &str, kind: ResourceKind) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            resource: resource.to_string(),
            kind,
        }
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.category.as_str()).chain(self.keywords.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best entry for a skill: an exact key match beats a substring match,
    /// ties go to the earlier entry.
    pub fn best_match(&self, skill: &str) -> Option<&KnowledgeEntry> {
        self.entries
            .iter()
            .find(|e| e.keys().any(|k| terms_equal(k, skill)))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| e.keys().any(|k| terms_overlap(skill, k)))
            })
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(default_entries())
    }
}

pub fn default_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "SQL/Data Warehousing",
            &["SQL", "Data Warehousing"],
            "Advanced SQL Mastery for Data Science",
            ResourceKind::Certification,
        ),
        KnowledgeEntry::new(
            "Visualization",
            &["Tableau", "Power BI", "Data Visualization"],
            "Tableau Desktop Specialist Training",
            ResourceKind::Course,
        ),
        KnowledgeEntry::new(
            "Cloud Basics",
            &["Cloud", "AWS", "Azure", "GCP"],
            "AWS Certified Cloud Practitioner Basics",
            ResourceKind::Certification,
        ),
        KnowledgeEntry::new(
            "Programming",
            &["Python", "GoLang", "Data Structures", "Algorithms"],
            "Python Data Structures & Algorithms Refresher",
            ResourceKind::Course,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_key_yields_its_resource() {
        let kb = KnowledgeBase::default();
        for entry in kb.entries() {
            assert_eq!(kb.best_match(&entry.category).unwrap().resource, entry.resource);
            for keyword in &entry.keywords {
                assert_eq!(kb.best_match(keyword).unwrap().resource, entry.resource);
            }
        }
    }

    #[test]
    fn test_substring_match() {
        let kb = KnowledgeBase::default();
        assert_eq!(
            kb.best_match("Advanced SQL").unwrap().resource,
            "Advanced SQL Mastery for Data Science"
        );
        assert_eq!(
            kb.best_match("Tableau Visualization").unwrap().resource,
            "Tableau Desktop Specialist Training"
        );
        assert_eq!(
            kb.best_match("Cloud Proficiency (AWS/Azure)").unwrap().category,
            "Cloud Basics"
        );
    }

    #[test]
    fn test_exact_beats_earlier_substring() {
        let kb = KnowledgeBase::new(vec![
            KnowledgeEntry::new("Data Engineering", &[], "Pipelines 101", ResourceKind::Course),
            KnowledgeEntry::new("Data", &[], "Data Literacy", ResourceKind::Course),
        ]);
        assert_eq!(kb.best_match("data").unwrap().resource, "Data Literacy");
    }

    #[test]
    fn test_no_match() {
        let kb = KnowledgeBase::default();
        assert!(kb.best_match("Knife Skills").is_none());
        assert!(kb.best_match("problem-solving").is_none());
    }

    #[test]
    fn test_entry_yaml_keywords_default() {
        let yaml = "category: Networking\nresource: Meetup Playbook\nkind: course\n";
        let entry: KnowledgeEntry = serde_yaml::from_str(yaml).unwrap();
        assert!(entry.keywords.is_empty());
        assert_eq!(entry.kind, ResourceKind::Course);
    }
}

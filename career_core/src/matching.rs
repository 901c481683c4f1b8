//! Case-insensitive term matching shared by the analyzer and the knowledge base.

/// True when `needle` occurs in `haystack` ignoring case, with no
/// alphanumeric character directly before or after the occurrence.
pub fn contains_term(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(&needle) {
        let begin = start + offset;
        let end = begin + needle.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        // advance by one char to allow overlapping candidates
        start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Either term contains the other
pub fn terms_overlap(a: &str, b: &str) -> bool {
    contains_term(a, b) || contains_term(b, a)
}

pub fn terms_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_bounded_match() {
        assert!(contains_term("Python (Pandas/NumPy)", "python"));
        assert!(contains_term("basic Excel", "Excel"));
        assert!(contains_term("Advanced SQL", "sql"));
        assert!(!contains_term("Python/GoLang", "go"));
        assert!(!contains_term("Cloud Proficiency", "r"));
    }

    #[test]
    fn test_overlap_in_either_direction() {
        assert!(terms_overlap("SQL", "Advanced SQL"));
        assert!(terms_overlap("Advanced SQL", "SQL"));
        assert!(!terms_overlap("Tableau", "SQL"));
    }

    #[test]
    fn test_empty_needle_never_matches() {
        assert!(!contains_term("anything", "  "));
    }

    #[test]
    fn test_equal_ignores_case_and_padding() {
        assert!(terms_equal(" sql ", "SQL"));
        assert!(!terms_equal("SQL", "MySQL"));
    }

    #[test]
    fn test_equal_folds_non_ascii_case() {
        assert!(terms_equal("ÉTUDE", "étude"));
        assert!(contains_term("Études de marché", "ÉTUDES"));
    }
}

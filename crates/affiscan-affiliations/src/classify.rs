use once_cell::sync::Lazy;
use regex::Regex;

/// Keywords that signal an academic or public institution.
const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "academy",
    "hospital",
    "medical center",
    "clinic",
    "foundation",
    "laboratory",
    "lab",
    "center for",
    "department of",
    "faculty",
    "division of",
    "national",
    "federal",
    "ministry",
    "government",
    "association",
    "society",
    "organization",
];

/// Keywords that signal a pharmaceutical or biotech company. Matched by
/// plain substring, so short entries like "co" and "sa" match inside
/// longer words.
const COMPANY_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "therapeutics",
    "biosciences",
    "laboratories",
    "inc",
    "corp",
    "llc",
    "ltd",
    "co",
    "company",
    "gmbh",
    "ag",
    "sa",
    "bv",
    "plc",
    "biopharmaceutical",
    "pharmaceutical",
    "drug",
    "medicine",
    "health",
];

/// Decide whether an affiliation string describes a pharmaceutical or
/// biotech company rather than an academic institution.
///
/// Decision order, first match wins:
/// 1. A company keyword with no academic keyword present anywhere in the
///    text classifies as a company.
/// 2. When both kinds of keyword are present, the text classifies as a
///    company only if it matches a named-entity plus legal-suffix pattern
///    ("Vertex Pharmaceuticals, Inc") or ends with a corporate suffix
///    word; otherwise the academic reading wins.
/// 3. With no company keyword at all, a bare legal-suffix token still
///    classifies as a company.
///
/// Keyword matching is case-insensitive; the structural patterns in steps
/// 2 and 3 run against the original casing.
pub fn is_company_affiliation(affiliation: &str) -> bool {
    if affiliation.is_empty() {
        return false;
    }

    let lowered = affiliation.to_lowercase();

    for keyword in COMPANY_KEYWORDS {
        if !lowered.contains(keyword) {
            continue;
        }
        for academic_keyword in ACADEMIC_KEYWORDS {
            if lowered.contains(academic_keyword) {
                // Both signals present; only a corporate pattern rescues
                // the company reading.
                return matches_named_company(affiliation) || has_corporate_tail(&lowered);
            }
        }
        return true;
    }

    has_legal_suffix(affiliation)
}

/// Capitalized word run, optional comma, then a legal suffix, anchored at
/// the start of the text.
fn matches_named_company(affiliation: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^\s*[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s*,?\s*(?:Inc|Corp|LLC|Ltd|GmbH|AG|SA|BV|PLC)")
            .unwrap()
    });
    RE.is_match(affiliation)
}

/// Corporate suffix word at the end of the (lowercased) text.
fn has_corporate_tail(lowered: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:company|corporation|inc|corp|llc|ltd)\s*$").unwrap());
    RE.is_match(lowered)
}

/// Legal suffix token, optionally followed by a period, bounded by
/// whitespace or end of text.
fn has_legal_suffix(affiliation: &str) -> bool {
    static RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?:Inc|Corp|LLC|Ltd|GmbH|AG|SA|BV|PLC)\.?(?:\s|$)").unwrap());
    RE.is_match(affiliation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_keyword_no_academic() {
        assert!(is_company_affiliation("Acme Therapeutics, Cambridge, MA"));
    }

    #[test]
    fn test_legal_suffix_company() {
        assert!(is_company_affiliation("Pfizer Inc., New York, NY"));
        assert!(is_company_affiliation("Novartis AG, Basel, Switzerland"));
    }

    #[test]
    fn test_academic_only() {
        assert!(!is_company_affiliation("Harvard Medical School, Boston, MA"));
        assert!(!is_company_affiliation(
            "Department of Physics, Stanford University"
        ));
    }

    #[test]
    fn test_empty_is_not_company() {
        assert!(!is_company_affiliation(""));
    }

    #[test]
    fn test_ambiguous_defaults_to_academic() {
        // "co" inside "Oncology" plus "department of" puts this on the
        // disambiguation path, where neither corporate pattern fires.
        assert!(!is_company_affiliation(
            "Department of Oncology, Pfizer Research Division"
        ));
    }

    #[test]
    fn test_named_pattern_rescues_company() {
        // "lab" inside "Labs" is an academic signal, but the leading
        // "Name Name Inc" shape wins.
        assert!(is_company_affiliation("Hoffmann Research Labs Inc, Basel"));
    }

    #[test]
    fn test_corporate_tail_rescues_company() {
        assert!(is_company_affiliation(
            "Clinical Research Laboratory, Axion Biotech Ltd"
        ));
    }

    #[test]
    fn test_academic_with_company_mention_stays_academic() {
        assert!(!is_company_affiliation(
            "University of Michigan Drug Discovery Lab"
        ));
    }

    #[test]
    fn test_college_not_company() {
        // "co" matches inside "College"; the academic keyword suppresses it.
        assert!(!is_company_affiliation("Boston College, Chestnut Hill, MA"));
    }

    #[test]
    fn test_case_insensitive_keywords() {
        assert!(is_company_affiliation("NOVARTIS PHARMACEUTICALS"));
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::classify::is_company_affiliation;

/// Extract a company name from an affiliation string.
///
/// Tried in order:
/// - A capitalized word run ending in a legal suffix ("Moderna Inc.",
///   "Boehringer Ingelheim GmbH"), matched anywhere in the text.
/// - The segment before the first comma, when the string as a whole
///   classifies as a company.
///
/// A comma-less company affiliation with no recognizable suffix yields
/// `None`: such an affiliation still counts toward the non-academic
/// author tally but never contributes a company name. Known limitation,
/// kept for output compatibility.
pub fn extract_company_name(affiliation: &str) -> Option<String> {
    if affiliation.is_empty() {
        return None;
    }

    static SUFFIX_RUN_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"([A-Z][a-zA-Z0-9\s]+(?:Inc|Corp|LLC|Ltd|GmbH|AG|SA|BV|PLC)\.?)").unwrap()
    });
    if let Some(caps) = SUFFIX_RUN_RE.captures(affiliation) {
        return Some(caps.get(1).unwrap().as_str().trim().to_string());
    }

    if is_company_affiliation(affiliation) {
        let (leading, _) = affiliation.split_once(',')?;
        let leading = leading.trim();
        if !leading.is_empty() {
            return Some(leading.to_string());
        }
    }

    None
}

/// Extract the first email address found in the text.
pub fn extract_email(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    static EMAIL_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// Collect the distinct company names across a list of affiliations.
///
/// Only affiliations that classify as companies contribute, and only when
/// a name can actually be extracted. Duplicates collapse by exact string
/// equality; input order does not affect membership.
pub fn get_company_affiliations(affiliations: &[String]) -> HashSet<String> {
    let mut companies = HashSet::new();

    for affiliation in affiliations {
        if is_company_affiliation(affiliation) {
            if let Some(name) = extract_company_name(affiliation) {
                companies.insert(name);
            }
        }
    }

    companies
}

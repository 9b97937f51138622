//! Field extraction over parsed article documents.
//!
//! Every extractor is total: missing or partial data degrades to a
//! sentinel value or an empty collection, never to an error. The only
//! fallible step in the pipeline is reading the XML itself.

use std::collections::HashSet;

use affiscan_affiliations::{extract_company_name, extract_email, is_company_affiliation};

use crate::document::ArticleDocument;
use crate::record::{
    ArticleRecord, EMAIL_NOT_FOUND, NO_COMPANY_AFFILIATIONS, NO_NON_ACADEMIC_AUTHORS,
    PUBMED_ID_NOT_FOUND, UNKNOWN_DATE, UNKNOWN_TITLE,
};

/// Three-letter English month abbreviations, in month order.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// The article title, or its sentinel.
pub fn extract_title(document: &ArticleDocument) -> String {
    document
        .title
        .clone()
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

/// Format the publication date as "YYYY-MM-DD", "YYYY-MM", or "YYYY",
/// depending on which parts are present.
///
/// Alphabetic month names are rendered as two digits ("Jan" and
/// "January" both become "01"); numeric month text passes through
/// verbatim. An unrecognized alphabetic month, or a day without a month,
/// falls back to the year alone. No year at all yields the sentinel.
pub fn extract_publication_date(document: &ArticleDocument) -> String {
    let Some(date) = document.pub_date.as_ref() else {
        return UNKNOWN_DATE.to_string();
    };
    let Some(year) = date.year.as_deref() else {
        return UNKNOWN_DATE.to_string();
    };

    let month = date.month.as_deref().and_then(normalize_month);
    match (month, date.day.as_deref()) {
        (Some(month), Some(day)) => format!("{year}-{month}-{day}"),
        (Some(month), None) => format!("{year}-{month}"),
        (None, _) => year.to_string(),
    }
}

fn normalize_month(month: &str) -> Option<String> {
    if month.chars().all(|c| c.is_alphabetic()) {
        month_number(month).map(|number| format!("{number:02}"))
    } else {
        Some(month.to_string())
    }
}

fn month_number(month: &str) -> Option<usize> {
    let prefix = month.chars().take(3).collect::<String>().to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|&abbreviation| abbreviation == prefix)
        .map(|index| index + 1)
}

/// One author paired with the affiliation text used to screen them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAffiliation {
    pub name: String,
    /// The author's first affiliation text; empty when they have none.
    pub affiliation: String,
    pub email: Option<String>,
}

/// Pair each named author with their first affiliation, in document
/// order. Authors without a last name are skipped.
pub fn extract_author_affiliations(document: &ArticleDocument) -> Vec<AuthorAffiliation> {
    document
        .authors
        .iter()
        .filter_map(|author| {
            let name = author.display_name()?;
            let affiliation = author.affiliations.first().cloned().unwrap_or_default();
            let email = extract_email(&affiliation);
            Some(AuthorAffiliation {
                name,
                affiliation,
                email,
            })
        })
        .collect()
}

/// Find the corresponding author's email address.
///
/// Authors flagged both `ValidYN="Y"` and `CorrespondingAuthor="Y"` are
/// checked first; when none of them carries an email, every affiliation
/// text in the document is scanned in order as a fallback, since the
/// corresponding author's contact line is often attached to a different
/// node than the flag.
pub fn extract_corresponding_author_email(document: &ArticleDocument) -> Option<String> {
    flagged_corresponding_email(document).or_else(|| first_affiliation_email(document))
}

fn flagged_corresponding_email(document: &ArticleDocument) -> Option<String> {
    document
        .authors
        .iter()
        .filter(|author| author.valid && author.corresponding)
        .flat_map(|author| author.affiliations.iter())
        .find_map(|text| extract_email(text))
}

fn first_affiliation_email(document: &ArticleDocument) -> Option<String> {
    document
        .affiliations
        .iter()
        .find_map(|text| extract_email(text))
}

/// Assemble the flat output record for one article.
///
/// Authors whose screening affiliation classifies as a company become the
/// non-academic author list; company names extracted from those same
/// texts are deduplicated. The joined company field has no guaranteed
/// ordering across runs. An empty `pmid` is replaced by its sentinel.
pub fn parse_article(pmid: &str, document: &ArticleDocument) -> ArticleRecord {
    let mut non_academic_authors = Vec::new();
    let mut companies = HashSet::new();

    for entry in extract_author_affiliations(document) {
        if entry.affiliation.is_empty() || !is_company_affiliation(&entry.affiliation) {
            continue;
        }
        if let Some(company) = extract_company_name(&entry.affiliation) {
            companies.insert(company);
        }
        non_academic_authors.push(entry.name);
    }

    let pubmed_id = if pmid.is_empty() {
        PUBMED_ID_NOT_FOUND.to_string()
    } else {
        pmid.to_string()
    };
    let companies: Vec<String> = companies.into_iter().collect();

    ArticleRecord {
        pubmed_id,
        title: extract_title(document),
        publication_date: extract_publication_date(document),
        non_academic_authors: join_or(&non_academic_authors, NO_NON_ACADEMIC_AUTHORS),
        company_affiliations: join_or(&companies, NO_COMPANY_AFFILIATIONS),
        corresponding_author_email: extract_corresponding_author_email(document)
            .unwrap_or_else(|| EMAIL_NOT_FOUND.to_string()),
    }
}

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Author, PubDate};

    fn doc_with_date(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> ArticleDocument {
        ArticleDocument {
            pub_date: Some(PubDate {
                year: year.map(Into::into),
                month: month.map(Into::into),
                day: day.map(Into::into),
            }),
            ..Default::default()
        }
    }

    fn author(last: &str, fore: Option<&str>, affiliations: &[&str]) -> Author {
        Author {
            last_name: Some(last.into()),
            fore_name: fore.map(Into::into),
            affiliations: affiliations.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_sentinel() {
        assert_eq!(extract_title(&ArticleDocument::default()), "Unknown Title");

        let document = ArticleDocument {
            title: Some("A Study of Things".into()),
            ..Default::default()
        };
        assert_eq!(extract_title(&document), "A Study of Things");
    }

    #[test]
    fn test_date_full() {
        let document = doc_with_date(Some("2023"), Some("Jan"), Some("15"));
        assert_eq!(extract_publication_date(&document), "2023-01-15");
    }

    #[test]
    fn test_date_long_month_name() {
        let document = doc_with_date(Some("2023"), Some("September"), None);
        assert_eq!(extract_publication_date(&document), "2023-09");
    }

    #[test]
    fn test_date_numeric_month_passthrough() {
        let document = doc_with_date(Some("2023"), Some("05"), Some("07"));
        assert_eq!(extract_publication_date(&document), "2023-05-07");
    }

    #[test]
    fn test_date_unrecognized_month_falls_back_to_year() {
        let document = doc_with_date(Some("2023"), Some("Spring"), Some("10"));
        assert_eq!(extract_publication_date(&document), "2023");
    }

    #[test]
    fn test_date_accented_month_falls_back_to_year() {
        // Alphabetic in any script counts as a month name, so an
        // unrecognized "März" drops the month rather than passing
        // through as digits would.
        let document = doc_with_date(Some("2023"), Some("März"), Some("01"));
        assert_eq!(extract_publication_date(&document), "2023");
    }

    #[test]
    fn test_date_day_without_month_ignored() {
        let document = doc_with_date(Some("2023"), None, Some("15"));
        assert_eq!(extract_publication_date(&document), "2023");
    }

    #[test]
    fn test_date_sentinel_without_year() {
        assert_eq!(
            extract_publication_date(&ArticleDocument::default()),
            "Unknown Date"
        );

        let document = doc_with_date(None, Some("Jan"), Some("15"));
        assert_eq!(extract_publication_date(&document), "Unknown Date");
    }

    #[test]
    fn test_author_affiliation_entries() {
        let document = ArticleDocument {
            authors: vec![
                author(
                    "Smith",
                    Some("Jane"),
                    &["Moderna Inc., Cambridge. jane.smith@moderna.com", "Second"],
                ),
                Author {
                    fore_name: Some("Anonymous".into()),
                    ..Default::default()
                },
                Author {
                    last_name: Some("Lee".into()),
                    initials: Some("H".into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let entries = extract_author_affiliations(&document);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].name, "Jane Smith");
        assert_eq!(
            entries[0].affiliation,
            "Moderna Inc., Cambridge. jane.smith@moderna.com"
        );
        assert_eq!(entries[0].email, Some("jane.smith@moderna.com".into()));

        assert_eq!(entries[1].name, "H Lee");
        assert_eq!(entries[1].affiliation, "");
        assert_eq!(entries[1].email, None);
    }

    #[test]
    fn test_corresponding_email_prefers_flagged_author() {
        let mut flagged = author("Boss", Some("Big"), &["Acme Inc. boss@acme.com"]);
        flagged.valid = true;
        flagged.corresponding = true;

        let document = ArticleDocument {
            authors: vec![
                author("First", Some("Listed"), &["Some University. first@uni.edu"]),
                flagged,
            ],
            affiliations: vec![
                "Some University. first@uni.edu".into(),
                "Acme Inc. boss@acme.com".into(),
            ],
            ..Default::default()
        };

        assert_eq!(
            extract_corresponding_author_email(&document),
            Some("boss@acme.com".into())
        );
    }

    #[test]
    fn test_corresponding_email_falls_back_to_any_affiliation() {
        let document = ArticleDocument {
            affiliations: vec![
                "Administrative Office, nothing here".into(),
                "Data Team, second@site.org".into(),
            ],
            ..Default::default()
        };

        assert_eq!(
            extract_corresponding_author_email(&document),
            Some("second@site.org".into())
        );
        assert_eq!(
            extract_corresponding_author_email(&ArticleDocument::default()),
            None
        );
    }

    #[test]
    fn test_corresponding_flag_requires_valid() {
        // CorrespondingAuthor="Y" on an invalidated author is ignored, so
        // the fallback scan answers with the earlier document-order email.
        let mut invalidated = author("Gone", None, &["Invalid Group. late@gone.org"]);
        invalidated.corresponding = true;

        let document = ArticleDocument {
            authors: vec![invalidated],
            affiliations: vec![
                "Front Desk. desk@site.org".into(),
                "Invalid Group. late@gone.org".into(),
            ],
            ..Default::default()
        };

        assert_eq!(
            extract_corresponding_author_email(&document),
            Some("desk@site.org".into())
        );
    }

    #[test]
    fn test_parse_article_screens_authors() {
        let company_text = "Research Division, Moderna Inc., Cambridge. jane.smith@moderna.com";
        let document = ArticleDocument {
            title: Some("A Study of Things".into()),
            pub_date: Some(PubDate {
                year: Some("2023".into()),
                month: Some("Jan".into()),
                day: Some("15".into()),
            }),
            authors: vec![
                author("Smith", Some("Jane"), &[company_text]),
                author("Jones", Some("Bob"), &["Dept. of Biology, State University"]),
            ],
            affiliations: vec![
                company_text.into(),
                "Dept. of Biology, State University".into(),
            ],
        };

        let record = parse_article("31452104", &document);
        assert_eq!(record.pubmed_id, "31452104");
        assert_eq!(record.title, "A Study of Things");
        assert_eq!(record.publication_date, "2023-01-15");
        assert_eq!(record.non_academic_authors, "Jane Smith");
        assert_eq!(record.company_affiliations, "Moderna Inc.");
        assert_eq!(record.corresponding_author_email, "jane.smith@moderna.com");
        assert!(record.has_non_academic_authors());
    }

    #[test]
    fn test_parse_article_sentinels() {
        let record = parse_article("", &ArticleDocument::default());
        assert_eq!(record.pubmed_id, "PubMed ID Not Found");
        assert_eq!(record.title, "Unknown Title");
        assert_eq!(record.publication_date, "Unknown Date");
        assert_eq!(record.non_academic_authors, "No Non-Academic Authors");
        assert_eq!(record.company_affiliations, "No Company Affiliations");
        assert_eq!(record.corresponding_author_email, "Email Not Found");
        assert!(!record.has_non_academic_authors());
    }

    #[test]
    fn test_parse_article_repeats_identically() {
        let document = ArticleDocument {
            authors: vec![
                author("Smith", Some("Jane"), &["Acme Biotech, San Diego, CA"]),
                author("Jones", Some("Bob"), &["Vertex Pharmaceuticals Inc, Boston, MA"]),
            ],
            ..Default::default()
        };

        let first = parse_article("42", &document);
        let second = parse_article("42", &document);

        assert_eq!(first.pubmed_id, second.pubmed_id);
        assert_eq!(first.title, second.title);
        assert_eq!(first.publication_date, second.publication_date);
        assert_eq!(first.non_academic_authors, second.non_academic_authors);
        assert_eq!(
            first.corresponding_author_email,
            second.corresponding_author_email
        );

        // The company field is set-derived; compare as tokens since its
        // join order is not guaranteed.
        fn tokens(joined: &str) -> Vec<&str> {
            let mut names: Vec<&str> = joined.split("; ").collect();
            names.sort_unstable();
            names
        }
        assert_eq!(
            tokens(&first.company_affiliations),
            tokens(&second.company_affiliations)
        );
        assert_eq!(
            tokens(&first.company_affiliations),
            vec!["Acme Biotech", "Vertex Pharmaceuticals Inc"]
        );
    }

    #[test]
    fn test_parse_article_dedupes_companies() {
        // Two authors at the same company yield one company entry.
        let text = "Vertex Pharmaceuticals Inc, Boston, MA";
        let document = ArticleDocument {
            authors: vec![
                author("Smith", Some("Jane"), &[text]),
                author("Jones", Some("Bob"), &[text]),
            ],
            affiliations: vec![text.into(), text.into()],
            ..Default::default()
        };

        let record = parse_article("777", &document);
        assert_eq!(record.non_academic_authors, "Jane Smith; Bob Jones");
        assert_eq!(record.company_affiliations, "Vertex Pharmaceuticals Inc");
    }
}

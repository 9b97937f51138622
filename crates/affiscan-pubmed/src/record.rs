//! Flat per-article output record and its sentinel values.

use serde::Serialize;

/// Title fallback when the article has none.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Date fallback when no publication year is available.
pub const UNKNOWN_DATE: &str = "Unknown Date";
/// Author-list fallback when no author has a company affiliation.
pub const NO_NON_ACADEMIC_AUTHORS: &str = "No Non-Academic Authors";
/// Company-list fallback when no company name could be extracted.
pub const NO_COMPANY_AFFILIATIONS: &str = "No Company Affiliations";
/// Email fallback when no affiliation text contains one.
pub const EMAIL_NOT_FOUND: &str = "Email Not Found";
/// Identifier fallback when the caller supplies an empty PMID.
pub const PUBMED_ID_NOT_FOUND: &str = "PubMed ID Not Found";

/// One article's extracted fields, shaped for tabular export.
///
/// Serialized field names match the export header exactly, so the record
/// can be handed to any serde-based CSV or JSON writer as-is. Every field
/// is always populated; absent data is carried by the sentinel strings
/// above, never by an empty string or a null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "PublicationDate")]
    pub publication_date: String,
    /// Display names of company-affiliated authors, joined with `"; "`.
    #[serde(rename = "NonAcademicAuthors")]
    pub non_academic_authors: String,
    /// Distinct extracted company names, joined with `"; "`.
    #[serde(rename = "CompanyAffiliations")]
    pub company_affiliations: String,
    #[serde(rename = "CorrespondingAuthorEmail")]
    pub corresponding_author_email: String,
}

impl ArticleRecord {
    /// True when at least one author was classified as company-affiliated.
    pub fn has_non_academic_authors(&self) -> bool {
        self.non_academic_authors != NO_NON_ACADEMIC_AUTHORS
    }
}

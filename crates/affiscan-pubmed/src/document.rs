//! Typed model for one parsed PubMed article.
//!
//! This is the input boundary of the extraction pipeline: the XML layer
//! fills these structs, and every extractor reads them. All stored text is
//! trimmed and non-empty; an absent or empty XML field is simply `None`
//! (or missing from a list), so extractors never need their own emptiness
//! checks. Any subset of fields may be absent.

/// One article's worth of bibliographic structure.
#[derive(Debug, Clone, Default)]
pub struct ArticleDocument {
    /// Article title, with inline markup flattened to its text.
    pub title: Option<String>,
    /// The article's first publication-date node, if any.
    pub pub_date: Option<PubDate>,
    /// Authors in document order.
    pub authors: Vec<Author>,
    /// Every affiliation text in the document, in document order, including
    /// affiliations attached to non-author nodes such as investigators.
    /// Backs the corresponding-email fallback scan.
    pub affiliations: Vec<String>,
}

/// Raw Year/Month/Day sub-fields of a publication date. Kept as text:
/// PubMed dates carry values like "2023", "Jan", "05" or nothing at all,
/// and formatting policy lives in the extractor.
#[derive(Debug, Clone, Default)]
pub struct PubDate {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
}

/// One author node.
#[derive(Debug, Clone, Default)]
pub struct Author {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    pub initials: Option<String>,
    /// The author's affiliation texts, in document order.
    pub affiliations: Vec<String>,
    /// `ValidYN="Y"` attribute. False when the attribute is absent.
    pub valid: bool,
    /// `CorrespondingAuthor="Y"` attribute. False when absent.
    pub corresponding: bool,
}

impl Author {
    /// Display name for record output.
    ///
    /// Preference order: "ForeName LastName", then "Initials LastName",
    /// then the last name alone. Authors without a last name have no
    /// display name and are skipped by the extractors.
    pub fn display_name(&self) -> Option<String> {
        let last = self.last_name.as_deref()?;
        if let Some(fore) = self.fore_name.as_deref() {
            Some(format!("{fore} {last}"))
        } else if let Some(initials) = self.initials.as_deref() {
            Some(format!("{initials} {last}"))
        } else {
            Some(last.to_string())
        }
    }
}

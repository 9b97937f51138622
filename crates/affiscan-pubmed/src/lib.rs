//! PubMed article metadata extraction and company-affiliation screening.
//!
//! The pipeline has three stages: [`parse_document`] reads efetch XML
//! into an [`ArticleDocument`], the extractors in [`extract`] pull
//! display fields out of it, and [`parse_article`] assembles the flat
//! [`ArticleRecord`] used for tabular export. The affiliation classifier
//! itself lives in the `affiscan-affiliations` crate.
//!
//! Missing data never fails: every output field degrades to a documented
//! sentinel string. The only error condition is structurally unreadable
//! XML, and [`parse_batch`] shows the intended per-article recovery.

use thiserror::Error;

pub mod document;
pub mod extract;
pub mod record;
pub mod xml_parser;

pub use document::{ArticleDocument, Author, PubDate};
pub use extract::{
    AuthorAffiliation, extract_author_affiliations, extract_corresponding_author_email,
    extract_publication_date, extract_title, parse_article,
};
pub use record::{
    ArticleRecord, EMAIL_NOT_FOUND, NO_COMPANY_AFFILIATIONS, NO_NON_ACADEMIC_AUTHORS,
    PUBMED_ID_NOT_FOUND, UNKNOWN_DATE, UNKNOWN_TITLE,
};
pub use xml_parser::{parse_article_set, parse_document};

/// Errors surfaced while reading article XML.
#[derive(Error, Debug)]
pub enum PubmedError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document contains no XML elements")]
    EmptyDocument,
}

/// Parse a batch of `(pmid, xml)` pairs into output records.
///
/// An article whose document cannot be read is logged at warn level and
/// skipped; the rest of the batch is unaffected.
pub fn parse_batch<'a, I>(articles: I) -> Vec<ArticleRecord>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut records = Vec::new();
    for (pmid, xml) in articles {
        match parse_document(xml) {
            Ok(document) => records.push(parse_article(pmid, &document)),
            Err(error) => {
                tracing::warn!(pmid, error = %error, "skipping article with unreadable document");
            }
        }
    }
    records
}

//! Streaming parser for PubMed efetch XML.
//!
//! Payloads follow the structure:
//! ```xml
//! <PubmedArticleSet>
//!   <PubmedArticle>
//!     <MedlineCitation>
//!       <PMID Version="1">31452104</PMID>
//!       <Article>
//!         <Journal>
//!           <JournalIssue>
//!             <PubDate><Year>2023</Year><Month>Jan</Month><Day>15</Day></PubDate>
//!           </JournalIssue>
//!         </Journal>
//!         <ArticleTitle>Some Title</ArticleTitle>
//!         <AuthorList>
//!           <Author ValidYN="Y" CorrespondingAuthor="Y">
//!             <LastName>Smith</LastName>
//!             <ForeName>Jane</ForeName>
//!             <Initials>J</Initials>
//!             <AffiliationInfo><Affiliation>Moderna Inc.</Affiliation></AffiliationInfo>
//!           </Author>
//!         </AuthorList>
//!       </Article>
//!     </MedlineCitation>
//!   </PubmedArticle>
//! </PubmedArticleSet>
//! ```
//!
//! Only the elements above are recognized; everything else is skipped.
//! First occurrence wins for PMID, ArticleTitle, and PubDate within one
//! article, matching a first-descendant lookup over the same tree.
//! Ill-formed markup is the one propagated failure; missing fields never
//! are.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::PubmedError;
use crate::document::{ArticleDocument, Author, PubDate};

/// Parse one article's XML into a document.
///
/// Accepts a `<PubmedArticle>` element, a full article set (the first
/// article wins), or a bare fragment containing the recognized fields.
/// A well-formed input with none of the recognized fields yields an empty
/// document, not an error.
pub fn parse_document(xml: &str) -> Result<ArticleDocument, PubmedError> {
    let scan = scan_documents(xml)?;
    if let Some((_, document)) = scan.articles.into_iter().next() {
        return Ok(document);
    }
    if scan.saw_element {
        Ok(scan.fallback)
    } else {
        Err(PubmedError::EmptyDocument)
    }
}

/// Split an efetch article-set payload into `(PMID, document)` pairs in
/// document order.
///
/// Articles carrying no PMID are skipped, since downstream records are
/// keyed by identifier. A well-formed payload with zero `<PubmedArticle>`
/// elements yields an empty vector.
pub fn parse_article_set(xml: &str) -> Result<Vec<(String, ArticleDocument)>, PubmedError> {
    let scan = scan_documents(xml)?;
    if !scan.saw_element {
        return Err(PubmedError::EmptyDocument);
    }

    let mut articles = Vec::new();
    for (pmid, document) in scan.articles {
        match pmid {
            Some(pmid) => articles.push((pmid, document)),
            None => tracing::debug!("skipping article without a PMID"),
        }
    }
    Ok(articles)
}

/// Accumulated state for the article currently being read.
#[derive(Default)]
struct ArticleState {
    pmid: Option<String>,
    pmid_seen: bool,
    title: Option<String>,
    title_seen: bool,
    pub_date: Option<PubDate>,
    authors: Vec<Author>,
    affiliations: Vec<String>,
}

impl ArticleState {
    fn into_parts(self) -> (Option<String>, ArticleDocument) {
        let document = ArticleDocument {
            title: self.title,
            pub_date: self.pub_date,
            authors: self.authors,
            affiliations: self.affiliations,
        };
        (self.pmid, document)
    }
}

struct DocumentScan {
    /// Completed `<PubmedArticle>` elements, in document order.
    articles: Vec<(Option<String>, ArticleDocument)>,
    /// Fields collected outside any `<PubmedArticle>` wrapper; used when
    /// the input is a bare article fragment.
    fallback: ArticleDocument,
    saw_element: bool,
}

fn scan_documents(xml: &str) -> Result<DocumentScan, PubmedError> {
    let mut reader = Reader::from_str(xml);
    // Text events stay untrimmed: titles and affiliations can contain
    // inline markup, and trimming per event would eat interior spacing
    // during accumulation. Trimming happens once at element commit.
    let mut buf = Vec::new();

    let mut articles: Vec<(Option<String>, ArticleDocument)> = Vec::new();
    let mut current = ArticleState::default();
    let mut saw_element = false;

    // Nesting flags
    let mut in_pmid = false;
    let mut in_title = false;
    let mut in_pub_date = false;
    let mut in_year = false;
    let mut in_month = false;
    let mut in_day = false;
    let mut in_last_name = false;
    let mut in_fore_name = false;
    let mut in_initials = false;
    let mut in_affiliation_info = false;
    let mut in_affiliation = false;

    // Text accumulators; `field_buf` is shared by the leaf fields, which
    // never nest inside each other.
    let mut title_buf = String::new();
    let mut affiliation_buf = String::new();
    let mut field_buf = String::new();
    let mut author: Option<Author> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                saw_element = true;
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();

                match tag.as_str() {
                    "PubmedArticle" => {
                        // Discard anything collected outside an article.
                        current = ArticleState::default();
                    }
                    "PMID" if !current.pmid_seen => {
                        in_pmid = true;
                        field_buf.clear();
                    }
                    "ArticleTitle" if !current.title_seen => {
                        in_title = true;
                        title_buf.clear();
                    }
                    "PubDate" if current.pub_date.is_none() => {
                        in_pub_date = true;
                        current.pub_date = Some(PubDate::default());
                    }
                    "Year" if in_pub_date => {
                        in_year = true;
                        field_buf.clear();
                    }
                    "Month" if in_pub_date => {
                        in_month = true;
                        field_buf.clear();
                    }
                    "Day" if in_pub_date => {
                        in_day = true;
                        field_buf.clear();
                    }
                    "Author" => {
                        let mut a = Author::default();
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"ValidYN" => a.valid = attr.value.as_ref() == b"Y",
                                b"CorrespondingAuthor" => {
                                    a.corresponding = attr.value.as_ref() == b"Y";
                                }
                                _ => {}
                            }
                        }
                        author = Some(a);
                    }
                    "LastName" if author.is_some() => {
                        in_last_name = true;
                        field_buf.clear();
                    }
                    "ForeName" if author.is_some() => {
                        in_fore_name = true;
                        field_buf.clear();
                    }
                    "Initials" if author.is_some() => {
                        in_initials = true;
                        field_buf.clear();
                    }
                    "AffiliationInfo" => {
                        in_affiliation_info = true;
                    }
                    "Affiliation" if in_affiliation_info => {
                        in_affiliation = true;
                        affiliation_buf.clear();
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(_)) => {
                saw_element = true;
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape()?;
                if in_title {
                    title_buf.push_str(&text);
                } else if in_affiliation {
                    affiliation_buf.push_str(&text);
                } else if in_pmid
                    || in_year
                    || in_month
                    || in_day
                    || in_last_name
                    || in_fore_name
                    || in_initials
                {
                    field_buf.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();

                match tag.as_str() {
                    "PubmedArticle" => {
                        let state = std::mem::take(&mut current);
                        articles.push(state.into_parts());
                    }
                    "PMID" if in_pmid => {
                        in_pmid = false;
                        current.pmid_seen = true;
                        current.pmid = take_nonempty(&mut field_buf);
                    }
                    "ArticleTitle" if in_title => {
                        in_title = false;
                        current.title_seen = true;
                        current.title = take_nonempty(&mut title_buf);
                    }
                    "PubDate" if in_pub_date => {
                        in_pub_date = false;
                    }
                    "Year" if in_year => {
                        in_year = false;
                        if let Some(date) = current.pub_date.as_mut() {
                            date.year = take_nonempty(&mut field_buf);
                        }
                    }
                    "Month" if in_month => {
                        in_month = false;
                        if let Some(date) = current.pub_date.as_mut() {
                            date.month = take_nonempty(&mut field_buf);
                        }
                    }
                    "Day" if in_day => {
                        in_day = false;
                        if let Some(date) = current.pub_date.as_mut() {
                            date.day = take_nonempty(&mut field_buf);
                        }
                    }
                    "LastName" if in_last_name => {
                        in_last_name = false;
                        if let Some(a) = author.as_mut() {
                            a.last_name = take_nonempty(&mut field_buf);
                        }
                    }
                    "ForeName" if in_fore_name => {
                        in_fore_name = false;
                        if let Some(a) = author.as_mut() {
                            a.fore_name = take_nonempty(&mut field_buf);
                        }
                    }
                    "Initials" if in_initials => {
                        in_initials = false;
                        if let Some(a) = author.as_mut() {
                            a.initials = take_nonempty(&mut field_buf);
                        }
                    }
                    "Author" => {
                        if let Some(done) = author.take() {
                            current.authors.push(done);
                        }
                    }
                    "AffiliationInfo" => {
                        in_affiliation_info = false;
                    }
                    "Affiliation" if in_affiliation => {
                        in_affiliation = false;
                        if let Some(text) = take_nonempty(&mut affiliation_buf) {
                            if let Some(a) = author.as_mut() {
                                a.affiliations.push(text.clone());
                            }
                            current.affiliations.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(PubmedError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let (_, fallback) = current.into_parts();
    Ok(DocumentScan {
        articles,
        fallback,
        saw_element,
    })
}

/// Take the trimmed buffer contents, treating whitespace-only as absent.
fn take_nonempty(buf: &mut String) -> Option<String> {
    let trimmed = buf.trim();
    let result = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    };
    buf.clear();
    result
}

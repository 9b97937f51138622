//! Heuristic classification of author affiliation strings.
//!
//! Decides whether a free-form affiliation line names a pharmaceutical or
//! biotech company rather than an academic institution, and pulls company
//! names and contact emails out of affiliation text. Everything here is a
//! pure function over borrowed text: no I/O, no configuration, and
//! deterministic output for any input, so the functions are safe to call
//! concurrently across articles.

pub mod classify;
pub mod extract;

pub use classify::is_company_affiliation;
pub use extract::{extract_company_name, extract_email, get_company_affiliations};

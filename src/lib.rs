//! testscout library crate
//!
//! Two total functions sit at the core: framework classification from a
//! repository listing, and test-case extraction from model text. Neither
//! performs I/O; fetching listings and model output is up to the caller.

pub mod catalog;
pub mod config;
pub mod detect;
pub mod suggest;

pub use catalog::{FrameworkError, FrameworkLabel, Language};
pub use detect::{classify_framework, classify_framework_or_degrade, explain_classification};
pub use suggest::{extract_suggestions, ParseOptions, SuggestionExtractor, SuggestionRecord};

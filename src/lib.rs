//! # wikisum
//!
//! Saves the title and opening paragraphs of a Wikipedia article to a text file.
//!
//! ## Features
//!
//! - **Prose-only summaries**: paragraphs come from the article body, skipping
//!   empty paragraphs and inline coordinate widgets
//! - **Word budget**: whole paragraphs are collected until the budget is reached
//! - **Safe file names**: the title is sanitized before it names the output file

pub mod config;
pub mod document;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod sanitize;

pub use config::Config;
pub use document::{Document, Matcher};
pub use extract::{extract_summary, extract_title, Summary};
pub use fetch::{DocumentProvider, HttpProvider};
pub use pipeline::{Pipeline, RunError, RunReport};
pub use sanitize::sanitize;

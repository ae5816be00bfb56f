//! Title and summary extraction from a parsed article page.
//!
//! The summary is built from the leading prose paragraphs of the article
//! body, stopping once the word budget is reached. Paragraphs are never cut.

use crate::document::{self, Document, Matcher};
use scraper::ElementRef;
use thiserror::Error;
use tracing::{debug, warn};

/// Words collected before paragraph selection stops
pub const DEFAULT_MAX_WORDS: usize = 100;

/// Separator placed between paragraphs in the summary text
const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    #[error("page title not found")]
    TitleNotFound,
}

/// Where the paragraph candidates came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    /// Direct paragraph children of the article body container
    Primary,
    /// Every paragraph in the document
    Fallback,
}

/// Paragraphs collected for a summary, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Included paragraph texts
    pub paragraphs: Vec<String>,
    /// Whitespace-delimited tokens across `paragraphs`
    pub word_count: usize,
    /// Selector tier that produced the candidates
    pub tier: SelectionTier,
    /// Candidates seen before filtering
    pub candidates: usize,
}

impl Summary {
    /// Paragraphs joined by a blank line
    pub fn text(&self) -> String {
        self.paragraphs.join(PARAGRAPH_SEPARATOR)
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

fn title_matcher() -> Matcher {
    Matcher::tag("h1").with_id("firstHeading")
}

fn body_paragraph_matcher() -> Matcher {
    Matcher::tag("p").child_of(Matcher::tag("div").with_class("mw-parser-output"))
}

fn coordinates_matcher() -> Matcher {
    Matcher::tag("span").with_id("coordinates")
}

/// Extract the article title from the page heading
pub fn extract_title(document: &Document) -> Result<String, ExtractError> {
    document
        .find_first(&title_matcher())
        .map(document::text_content)
        .ok_or(ExtractError::TitleNotFound)
}

/// Extract up to roughly `max_words` words of leading article prose.
///
/// The paragraph that reaches the budget is kept whole, so the result may run
/// past `max_words`. A budget of zero still yields the first usable paragraph.
pub fn extract_summary(document: &Document, max_words: usize) -> Summary {
    let (tier, candidates) = select_candidates(document);
    debug!(count = candidates.len(), ?tier, "paragraph candidates");

    let mut summary = Summary {
        paragraphs: Vec::new(),
        word_count: 0,
        tier,
        candidates: candidates.len(),
    };

    let coordinates = coordinates_matcher();
    for candidate in candidates {
        let text = document::text_content(candidate);
        if text.is_empty() || document::contains(candidate, &coordinates) {
            continue;
        }

        summary.word_count += count_words(&text);
        summary.paragraphs.push(text);
        if summary.word_count >= max_words {
            break;
        }
    }

    if summary.is_empty() {
        warn!("no usable paragraphs found");
    }

    summary
}

/// Article body paragraphs, or every paragraph when the body has none
fn select_candidates(document: &Document) -> (SelectionTier, Vec<ElementRef<'_>>) {
    let primary = document.find_all(&body_paragraph_matcher());
    if !primary.is_empty() {
        return (SelectionTier::Primary, primary);
    }

    warn!("no paragraphs in article body, falling back to all paragraphs");
    (SelectionTier::Fallback, document.find_all(&Matcher::tag("p")))
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

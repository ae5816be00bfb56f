//! Read-only HTML document with value-based element queries.
//!
//! Wraps `scraper::Html` and exposes `find_all` / `find_first` over plain
//! [`Matcher`] predicates instead of CSS selector strings.

use scraper::{ElementRef, Html};

/// A value predicate over a single element.
///
/// Every field that is set must match; unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matcher {
    tag: Option<String>,
    id: Option<String>,
    class: Option<String>,
    parent: Option<Box<Matcher>>,
}

impl Matcher {
    /// Match elements with the given tag name
    pub fn tag(name: &str) -> Self {
        Self {
            tag: Some(name.to_ascii_lowercase()),
            ..Self::default()
        }
    }

    /// Require an exact `id` attribute
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Require `class` to be one of the element's classes
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Require the direct parent element to match `parent`
    pub fn child_of(mut self, parent: Matcher) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Check the predicate against one element
    pub fn matches(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();

        if let Some(tag) = &self.tag {
            if value.name() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if value.id() != Some(id.as_str()) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !value.classes().any(|c| c == class) {
                return false;
            }
        }
        if let Some(parent) = &self.parent {
            let parent_element = element.parent().and_then(ElementRef::wrap);
            match parent_element {
                Some(p) if parent.matches(p) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Parsed, immutable HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document. Malformed markup is recovered, never rejected.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// All matching elements in document order
    pub fn find_all(&self, matcher: &Matcher) -> Vec<ElementRef<'_>> {
        self.elements().filter(|el| matcher.matches(*el)).collect()
    }

    /// First matching element in document order
    pub fn find_first(&self, matcher: &Matcher) -> Option<ElementRef<'_>> {
        self.elements().find(|el| matcher.matches(*el))
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }
}

/// Whether any element nested inside `element` (excluding itself) matches
pub fn contains(element: ElementRef<'_>, matcher: &Matcher) -> bool {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|el| matcher.matches(el))
}

/// Concatenated descendant text with whitespace runs collapsed to one space
pub fn text_content(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

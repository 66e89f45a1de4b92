//! # Render Targets
//!
//! The engine never owns the document it renders into. It talks to it through
//! [`RenderTarget`]: look elements up by id, query inside a container with a
//! small fixed set of selectors, and overwrite text, markup and attributes.

use std::fmt;

use serde::Serialize;

/// Handle to one element of a render target. Only meaningful for the target
/// that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef(usize);

impl ElementRef {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Selectors the engine queries inside a section container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `h2, .section-title`
    SectionTitle,
    /// `.checklist`
    ChecklistItem,
    /// `.item-text`
    ItemText,
    /// `.section-tip`
    SectionTip,
    /// `.section-note`
    SectionNote,
}

impl Selector {
    /// CSS form of the selector.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::SectionTitle => "h2, .section-title",
            Self::ChecklistItem => ".checklist",
            Self::ItemText => ".item-text",
            Self::SectionTip => ".section-tip",
            Self::SectionNote => ".section-note",
        }
    }

    /// Whether an element with `tag` and `classes` matches.
    pub fn matches(&self, tag: &str, classes: &[String]) -> bool {
        let has = |class: &str| classes.iter().any(|c| c == class);
        match self {
            Self::SectionTitle => tag.eq_ignore_ascii_case("h2") || has("section-title"),
            Self::ChecklistItem => has("checklist"),
            Self::ItemText => has("item-text"),
            Self::SectionTip => has("section-tip"),
            Self::SectionNote => has("section-note"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// One entry of the language selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// A document the engine can render into.
///
/// Lookups return `None` or an empty list when nothing matches; mutations on
/// a handle the target does not know are ignored.
pub trait RenderTarget {
    /// The element with `id`, if the document has one.
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// First descendant of `scope` matching `selector`, in document order.
    fn query(&self, scope: ElementRef, selector: Selector) -> Option<ElementRef>;

    /// Every descendant of `scope` matching `selector`, in document order.
    fn query_all(&self, scope: ElementRef, selector: Selector) -> Vec<ElementRef>;

    /// Replace the element's text content.
    fn set_text(&mut self, element: ElementRef, text: &str);

    /// Replace the element's inner markup.
    fn set_markup(&mut self, element: ElementRef, markup: &str);

    /// Set an attribute on the document root (`lang`, `dir`).
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Set the document title.
    fn set_title(&mut self, title: &str);

    /// Remove every option from a selector element.
    fn clear_options(&mut self, select: ElementRef);

    /// Append one option to a selector element.
    fn append_option(&mut self, select: ElementRef, option: SelectOption);
}

//! # In-Memory Document
//!
//! [`MemoryDocument`] is an arena of elements implementing [`RenderTarget`].
//! It backs the `render` preview command and the engine tests; comparing two
//! documents with `==` compares their full rendered state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::{SECTION_IDS, SELECTOR_ID, TEXT_BINDINGS};
use crate::target::{ElementRef, RenderTarget, SelectOption, Selector};

/// One node of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryDocument {
    title: String,
    root_attributes: BTreeMap<String, String>,
    elements: Vec<Element>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty document holding only a `body` element.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            root_attributes: BTreeMap::new(),
            elements: vec![Element {
                tag: "body".to_string(),
                ..Element::default()
            }],
        }
    }

    /// The standard CleanFlow page: every text-bound element, the language
    /// selector, and the six section containers, each holding a title,
    /// `items_per_section` checklist items, a tip and a note.
    pub fn page(items_per_section: usize) -> Self {
        let mut doc = Self::new();
        let body = doc.body();

        for (id, _) in TEXT_BINDINGS {
            doc.append(body, "span", Some(id), &[]);
        }
        doc.append(body, "select", Some(SELECTOR_ID), &[]);

        for id in SECTION_IDS {
            let section = doc.append(body, "section", Some(id), &["section"]);
            doc.append(section, "h2", None, &["section-title"]);
            let list = doc.append(section, "ul", None, &[]);
            for _ in 0..items_per_section {
                let item = doc.append(list, "li", None, &["checklist"]);
                doc.append(item, "input", None, &["item-check"]);
                doc.append(item, "span", None, &["item-text"]);
            }
            doc.append(section, "p", None, &["section-tip"]);
            doc.append(section, "p", None, &["section-note"]);
        }
        doc
    }

    pub fn body(&self) -> ElementRef {
        ElementRef::new(0)
    }

    /// Add a child element under `parent` and return its handle.
    ///
    /// An unknown `parent` leaves the new element detached.
    pub fn append(
        &mut self,
        parent: ElementRef,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
    ) -> ElementRef {
        let index = self.elements.len();
        self.elements.push(Element {
            id: id.map(str::to_string),
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Element::default()
        });
        if let Some(parent) = self.elements.get_mut(parent.index()) {
            parent.children.push(index);
        }
        ElementRef::new(index)
    }

    /// Detach the element with `id` (and its subtree) from the document.
    /// Returns whether anything was removed.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        let Some(target) = self.element_by_id(id) else {
            return false;
        };
        for element in &mut self.elements {
            element.children.retain(|&c| c != target.index());
        }
        if let Some(element) = self.elements.get_mut(target.index()) {
            element.id = None;
        }
        true
    }

    pub fn element(&self, element: ElementRef) -> Option<&Element> {
        self.elements.get(element.index())
    }

    /// Text of the element with `id`.
    pub fn text_of(&self, id: &str) -> Option<&str> {
        self.element_by_id(id)
            .and_then(|e| self.element(e))
            .map(|e| e.text.as_str())
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    /// Options of the element with `id`, empty if there is none.
    pub fn options_of(&self, id: &str) -> &[SelectOption] {
        self.element_by_id(id)
            .and_then(|e| self.element(e))
            .map(|e| e.options.as_slice())
            .unwrap_or(&[])
    }

    fn attached(&self, index: usize) -> bool {
        index == 0 || self.descendants(self.body()).contains(&index)
    }

    /// Descendant indices of `scope` in document order.
    fn descendants(&self, scope: ElementRef) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = match self.element(scope) {
            Some(e) => e.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(index) = stack.pop() {
            out.push(index);
            if let Some(e) = self.elements.get(index) {
                stack.extend(e.children.iter().rev().copied());
            }
        }
        out
    }
}

impl RenderTarget for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .filter(|&index| self.attached(index))
            .map(ElementRef::new)
    }

    fn query(&self, scope: ElementRef, selector: Selector) -> Option<ElementRef> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn query_all(&self, scope: ElementRef, selector: Selector) -> Vec<ElementRef> {
        self.descendants(scope)
            .into_iter()
            .filter(|&index| {
                let e = &self.elements[index];
                selector.matches(&e.tag, &e.classes)
            })
            .map(ElementRef::new)
            .collect()
    }

    fn set_text(&mut self, element: ElementRef, text: &str) {
        if let Some(e) = self.elements.get_mut(element.index()) {
            e.text = text.to_string();
            e.markup = None;
        }
    }

    fn set_markup(&mut self, element: ElementRef, markup: &str) {
        if let Some(e) = self.elements.get_mut(element.index()) {
            e.markup = Some(markup.to_string());
            e.text.clear();
        }
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes.insert(name.to_string(), value.to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn clear_options(&mut self, select: ElementRef) {
        if let Some(e) = self.elements.get_mut(select.index()) {
            e.options.clear();
        }
    }

    fn append_option(&mut self, select: ElementRef, option: SelectOption) {
        if let Some(e) = self.elements.get_mut(select.index()) {
            e.options.push(option);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_has_every_bound_id() {
        let doc = MemoryDocument::page(4);
        for (id, _) in TEXT_BINDINGS {
            assert!(doc.element_by_id(id).is_some(), "missing #{id}");
        }
        for id in SECTION_IDS {
            let section = doc.element_by_id(id).unwrap();
            assert_eq!(doc.query_all(section, Selector::ChecklistItem).len(), 4);
            assert!(doc.query(section, Selector::SectionTitle).is_some());
            assert!(doc.query(section, Selector::SectionTip).is_some());
        }
        assert!(doc.element_by_id(SELECTOR_ID).is_some());
    }

    #[test]
    fn query_is_scoped_and_in_document_order() {
        let doc = MemoryDocument::page(2);
        let daily = doc.element_by_id("daily").unwrap();
        let texts = doc.query_all(daily, Selector::ItemText);
        assert_eq!(texts.len(), 2);
        assert!(texts[0].index() < texts[1].index());

        let item = doc.query(daily, Selector::ChecklistItem).unwrap();
        assert_eq!(doc.query(item, Selector::ItemText), Some(texts[0]));
    }

    #[test]
    fn removed_element_is_not_found() {
        let mut doc = MemoryDocument::page(1);
        assert!(doc.remove_by_id("brand-text"));
        assert!(doc.element_by_id("brand-text").is_none());
        assert!(!doc.remove_by_id("brand-text"));
    }

    #[test]
    fn removed_section_hides_its_subtree() {
        let mut doc = MemoryDocument::page(1);
        let body = doc.body();
        let before = doc.query_all(body, Selector::ChecklistItem).len();
        doc.remove_by_id("weekly");
        assert_eq!(doc.query_all(body, Selector::ChecklistItem).len(), before - 1);
    }

    #[test]
    fn text_and_markup_overwrite_each_other() {
        let mut doc = MemoryDocument::page(1);
        let title = doc.element_by_id("main-title").unwrap();
        doc.set_markup(title, "<b>x</b>");
        doc.set_text(title, "plain");
        let element = doc.element(title).unwrap();
        assert_eq!(element.text, "plain");
        assert_eq!(element.markup, None);
    }

    #[test]
    fn unknown_handles_are_ignored() {
        let mut doc = MemoryDocument::new();
        let before = doc.clone();
        doc.set_text(ElementRef::new(99), "x");
        doc.append_option(ElementRef::new(99), SelectOption {
            value: "he".into(),
            label: "he".into(),
            selected: false,
        });
        assert_eq!(doc, before);
    }
}

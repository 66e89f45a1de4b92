//! # Hydration Engine
//!
//! Applies a content pack to a render target. Every mutation is a plain
//! overwrite and the language selector is rebuilt from scratch, so rendering
//! the same pack twice leaves the target exactly as rendering it once.
//!
//! A missing element or a falsy pack field skips that one assignment and
//! nothing else.

use std::collections::BTreeMap;

use cleanflow_core::{
    is_truthy, ContentPack, LanguageCode, LanguageTable, DEFAULT_PREFERENCE_KEY,
};
use cleanflow_pack::LoadResults;
use serde_json::Value;

use crate::context::LanguageContext;
use crate::error::HydrateError;
use crate::preference::PreferenceStore;
use crate::target::{ElementRef, RenderTarget, SelectOption, Selector};

/// Element id and the pack path whose text it receives.
pub const TEXT_BINDINGS: [(&str, &str); 13] = [
    ("brand-text", "brand"),
    ("main-title", "title"),
    ("main-subtitle", "subtitle"),
    ("greg-label", "date.gregorian"),
    ("heb-label", "date.hebrew"),
    ("time-label", "date.time"),
    ("motivation-text", "sections.motivation.text"),
    ("verse-text", "footer.verse"),
    ("copyright-text", "footer.credits.copyright"),
    ("design-text", "footer.credits.design"),
    ("related-text", "footer.credits.related"),
    ("footer-note", "footer.note"),
    ("language-label", "languageSelector.label"),
];

/// Section containers, by element id. Each id is also the section's key in
/// the pack.
pub const SECTION_IDS: [&str; 6] = [
    "fundamentals",
    "daily",
    "weekly",
    "organization",
    "mental",
    "goldenMinutes",
];

pub const SELECTOR_ID: &str = "language-selector";

/// Escape text for inclusion in markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Text form of a truthy scalar. Mappings and sequences have none.
fn display_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_text(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(display_text)
}

/// Renders loaded packs and handles language changes.
#[derive(Debug, Clone)]
pub struct HydrationEngine {
    languages: LanguageTable,
    packs: BTreeMap<LanguageCode, ContentPack>,
    preference_key: String,
}

impl HydrationEngine {
    pub fn new(languages: LanguageTable, packs: BTreeMap<LanguageCode, ContentPack>) -> Self {
        Self {
            languages,
            packs,
            preference_key: DEFAULT_PREFERENCE_KEY.to_string(),
        }
    }

    /// Build from the output of `PackStore::load_all`. Languages that failed
    /// to load are logged and rendered as absent.
    pub fn from_loaded(languages: LanguageTable, loaded: LoadResults) -> Self {
        let mut packs = BTreeMap::new();
        for (code, result) in loaded {
            match result {
                Ok(pack) => {
                    packs.insert(code, pack);
                }
                Err(e) => tracing::error!(%code, error = %e, "failed to load translation"),
            }
        }
        Self::new(languages, packs)
    }

    pub fn with_preference_key(mut self, key: impl Into<String>) -> Self {
        self.preference_key = key.into();
        self
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    pub fn pack(&self, code: LanguageCode) -> Option<&ContentPack> {
        self.packs.get(&code)
    }

    /// Pick the starting language and render it.
    ///
    /// The stored preference wins when it names a supported language;
    /// otherwise the table's default is used. An unreadable preference
    /// store is logged and treated as empty.
    pub fn startup(
        &self,
        prefs: &dyn PreferenceStore,
        target: &mut dyn RenderTarget,
    ) -> LanguageContext {
        let stored = match prefs.get(&self.preference_key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "cannot read language preference");
                None
            }
        };
        let current = match stored.as_deref() {
            Some(s) => self.supported(s).unwrap_or_else(|| {
                tracing::debug!(stored = s, "ignoring unsupported stored language");
                self.languages.default_language()
            }),
            None => self.languages.default_language(),
        };

        let context = LanguageContext::new(current);
        self.render_current(&context, target);
        tracing::info!(language = %current, "started");
        context
    }

    /// Switch to `requested`, persist the choice, and re-render.
    ///
    /// # Errors
    ///
    /// - [`HydrateError::UnsupportedLanguage`] when `requested` is not in the
    ///   table. Neither `context` nor `target` is touched.
    /// - [`HydrateError::Preference`] when the choice could not be saved. The
    ///   switch and render still happen.
    pub fn change_language(
        &self,
        context: &mut LanguageContext,
        requested: &str,
        prefs: &mut dyn PreferenceStore,
        target: &mut dyn RenderTarget,
    ) -> Result<(), HydrateError> {
        let Some(code) = self.supported(requested) else {
            tracing::warn!(requested, "unsupported language");
            return Err(HydrateError::UnsupportedLanguage {
                requested: requested.to_string(),
            });
        };

        context.switch_to(code);
        let saved = prefs.set(&self.preference_key, code.as_str());
        self.render_current(context, target);
        saved
    }

    /// Render the context's current language.
    pub fn render_current(&self, context: &LanguageContext, target: &mut dyn RenderTarget) {
        let active = context.current();
        self.render(self.packs.get(&active), active, target);
    }

    /// Apply `pack` to `target`, marking `active` in the selector.
    /// Does nothing when `pack` is `None`.
    pub fn render(
        &self,
        pack: Option<&ContentPack>,
        active: LanguageCode,
        target: &mut dyn RenderTarget,
    ) {
        let Some(pack) = pack else {
            tracing::debug!(language = %active, "no pack loaded, nothing to render");
            return;
        };

        if let Some(code) = pack.meta_code() {
            target.set_root_attribute("lang", code);
        }
        if let Some(direction) = pack.meta_direction() {
            target.set_root_attribute("dir", direction);
        }
        if let Some(title) = pack.text("title") {
            target.set_title(title);
        }

        for (id, path) in TEXT_BINDINGS {
            let Some(element) = target.element_by_id(id) else {
                continue;
            };
            if let Some(text) = pack.lookup(path).and_then(display_text) {
                target.set_text(element, &text);
            }
        }

        for id in SECTION_IDS {
            if let Some(container) = target.element_by_id(id) {
                if let Some(data) = pack.section(id).filter(|d| is_truthy(d)) {
                    self.render_section(id, container, data, target);
                }
            }
        }

        self.render_selector(active, target);
    }

    fn render_section(
        &self,
        id: &str,
        container: ElementRef,
        data: &Value,
        target: &mut dyn RenderTarget,
    ) {
        if let Some(title) = target.query(container, Selector::SectionTitle) {
            let emoji = field_text(data, "emoji").unwrap_or_default();
            let text = field_text(data, "title").unwrap_or_default();
            let markup = format!(
                "<span class=\"emoji\">{}</span> {}",
                escape_html(&emoji),
                escape_html(&text)
            );
            target.set_markup(title, &markup);
        }

        let items = data.get("items").and_then(Value::as_array);
        let checklist = target.query_all(container, Selector::ChecklistItem);
        let provided = items.map_or(0, Vec::len);
        if provided != checklist.len() {
            tracing::debug!(
                section = id,
                provided,
                slots = checklist.len(),
                "checklist item count differs"
            );
        }
        for (index, slot) in checklist.into_iter().enumerate() {
            let Some(text) = items.and_then(|i| i.get(index)).and_then(display_text) else {
                continue;
            };
            if let Some(text_element) = target.query(slot, Selector::ItemText) {
                target.set_text(text_element, &text);
            }
        }

        for (selector, key) in [(Selector::SectionTip, "tip"), (Selector::SectionNote, "note")] {
            if let Some(element) = target.query(container, selector) {
                if let Some(text) = field_text(data, key) {
                    target.set_text(element, &text);
                }
            }
        }
    }

    fn render_selector(&self, active: LanguageCode, target: &mut dyn RenderTarget) {
        let Some(select) = target.element_by_id(SELECTOR_ID) else {
            return;
        };
        target.clear_options(select);
        for code in self.languages.iter() {
            let label = self
                .packs
                .get(&code)
                .and_then(|p| p.display_name(code))
                .unwrap_or(code.as_str());
            target.append_option(
                select,
                SelectOption {
                    value: code.as_str().to_string(),
                    label: label.to_string(),
                    selected: code == active,
                },
            );
        }
    }

    fn supported(&self, requested: &str) -> Option<LanguageCode> {
        requested
            .parse::<LanguageCode>()
            .ok()
            .filter(|code| self.languages.contains(*code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::preference::MemoryPreferenceStore;
    use serde_json::json;

    fn pack(code: &str, direction: &str, brand: &str) -> ContentPack {
        ContentPack::from_value(json!({
            "meta": {
                "language": code,
                "code": code,
                "direction": direction,
                "version": "1.0.0"
            },
            "title": format!("Title {code}"),
            "subtitle": "Subtitle",
            "brand": brand,
            "date": { "gregorian": "Date", "hebrew": "Hebrew", "time": "Time" },
            "sections": {
                "fundamentals": {
                    "title": "Basics",
                    "emoji": "🧭",
                    "items": ["a", "b", "c"],
                    "tip": "Tip"
                },
                "daily": { "title": "Daily", "emoji": "☀️", "items": ["one", "two"] },
                "weekly": { "title": "Weekly", "emoji": "📅", "items": [], "note": "Note" },
                "motivation": { "title": "Go", "emoji": "💪", "text": "Keep going" }
            },
            "footer": {
                "verse": "Verse",
                "credits": { "copyright": "©", "design": "Design", "related": "Related" },
                "note": "Footer"
            },
            "languageSelector": {
                "label": "Language",
                "languages": { (code): format!("Name {code}") }
            }
        }))
    }

    fn engine() -> HydrationEngine {
        let table = LanguageTable::new(
            vec![LanguageCode::He, LanguageCode::En, LanguageCode::Ru],
            LanguageCode::He,
            LanguageCode::En,
        )
        .unwrap();
        let mut packs = BTreeMap::new();
        packs.insert(LanguageCode::He, pack("he", "rtl", "קלינפלו"));
        packs.insert(LanguageCode::En, pack("en", "ltr", "CleanFlow"));
        HydrationEngine::new(table, packs)
    }

    fn item_texts(doc: &MemoryDocument, section: &str) -> Vec<String> {
        let container = doc.element_by_id(section).unwrap();
        doc.query_all(container, Selector::ItemText)
            .into_iter()
            .map(|e| doc.element(e).unwrap().text.clone())
            .collect()
    }

    #[test]
    fn render_sets_root_title_and_bound_text() {
        let engine = engine();
        let mut doc = MemoryDocument::page(3);
        engine.render(engine.pack(LanguageCode::En), LanguageCode::En, &mut doc);

        assert_eq!(doc.root_attribute("lang"), Some("en"));
        assert_eq!(doc.root_attribute("dir"), Some("ltr"));
        assert_eq!(doc.title(), "Title en");
        assert_eq!(doc.text_of("brand-text"), Some("CleanFlow"));
        assert_eq!(doc.text_of("related-text"), Some("Related"));
        assert_eq!(doc.text_of("motivation-text"), Some("Keep going"));
        assert_eq!(doc.text_of("language-label"), Some("Language"));
    }

    #[test]
    fn render_without_pack_is_a_no_op() {
        let engine = engine();
        let mut doc = MemoryDocument::page(3);
        let before = doc.clone();
        engine.render(None, LanguageCode::Ru, &mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn render_twice_equals_render_once() {
        let engine = engine();
        let mut once = MemoryDocument::page(3);
        engine.render(engine.pack(LanguageCode::He), LanguageCode::He, &mut once);
        let mut twice = once.clone();
        engine.render(engine.pack(LanguageCode::He), LanguageCode::He, &mut twice);
        assert_eq!(once, twice);
        assert_eq!(twice.options_of(SELECTOR_ID).len(), 3);
    }

    #[test]
    fn section_title_is_escaped_markup() {
        let mut value = pack("en", "ltr", "CleanFlow").into_value();
        value["sections"]["daily"]["title"] = json!("Dishes & <Laundry>");
        let engine = engine();
        let mut doc = MemoryDocument::page(1);
        engine.render(Some(&ContentPack::from_value(value)), LanguageCode::En, &mut doc);

        let daily = doc.element_by_id("daily").unwrap();
        let title = doc.query(daily, Selector::SectionTitle).unwrap();
        assert_eq!(
            doc.element(title).unwrap().markup.as_deref(),
            Some("<span class=\"emoji\">☀️</span> Dishes &amp; &lt;Laundry&gt;")
        );
    }

    #[test]
    fn extra_checklist_slots_keep_prior_text() {
        let engine = engine();
        let mut doc = MemoryDocument::page(3);
        let daily = doc.element_by_id("daily").unwrap();
        let third = doc.query_all(daily, Selector::ItemText)[2];
        doc.set_text(third, "keep me");

        engine.render(engine.pack(LanguageCode::En), LanguageCode::En, &mut doc);
        assert_eq!(item_texts(&doc, "daily"), ["one", "two", "keep me"]);
        assert_eq!(item_texts(&doc, "fundamentals"), ["a", "b", "c"]);
    }

    #[test]
    fn tip_and_note_only_when_present() {
        let engine = engine();
        let mut doc = MemoryDocument::page(1);
        engine.render(engine.pack(LanguageCode::En), LanguageCode::En, &mut doc);

        let text = |doc: &MemoryDocument, section: &str, selector| {
            let container = doc.element_by_id(section).unwrap();
            let element = doc.query(container, selector).unwrap();
            doc.element(element).unwrap().text.clone()
        };
        assert_eq!(text(&doc, "fundamentals", Selector::SectionTip), "Tip");
        assert_eq!(text(&doc, "fundamentals", Selector::SectionNote), "");
        assert_eq!(text(&doc, "weekly", Selector::SectionNote), "Note");
    }

    #[test]
    fn missing_brand_element_skips_only_that_assignment() {
        let engine = engine();
        let mut doc = MemoryDocument::page(2);
        doc.remove_by_id("brand-text");
        engine.render(engine.pack(LanguageCode::He), LanguageCode::He, &mut doc);

        assert_eq!(doc.text_of("brand-text"), None);
        for (id, _) in TEXT_BINDINGS.iter().filter(|(id, _)| *id != "brand-text") {
            assert!(!doc.text_of(id).unwrap_or_default().is_empty(), "#{id} not rendered");
        }
    }

    #[test]
    fn falsy_field_leaves_element_alone() {
        let engine = engine();
        let mut doc = MemoryDocument::page(1);
        let brand = doc.element_by_id("brand-text").unwrap();
        doc.set_text(brand, "previous");

        let mut value = pack("en", "ltr", "").into_value();
        value["footer"]["credits"] = json!(null);
        engine.render(Some(&ContentPack::from_value(value)), LanguageCode::En, &mut doc);

        assert_eq!(doc.text_of("brand-text"), Some("previous"));
        assert_eq!(doc.text_of("design-text"), Some(""));
        assert_eq!(doc.text_of("verse-text"), Some("Verse"));
    }

    #[test]
    fn selector_labels_fall_back_to_code() {
        let engine = engine();
        let mut doc = MemoryDocument::page(1);
        engine.render(engine.pack(LanguageCode::He), LanguageCode::He, &mut doc);

        let options = doc.options_of(SELECTOR_ID);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Name he", "Name en", "ru"]);
        let selected: Vec<_> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, ["he"]);
    }

    #[test]
    fn startup_prefers_stored_supported_language() {
        let engine = engine();
        let prefs = MemoryPreferenceStore::new().with(DEFAULT_PREFERENCE_KEY, "en");
        let mut doc = MemoryDocument::page(1);
        let context = engine.startup(&prefs, &mut doc);
        assert_eq!(context.current(), LanguageCode::En);
        assert_eq!(doc.root_attribute("lang"), Some("en"));
    }

    #[test]
    fn startup_ignores_unsupported_stored_language() {
        let engine = engine();
        let prefs = MemoryPreferenceStore::new().with(DEFAULT_PREFERENCE_KEY, "zh");
        let mut doc = MemoryDocument::page(1);
        let context = engine.startup(&prefs, &mut doc);
        assert_eq!(context.current(), LanguageCode::He);
        assert_eq!(doc.root_attribute("dir"), Some("rtl"));
    }

    #[test]
    fn change_language_updates_state_prefs_and_target() {
        let engine = engine();
        let mut prefs = MemoryPreferenceStore::new();
        let mut doc = MemoryDocument::page(1);
        let mut context = engine.startup(&prefs, &mut doc);

        engine.change_language(&mut context, "en", &mut prefs, &mut doc).unwrap();
        assert_eq!(context.current(), LanguageCode::En);
        assert_eq!(prefs.get(DEFAULT_PREFERENCE_KEY).unwrap().as_deref(), Some("en"));
        assert_eq!(doc.root_attribute("dir"), Some("ltr"));
    }

    #[test]
    fn unsupported_change_touches_nothing() {
        let engine = engine();
        let mut prefs = MemoryPreferenceStore::new();
        let mut doc = MemoryDocument::page(1);
        let mut context = engine.startup(&prefs, &mut doc);
        let doc_before = doc.clone();
        let prefs_before = prefs.clone();

        for requested in ["fr", "zh", ""] {
            let err = engine
                .change_language(&mut context, requested, &mut prefs, &mut doc)
                .unwrap_err();
            assert!(matches!(err, HydrateError::UnsupportedLanguage { .. }));
        }
        assert_eq!(context.current(), LanguageCode::He);
        assert_eq!(doc, doc_before);
        assert_eq!(prefs, prefs_before);
    }

    #[test]
    fn change_to_language_without_pack_keeps_previous_render() {
        let engine = engine();
        let mut prefs = MemoryPreferenceStore::new();
        let mut doc = MemoryDocument::page(1);
        let mut context = engine.startup(&prefs, &mut doc);
        let rendered = doc.clone();

        engine.change_language(&mut context, "ru", &mut prefs, &mut doc).unwrap();
        assert_eq!(context.current(), LanguageCode::Ru);
        assert_eq!(doc, rendered);
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(escape_html(r#"a&b<c>"d"'e'"#), "a&amp;b&lt;c&gt;&quot;d&quot;&#39;e&#39;");
    }
}

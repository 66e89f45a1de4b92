//! # cleanflow-hydrate — Content Hydration
//!
//! The runtime rendering path. [`HydrationEngine`] maps the active language's
//! [`ContentPack`] onto a document: root `lang`/`dir`, the title, a fixed list
//! of text-bound elements, six checklist sections, and the language selector.
//!
//! ## Collaborators
//!
//! The engine owns neither the document nor the preference storage:
//!
//! - [`RenderTarget`] is the document seam. [`MemoryDocument`] is the
//!   in-memory implementation used by the `render` preview and the tests.
//! - [`PreferenceStore`] remembers the chosen language.
//!   [`MemoryPreferenceStore`] and [`JsonFilePreferenceStore`] ship here.
//!
//! ## Current language
//!
//! The active language is an explicit [`LanguageContext`] value created by
//! [`HydrationEngine::startup`] and changed only by
//! [`HydrationEngine::change_language`], which rejects codes outside the
//! supported table without touching state or document.
//!
//! [`ContentPack`]: cleanflow_core::ContentPack

pub mod context;
pub mod document;
pub mod engine;
pub mod error;
pub mod preference;
pub mod target;

pub use context::LanguageContext;
pub use document::{Element, MemoryDocument};
pub use engine::{escape_html, HydrationEngine, SECTION_IDS, SELECTOR_ID, TEXT_BINDINGS};
pub use error::HydrateError;
pub use preference::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use target::{ElementRef, RenderTarget, SelectOption, Selector};

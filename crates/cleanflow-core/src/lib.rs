//! # cleanflow-core — Foundational Types for CleanFlow
//!
//! Defines the data model shared by the validation path and the rendering
//! path. Every other crate in the workspace depends on `cleanflow-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed language set.** `LanguageCode` is an enum, not a string. The
//!    pack store, the direction table and the selector all key on it, so an
//!    unknown code is rejected at the parse boundary.
//!
//! 2. **Packs are immutable trees.** `ContentPack` wraps the parsed JSON value
//!    once and only hands out shared references afterwards.
//!
//! 3. **Total recursion.** Completeness and empty-value checks walk packs
//!    through [`tree::walk`] over the tagged [`PackNode`] view, so every
//!    JSON shape has an explicit arm.
//!
//! 4. **Optional chaining is explicit.** [`ContentPack::lookup`] returns
//!    `None` for any absent intermediate node instead of failing.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cleanflow-*` crates.
//! - No `unsafe` code, no `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod language;
pub mod pack;
pub mod tree;
pub mod version;

pub use config::{CleanflowConfig, DEFAULT_PREFERENCE_KEY};
pub use error::CoreError;
pub use language::{LanguageCode, LanguageTable, TextDirection};
pub use pack::{is_truthy, ContentPack, META_KEYS, REQUIRED_SECTIONS, REQUIRED_TOP_LEVEL_KEYS};
pub use tree::{walk, Descend, KeyPath, PackNode};
pub use version::{ChangeKind, Version};

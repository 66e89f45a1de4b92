//! # cleanflow-pack — Content Pack Store
//!
//! Resolves a language code to a parsed [`ContentPack`], or reports why it
//! could not. The store performs no schema validation; callers on both the
//! validation path and the rendering path decide what to do with a pack.
//!
//! ## Sources
//!
//! Where pack bytes come from is behind the [`PackSource`] trait:
//!
//! - [`FsPackSource`] reads `<locales>/<code>/<pack_file>` from disk.
//! - [`MemoryPackSource`] serves blobs held in memory (tests, embedding).
//!
//! ## Loading every language
//!
//! [`PackStore::load_all`] fetches every requested language concurrently and
//! waits for all of them to settle. One language's failure never cancels or
//! hides the others; each code gets its own `Result`.
//!
//! [`ContentPack`]: cleanflow_core::ContentPack

pub mod error;
pub mod source;
pub mod store;

pub use error::StoreError;
pub use source::{FsPackSource, MemoryPackSource, PackSource};
pub use store::{LoadResults, PackStore};

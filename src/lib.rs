//! # mobitext
//!
//! Builds the text stream of a MOBI e-book: body markup, an inline table
//! of contents, and the `filepos` byte offsets that tie them together.
//!
//! ## Features
//!
//! - Append paragraphs, chapter and section titles, page breaks and images
//! - Inline TOC whose fixed-width `filepos` links resolve to the headings
//! - Image references as 1-based `recindex` record numbers
//! - Settings with pass-through metadata for the container packer
//!
//! ## Quick Start
//!
//! ```
//! use mobitext::{Document, ImageRecord};
//!
//! let mut doc = Document::new();
//! doc.set("title", "The adventures of John Doe");
//! doc.set("author", "John Doe");
//!
//! doc.append_chapter_title("Chapter 1");
//! doc.append_paragraph("It was a dark and stormy night.");
//! doc.append_image(ImageRecord::new(vec![0xFF, 0xD8, 0xFF], "image/jpeg"));
//! doc.append_page_break();
//!
//! let markup = doc.text_data()?;
//! assert!(markup.starts_with("<html><head><guide>"));
//! assert!(markup.contains("<img recindex=0000000001 />"));
//! # Ok::<(), mobitext::Error>(())
//! ```
//!
//! ## Offsets
//!
//! Every heading is reachable from the TOC through a `filepos` attribute
//! holding its absolute byte position in the markup, written as ten
//! zero-padded digits. Because the TOC precedes the body, its length is
//! measured with provisional offsets before the real ones are filled in.

mod error;
pub mod mobi;

pub use error::{Error, Result};
pub use mobi::{
    ContentBuffer, ContentElement, ContentProvider, Document, HeadingLevel, HeadingRecord,
    ImageRecord, Layout, Settings, assemble,
};

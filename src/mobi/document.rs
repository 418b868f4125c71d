//! Document assembly.
//!
//! Combines the preamble, table of contents, title and body into the text
//! stream of a MOBI file. The TOC holds absolute offsets into that stream,
//! and those offsets depend on the TOC's own length, so it is rendered
//! twice: once at base 0 to measure it, and again with the real base.

use std::io::{self, Write};
use std::path::Path;

use super::content::{ContentBuffer, ContentElement, HeadingLevel, ImageRecord};
use super::filepos::{resolve_fixed_width, shift_filepos};
use super::render::{HeadingRecord, RenderOptions, render_body, text_for};
use super::settings::Settings;
use super::toc::build_toc;
use crate::error::Result;

const PREFIX: &str = "<html><head><guide><reference title='CONTENT' type='toc' filepos=0000000000 /></guide></head><body>";
const SUFFIX: &str = "</body></html>";

/// A fully assembled document.
#[derive(Debug, Clone)]
pub struct Layout {
    pub markup: String,
    /// Byte offset at which the body starts.
    pub body_start: u64,
    /// Headings with offsets relative to the start of `markup`.
    pub headings: Vec<HeadingRecord>,
}

/// Assemble the complete text markup for `elements`.
pub fn assemble(elements: &[ContentElement], settings: &Settings) -> Result<String> {
    Assembled::build(elements, settings).map(|assembled| assembled.markup)
}

/// Assemble the text markup and report where every heading ended up.
pub fn assemble_layout(elements: &[ContentElement], settings: &Settings) -> Result<Layout> {
    Assembled::build(elements, settings)?.into_layout()
}

/// Assembled markup with heading offsets still relative to the body.
struct Assembled {
    markup: String,
    body_start: u64,
    headings: Vec<HeadingRecord>,
}

impl Assembled {
    fn build(elements: &[ContentElement], settings: &Settings) -> Result<Self> {
        let options = RenderOptions {
            escape_text: settings.escape_text,
        };
        let body = render_body(elements, options)?;

        let mut title = String::with_capacity(settings.title.len() + 9);
        title.push_str("<h1>");
        title.push_str(&text_for(&settings.title, options));
        title.push_str("</h1>");

        let toc = if settings.toc {
            resolve_fixed_width(
                |base| build_toc(&body.headings, base),
                |toc_len| (PREFIX.len() + toc_len + title.len()) as u64,
            )?
        } else {
            String::new()
        };

        let body_start = (PREFIX.len() + toc.len() + title.len()) as u64;
        log::debug!(
            "assembled document: toc {} bytes, body starts at {}",
            toc.len(),
            body_start
        );

        let mut markup =
            String::with_capacity(body_start as usize + body.markup.len() + SUFFIX.len());
        markup.push_str(PREFIX);
        markup.push_str(&toc);
        markup.push_str(&title);
        markup.push_str(&body.markup);
        markup.push_str(SUFFIX);

        Ok(Self {
            markup,
            body_start,
            headings: body.headings,
        })
    }

    /// Shift heading offsets to absolute positions in the markup.
    fn into_layout(self) -> Result<Layout> {
        let body_start = self.body_start;
        let headings = self
            .headings
            .into_iter()
            .map(|mut heading| {
                heading.offset = shift_filepos(heading.offset, body_start)?;
                Ok(heading)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Layout {
            markup: self.markup,
            body_start,
            headings,
        })
    }
}

/// Source of everything the container packer needs to write a MOBI file.
pub trait ContentProvider {
    /// The assembled text markup.
    fn text_data(&self) -> Result<String>;

    /// Image records, in record index order.
    fn images(&self) -> &[ImageRecord];

    /// Document metadata.
    fn metadata(&self) -> &Settings;
}

/// A document under construction: content plus settings.
///
/// # Example
///
/// ```
/// use mobitext::Document;
///
/// let mut doc = Document::new();
/// doc.set("title", "My Book");
/// doc.append_chapter_title("Intro");
/// doc.append_paragraph("Once upon a time.");
///
/// let markup = doc.text_data()?;
/// assert!(markup.contains("<h1>My Book</h1>"));
/// # Ok::<(), mobitext::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    content: ContentBuffer,
    settings: Settings,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            content: ContentBuffer::new(),
            settings,
        }
    }

    pub fn content(&self) -> &ContentBuffer {
        &self.content
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Change a setting, e.g. `set("author", "John Doe")`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.set(key, value);
    }

    pub fn get(&self, key: &str) -> Option<std::borrow::Cow<'_, str>> {
        self.settings.get(key)
    }

    pub fn append_paragraph(&mut self, text: impl Into<String>) {
        self.content.append_paragraph(text);
    }

    pub fn append_heading(&mut self, level: HeadingLevel, text: impl Into<String>) {
        self.content.append_heading(level, text);
    }

    pub fn append_chapter_title(&mut self, title: impl Into<String>) {
        self.content.append_chapter_title(title);
    }

    pub fn append_section_title(&mut self, title: impl Into<String>) {
        self.content.append_section_title(title);
    }

    pub fn append_page_break(&mut self) {
        self.content.append_page_break();
    }

    pub fn append_image(&mut self, record: ImageRecord) -> usize {
        self.content.append_image(record)
    }

    /// Assemble the document and keep the resolved heading positions.
    pub fn layout(&self) -> Result<Layout> {
        assemble_layout(self.content.elements(), &self.settings)
    }

    /// Assemble the text markup.
    pub fn text_data(&self) -> Result<String> {
        assemble(self.content.elements(), &self.settings)
    }

    /// Write the assembled markup to a file on disk.
    pub fn write_text<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        self.write_text_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the assembled markup to any [`Write`] destination.
    pub fn write_text_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let markup = self.text_data()?;
        writer.write_all(markup.as_bytes())?;
        Ok(())
    }
}

impl ContentProvider for Document {
    fn text_data(&self) -> Result<String> {
        Document::text_data(self)
    }

    fn images(&self) -> &[ImageRecord] {
        self.content.images()
    }

    fn metadata(&self) -> &Settings {
        &self.settings
    }
}

//! Content buffer for MOBI text generation.
//!
//! An append-only sequence of content elements plus the registry of image
//! records they reference.

/// Heading levels that can appear in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    /// Chapter title, rendered as `<h2>` with a named anchor.
    Chapter,
    /// Section title, rendered as `<h3>`.
    Section,
}

impl HeadingLevel {
    /// Numeric HTML heading level.
    pub fn number(self) -> u8 {
        match self {
            HeadingLevel::Chapter => 2,
            HeadingLevel::Section => 3,
        }
    }
}

/// One element of the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentElement {
    Paragraph(String),
    Heading(HeadingLevel, String),
    PageBreak,
    /// Index into the image registry.
    Image(usize),
}

/// An encoded image record, as produced by the image subsystem.
///
/// The bytes are opaque here; they are handed to the container packer
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub data: Vec<u8>,
    pub media_type: String,
}

impl ImageRecord {
    pub fn new(data: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            data,
            media_type: media_type.into(),
        }
    }
}

/// Ordered content elements and the images they reference.
#[derive(Debug, Clone, Default)]
pub struct ContentBuffer {
    elements: Vec<ContentElement>,
    images: Vec<ImageRecord>,
}

impl ContentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph of text.
    pub fn append_paragraph(&mut self, text: impl Into<String>) {
        self.elements.push(ContentElement::Paragraph(text.into()));
    }

    /// Append a heading at the given level.
    pub fn append_heading(&mut self, level: HeadingLevel, text: impl Into<String>) {
        self.elements.push(ContentElement::Heading(level, text.into()));
    }

    /// Append a chapter title (`<h2>`).
    pub fn append_chapter_title(&mut self, title: impl Into<String>) {
        self.append_heading(HeadingLevel::Chapter, title);
    }

    /// Append a section title (`<h3>`).
    pub fn append_section_title(&mut self, title: impl Into<String>) {
        self.append_heading(HeadingLevel::Section, title);
    }

    pub fn append_page_break(&mut self) {
        self.elements.push(ContentElement::PageBreak);
    }

    /// Register an image and append a reference to it.
    ///
    /// Returns the registry index of the image.
    pub fn append_image(&mut self, record: ImageRecord) -> usize {
        let index = self.images.len();
        self.images.push(record);
        self.elements.push(ContentElement::Image(index));
        index
    }

    pub fn elements(&self) -> &[ContentElement] {
        &self.elements
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

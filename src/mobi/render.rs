//! Body markup rendering.
//!
//! Turns the content buffer into MOBI body markup and records where each
//! heading starts. Offsets are byte positions relative to the start of the
//! body; the assembler shifts them once the length of everything in front
//! of the body is known.

use std::borrow::Cow;

use super::content::{ContentElement, HeadingLevel};
use super::filepos::write_filepos;
use crate::error::Result;

pub(crate) const PAGE_BREAK: &str = "<mbp:pagebreak/>";

/// A heading encountered while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRecord {
    pub level: HeadingLevel,
    pub title: String,
    /// Byte offset of the heading's markup from the start of the body.
    pub offset: u64,
    /// `title_<element index>`.
    pub anchor_id: String,
}

/// Options that affect how text is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub escape_text: bool,
}

/// Rendered body markup with the headings found in it.
#[derive(Debug, Clone)]
pub struct RenderedBody {
    pub markup: String,
    pub headings: Vec<HeadingRecord>,
}

/// Render content elements to body markup.
pub fn render_body(elements: &[ContentElement], options: RenderOptions) -> Result<RenderedBody> {
    let mut markup = String::new();
    let mut headings = Vec::new();

    for (index, element) in elements.iter().enumerate() {
        let offset = markup.len() as u64;

        match element {
            ContentElement::Paragraph(text) => {
                markup.push_str("<p>");
                markup.push_str(&text_for(text, options));
                markup.push_str("</p>");
            }
            ContentElement::Heading(level, title) => {
                let anchor_id = format!("title_{index}");
                let text = text_for(title, options);
                match level {
                    HeadingLevel::Chapter => {
                        markup.push_str("<a name='");
                        markup.push_str(&anchor_id);
                        markup.push_str("'></a><h2 id='");
                        markup.push_str(&anchor_id);
                        markup.push_str("'>");
                        markup.push_str(&text);
                        markup.push_str("</h2>");
                    }
                    HeadingLevel::Section => {
                        markup.push_str("<h3 id='");
                        markup.push_str(&anchor_id);
                        markup.push_str("'>");
                        markup.push_str(&text);
                        markup.push_str("</h3>");
                    }
                }
                headings.push(HeadingRecord {
                    level: *level,
                    title: text.into_owned(),
                    offset,
                    anchor_id,
                });
            }
            ContentElement::PageBreak => markup.push_str(PAGE_BREAK),
            ContentElement::Image(image_index) => {
                // Record index 0 means "no image", so the first image is 1.
                markup.push_str("<img recindex=");
                write_filepos(*image_index as u64 + 1, &mut markup)?;
                markup.push_str(" />");
            }
        }
    }

    log::debug!(
        "rendered body: {} elements, {} headings, {} bytes",
        elements.len(),
        headings.len(),
        markup.len()
    );

    Ok(RenderedBody { markup, headings })
}

pub(crate) fn text_for(text: &str, options: RenderOptions) -> Cow<'_, str> {
    if options.escape_text {
        Cow::Owned(escape_xml(text))
    } else {
        Cow::Borrowed(text)
    }
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobi::content::ContentBuffer;
    use crate::mobi::content::ImageRecord;

    fn render(buf: &ContentBuffer) -> RenderedBody {
        render_body(buf.elements(), RenderOptions::default()).unwrap()
    }

    #[test]
    fn test_fragments() {
        let mut buf = ContentBuffer::new();
        buf.append_paragraph("Hi");
        buf.append_chapter_title("Intro");
        buf.append_section_title("Part");
        buf.append_page_break();
        buf.append_image(ImageRecord::new(vec![0xFF], "image/jpeg"));

        let body = render(&buf);
        assert_eq!(
            body.markup,
            "<p>Hi</p>\
             <a name='title_1'></a><h2 id='title_1'>Intro</h2>\
             <h3 id='title_2'>Part</h3>\
             <mbp:pagebreak/>\
             <img recindex=0000000001 />"
        );
    }

    #[test]
    fn test_heading_offsets_are_cumulative_fragment_lengths() {
        let mut buf = ContentBuffer::new();
        buf.append_paragraph("Hi");
        buf.append_chapter_title("Intro");
        buf.append_paragraph("Body text");
        buf.append_section_title("Detail");

        let body = render(&buf);
        assert_eq!(body.headings.len(), 2);

        // "<p>Hi</p>"
        assert_eq!(body.headings[0].offset, 9);
        assert_eq!(body.headings[0].anchor_id, "title_1");
        assert_eq!(body.headings[0].level, HeadingLevel::Chapter);

        // 9 + "<a name='title_1'></a><h2 id='title_1'>Intro</h2>" (49)
        //   + "<p>Body text</p>" (16)
        assert_eq!(body.headings[1].offset, 74);
        assert_eq!(body.headings[1].anchor_id, "title_3");
        assert_eq!(body.headings[1].level, HeadingLevel::Section);
        assert!(body.markup[74..].starts_with("<h3 id='title_3'>"));
    }

    #[test]
    fn test_offsets_count_bytes_not_chars() {
        let mut buf = ContentBuffer::new();
        buf.append_paragraph("héllo wörld");
        buf.append_chapter_title("Zwei");

        let body = render(&buf);
        // 7 bytes of tags + 13 bytes of UTF-8 text
        assert_eq!(body.headings[0].offset, 20);
    }

    #[test]
    fn test_recindex_is_registry_index_plus_one() {
        let mut buf = ContentBuffer::new();
        for _ in 0..12 {
            buf.append_image(ImageRecord::new(Vec::new(), "image/gif"));
        }
        let body = render(&buf);
        assert!(body.markup.starts_with("<img recindex=0000000001 />"));
        assert!(body.markup.ends_with("<img recindex=0000000012 />"));
    }

    #[test]
    fn test_escape_text_option() {
        let mut buf = ContentBuffer::new();
        buf.append_paragraph("<b>a & b</b>");
        buf.append_chapter_title("Tom's");

        let raw = render(&buf);
        assert!(raw.markup.starts_with("<p><b>a & b</b></p>"));

        let escaped = render_body(buf.elements(), RenderOptions { escape_text: true }).unwrap();
        assert!(escaped.markup.starts_with("<p>&lt;b&gt;a &amp; b&lt;/b&gt;</p>"));
        assert_eq!(escaped.headings[0].title, "Tom&#39;s");
        assert_eq!(escaped.headings[0].offset, 35);
    }

    #[test]
    fn test_empty_body() {
        let body = render(&ContentBuffer::new());
        assert!(body.markup.is_empty());
        assert!(body.headings.is_empty());
    }
}

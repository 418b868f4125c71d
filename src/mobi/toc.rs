//! Inline table of contents.
//!
//! The TOC is a plain HTML table placed ahead of the body. Each row links
//! to a heading through a fixed-width `filepos`, so the table's length does
//! not depend on the base its offsets are shifted by.

use super::filepos::{shift_filepos, write_filepos};
use super::render::{HeadingRecord, PAGE_BREAK};
use crate::error::Result;

const TOC_OPEN: &str =
    "<h2>Contents</h2><blockquote><table summary='Table of Contents'><col/><tbody>";
const TOC_CLOSE: &str = "</tbody></table></blockquote>";

/// Build the TOC markup with every heading offset shifted by `base`.
///
/// Rows follow document order. Chapter and section titles are listed the
/// same way; nothing marks the level.
pub fn build_toc(headings: &[HeadingRecord], base: u64) -> Result<String> {
    let mut toc = String::with_capacity(
        TOC_OPEN.len() + TOC_CLOSE.len() + PAGE_BREAK.len() + headings.len() * 64,
    );
    toc.push_str(TOC_OPEN);

    for heading in headings {
        toc.push_str("<tr><td><a href='#");
        toc.push_str(&heading.anchor_id);
        toc.push_str("' filepos=");
        write_filepos(shift_filepos(heading.offset, base)?, &mut toc)?;
        toc.push('>');
        toc.push_str(&heading.title);
        toc.push_str("</a></td></tr>");
    }

    toc.push_str(TOC_CLOSE);
    toc.push_str(PAGE_BREAK);
    Ok(toc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mobi::content::HeadingLevel;
    use crate::mobi::filepos::{MAX_FILEPOS, collect_filepos_targets};
    use proptest::prelude::*;

    fn heading(level: HeadingLevel, title: &str, offset: u64, index: usize) -> HeadingRecord {
        HeadingRecord {
            level,
            title: title.to_string(),
            offset,
            anchor_id: format!("title_{index}"),
        }
    }

    #[test]
    fn test_empty_toc() {
        let toc = build_toc(&[], 0).unwrap();
        assert_eq!(
            toc,
            "<h2>Contents</h2><blockquote><table summary='Table of Contents'><col/><tbody>\
             </tbody></table></blockquote><mbp:pagebreak/>"
        );
    }

    #[test]
    fn test_rows_in_document_order() {
        let headings = [
            heading(HeadingLevel::Chapter, "One", 0, 0),
            heading(HeadingLevel::Section, "One.A", 40, 1),
            heading(HeadingLevel::Chapter, "Two", 120, 4),
        ];
        let toc = build_toc(&headings, 1000).unwrap();

        assert!(toc.contains(
            "<tr><td><a href='#title_0' filepos=0000001000>One</a></td></tr>\
             <tr><td><a href='#title_1' filepos=0000001040>One.A</a></td></tr>\
             <tr><td><a href='#title_4' filepos=0000001120>Two</a></td></tr>"
        ));
        assert_eq!(collect_filepos_targets(toc.as_bytes()), vec![1000, 1040, 1120]);
    }

    #[test]
    fn test_length_independent_of_base() {
        let headings = [
            heading(HeadingLevel::Chapter, "One", 0, 0),
            heading(HeadingLevel::Section, "Two", 77, 1),
        ];
        let a = build_toc(&headings, 0).unwrap();
        let b = build_toc(&headings, 123_456).unwrap();
        assert_eq!(a.len(), b.len());
        assert_ne!(a, b);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let headings = [heading(HeadingLevel::Chapter, "Edge", MAX_FILEPOS, 0)];
        assert!(build_toc(&headings, 0).is_ok());
        assert!(matches!(
            build_toc(&headings, 1),
            Err(Error::OffsetOverflow(10_000_000_000))
        ));
    }

    proptest! {
        #[test]
        fn prop_toc_length_is_base_invariant(
            offsets in prop::collection::vec(0u64..1_000_000, 0..20),
            b1 in 0u64..1_000_000_000,
            b2 in 0u64..1_000_000_000,
        ) {
            let headings: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, &o)| heading(HeadingLevel::Chapter, "T", o, i))
                .collect();
            let t1 = build_toc(&headings, b1).unwrap();
            let t2 = build_toc(&headings, b2).unwrap();
            prop_assert_eq!(t1.len(), t2.len());
        }
    }
}

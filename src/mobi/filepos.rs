//! Fixed-width filepos fields.
//!
//! MOBI text references byte positions in the decompressed text stream
//! through `filepos=NNNNNNNNNN` attributes, and images through
//! `recindex=NNNNNNNNNN`. Both are written as exactly ten zero-padded
//! decimal digits so that the length of the surrounding markup is known
//! before the values themselves are.

use std::fmt::Write;

use crate::error::{Error, Result};

/// Number of digits in a filepos or recindex field.
pub const FILEPOS_WIDTH: usize = 10;

/// Largest value that fits in [`FILEPOS_WIDTH`] digits.
pub const MAX_FILEPOS: u64 = 9_999_999_999;

/// Append `value` to `out` as a fixed-width decimal field.
#[inline]
pub fn write_filepos(value: u64, out: &mut String) -> Result<()> {
    if value > MAX_FILEPOS {
        return Err(Error::OffsetOverflow(value));
    }
    // Writing to a String cannot fail.
    let _ = write!(out, "{value:010}");
    Ok(())
}

/// Encode `value` as a fixed-width decimal field.
pub fn encode_filepos(value: u64) -> Result<String> {
    let mut out = String::with_capacity(FILEPOS_WIDTH);
    write_filepos(value, &mut out)?;
    Ok(out)
}

/// Add `base` to `offset`, rejecting results that leave the field range.
pub fn shift_filepos(offset: u64, base: u64) -> Result<u64> {
    match offset.checked_add(base) {
        Some(v) if v <= MAX_FILEPOS => Ok(v),
        Some(v) => Err(Error::OffsetOverflow(v)),
        None => Err(Error::OffsetOverflow(u64::MAX)),
    }
}

/// Resolve a block that embeds offsets depending on its own length.
///
/// `render` is first called with base 0 to measure the block. `base_for`
/// turns that measured length into the real base, and `render` is called
/// again with it. The two renderings must have the same length, otherwise
/// the offsets computed from the provisional length would be wrong.
pub fn resolve_fixed_width<R, B>(mut render: R, base_for: B) -> Result<String>
where
    R: FnMut(u64) -> Result<String>,
    B: FnOnce(usize) -> u64,
{
    let provisional = render(0)?;
    let base = base_for(provisional.len());
    let resolved = render(base)?;

    log::debug!(
        "fixed-width block: {} bytes provisional, base {}, {} bytes resolved",
        provisional.len(),
        base,
        resolved.len()
    );

    if provisional.len() != resolved.len() {
        return Err(Error::LayoutInconsistency {
            provisional: provisional.len(),
            resolved: resolved.len(),
        });
    }
    Ok(resolved)
}

/// Collect every `filepos=` value in `markup`, in document order.
///
/// Values may be quoted or bare; leading zeros are ignored. An attribute
/// with no digits is skipped.
pub fn collect_filepos_targets(markup: &[u8]) -> Vec<u64> {
    const ATTR: &[u8] = b"filepos=";

    let mut targets = Vec::new();
    let mut pos = 0;

    while pos < markup.len() {
        if !markup[pos..].starts_with(ATTR) {
            pos += 1;
            continue;
        }

        let mut start = pos + ATTR.len();
        if start < markup.len() && (markup[start] == b'"' || markup[start] == b'\'') {
            start += 1;
        }

        let mut end = start;
        let mut value: u64 = 0;
        let mut valid = true;
        while end < markup.len() && markup[end].is_ascii_digit() {
            match value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(markup[end] - b'0')))
            {
                Some(v) => value = v,
                None => valid = false,
            }
            end += 1;
        }

        if end > start && valid {
            targets.push(value);
        }
        pos = end.max(pos + 1);
    }

    targets
}

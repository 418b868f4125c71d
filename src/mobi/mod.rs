mod content;
mod document;
mod filepos;
mod render;
mod settings;
mod toc;

pub use content::{ContentBuffer, ContentElement, HeadingLevel, ImageRecord};
pub use document::{ContentProvider, Document, Layout, assemble, assemble_layout};
pub use filepos::{
    FILEPOS_WIDTH, MAX_FILEPOS, collect_filepos_targets, encode_filepos, resolve_fixed_width,
    shift_filepos, write_filepos,
};
pub use render::{HeadingRecord, RenderOptions, RenderedBody, escape_xml, render_body};
pub use settings::{DEFAULT_TITLE, Settings};
pub use toc::build_toc;

//! mobitext - Assemble MOBI text markup from a JSON manifest

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use mobitext::{Document, Error, HeadingLevel, ImageRecord, Result, Settings};

#[derive(Parser)]
#[command(name = "mobitext")]
#[command(version, about = "Assemble MOBI text markup", long_about = None)]
#[command(after_help = "EXAMPLES:
    mobitext book.json book.html    Write the assembled markup to a file
    mobitext book.json              Write the assembled markup to stdout
    mobitext -i book.json           Show headings and their filepos offsets

MANIFEST:
    {\"settings\": {\"title\": \"My Book\", \"author\": \"Jane\"},
     \"content\": [{\"chapter\": \"Intro\"}, {\"paragraph\": \"Hi\"},
                 \"page_break\", {\"image\": \"cover.jpg\"}]}")]
struct Cli {
    /// JSON manifest describing the document
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Override the document title
    #[arg(long)]
    title: Option<String>,

    /// Leave out the table of contents
    #[arg(long)]
    no_toc: bool,

    /// XML-escape paragraph and heading text
    #[arg(long)]
    escape: bool,

    /// Show document structure without writing markup
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    settings: Settings,
    content: Vec<Entry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum Entry {
    Paragraph(String),
    Chapter(String),
    Section(String),
    PageBreak,
    Image(PathBuf),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load(&cli).and_then(|doc| {
        if cli.info {
            show_info(&doc)
        } else {
            write(&doc, cli.output.as_deref(), cli.quiet)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load(cli: &Cli) -> Result<Document> {
    let json = std::fs::read_to_string(&cli.manifest)?;
    let base_dir = cli.manifest.parent().unwrap_or(Path::new("."));
    let mut doc = parse_manifest(&json, base_dir)?;

    let settings = doc.settings_mut();
    if let Some(ref title) = cli.title {
        settings.title = title.clone();
    }
    if cli.no_toc {
        settings.toc = false;
    }
    if cli.escape {
        settings.escape_text = true;
    }
    Ok(doc)
}

/// Build a document from manifest JSON. Image paths are relative to `base_dir`.
fn parse_manifest(json: &str, base_dir: &Path) -> Result<Document> {
    let manifest: Manifest =
        serde_json::from_str(json).map_err(|e| Error::Manifest(e.to_string()))?;

    let mut doc = Document::with_settings(manifest.settings);
    for entry in manifest.content {
        match entry {
            Entry::Paragraph(text) => doc.append_paragraph(text),
            Entry::Chapter(title) => doc.append_chapter_title(title),
            Entry::Section(title) => doc.append_section_title(title),
            Entry::PageBreak => doc.append_page_break(),
            Entry::Image(path) => {
                let path = base_dir.join(path);
                let data = std::fs::read(&path)?;
                let media_type = guess_media_type(&path);
                doc.append_image(ImageRecord::new(data, media_type));
            }
        }
    }
    Ok(doc)
}

fn guess_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn show_info(doc: &Document) -> Result<()> {
    let layout = doc.layout()?;
    let settings = doc.settings();

    println!("Title: {}", settings.title);
    for (key, value) in &settings.extra {
        println!("{key}: {value}");
    }
    println!("Elements: {}", doc.content().len());
    println!("Images: {}", doc.content().image_count());
    println!("Text length: {} bytes", layout.markup.len());
    println!("Body starts at: {}", layout.body_start);
    if !layout.headings.is_empty() {
        println!("Headings:");
        for heading in &layout.headings {
            let indent = match heading.level {
                HeadingLevel::Chapter => "  ",
                HeadingLevel::Section => "    ",
            };
            println!(
                "{indent}{:010} {} ({})",
                heading.offset, heading.title, heading.anchor_id
            );
        }
    }
    Ok(())
}

fn write(doc: &Document, output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(path) => {
            doc.write_text(path)?;
            if !quiet {
                eprintln!(
                    "Wrote {} ({} elements, {} images)",
                    path.display(),
                    doc.content().len(),
                    doc.content().image_count()
                );
            }
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            doc.write_text_to_writer(&mut lock)?;
        }
    }
    Ok(())
}

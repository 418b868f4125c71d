//! Document settings.
//!
//! `title` and `toc` drive the renderer. Any other key is kept as-is and
//! forwarded to the container packer with the rest of the metadata.

use std::borrow::Cow;
use std::collections::BTreeMap;

pub const DEFAULT_TITLE: &str = "Unknown Title";

/// Metadata and rendering switches for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    pub title: String,
    /// Emit a table of contents ahead of the body.
    pub toc: bool,
    /// XML-escape paragraph and heading text. Off by default so inline
    /// markup in the text reaches the output untouched.
    pub escape_text: bool,
    /// Pass-through keys (author, publisher, ...). When loaded through
    /// serde, values that are not strings are kept as their JSON text.
    #[cfg_attr(
        feature = "serde",
        serde(flatten, deserialize_with = "deserialize_extra")
    )]
    pub extra: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            toc: true,
            escape_text: false,
            extra: BTreeMap::new(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_toc(mut self, toc: bool) -> Self {
        self.toc = toc;
        self
    }

    pub fn with_escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a setting by key.
    ///
    /// Reserved keys update the typed fields; `toc` and `escape_text`
    /// accept `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`. An
    /// unrecognised value for a flag leaves it unchanged.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match key.as_str() {
            "title" => self.title = value,
            "toc" => self.toc = parse_flag(&key, &value).unwrap_or(self.toc),
            "escape_text" => {
                self.escape_text = parse_flag(&key, &value).unwrap_or(self.escape_text);
            }
            _ => {
                self.extra.insert(key, value);
            }
        }
    }

    /// Get a setting by key.
    pub fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "title" => Some(Cow::Borrowed(self.title.as_str())),
            "toc" => Some(Cow::Borrowed(flag_str(self.toc))),
            "escape_text" => Some(Cow::Borrowed(flag_str(self.escape_text))),
            _ => self.extra.get(key).map(|v| Cow::Borrowed(v.as_str())),
        }
    }

    /// All settings as a flat key/value list, reserved keys first.
    pub fn entries(&self) -> Vec<(&str, Cow<'_, str>)> {
        let mut entries = vec![
            ("title", Cow::Borrowed(self.title.as_str())),
            ("toc", Cow::Borrowed(flag_str(self.toc))),
            ("escape_text", Cow::Borrowed(flag_str(self.escape_text))),
        ];
        entries.extend(
            self.extra
                .iter()
                .map(|(k, v)| (k.as_str(), Cow::Borrowed(v.as_str()))),
        );
        entries
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => {
            log::warn!("ignoring unrecognised value {value:?} for setting {key:?}");
            None
        }
    }
}

#[cfg(feature = "serde")]
fn deserialize_extra<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

fn flag_str(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

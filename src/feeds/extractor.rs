//! Streaming extraction of feed entries from RSS and Atom documents.
//!
//! [`ItemExtractor`] is an explicit state machine. It knows nothing about
//! XML tokenizing: it is driven by start/end/character callbacks, which
//! [`extract_items`] produces from a `quick_xml` pull reader. Keeping the two
//! apart lets the transition table be exercised directly in tests.
//!
//! # States
//!
//! ```text
//! Idle --<item>/<entry>--> InEntry { buffers, current field }
//! InEntry --</item>/</entry>--> Idle   (emit if title and link are usable)
//! ```
//!
//! Inside an entry the current field is one of title, link, description or
//! published date. Text is appended to that field's buffer, so content split
//! across several text/CDATA chunks is reassembled before it is sanitized.
//! Image URLs are last-seen-wins within an entry. An entry keeps one date:
//! `pubDate`, `published` or `dc:date` take precedence over Atom's `updated`,
//! and otherwise the first date element seen wins.

use std::borrow::Cow;
use std::mem;

use once_cell::sync::Lazy;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use regex::{Captures, Regex};
use tracing::{debug, instrument, warn};

use crate::dates::parse_timestamp;
use crate::models::{ExtractedItem, SourceTag};
use crate::utils::{clean_text, truncate_for_log};

/// The entry fields that collect character data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Link,
    Description,
    PublishedAt,
}

impl Field {
    /// Map an element name to the field it feeds, if any.
    pub fn from_element(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Field::Title),
            "link" => Some(Field::Link),
            "description" | "summary" => Some(Field::Description),
            "pubDate" | "published" | "updated" | "dc:date" => Some(Field::PublishedAt),
            _ => None,
        }
    }
}

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[^&;\s]+;").unwrap());

/// Precedence of a date element; higher replaces lower.
fn date_rank(name: &str) -> u8 {
    match name {
        "updated" => 0,
        _ => 1,
    }
}

fn is_entry_boundary(name: &str) -> bool {
    matches!(name, "item" | "entry")
}

fn attr<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn is_image_type(attributes: &[(String, String)]) -> bool {
    attr(attributes, "type").is_some_and(|t| t.starts_with("image"))
}

/// The image URL carried by an element, if it is an image-carrying element.
fn image_url<'a>(name: &str, attributes: &'a [(String, String)]) -> Option<&'a str> {
    match name {
        "enclosure" if is_image_type(attributes) => attr(attributes, "url"),
        "media:content" | "media:thumbnail" => attr(attributes, "url"),
        // Atom spelling of an enclosure
        "link" if attr(attributes, "rel") == Some("enclosure") && is_image_type(attributes) => {
            attr(attributes, "href")
        }
        _ => None,
    }
}

/// Atom entries put the article URL in `<link href="..."/>`.
fn alternate_href<'a>(attributes: &'a [(String, String)]) -> Option<&'a str> {
    match attr(attributes, "rel") {
        None | Some("alternate") => attr(attributes, "href"),
        Some(_) => None,
    }
}

/// Per-entry accumulation buffers.
#[derive(Debug, Default)]
struct EntryBuffer {
    title: String,
    link: String,
    description: String,
    published: String,
    published_rank: u8,
    image_url: Option<String>,
    field: Option<Field>,
}

impl EntryBuffer {
    fn buffer_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::PublishedAt => &mut self.published,
        }
    }

    /// Route a date element to the date buffer, or skip it when the entry
    /// already holds a date of equal or higher precedence.
    fn start_date(&mut self, name: &str) -> Option<Field> {
        let rank = date_rank(name);
        if !self.published.trim().is_empty() {
            if rank <= self.published_rank {
                return None;
            }
            self.published.clear();
        }
        self.published_rank = rank;
        Some(Field::PublishedAt)
    }

    fn into_item(self, source: SourceTag) -> Option<ExtractedItem> {
        let title = clean_text(&self.title);
        let link = self.link.trim().to_string();
        let description = clean_text(&self.description);
        let published_at = parse_timestamp(&self.published);
        if !self.published.trim().is_empty() && published_at.is_none() {
            debug!(%source, raw = %self.published.trim(), "Unrecognized publish date");
        }
        ExtractedItem::new(title, link, description, published_at, self.image_url, source)
    }
}

#[derive(Debug)]
enum State {
    Idle,
    InEntry(EntryBuffer),
}

/// State machine turning XML callbacks into [`ExtractedItem`]s for one source.
///
/// One instance serves exactly one extraction pass.
#[derive(Debug)]
pub struct ItemExtractor {
    source: SourceTag,
    state: State,
    items: Vec<ExtractedItem>,
}

impl ItemExtractor {
    pub fn new(source: SourceTag) -> Self {
        Self {
            source,
            state: State::Idle,
            items: Vec::new(),
        }
    }

    /// `true` while inside an `<item>` or `<entry>`.
    pub fn in_entry(&self) -> bool {
        matches!(self.state, State::InEntry(_))
    }

    /// The field currently collecting text, if any.
    pub fn current_field(&self) -> Option<Field> {
        match &self.state {
            State::InEntry(entry) => entry.field,
            State::Idle => None,
        }
    }

    pub fn start_element(&mut self, name: &str, attributes: &[(String, String)]) {
        if is_entry_boundary(name) {
            self.state = State::InEntry(EntryBuffer::default());
            return;
        }
        let State::InEntry(entry) = &mut self.state else {
            return;
        };

        if let Some(url) = image_url(name, attributes) {
            entry.image_url = Some(url.to_string());
        }

        if let Some(field) = Field::from_element(name) {
            entry.field = match field {
                Field::PublishedAt => entry.start_date(name),
                other => Some(other),
            };
            if field == Field::Link && entry.link.trim().is_empty() {
                if let Some(href) = alternate_href(attributes) {
                    entry.link = href.to_string();
                }
            }
        }
    }

    /// A self-closing element: a start immediately followed by its end.
    pub fn empty_element(&mut self, name: &str, attributes: &[(String, String)]) {
        self.start_element(name, attributes);
        self.end_element(name);
    }

    /// Character data or CDATA content.
    pub fn characters(&mut self, text: &str) {
        if let State::InEntry(entry) = &mut self.state {
            if let Some(field) = entry.field {
                entry.buffer_mut(field).push_str(text);
            }
        }
    }

    pub fn end_element(&mut self, name: &str) {
        if is_entry_boundary(name) {
            if let State::InEntry(entry) = mem::replace(&mut self.state, State::Idle) {
                let title_preview = truncate_for_log(entry.title.trim(), 80);
                match entry.into_item(self.source) {
                    Some(item) => self.items.push(item),
                    None => debug!(
                        source = %self.source,
                        title = %title_preview,
                        "Dropping entry without a usable title or link"
                    ),
                }
            }
            return;
        }
        if let State::InEntry(entry) = &mut self.state {
            if Field::from_element(name).is_some() {
                entry.field = None;
            }
        }
    }

    /// Items emitted so far. An entry still open is discarded.
    pub fn finish(self) -> Vec<ExtractedItem> {
        self.items
    }
}

fn element_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

/// Resolve the references in raw text one at a time, keeping any the
/// tokenizer does not know (`&nbsp;`) verbatim for the sanitizer.
fn unescape_lenient(raw: &str) -> String {
    REFERENCE_RE
        .replace_all(raw, |caps: &Captures<'_>| {
            let reference = &caps[0];
            unescape(reference)
                .map(Cow::into_owned)
                .unwrap_or_else(|_| reference.to_string())
        })
        .into_owned()
}

fn attributes(element: &BytesStart<'_>) -> Vec<(String, String)> {
    element
        .attributes()
        .flatten()
        .map(|attribute| {
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map(Cow::into_owned)
                .unwrap_or_else(|_| String::from_utf8_lossy(attribute.value.as_ref()).into_owned());
            (key, value)
        })
        .collect()
}

/// Extract every well-formed entry from a feed document.
///
/// The document is read as a stream. If the tokenizer hits an error, reading
/// stops and the entries completed before that point are returned; a document
/// that is not XML at all yields an empty vector.
#[instrument(level = "debug", skip_all, fields(%source, bytes = document.len()))]
pub fn extract_items(document: &[u8], source: SourceTag) -> Vec<ExtractedItem> {
    let mut reader = Reader::from_reader(document);
    let mut extractor = ItemExtractor::new(source);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => extractor.start_element(&element_name(e.name()), &attributes(&e)),
            Ok(Event::Empty(e)) => extractor.empty_element(&element_name(e.name()), &attributes(&e)),
            Ok(Event::End(e)) => extractor.end_element(&element_name(e.name())),
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map(Cow::into_owned)
                    .unwrap_or_else(|_| unescape_lenient(&String::from_utf8_lossy(&e)));
                extractor.characters(&text);
            }
            Ok(Event::CData(e)) => extractor.characters(&String::from_utf8_lossy(&e)),
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(
                    %source,
                    position = reader.buffer_position(),
                    error = %e,
                    "Malformed feed document; keeping entries read so far"
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    let items = extractor.finish();
    debug!(%source, count = items.len(), "Extracted feed entries");
    items
}

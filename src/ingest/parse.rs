// src/ingest/parse.rs
//! RSS 2.0, RSS 1.0 (RDF) and Atom parsing into `FeedEntry`s.
//!
//! Only children in the entry's own namespace are read, so extension
//! elements such as `<atom:link>`, `<media:title>` or `<dc:description>`
//! never shadow the plain fields.

use std::borrow::Cow;

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::ingest::types::FeedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedKind {
    Rss,
    Rdf,
    Atom,
}

impl FeedKind {
    /// Decided by the local name of the root element.
    fn from_root(local: &[u8]) -> Result<Self> {
        match local {
            b"rss" => Ok(Self::Rss),
            b"RDF" => Ok(Self::Rdf),
            b"feed" => Ok(Self::Atom),
            other => bail!("unsupported feed root <{}>", String::from_utf8_lossy(other)),
        }
    }

    fn entry_tag(self) -> &'static [u8] {
        match self {
            Self::Rss | Self::Rdf => b"item",
            Self::Atom => b"entry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Description,
    Content,
}

/// Owned form of a resolved namespace, comparable across events.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NsKey {
    None,
    Uri(Vec<u8>),
    UnknownPrefix(Vec<u8>),
}

impl From<&ResolveResult<'_>> for NsKey {
    fn from(r: &ResolveResult<'_>) -> Self {
        match r {
            ResolveResult::Bound(Namespace(uri)) => Self::Uri(uri.to_vec()),
            ResolveResult::Unbound => Self::None,
            ResolveResult::Unknown(prefix) => Self::UnknownPrefix(prefix.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct AtomLink {
    href: Option<String>,
    rel: Option<String>,
}

#[derive(Debug)]
struct OpenEntry {
    ns: NsKey,
    depth: usize,
    title: Option<String>,
    link: Option<String>,
    atom_links: Vec<AtomLink>,
    description: Option<String>,
    content: Option<String>,
}

impl OpenEntry {
    fn new(ns: NsKey, depth: usize) -> Self {
        Self {
            ns,
            depth,
            title: None,
            link: None,
            atom_links: Vec::new(),
            description: None,
            content: None,
        }
    }

    /// First occurrence wins.
    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link,
            Field::Description => &mut self.description,
            Field::Content => &mut self.content,
        };
        if slot.is_none() {
            *slot = non_blank(Some(value));
        }
    }

    fn finish(self) -> FeedEntry {
        let atom_link = self
            .atom_links
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |r| r == "alternate"))
            .or_else(|| self.atom_links.first())
            .and_then(|l| non_blank(l.href.clone()));
        FeedEntry {
            title: self.title,
            link: self.link.or(atom_link),
            description: self.description.or(self.content),
        }
    }
}

/// Parse a feed document into its entries, in feed order. Entries keep
/// missing titles or links as `None`; a document that is not a feed is an
/// error.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let mut reader = NsReader::from_str(xml);

    let mut kind: Option<FeedKind> = None;
    let mut depth = 0usize;
    let mut entry: Option<OpenEntry> = None;
    let mut field: Option<(Field, usize)> = None;
    let mut text = String::new();
    let mut out = Vec::new();

    loop {
        let (ns, event) = reader.read_resolved_event().context("reading feed xml")?;
        let ns = NsKey::from(&ns);
        match event {
            Event::Start(e) => {
                depth += 1;
                let Some(k) = kind else {
                    kind = Some(FeedKind::from_root(e.local_name().as_ref())?);
                    continue;
                };
                if entry.is_none() {
                    if e.local_name().as_ref() == k.entry_tag() {
                        entry = Some(OpenEntry::new(ns, depth));
                    }
                } else if field.is_none() {
                    if let Some(open) = entry.as_mut() {
                        if let Some(f) = child_field(k, open, &ns, depth, &e) {
                            field = Some((f, depth));
                            text.clear();
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if kind.is_none() {
                    kind = Some(FeedKind::from_root(e.local_name().as_ref())?);
                    continue;
                }
                // Self-closing children carry no text; only Atom links matter.
                if let (Some(k), Some(open), None) = (kind, entry.as_mut(), field) {
                    let _ = child_field(k, open, &ns, depth + 1, &e);
                }
            }
            Event::Text(t) if field.is_some() => {
                text.push_str(&html_escape::decode_html_entities(&String::from_utf8_lossy(&t)));
            }
            Event::CData(c) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&c));
            }
            Event::End(_) => {
                if let Some((f, d)) = field {
                    if d == depth {
                        if let Some(open) = entry.as_mut() {
                            open.set(f, std::mem::take(&mut text));
                        }
                        field = None;
                    }
                }
                if entry.as_ref().is_some_and(|open| open.depth == depth) {
                    if let Some(open) = entry.take() {
                        out.push(open.finish());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if kind.is_none() {
        bail!("empty feed document");
    }
    Ok(out)
}

/// Classify a direct child of the open entry. Atom links are recorded here
/// since their value lives in attributes.
fn child_field(
    kind: FeedKind,
    open: &mut OpenEntry,
    ns: &NsKey,
    depth: usize,
    e: &BytesStart<'_>,
) -> Option<Field> {
    if depth != open.depth + 1 || *ns != open.ns {
        return None;
    }
    match (kind, e.local_name().as_ref()) {
        (_, b"title") => Some(Field::Title),
        (FeedKind::Atom, b"link") => {
            open.atom_links.push(atom_link(e));
            None
        }
        (_, b"link") => Some(Field::Link),
        (FeedKind::Atom, b"summary") | (FeedKind::Rss | FeedKind::Rdf, b"description") => {
            Some(Field::Description)
        }
        (FeedKind::Atom, b"content") => Some(Field::Content),
        _ => None,
    }
}

fn atom_link(e: &BytesStart<'_>) -> AtomLink {
    let mut link = AtomLink::default();
    for attr in e.attributes().flatten() {
        let value = attr_value(&attr.value);
        match attr.key.local_name().as_ref() {
            b"href" => link.href = Some(value),
            b"rel" => link.rel = Some(value),
            _ => {}
        }
    }
    link
}

// HTML named entities are common in feeds; XML only knows five.
fn attr_value(raw: &Cow<'_, [u8]>) -> String {
    html_escape::decode_html_entities(&String::from_utf8_lossy(raw)).into_owned()
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

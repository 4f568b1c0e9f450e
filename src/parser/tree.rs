use std::borrow::Cow;
use std::path::PathBuf;

use scraper::{ElementRef, Html, Node as DomNode};

/// Elements whose text never counts as page content.
const INVISIBLE: &[&str] = &["script", "style", "template"];

/// One exported page, read once and dropped after extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub path: PathBuf,
    pub content: String,
}

impl RawDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        RawDocument {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Paragraph,
    List,
    ListItem,
    Division,
    Bold,
    Strong,
    Span,
    Cell,
    Heading(u8),
    Anchor,
    Superscript,
    Other,
}

impl NodeKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "p" => NodeKind::Paragraph,
            "ul" => NodeKind::List,
            "li" => NodeKind::ListItem,
            "div" => NodeKind::Division,
            "b" => NodeKind::Bold,
            "strong" => NodeKind::Strong,
            "span" => NodeKind::Span,
            "td" | "th" => NodeKind::Cell,
            "a" => NodeKind::Anchor,
            "sup" => NodeKind::Superscript,
            t if t.len() == 2 && t.starts_with('h') => match t.as_bytes()[1] {
                level @ b'1'..=b'6' => NodeKind::Heading(level - b'0'),
                _ => NodeKind::Other,
            },
            _ => NodeKind::Other,
        }
    }
}

/// Parsed page. html5ever never rejects input, so any text yields a tree.
pub struct PageTree {
    html: Html,
}

impl PageTree {
    pub fn parse(content: &str) -> Self {
        PageTree {
            html: Html::parse_document(content),
        }
    }

    pub fn root(&self) -> Node<'_> {
        Node(self.html.root_element())
    }

    /// Every element in document order, the root included.
    pub fn elements(&self) -> impl Iterator<Item = Node<'_>> {
        let root = self.root();
        std::iter::once(root).chain(root.descendants())
    }

    pub fn find_by_id(&self, tag: &str, id: &str) -> Option<Node<'_>> {
        self.elements()
            .find(|n| n.tag() == tag && n.attr("id") == Some(id))
    }

    /// All stripped, non-empty text strings of the page joined by `sep`.
    pub fn joined_text(&self, sep: &str) -> String {
        self.root().joined_text(sep)
    }
}

fn join_stripped(strings: Vec<Cow<'_, str>>, sep: &str) -> String {
    strings
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// What a text walk does with an element it reaches.
pub enum Visit {
    Descend,
    Skip,
    Replace(String),
}

pub enum Child<'a> {
    Text(&'a str),
    Element(Node<'a>),
}

/// Element handle exposing only what the extractors need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn tag(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_tag(self.tag())
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn children(&self) -> impl Iterator<Item = Child<'a>> {
        self.0.children().filter_map(|child| match child.value() {
            DomNode::Text(text) => Some(Child::Text(&**text)),
            DomNode::Element(_) => ElementRef::wrap(child).map(|e| Child::Element(Node(e))),
            _ => None,
        })
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.0.parent().and_then(ElementRef::wrap).map(Node)
    }

    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.next_siblings().next()
    }

    pub fn next_siblings(&self) -> impl Iterator<Item = Node<'a>> {
        self.0.next_siblings().filter_map(ElementRef::wrap).map(Node)
    }

    /// Element descendants in document order, excluding `self`.
    pub fn descendants(&self) -> impl Iterator<Item = Node<'a>> {
        self.0.descendants().skip(1).filter_map(ElementRef::wrap).map(Node)
    }

    /// Raw text nodes, in order, skipping invisible elements.
    pub fn strings(&self) -> Vec<Cow<'a, str>> {
        self.strings_with(&mut |_| Visit::Descend)
    }

    /// Like [`Node::strings`], letting `visit` drop or replace descendant
    /// elements before their text is collected.
    pub fn strings_with<F>(&self, visit: &mut F) -> Vec<Cow<'a, str>>
    where
        F: FnMut(&Node<'a>) -> Visit,
    {
        let mut out = Vec::new();
        self.collect_strings(visit, &mut out);
        out
    }

    fn collect_strings<F>(&self, visit: &mut F, out: &mut Vec<Cow<'a, str>>)
    where
        F: FnMut(&Node<'a>) -> Visit,
    {
        for child in self.children() {
            match child {
                Child::Text(t) => out.push(Cow::Borrowed(t)),
                Child::Element(e) if INVISIBLE.contains(&e.tag()) => {}
                Child::Element(e) => match visit(&e) {
                    Visit::Descend => e.collect_strings(visit, out),
                    Visit::Skip => {}
                    Visit::Replace(text) => out.push(Cow::Owned(text)),
                },
            }
        }
    }

    /// Concatenated text, untouched.
    pub fn text(&self) -> String {
        self.strings().concat()
    }

    /// Each string stripped, empties dropped, then joined by `sep`.
    pub fn joined_text(&self, sep: &str) -> String {
        join_stripped(self.strings(), sep)
    }

    pub fn joined_text_with<F>(&self, sep: &str, visit: &mut F) -> String
    where
        F: FnMut(&Node<'a>) -> Visit,
    {
        join_stripped(self.strings_with(visit), sep)
    }

    /// The element's only string: a single text child, or the sole string of a
    /// single element child. `None` as soon as there is more than one child.
    pub fn sole_string(&self) -> Option<&'a str> {
        let mut children = self.0.children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }
        match only.value() {
            DomNode::Text(text) => Some(&**text),
            DomNode::Element(_) => ElementRef::wrap(only).and_then(|e| Node(e).sole_string()),
            _ => None,
        }
    }
}

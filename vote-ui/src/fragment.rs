//! Platform-neutral visual tree produced by the card builders.
//!
//! A fragment is plain data: click handlers are stored as [`Action`] values so
//! the same tree can be inspected in tests, serialized to HTML, or turned into
//! live DOM nodes in the browser.

use std::fmt::Write;

use crate::action::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(&'static str, String)>,
    pub on_click: Option<Action>,
    pub children: Vec<FragmentNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            on_click: None,
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds one or more whitespace separated classes.
    pub fn class(mut self, classes: impl AsRef<str>) -> Self {
        self.classes
            .extend(classes.as_ref().split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn on_click(mut self, action: Action) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn child(mut self, child: impl Into<FragmentNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<FragmentNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(FragmentNode::Text(text.into()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|candidate| candidate == class)
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![FragmentNode::Text(text.into())];
    }

    /// Elements only; text nodes are skipped.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(FragmentNode::as_element)
    }
}

impl From<Element> for FragmentNode {
    fn from(element: Element) -> Self {
        FragmentNode::Element(element)
    }
}

impl FragmentNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            FragmentNode::Element(element) => Some(element),
            FragmentNode::Text(_) => None,
        }
    }

    /// Depth-first, pre-order walk over every element in the tree.
    pub fn elements(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        collect_elements(self, &mut found);
        found
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.elements()
            .into_iter()
            .find(|element| element.id.as_deref() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        match self {
            FragmentNode::Text(_) => None,
            FragmentNode::Element(element) => {
                if element.id.as_deref() == Some(id) {
                    return Some(element);
                }
                element
                    .children
                    .iter_mut()
                    .find_map(|child| child.find_by_id_mut(id))
            }
        }
    }

    /// First element, depth first, that satisfies `matches`.
    pub fn find_mut<F>(&mut self, matches: &F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool,
    {
        match self {
            FragmentNode::Text(_) => None,
            FragmentNode::Element(element) => {
                if matches(element) {
                    return Some(element);
                }
                element
                    .children
                    .iter_mut()
                    .find_map(|child| child.find_mut(matches))
            }
        }
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|element| element.has_class(class))
            .collect()
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    /// Click handler attached to the element with `id`, if any.
    pub fn handler_for(&self, id: &str) -> Option<&Action> {
        self.find_by_id(id)?.on_click.as_ref()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn collect_elements<'a>(node: &'a FragmentNode, found: &mut Vec<&'a Element>) {
    if let FragmentNode::Element(element) = node {
        found.push(element);
        for child in &element.children {
            collect_elements(child, found);
        }
    }
}

fn collect_text(node: &FragmentNode, out: &mut String) {
    match node {
        FragmentNode::Text(text) => out.push_str(text),
        FragmentNode::Element(element) => {
            for child in &element.children {
                collect_text(child, out);
            }
        }
    }
}

const VOID_TAGS: [&str; 4] = ["img", "input", "hr", "br"];

fn write_html(node: &FragmentNode, out: &mut String) {
    let element = match node {
        FragmentNode::Text(text) => {
            out.push_str(&escape(text));
            return;
        }
        FragmentNode::Element(element) => element,
    };

    out.push('<');
    out.push_str(element.tag);
    if let Some(id) = &element.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if !element.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
    }
    for (name, value) in &element.attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
    if let Some(action) = &element.on_click {
        let _ = write!(out, " data-action=\"{}\"", escape(&action.describe()));
    }

    if VOID_TAGS.contains(&element.tag) {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        write_html(child, out);
    }
    let _ = write!(out, "</{}>", element.tag);
}

/// Escapes text for use in HTML content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

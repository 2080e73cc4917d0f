//! Declarative view tree
//!
//! Pages are built as a tree of [`Node`]s, rendered to HTML for the browser
//! and serialised to JSON for the layout endpoint.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Write;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: [&str; 5] = ["img", "input", "br", "hr", "meta"];

/// Ordered inline CSS declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style(Vec<(String, String)>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration, replacing an earlier value for the same property
    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.0.iter_mut().find(|(p, _)| p == property) {
            Some(existing) => existing.1 = value,
            None => self.0.push((property.to_string(), value)),
        }
        self
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `a: b; c: d`
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(p, v)| format!("{}: {}", p, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (property, value) in &self.0 {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}

/// An HTML element
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
    #[serde(skip_serializing_if = "Style::is_empty")]
    pub style: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            class: Vec::new(),
            style: Style::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class.extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Shorthand for a single text child
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::text(text))
    }
}

/// A node of the view tree
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Render to an HTML string
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Node::Text { text } => out.push_str(&escape(text)),
            Node::Element(el) => {
                let _ = write!(out, "<{}", el.tag);
                if let Some(id) = &el.id {
                    let _ = write!(out, " id=\"{}\"", escape(id));
                }
                if !el.class.is_empty() {
                    let _ = write!(out, " class=\"{}\"", escape(&el.class.join(" ")));
                }
                if !el.style.is_empty() {
                    let _ = write!(out, " style=\"{}\"", escape(&el.style.to_css()));
                }
                for (name, value) in &el.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    return;
                }
                if el.tag == "script" {
                    // Script bodies are raw text; only a closing tag can break out.
                    for child in &el.children {
                        if let Node::Text { text } = child {
                            out.push_str(&text.replace("</", "<\\/"));
                        }
                    }
                } else {
                    for child in &el.children {
                        child.render_into(out);
                    }
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }

    /// Find an element by id anywhere in the tree
    pub fn find(&self, id: &str) -> Option<&Element> {
        match self {
            Node::Text { .. } => None,
            Node::Element(el) => {
                if el.id.as_deref() == Some(id) {
                    return Some(el);
                }
                el.children.iter().find_map(|c| c.find(id))
            }
        }
    }

    /// Concatenated text content
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { text } => text.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::text(text)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::text(text)
    }
}

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn div() -> Element {
    Element::new("div")
}

pub fn span(text: impl Into<String>) -> Element {
    Element::new("span").text(text)
}

pub fn heading(level: u8, text: impl Into<String>) -> Element {
    Element::new(&format!("h{}", level.clamp(1, 6))).text(text)
}

pub fn paragraph(text: impl Into<String>) -> Element {
    Element::new("p").text(text)
}

pub fn img(src: &str, alt: &str) -> Element {
    Element::new("img").attr("src", src).attr("alt", alt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_element() {
        let node: Node = div()
            .id("card")
            .class("kpi card")
            .style(Style::new().set("color", "red").set("padding", "4px"))
            .child(span("A & B"))
            .into();

        assert_eq!(
            node.render(),
            r#"<div id="card" class="kpi card" style="color: red; padding: 4px"><span>A &amp; B</span></div>"#
        );
    }

    #[test]
    fn test_void_and_script() {
        let img: Node = img("/a.png", "logo").into();
        assert_eq!(img.render(), r#"<img src="/a.png" alt="logo">"#);

        let script: Node = Element::new("script").text("{\"x\":\"</script>\"}").into();
        assert_eq!(script.render(), "<script>{\"x\":\"<\\/script>\"}</script>");
    }

    #[test]
    fn test_style_set_replaces() {
        let style = Style::new().set("border", "1px").set("border", "3px");
        assert_eq!(style.to_css(), "border: 3px");
        assert_eq!(serde_json::to_value(&style).unwrap(), serde_json::json!({"border": "3px"}));
    }

    #[test]
    fn test_find_and_text() {
        let node: Node = div().child(div().id("inner").text("hi")).child(span(" there")).into();

        assert!(node.find("inner").is_some());
        assert!(node.find("missing").is_none());
        assert_eq!(node.text_content(), "hi there");
    }

    #[test]
    fn test_serialize_node() {
        let node: Node = div().id("x").text("t").into();
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["type"], "element");
        assert_eq!(value["children"][0]["text"], "t");
    }
}

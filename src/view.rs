//! Declarative view trees and the renderers that turn them into markup.
//!
//! A [`Node`] names a block (optionally one of its elements), carries modifiers and
//! init params, and nests other nodes. Components project their state into nodes
//! through [`View`]; the tree is rebuilt from state on every render and never read back.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::cell::Cell;
use crate::grid::Grid;

#[derive(Clone, Debug, PartialEq)]
pub enum ModValue {
    Flag(bool),
    Value(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub block: &'static str,
    pub elem: Option<&'static str>,
    pub tag: &'static str,
    pub mods: Vec<(&'static str, ModValue)>,
    pub attrs: Vec<(&'static str, String)>,
    pub js: Option<Value>,
    pub text: Option<String>,
    pub content: Vec<Node>,
}

impl Node {
    pub fn block(block: &'static str) -> Self {
        Self {
            block,
            elem: None,
            tag: "div",
            mods: Vec::new(),
            attrs: Vec::new(),
            js: None,
            text: None,
            content: Vec::new(),
        }
    }

    pub fn elem(block: &'static str, elem: &'static str) -> Self {
        Self { elem: Some(elem), ..Self::block(block) }
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    pub fn modifier(mut self, name: &'static str, value: &'static str) -> Self {
        self.mods.push((name, ModValue::Value(value)));
        self
    }

    pub fn flag(mut self, name: &'static str, on: bool) -> Self {
        self.mods.push((name, ModValue::Flag(on)));
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    /// Attaches init params. Serialization failures leave the node without params.
    pub fn js(mut self, params: &impl Serialize) -> Self {
        self.js = serde_json::to_value(params).ok();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.content.push(node);
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.content.extend(nodes);
        self
    }

    /// `block` or `block__elem`.
    pub fn entity(&self) -> String {
        match self.elem {
            Some(elem) => format!("{}__{}", self.block, elem),
            None => self.block.to_owned(),
        }
    }

    pub fn mod_value(&self, name: &str) -> Option<&ModValue> {
        self.mods.iter().rev().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn class_names(&self) -> Vec<String> {
        let entity = self.entity();
        let mut classes = vec![entity.clone()];
        for (name, value) in &self.mods {
            match value {
                ModValue::Flag(true) => classes.push(format!("{entity}_{name}")),
                ModValue::Flag(false) => {}
                ModValue::Value(value) => classes.push(format!("{entity}_{name}_{value}")),
            }
        }
        if self.js.is_some() {
            classes.push("i-bem".to_owned());
        }
        classes
    }
}

/// Turns a view tree into markup.
pub trait ViewRenderer {
    fn render(&self, node: &Node) -> String;

    /// Renders a whole page. Renderers without a document wrapper render just the tree.
    fn render_page(&self, _title: &str, node: &Node) -> String {
        self.render(node)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl ViewRenderer for HtmlRenderer {
    fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        write_node(&mut out, node);
        out
    }

    fn render_page(&self, title: &str, node: &Node) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape(title));
        out.push_str("</head>\n");
        write_node(&mut out, node);
        out.push_str("\n</html>\n");
        out
    }
}

fn write_node(out: &mut String, node: &Node) {
    let _ = write!(out, "<{} class=\"{}\"", node.tag, escape(&node.class_names().join(" ")));
    if let Some(js) = &node.js {
        let mut params = serde_json::Map::new();
        params.insert(node.entity(), js.clone());
        let _ = write!(out, " data-bem=\"{}\"", escape(&Value::Object(params).to_string()));
    }
    for (name, value) in &node.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape(value));
    }
    out.push('>');
    if let Some(text) = &node.text {
        out.push_str(&escape(text));
    }
    for child in &node.content {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", node.tag);
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// State-to-tree projection implemented by every on-page component.
pub trait View {
    fn view(&self) -> Node;
}

impl View for Cell {
    fn view(&self) -> Node {
        let node = Node::block("cell")
            .modifier("state", self.state().as_str())
            .flag("che", self.is_mine())
            .js(self.params());
        match self.label() {
            Some(n) => node.text(n.to_string()),
            None => node,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GridParams {
    width: usize,
    height: usize,
    total_mines: usize,
}

impl View for Grid {
    fn view(&self) -> Node {
        let params = GridParams {
            width: self.width(),
            height: self.height(),
            total_mines: self.total_mines(),
        };
        let lines = self
            .rows()
            .map(|row| Node::elem("grid", "line").children(row.iter().map(View::view)));
        Node::block("grid")
            .modifier("state", self.state().as_str())
            .flag("cheat", self.is_cheating())
            .js(&params)
            .children(lines)
    }
}

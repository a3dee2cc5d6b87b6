//! The render tree.
//!
//! `Node` plays two roles:
//! - as *input* it is the child tree a caller hands to a form (rows, wrappers,
//!   arbitrary content inside labels / fields / rules);
//! - as *output* it is the host tree produced by a render pass (plain elements with
//!   class / style / data attributes) which a back-end turns into HTML or terminal cells.
//!
//! `Node::Row` is the only component identity; every other node is opaque content.

use crate::row::Row;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Fragment(Vec<Node>),
    Element(Element),
    Row(Box<Row>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn fragment(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Fragment(children.into_iter().collect())
    }

    /// True for nodes that produce no output at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Empty => true,
            Node::Fragment(children) => children.iter().all(Node::is_empty),
            _ => false,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// All elements of the subtree in document order (pre-order).
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(self, &mut out);
        out
    }

    /// First element in document order carrying `data-slot="{slot}"`.
    pub fn find_slot(&self, slot: &str) -> Option<&Element> {
        self.elements().into_iter().find(|el| el.slot() == Some(slot))
    }

    /// Every element carrying `data-slot="{slot}"`, in document order.
    pub fn find_slots(&self, slot: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|el| el.slot() == Some(slot))
            .collect()
    }
}

fn collect_elements<'a>(node: &'a Node, out: &mut Vec<&'a Element>) {
    match node {
        Node::Element(el) => {
            out.push(el);
            for child in &el.children {
                collect_elements(child, out);
            }
        }
        Node::Fragment(children) => {
            for child in children {
                collect_elements(child, out);
            }
        }
        Node::Empty | Node::Text(_) | Node::Number(_) | Node::Row(_) => {}
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::Text(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Number(value as f64)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::Number(f64::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Node::Element(value)
    }
}

impl From<Row> for Node {
    fn from(value: Row) -> Self {
        Node::Row(Box::new(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Node::Fragment(value)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Node::Empty)
    }
}

/// A host element: tag, ordered attributes, children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    /// Set (or replace) an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Append one or more space separated class tokens.
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        self.add_class(class.as_ref());
        self
    }

    pub fn add_class(&mut self, class: &str) {
        let class = class.trim();
        if class.is_empty() {
            return;
        }
        let merged = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", merged);
    }

    /// Append one `property: value` style declaration.
    pub fn style(mut self, property: &str, value: impl AsRef<str>) -> Self {
        let decl = format!("{property}: {}", value.as_ref());
        let merged = match self.get_attr("style") {
            Some(existing) if !existing.is_empty() => format!("{existing}; {decl}"),
            _ => decl,
        };
        self.set_attr("style", merged);
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|token| token == class))
    }

    /// Value of the `style` declaration for `property`, if present.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.get_attr("style")?.split(';').find_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            (k.trim() == property).then(|| v.trim())
        })
    }

    /// The `data-slot` marker set on every cell a row renderer emits.
    pub fn slot(&self) -> Option<&str> {
        self.get_attr("data-slot")
    }
}

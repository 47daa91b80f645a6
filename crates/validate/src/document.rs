//! Parsed-document abstraction consumed by rules.
//!
//! The engine never parses markup: the host parser builds a [`Document`]
//! through the arena builder API and hands it over read-only. Node order is
//! document order (nodes are appended as the parser walks), and rules
//! address nodes by [`NodeId`].

use serde::Serialize;

/// Stable handle to one node in a document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

/// One element node: name, ordered attributes, optional text, tree links.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

/// An already-parsed traversable tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document with a single root element.
    pub fn with_root(name: impl Into<String>) -> Document {
        Document {
            nodes: vec![Node {
                name: name.into(),
                attributes: Vec::new(),
                text: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child element under `parent`, returning its handle.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Set an attribute, replacing any previous value under the same name.
    pub fn set_attr(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let attributes = &mut self.nodes[node.0].attributes;
        match attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value.into(),
            None => attributes.push((name, value.into())),
        }
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.nodes[node.0].text = Some(text.into());
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// All node handles in document order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// All nodes carrying the named attribute, in document order.
    pub fn nodes_with_attr(&self, name: &str) -> Vec<NodeId> {
        self.nodes()
            .filter(|id| self.has_attr(*id, name))
            .collect()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Slash path with sibling indices, e.g. `/html[0]/body[0]/div[2]`.
    /// Used as the opaque issue locator.
    pub fn path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = id;
        loop {
            let node = &self.nodes[current.0];
            let index = match node.parent {
                Some(parent) => self.nodes[parent.0]
                    .children
                    .iter()
                    .position(|c| *c == current)
                    .unwrap_or(0),
                None => 0,
            };
            segments.push(format!("{}[{}]", node.name, index));
            match node.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }
}

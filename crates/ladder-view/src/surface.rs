//! Abstract document surface and the retained scene graph.

use std::fmt::Write as _;

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Opaque handle to a node on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// The document capability the editor draws through.
///
/// In the browser original this is the DOM/SVG API; any host toolkit
/// that can look elements up by id, mutate attributes, mutate child
/// lists, and clone nodes can carry the editor unchanged. Attribute
/// writes against a stale handle are silently dropped; structural
/// element ids are resolved through [`lookup`] so missing elements are
/// detected up front.
///
/// [`lookup`]: Surface::lookup
pub trait Surface {
    /// Find a node by element id.
    fn lookup(&self, id: &str) -> Option<NodeId>;

    /// Read an attribute.
    fn attr(&self, node: NodeId, name: &str) -> Option<SmolStr>;

    /// Write an attribute.
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    /// Append `child` to `parent`'s child list.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach `child` from `parent`'s child list.
    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Deep-clone `node` under a fresh element id. The clone is
    /// unattached until appended.
    fn clone_node(&mut self, node: NodeId, new_id: &str) -> NodeId;
}

#[derive(Debug, Clone, Default)]
struct Node {
    id: Option<SmolStr>,
    attrs: IndexMap<SmolStr, SmolStr>,
    children: Vec<NodeId>,
}

/// Retained-mode in-memory surface.
///
/// Hosts a node tree with an id registry; the editor's synchronous
/// mutations are applied immediately, and [`dump`] serializes the tree
/// deterministically for snapshot tests.
///
/// [`dump`]: SceneGraph::dump
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    ids: IndexMap<SmolStr, NodeId>,
    root: NodeId,
}

impl SceneGraph {
    /// A graph holding only an anonymous root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            ids: IndexMap::new(),
            root: NodeId(0),
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a node registered under `id` and append it to `parent`.
    pub fn register(&mut self, id: &str, parent: NodeId) -> NodeId {
        let node = self.push(Node {
            id: Some(SmolStr::new(id)),
            ..Node::default()
        });
        self.ids.insert(SmolStr::new(id), node);
        self.append_child(parent, node);
        node
    }

    /// Serialize the tree below the root, one node per line, children
    /// indented. Anonymous nodes print `-`; attributes appear in
    /// insertion order.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, &mut out);
        out
    }

    fn dump_node(&self, node: NodeId, depth: usize, out: &mut String) {
        let Some(data) = self.nodes.get(node.0 as usize) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(data.id.as_deref().unwrap_or("-"));
        for (name, value) in &data.attrs {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        out.push('\n');
        for child in &data.children {
            self.dump_node(*child, depth + 1, out);
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let Some(data) = self.nodes.get(node.0 as usize) else {
            return self.push(Node::default());
        };
        let template = Node {
            id: None,
            attrs: data.attrs.clone(),
            children: data.children.clone(),
        };
        let cloned = self.push(template);
        let children = self.nodes[cloned.0 as usize].children.clone();
        let copies: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.clone_subtree(child))
            .collect();
        self.nodes[cloned.0 as usize].children = copies;
        cloned
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for SceneGraph {
    fn lookup(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<SmolStr> {
        self.nodes
            .get(node.0 as usize)
            .and_then(|data| data.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.nodes.get_mut(node.0 as usize) {
            data.attrs.insert(SmolStr::new(name), SmolStr::new(value));
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(data) = self.nodes.get_mut(parent.0 as usize) {
            if !data.children.contains(&child) {
                data.children.push(child);
            }
        }
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(data) = self.nodes.get_mut(parent.0 as usize) {
            data.children.retain(|existing| *existing != child);
        }
    }

    fn clone_node(&mut self, node: NodeId, new_id: &str) -> NodeId {
        let cloned = self.clone_subtree(node);
        if let Some(data) = self.nodes.get_mut(cloned.0 as usize) {
            data.id = Some(SmolStr::new(new_id));
        }
        self.ids.insert(SmolStr::new(new_id), cloned);
        cloned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_is_deep_and_unattached() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let template = graph.register("tmpl", root);
        graph.set_attr(template, "shape", "box");
        let inner = graph.register("tmpl_inner", template);
        graph.set_attr(inner, "kind", "label");

        let copy = graph.clone_node(template, "cell00");
        assert_eq!(graph.attr(copy, "shape").as_deref(), Some("box"));
        graph.set_attr(copy, "shape", "circle");
        assert_eq!(graph.attr(template, "shape").as_deref(), Some("box"));

        // Not attached until appended, so the dump shows it only after.
        assert!(!graph.dump().contains("cell00"));
        graph.append_child(root, copy);
        assert!(graph.dump().contains("cell00"));
    }
}

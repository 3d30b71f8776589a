//! DOM Tree (arena-based allocation)
//!
//! Core node manipulation: appendChild, insertBefore, removeChild,
//! replaceChild, cloneNode, plus the element-sibling navigation the
//! widget relies on.

use crate::{DomError, DomResult, ElementData, InlineStyle, Node, NodeData, NodeId};

/// Arena-based DOM tree
///
/// Slot 0 always holds the document node. Removed nodes keep their slot and
/// simply become detached. Only [`DomTree::release`] hands a slot back for
/// reuse, so an id must not be used after it was released.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            free: Vec::new(),
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of slots, free ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return id;
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached element carrying the given classes
    pub fn create_element_with_classes(&mut self, tag: &str, classes: &[&str]) -> NodeId {
        let id = self.create_element(tag);
        for class in classes {
            self.add_class(id, class);
        }
        id
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content))
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent()
    }

    /// Child nodes in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Element children in document order
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(move |&child| self.is_element(child))
    }

    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.element_children(id).next()
    }

    pub fn last_element_child(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.last_child();
        while let Some(child) = current {
            if self.is_element(child) {
                return Some(child);
            }
            current = self.get(child)?.prev_sibling();
        }
        None
    }

    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.prev_sibling();
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.get(sibling)?.prev_sibling();
        }
        None
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.get(id)?.next_sibling();
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.get(sibling)?.next_sibling();
        }
        None
    }

    pub fn child_element_count(&self, id: NodeId) -> usize {
        self.element_children(id).count()
    }

    /// Ancestors from the parent up to the document node
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.parent),
        }
    }

    /// Inclusive containment, like `Node.contains`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Descendants in pre-order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut kids: Vec<NodeId> = self.children(current).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or append when `None`)
    ///
    /// The child is first detached from wherever it currently lives.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        if !matches!(parent_node.data, NodeData::Element(_) | NodeData::Document) {
            return Err(DomError::InvalidNodeType(parent));
        }
        self.get(child).ok_or(DomError::NotFound(child))?;
        if child == NodeId::ROOT || self.contains(child, parent) {
            tracing::debug!(%parent, %child, "insertion would create a cycle");
            return Err(DomError::HierarchyRequest { parent, child });
        }

        let mut reference = reference;
        if let Some(r) = reference {
            if self.parent(r) != Some(parent) {
                return Err(DomError::NotAChild { parent, child: r });
            }
            if r == child {
                reference = self.get(child).and_then(Node::next_sibling);
            }
        }

        self.detach(child);
        self.link_before(parent, child, reference.unwrap_or(NodeId::NONE));
        Ok(())
    }

    /// Insert `child` right after `reference`, under the same parent
    pub fn insert_after(&mut self, child: NodeId, reference: NodeId) -> DomResult<()> {
        let parent = self.parent(reference).ok_or(DomError::NotFound(reference))?;
        let next = self.get(reference).and_then(Node::next_sibling);
        let next = if next == Some(child) {
            self.get(child).and_then(Node::next_sibling)
        } else {
            next
        };
        self.insert_before(parent, child, next)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Replace `old_child` with `new_child` at the same position
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<()> {
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child: old_child });
        }
        if new_child == old_child {
            return Ok(());
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.detach(old_child);
        Ok(())
    }

    /// Detach a node from its parent, if any
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Detach `id` and free its slot and the slots of its subtree
    pub fn release(&mut self, id: NodeId) {
        if id == NodeId::ROOT || self.get(id).is_none() || self.free.contains(&id) {
            return;
        }
        self.detach(id);
        let mut released = self.descendants(id);
        released.push(id);
        for slot in released {
            self.nodes[slot.index()] = Node::text("");
            self.free.push(slot);
        }
    }

    fn link_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        let prev = if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling
        } else {
            self.nodes[parent.index()].last_child
        };

        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        if reference.is_valid() {
            self.nodes[reference.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
    }

    /// Clone a node; `deep` also clones the subtree. The clone is detached.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> DomResult<NodeId> {
        let copy = self.get(id).ok_or(DomError::NotFound(id))?.detached_copy();
        if matches!(copy.data, NodeData::Document) {
            return Err(DomError::InvalidNodeType(id));
        }
        let new_id = self.alloc(copy);
        if deep {
            let kids: Vec<NodeId> = self.children(id).collect();
            for kid in kids {
                let kid_copy = self.clone_node(kid, true)?;
                self.link_before(new_id, kid_copy, NodeId::NONE);
            }
        }
        Ok(new_id)
    }

    // ------------------------------------------------------------------
    // Element helpers (no-ops on non-elements)
    // ------------------------------------------------------------------

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.classes.add(class);
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.classes.remove(class);
        }
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attrs.get(name)
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.get_attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attrs.set(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.attrs.remove(name);
        }
    }

    pub fn style(&self, id: NodeId) -> Option<&InlineStyle> {
        self.element(id).map(|e| &e.style)
    }

    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut InlineStyle> {
        self.element_mut(id).map(|e| &mut e.style)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next.option()?;
        self.next = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

/// Iterator from a node's parent up to the document
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next.option()?;
        self.next = self.tree.nodes[id.index()].parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(tree: &mut DomTree, names: &[&str]) -> (NodeId, Vec<NodeId>) {
        let ol = tree.create_element("ol");
        tree.append_child(tree.root(), ol).unwrap();
        let items = names
            .iter()
            .map(|name| {
                let li = tree.create_element("li");
                let text = tree.create_text(name);
                tree.append_child(li, text).unwrap();
                tree.append_child(ol, li).unwrap();
                li
            })
            .collect();
        (ol, items)
    }

    #[test]
    fn test_append_and_navigate() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B", "C"]);

        assert_eq!(tree.element_children(ol).collect::<Vec<_>>(), items);
        assert_eq!(tree.first_element_child(ol), Some(items[0]));
        assert_eq!(tree.last_element_child(ol), Some(items[2]));
        assert_eq!(tree.next_element_sibling(items[0]), Some(items[1]));
        assert_eq!(tree.prev_element_sibling(items[0]), None);
        assert_eq!(tree.child_element_count(ol), 3);
        assert_eq!(tree.text_content(ol), "ABC");
    }

    #[test]
    fn test_insert_before_moves_node() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B", "C"]);

        tree.insert_before(ol, items[2], Some(items[0])).unwrap();
        assert_eq!(
            tree.element_children(ol).collect::<Vec<_>>(),
            vec![items[2], items[0], items[1]]
        );

        // Inserting a node before itself is a no-op
        tree.insert_before(ol, items[0], Some(items[0])).unwrap();
        assert_eq!(
            tree.element_children(ol).collect::<Vec<_>>(),
            vec![items[2], items[0], items[1]]
        );
    }

    #[test]
    fn test_insert_after() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B", "C"]);

        tree.insert_after(items[0], items[2]).unwrap();
        assert_eq!(
            tree.element_children(ol).collect::<Vec<_>>(),
            vec![items[1], items[2], items[0]]
        );

        tree.insert_after(items[1], items[0]).unwrap();
        assert_eq!(
            tree.element_children(ol).collect::<Vec<_>>(),
            vec![items[2], items[0], items[1]]
        );
    }

    #[test]
    fn test_hierarchy_request_rejected() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A"]);

        let err = tree.append_child(items[0], ol).unwrap_err();
        assert_eq!(err, DomError::HierarchyRequest { parent: items[0], child: ol });
        assert!(matches!(
            tree.append_child(ol, ol),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_reference_must_be_child() {
        let mut tree = DomTree::new();
        let (ol, _) = list(&mut tree, &["A"]);
        let stray = tree.create_element("li");
        let other = tree.create_element("li");

        assert_eq!(
            tree.insert_before(ol, other, Some(stray)),
            Err(DomError::NotAChild { parent: ol, child: stray })
        );
    }

    #[test]
    fn test_replace_child_keeps_slot() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B", "C"]);
        let placeholder = tree.create_element("li");
        tree.insert_before(ol, placeholder, Some(items[1])).unwrap();
        tree.detach(items[1]);

        tree.replace_child(ol, items[1], placeholder).unwrap();
        assert_eq!(tree.element_children(ol).collect::<Vec<_>>(), items);
        assert!(tree.parent(placeholder).is_none());
    }

    #[test]
    fn test_remove_child() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B"]);

        tree.remove_child(ol, items[0]).unwrap();
        assert_eq!(tree.element_children(ol).collect::<Vec<_>>(), vec![items[1]]);
        assert!(tree.remove_child(ol, items[0]).is_err());
    }

    #[test]
    fn test_clone_deep() {
        let mut tree = DomTree::new();
        let (_, items) = list(&mut tree, &["A"]);
        tree.add_class(items[0], "nst-item");

        let copy = tree.clone_node(items[0], true).unwrap();
        assert!(tree.parent(copy).is_none());
        assert!(tree.has_class(copy, "nst-item"));
        assert_eq!(tree.text_content(copy), "A");

        let shallow = tree.clone_node(items[0], false).unwrap();
        assert_eq!(tree.text_content(shallow), "");
    }

    #[test]
    fn test_release_reuses_slots() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B"]);
        let copy = tree.clone_node(items[0], true).unwrap();
        tree.append_child(ol, copy).unwrap();
        let len = tree.len();

        tree.release(copy);
        tree.release(copy);
        assert_eq!(tree.element_children(ol).collect::<Vec<_>>(), items);

        // the clone and its text node come back, nothing new is pushed
        let first = tree.create_element("li");
        let second = tree.create_text("x");
        assert_eq!(tree.len(), len);
        assert!(tree.parent(first).is_none());
        assert!(tree.children(first).next().is_none());
        assert_ne!(first, second);
        assert_eq!(tree.get(second).and_then(Node::as_text), Some("x"));

        tree.create_element("li");
        assert_eq!(tree.len(), len + 1);
    }

    #[test]
    fn test_release_ignores_document() {
        let mut tree = DomTree::new();
        let root = tree.root();
        tree.release(root);
        assert_eq!(tree.create_element("div"), NodeId(1));
    }

    #[test]
    fn test_contains_and_descendants() {
        let mut tree = DomTree::new();
        let (ol, items) = list(&mut tree, &["A", "B"]);

        assert!(tree.contains(ol, items[1]));
        assert!(tree.contains(ol, ol));
        assert!(!tree.contains(items[0], ol));
        assert_eq!(tree.descendants(ol).len(), 4);
    }
}

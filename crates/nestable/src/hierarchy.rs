//! Hierarchy Mutator
//!
//! Decides where the placeholder goes. Planning functions only read the
//! tree and return a [`Placement`]; [`Placement::apply`] performs the move.

use nestable_dom::{DomError, DomResult, DomTree, NodeId};

use crate::{Config, Direction};

/// Where to put the placeholder, relative to an anchor node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the anchor, under the anchor's parent
    Before(NodeId),
    /// Immediately after the anchor, under the anchor's parent
    After(NodeId),
    /// First child of the given list
    FirstChildOf(NodeId),
    /// Last child of the given list
    LastChildOf(NodeId),
}

impl Placement {
    /// Node the placement is relative to
    pub fn anchor(self) -> NodeId {
        match self {
            Placement::Before(id)
            | Placement::After(id)
            | Placement::FirstChildOf(id)
            | Placement::LastChildOf(id) => id,
        }
    }

    /// Move `node` to this placement
    pub fn apply(self, tree: &mut DomTree, node: NodeId) -> DomResult<()> {
        match self {
            Placement::Before(anchor) => {
                let parent = tree.parent(anchor).ok_or(DomError::NotFound(anchor))?;
                tree.insert_before(parent, node, Some(anchor))
            }
            Placement::After(anchor) => tree.insert_after(node, anchor),
            Placement::FirstChildOf(list) => {
                let first = tree.first_element_child(list);
                tree.insert_before(list, node, first)
            }
            Placement::LastChildOf(list) => tree.append_child(list, node),
        }
    }

    /// Whether moving `placeholder` here keeps it out of its own subtree and
    /// out of the hidden `source`
    pub fn is_allowed(self, tree: &DomTree, placeholder: NodeId, source: NodeId) -> bool {
        let anchor = self.anchor();
        !tree.contains(placeholder, anchor) && !tree.contains(source, anchor)
    }
}

/// Child list of `item`: its last element child carrying the list class
pub(crate) fn child_list(tree: &DomTree, config: &Config, item: NodeId) -> Option<NodeId> {
    let list = tree.last_element_child(item)?;
    tree.has_class(list, &config.classes.list).then_some(list)
}

/// Item owning `list`, if any
pub(crate) fn owner_item(tree: &DomTree, config: &Config, list: NodeId) -> Option<NodeId> {
    let owner = tree.parent(list)?;
    tree.has_class(owner, &config.classes.item).then_some(owner)
}

/// Reorder around `target` according to the vertical direction
///
/// A parent target takes the placeholder as the first child of its list
/// when moving down; anything else gets it right before or after.
pub(crate) fn plan_reorder(
    tree: &DomTree,
    config: &Config,
    target: NodeId,
    direction: Direction,
) -> Option<Placement> {
    let (after, before) = (direction.y > 0, direction.y < 0);
    if tree.has_class(target, &config.classes.parent) {
        if after {
            child_list(tree, config, target).map(Placement::FirstChildOf)
        } else {
            Some(Placement::Before(target))
        }
    } else if after {
        Some(Placement::After(target))
    } else if before {
        Some(Placement::Before(target))
    } else {
        None
    }
}

/// Nest the placeholder under its nearest preceding sibling item
///
/// Returns the new parent item and the placement. The hidden source is
/// never a candidate.
pub(crate) fn plan_set_parent(
    tree: &DomTree,
    config: &Config,
    placeholder: NodeId,
    source: NodeId,
) -> Option<(NodeId, Placement)> {
    let mut sibling = tree.prev_element_sibling(placeholder);
    while let Some(id) = sibling {
        if id != source && tree.has_class(id, &config.classes.item) {
            break;
        }
        sibling = tree.prev_element_sibling(id);
    }
    let item = sibling?;
    let list = child_list(tree, config, item)?;
    Some((item, Placement::LastChildOf(list)))
}

/// Lift the placeholder out of its list to follow the list's owner item
///
/// Only the last element of a nested list can leave it, or the
/// second-to-last when the hidden `source` is last. Returns the owner item
/// and the placement.
pub(crate) fn plan_unset_parent(
    tree: &DomTree,
    config: &Config,
    root: NodeId,
    placeholder: NodeId,
    source: NodeId,
) -> Option<(NodeId, Placement)> {
    let list = tree.parent(placeholder)?;
    if list == root || !tree.has_class(list, &config.classes.list) {
        return None;
    }

    let last = tree.last_element_child(list)?;
    let near_end = last == placeholder
        || (last == source && tree.prev_element_sibling(last) == Some(placeholder));
    if !near_end {
        return None;
    }

    let item = owner_item(tree, config, list)?;
    let outer = tree.parent(item)?;
    if !tree.has_class(outer, &config.classes.list) {
        return None;
    }
    Some((item, Placement::After(item)))
}

/// Drop the parent marker of the item owning `list` when the list no
/// longer holds anything but the hidden `source`
///
/// Returns the item that lost the marker.
pub(crate) fn release_list(
    tree: &mut DomTree,
    config: &Config,
    list: NodeId,
    source: NodeId,
) -> Option<NodeId> {
    if !tree.has_class(list, &config.classes.list) {
        return None;
    }
    let count = tree.child_element_count(list);
    let vacated = count == 0 || (count < 2 && tree.first_element_child(list) == Some(source));
    if !vacated {
        return None;
    }
    let owner = owner_item(tree, config, list)?;
    if !tree.has_class(owner, &config.classes.parent) {
        return None;
    }
    tree.remove_class(owner, &config.classes.parent);
    tracing::debug!(item = %owner, "item no longer a parent");
    Some(owner)
}

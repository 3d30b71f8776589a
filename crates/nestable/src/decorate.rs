//! Markup decoration
//!
//! Turns a plain nested list into the structure the drag machinery works
//! on, and takes it back apart on destroy. Each decorated item looks like:
//!
//! ```text
//! li.nst-item[collapsed="0"][draggable="true"]
//!   button.nst-button[type="button"]
//!   div.nst-content.nst-handle   (the item's own content)
//!   ol.nst-list                  (child items, possibly empty)
//! ```

use nestable_dom::{Document, NodeId, Position};
use nestable_layout::computed_style;

use crate::Result;
use crate::config::Config;

/// What `decorate` did, so `undecorate` can undo exactly that
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Decoration {
    pub items: Vec<NodeId>,
    pub draggable: Vec<NodeId>,
    /// Existing elements that received the handle class
    pub handles: Vec<NodeId>,
    /// Lists created for items that had none
    pub created_lists: Vec<NodeId>,
    /// The root was `static` and got `position: relative`
    pub root_positioned: bool,
}

/// Items under `root`, in document order
fn find_items(doc: &Document, config: &Config, root: NodeId) -> Vec<NodeId> {
    match &config.items {
        Some(selector) => doc.query_selector_all(root, selector),
        None => doc
            .tree
            .descendants(root)
            .into_iter()
            .filter(|&id| doc.tree.tag_name(id) == Some(config.item_name.as_str()))
            .collect(),
    }
}

/// The item's own list: its last element child named `list_name`
fn own_list(doc: &Document, config: &Config, item: NodeId) -> Option<NodeId> {
    doc.tree
        .element_children(item)
        .filter(|&id| doc.tree.tag_name(id) == Some(config.list_name.as_str()))
        .last()
}

/// Decorate the list rooted at `root`
pub(crate) fn decorate(doc: &mut Document, config: &Config, root: NodeId) -> Result<Decoration> {
    let mut decoration = Decoration::default();
    let classes = &config.classes;

    if computed_style(doc, root)?.position == Position::Static {
        if let Some(style) = doc.tree.style_mut(root) {
            style.position = Some(Position::Relative);
        }
        decoration.root_positioned = true;
    }
    doc.tree.add_class(root, &classes.root);
    doc.tree.add_class(root, &classes.list);

    for item in find_items(doc, config, root) {
        doc.tree.add_class(item, &classes.item);

        let existing_list = own_list(doc, config, item);
        let own_nodes: Vec<NodeId> = doc
            .tree
            .children(item)
            .filter(|&id| Some(id) != existing_list)
            .collect();

        // Locate a configured handle before the content moves
        let handle = config.handle.as_deref().and_then(|selector| {
            own_nodes
                .iter()
                .find_map(|&node| {
                    if doc.matches(node, selector) {
                        Some(node)
                    } else {
                        doc.query_selector(node, selector)
                    }
                })
        });

        let content = doc.tree.create_element_with_classes("div", &[&classes.content]);
        match (config.handle.is_some(), handle) {
            (true, Some(handle)) => {
                doc.tree.add_class(handle, &classes.handle);
                decoration.handles.push(handle);
            }
            (true, None) => {
                tracing::debug!(%item, "no handle found, content is the handle");
                doc.tree.add_class(content, &classes.handle);
            }
            (false, _) => doc.tree.add_class(content, &classes.handle),
        }

        for node in own_nodes {
            doc.tree.append_child(content, node)?;
        }

        let list = match existing_list {
            Some(list) => {
                doc.tree.add_class(list, &classes.list);
                doc.tree.insert_before(item, content, Some(list))?;
                list
            }
            None => {
                doc.tree.append_child(item, content)?;
                let list = doc
                    .tree
                    .create_element_with_classes(&config.list_name, &[&classes.list]);
                doc.tree.append_child(item, list)?;
                decoration.created_lists.push(list);
                list
            }
        };
        if doc.tree.child_element_count(list) > 0 {
            doc.tree.add_class(item, &classes.parent);
        }

        doc.tree.set_attribute(item, "collapsed", "0");

        if doc.matches(item, &config.draggable) {
            doc.tree.set_attribute(item, "draggable", "true");
            doc.tree.add_class(item, &classes.draggable);
            decoration.draggable.push(item);
        }

        let button = doc.tree.create_element_with_classes("button", &[&classes.button]);
        doc.tree.set_attribute(button, "type", "button");
        let first = doc.tree.first_element_child(item);
        doc.tree.insert_before(item, button, first)?;

        decoration.items.push(item);
    }

    tracing::debug!(
        %root,
        items = decoration.items.len(),
        draggable = decoration.draggable.len(),
        "decorated"
    );
    Ok(decoration)
}

/// Undo everything `decorate` did
pub(crate) fn undecorate(
    doc: &mut Document,
    config: &Config,
    root: NodeId,
    decoration: &Decoration,
) -> Result<()> {
    let classes = &config.classes;

    for &item in &decoration.items {
        for class in [
            &classes.item,
            &classes.parent,
            &classes.draggable,
            &classes.collapsed,
        ] {
            doc.tree.remove_class(item, class);
        }
        doc.tree.remove_attribute(item, "collapsed");
        doc.tree.remove_attribute(item, "draggable");

        let own: Vec<NodeId> = doc.tree.element_children(item).collect();
        for child in own {
            if doc.tree.has_class(child, &classes.button) {
                doc.tree.remove_child(item, child)?;
            } else if doc.tree.has_class(child, &classes.content) {
                let inner: Vec<NodeId> = doc.tree.children(child).collect();
                for node in inner {
                    doc.tree.insert_before(item, node, Some(child))?;
                }
                doc.tree.remove_child(item, child)?;
            } else if doc.tree.has_class(child, &classes.list) {
                let created = decoration.created_lists.contains(&child);
                if created && doc.tree.child_element_count(child) == 0 {
                    doc.tree.remove_child(item, child)?;
                } else {
                    doc.tree.remove_class(child, &classes.list);
                }
            }
        }
    }

    for &handle in &decoration.handles {
        doc.tree.remove_class(handle, &classes.handle);
    }

    doc.tree.remove_class(root, &classes.root);
    doc.tree.remove_class(root, &classes.list);
    if decoration.root_positioned {
        if let Some(style) = doc.tree.style_mut(root) {
            style.position = None;
        }
    }

    tracing::debug!(%root, items = decoration.items.len(), "undecorated");
    Ok(())
}

/// Flip the collapsed state of the item owning `button`
///
/// Returns the item and whether it is now collapsed.
pub(crate) fn toggle_collapsed(
    doc: &mut Document,
    config: &Config,
    button: NodeId,
) -> Option<(NodeId, bool)> {
    if !doc.tree.has_class(button, &config.classes.button) {
        return None;
    }
    let item = doc.tree.parent(button)?;
    let collapse = doc.tree.get_attribute(item, "collapsed") == Some("0");
    if collapse {
        doc.tree.add_class(item, &config.classes.collapsed);
        doc.tree.set_attribute(item, "collapsed", "1");
    } else {
        doc.tree.remove_class(item, &config.classes.collapsed);
        doc.tree.set_attribute(item, "collapsed", "0");
    }
    Some((item, collapse))
}

//! Depth-first, pre-order search over a [`Document`]'s tree.
//!
//! Every search walks the subtree *below* its start node, never the start
//! node itself: first child, then that child's subtree, then the next
//! sibling. First-match variants therefore return the hit closest to the
//! root, with ties among equal depths broken by document order. Each call
//! traverses fresh; nothing is cached between calls.

use indextree::NodeId;

use crate::dom::Document;

/// How an attribute value must relate to the target string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrMatch {
    /// Value equals the target exactly.
    Exact,
    /// Value contains the target as a substring.
    Substring,
}

impl AttrMatch {
    fn matches(self, value: &str, target: &str) -> bool {
        match self {
            AttrMatch::Exact => value == target,
            AttrMatch::Substring => value.contains(target),
        }
    }
}

impl Document {
    /// Pre-order walk of everything below `id` (excluding `id` itself).
    fn subtree(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.descendants(&self.arena).skip(1)
    }

    /// First node below `id` whose tag name equals `tag` exactly.
    ///
    /// Text nodes match the tag `"text"`, comments `"comment"`.
    pub fn find_child_by_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.subtree(id).find(|&n| self.tag_name(n) == Some(tag))
    }

    /// All nodes below `id` whose tag name equals `tag`, in document order.
    pub fn find_children_by_tag(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.subtree(id)
            .filter(|&n| self.tag_name(n) == Some(tag))
            .collect()
    }

    /// First node below `id` carrying an attribute named `name` whose value
    /// matches `value` per `mode`.
    ///
    /// A node whose attribute name matches but whose value does not is not
    /// a hit, and the walk still descends into that node's children - a
    /// failed value check never prunes the subtree.
    pub fn find_child_by_attr(
        &self,
        id: NodeId,
        name: &str,
        value: &str,
        mode: AttrMatch,
    ) -> Option<NodeId> {
        self.subtree(id)
            .find(|&n| self.attr(n, name).is_some_and(|v| mode.matches(v, value)))
    }

    /// All nodes below `id` matching the attribute predicate, in document
    /// order.
    pub fn find_children_by_attr(
        &self,
        id: NodeId,
        name: &str,
        value: &str,
        mode: AttrMatch,
    ) -> Vec<NodeId> {
        self.subtree(id)
            .filter(|&n| self.attr(n, name).is_some_and(|v| mode.matches(v, value)))
            .collect()
    }

    /// First node below `id` whose `class` attribute equals `class` exactly.
    pub fn find_child_of_class(&self, id: NodeId, class: &str) -> Option<NodeId> {
        self.find_child_by_attr(id, "class", class, AttrMatch::Exact)
    }

    /// All nodes below `id` whose `class` attribute equals `class` exactly.
    pub fn find_children_of_class(&self, id: NodeId, class: &str) -> Vec<NodeId> {
        self.find_children_by_attr(id, "class", class, AttrMatch::Exact)
    }
}

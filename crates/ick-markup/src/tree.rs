//! Render tree (arena-based allocation)
//!
//! One node per rendered composer. Parents are referenced by id only.

use std::collections::HashMap;
use std::ops::Index;

use crate::Registry;

/// Prefix of virtual ids of top-level composers
const ORPHAN: &str = "orphan";

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Render metadata of one composer
#[derive(Debug, Clone, Default)]
pub struct RenderMeta {
    pub type_name: &'static str,
    /// 0 for a top-level composer
    pub depth: usize,
    pub virtual_id: String,
    /// `id` attribute of the built tag
    pub tag_id: Option<String>,
    pub parent: Option<NodeId>,
    /// Embedded children keyed by tag id, else virtual id
    pub children: HashMap<String, NodeId>,
    pub rendered: bool,
    pub mounted: bool,
    /// Last inline diagnostic raised in this node
    pub error: Option<String>,
}

impl RenderMeta {
    /// Key under which the parent embeds this node
    pub fn key(&self) -> &str {
        self.tag_id.as_deref().unwrap_or(&self.virtual_id)
    }
}

/// Arena of render metadata for one pass
#[derive(Debug, Default)]
pub struct RenderTree {
    nodes: Vec<RenderMeta>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&RenderMeta> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &RenderMeta)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, meta)| (NodeId(i as u32), meta))
    }

    /// Nodes without parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter()
            .filter(|(_, meta)| meta.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Embedded child of `parent` under `key`
    pub fn child(&self, parent: NodeId, key: &str) -> Option<NodeId> {
        self.get(parent)?.children.get(key).copied()
    }

    /// Find a node by virtual id
    pub fn find(&self, virtual_id: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, meta)| meta.virtual_id == virtual_id)
            .map(|(id, _)| id)
    }

    /// Flag a node as mounted in a live document
    pub fn mark_mounted(&mut self, id: NodeId) {
        if let Some(meta) = self.nodes.get_mut(id.index()) {
            meta.mounted = true;
        }
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut RenderMeta> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn create(&mut self, type_name: &'static str, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RenderMeta {
            type_name,
            depth,
            parent,
            ..RenderMeta::default()
        });
        id
    }

    /// Assign `{prefix}.{body}{suffix}`.
    ///
    /// The prefix is the parent's virtual id or `orphan`, the body the tag id
    /// or the lowercased type name. Children with a tag id get no suffix,
    /// other children the parent's embedded count, and top-level nodes the
    /// registry counter of their type.
    pub(crate) fn assign_virtual_id(&mut self, id: NodeId, registry: &Registry) -> &str {
        let meta = &self[id];
        let type_name = meta.type_name.to_lowercase();
        let body = meta.tag_id.clone().unwrap_or_else(|| type_name.clone());

        let virtual_id = match meta.parent {
            Some(parent) => {
                let parent = &self[parent];
                if meta.tag_id.is_some() {
                    format!("{}.{}", parent.virtual_id, body)
                } else {
                    format!("{}.{}{}", parent.virtual_id, body, parent.children.len())
                }
            }
            None => {
                let (n, _) = registry.unique_id(&type_name);
                format!("{ORPHAN}.{body}{n}")
            }
        };

        let meta = &mut self.nodes[id.index()];
        meta.virtual_id = virtual_id;
        &meta.virtual_id
    }

    /// Register `child` in its parent's embedded children. The newer entry
    /// wins on a key collision.
    pub(crate) fn embed(&mut self, child: NodeId) {
        let meta = &self[child];
        let Some(parent) = meta.parent else {
            return;
        };
        let key = meta.key().to_string();
        let previous = self.nodes[parent.index()].children.insert(key.clone(), child);
        if let Some(previous) = previous {
            tracing::warn!(
                "{}: embedded child {:?} replaced, node {} overrides node {}",
                self[parent].virtual_id,
                key,
                child.index(),
                previous.index()
            );
        }
    }
}

impl Index<NodeId> for RenderTree {
    type Output = RenderMeta;

    fn index(&self, id: NodeId) -> &RenderMeta {
        &self.nodes[id.index()]
    }
}

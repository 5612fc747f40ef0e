/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Graph data structures for the room layout editor.
//!
//! Core structures:
//! - `RoomGraph`: main graph container backed by petgraph::StableGraph
//! - `RoomNode`: room node with kind, position, and transient editor flags
//! - `LinkView`: read-only parent/child pair for rendering
//!
//! The store owns every node exclusively. Adjacency is stored as directed
//! petgraph edges, so parent/child symmetry and no-dangling-reference
//! integrity are structural: removing a node removes its incident links.

use euclid::default::{Point2D, Vector2D};
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::{Directed, Direction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::persistence::{GraphSnapshot, PersistedLink, PersistedRoomNode};
use crate::registry::{KindRegistry, RoomKind};

pub mod link;

pub use link::{LinkVeto, can_link, check_link};

/// Stable node handle (petgraph NodeIndex — survives other deletions)
pub type NodeKey = NodeIndex;

/// Stable link handle (petgraph EdgeIndex)
pub type LinkKey = EdgeIndex;

/// A room node in the graph
#[derive(Debug, Clone)]
pub struct RoomNode {
    /// Stable node identity.
    pub id: Uuid,

    /// Current category; mutable through `recategorize` only.
    pub kind: RoomKind,

    /// Position in layout space. Mutated by drag operations; no graph
    /// invariant depends on it.
    pub position: Point2D<f32>,

    /// Transient selection flag, owned by the node, driven by the shell.
    pub selected: bool,

    /// Transient drag-in-progress flag.
    pub dragging: bool,
}

/// Read-only view of a link (built from petgraph edge references)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkView {
    pub from: NodeKey,
    pub to: NodeKey,
}

/// Errors from graph store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// Connect refused; carries the violated rule. The graph is unchanged.
    LinkRejected(LinkVeto),
    /// An operation referenced a key absent from the graph.
    UnknownNode(NodeKey),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::LinkRejected(veto) => write!(f, "link rejected: {veto}"),
            GraphError::UnknownNode(key) => write!(f, "unknown node: {}", key.index()),
        }
    }
}

/// Main graph structure backed by petgraph::StableGraph
#[derive(Clone)]
pub struct RoomGraph {
    /// The underlying petgraph stable graph
    inner: StableGraph<RoomNode, (), Directed>,

    /// Stable UUID to node mapping.
    id_to_node: HashMap<Uuid, NodeKey>,

    /// Keys in creation order; deterministic iteration for rendering.
    creation_order: Vec<NodeKey>,

    /// Kind configuration, fixed for the lifetime of the graph.
    registry: KindRegistry,
}

impl RoomGraph {
    /// Create a new empty graph with the given kind registry.
    pub fn new(registry: KindRegistry) -> Self {
        Self {
            inner: StableGraph::new(),
            id_to_node: HashMap::new(),
            creation_order: Vec::new(),
            registry,
        }
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    // --- Mutation operations -------------------------------------------

    /// Add a new node with a fresh identity and empty adjacency.
    pub fn create_node(&mut self, position: Point2D<f32>, kind: RoomKind) -> NodeKey {
        self.create_node_with_id(Uuid::new_v4(), position, kind)
    }

    /// Add a node with a pre-existing UUID (snapshot restore path).
    pub(crate) fn create_node_with_id(
        &mut self,
        id: Uuid,
        position: Point2D<f32>,
        kind: RoomKind,
    ) -> NodeKey {
        let key = self.inner.add_node(RoomNode {
            id,
            kind,
            position,
            selected: false,
            dragging: false,
        });
        self.id_to_node.insert(id, key);
        self.creation_order.push(key);
        key
    }

    /// Attempt to add a link from `source` to `target`.
    ///
    /// Runs the full rule engine first; on rejection nothing is mutated.
    pub fn connect(&mut self, source: NodeKey, target: NodeKey) -> Result<(), GraphError> {
        check_link(self, source, target)?;
        self.inner.add_edge(source, target, ());
        Ok(())
    }

    /// Remove the link from `source` to `target` if present.
    ///
    /// Idempotent: absent links (and unknown keys) are a no-op, not an
    /// error. Returns whether a link was removed.
    pub fn disconnect(&mut self, source: NodeKey, target: NodeKey) -> bool {
        match self.inner.find_edge(source, target) {
            Some(edge) => {
                self.inner.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    /// Sever every link whose parent and child are both selected, then
    /// clear all selection.
    pub fn delete_selected_links(&mut self) {
        let selected: Vec<NodeKey> = self.selected_nodes();
        for &parent in &selected {
            let children: Vec<NodeKey> = self.children(parent).collect();
            for child in children {
                if self.node(child).is_some_and(|node| node.selected) {
                    self.disconnect(parent, child);
                }
            }
        }
        self.clear_all_selected();
    }

    /// Delete every given node that exists and is not the entrance,
    /// severing all incident links. Entrance nodes are silently skipped.
    /// Returns how many nodes were removed.
    pub fn delete_nodes(&mut self, keys: &[NodeKey]) -> usize {
        let mut removed = 0;
        for &key in keys {
            let Some(node) = self.inner.node_weight(key) else {
                continue;
            };
            if node.kind.is_entrance() {
                log::debug!("delete skipped: node {} is the entrance", node.id);
                continue;
            }
            let id = node.id;
            // StableGraph drops incident edges with the node, so no
            // surviving adjacency can dangle.
            self.inner.remove_node(key);
            self.id_to_node.remove(&id);
            self.creation_order.retain(|existing| *existing != key);
            removed += 1;
        }
        removed
    }

    /// Change a node's kind.
    ///
    /// Crossing a class boundary — the corridor facet changing in either
    /// direction, or newly gaining the boss-room facet — invalidates the
    /// rules that admitted the node's existing child links, so those links
    /// are severed. Links from parents are untouched.
    pub fn recategorize(&mut self, key: NodeKey, kind: RoomKind) -> Result<(), GraphError> {
        let node = self
            .inner
            .node_weight_mut(key)
            .ok_or(GraphError::UnknownNode(key))?;
        let old = node.kind;
        node.kind = kind;

        let crosses_class_boundary = old.is_corridor() != kind.is_corridor()
            || (!old.is_boss_room() && kind.is_boss_room());
        if crosses_class_boundary {
            let children: Vec<NodeKey> = self.children(key).collect();
            for child in children {
                self.disconnect(key, child);
            }
        }
        Ok(())
    }

    /// Translate a node's position. No validity implications.
    pub fn drag(&mut self, key: NodeKey, delta: Vector2D<f32>) -> Result<(), GraphError> {
        let node = self
            .inner
            .node_weight_mut(key)
            .ok_or(GraphError::UnknownNode(key))?;
        node.position += delta;
        Ok(())
    }

    /// Set a node's transient selection flag. Unknown keys are a no-op.
    pub fn set_selected(&mut self, key: NodeKey, selected: bool) {
        if let Some(node) = self.inner.node_weight_mut(key) {
            node.selected = selected;
        }
    }

    /// Set a node's transient dragging flag. Unknown keys are a no-op.
    pub fn set_dragging(&mut self, key: NodeKey, dragging: bool) {
        if let Some(node) = self.inner.node_weight_mut(key) {
            node.dragging = dragging;
        }
    }

    pub fn clear_all_selected(&mut self) {
        for node in self.inner.node_weights_mut() {
            node.selected = false;
        }
    }

    pub fn select_all(&mut self) {
        for node in self.inner.node_weights_mut() {
            node.selected = true;
        }
    }

    // --- Read-only queries ---------------------------------------------

    /// Get a node by key
    pub fn node(&self, key: NodeKey) -> Option<&RoomNode> {
        self.inner.node_weight(key)
    }

    /// Get a mutable node by key
    pub(crate) fn node_mut(&mut self, key: NodeKey) -> Option<&mut RoomNode> {
        self.inner.node_weight_mut(key)
    }

    /// Get a node and its key by UUID.
    pub fn node_by_id(&self, id: Uuid) -> Option<(NodeKey, &RoomNode)> {
        let key = *self.id_to_node.get(&id)?;
        Some((key, self.inner.node_weight(key)?))
    }

    /// Get node key by UUID.
    pub fn key_of(&self, id: Uuid) -> Option<NodeKey> {
        self.id_to_node.get(&id).copied()
    }

    /// Iterate over all nodes as (key, node) pairs, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &RoomNode)> {
        self.creation_order
            .iter()
            .filter_map(|&key| self.inner.node_weight(key).map(|node| (key, node)))
    }

    /// Iterate over all links as parent/child pairs for rendering.
    pub fn links(&self) -> impl Iterator<Item = LinkView> + '_ {
        self.inner.edge_references().map(|edge| LinkView {
            from: edge.source(),
            to: edge.target(),
        })
    }

    /// Iterate parent keys of a node (at most one for any legal graph).
    pub fn parents(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors_directed(key, Direction::Incoming)
    }

    /// Iterate child keys of a node.
    pub fn children(&self, key: NodeKey) -> impl Iterator<Item = NodeKey> + '_ {
        self.inner.neighbors_directed(key, Direction::Outgoing)
    }

    /// Check if a link exists from `from` to `to`
    pub fn has_link(&self, from: NodeKey, to: NodeKey) -> bool {
        self.inner.find_edge(from, to).is_some()
    }

    /// Count of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Count of links in the graph
    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Keys of all currently selected nodes, in creation order.
    pub fn selected_nodes(&self) -> Vec<NodeKey> {
        self.nodes()
            .filter(|(_, node)| node.selected)
            .map(|(key, _)| key)
            .collect()
    }

    /// The entrance node, if one exists.
    pub fn entrance(&self) -> Option<NodeKey> {
        self.nodes()
            .find(|(_, node)| node.kind.is_entrance())
            .map(|(key, _)| key)
    }

    // --- Snapshots ------------------------------------------------------

    /// Serialize the graph to a persistable snapshot. Transient selection
    /// and drag flags are not persisted.
    pub fn to_snapshot(&self) -> GraphSnapshot {
        let nodes = self
            .nodes()
            .map(|(_, node)| PersistedRoomNode {
                node_id: node.id.to_string(),
                kind: node.kind.into(),
                position_x: node.position.x,
                position_y: node.position.y,
            })
            .collect();

        let links = self
            .links()
            .filter_map(|link| {
                let from = self.node(link.from)?;
                let to = self.node(link.to)?;
                Some(PersistedLink {
                    from_node_id: from.id.to_string(),
                    to_node_id: to.id.to_string(),
                })
            })
            .collect();

        GraphSnapshot { nodes, links }
    }

    /// Rebuild a graph from a persisted snapshot.
    ///
    /// Nodes with unparseable ids and links with missing endpoints are
    /// dropped with a warning; the rest of the snapshot still loads.
    pub fn from_snapshot(snapshot: &GraphSnapshot, registry: KindRegistry) -> Self {
        let mut graph = RoomGraph::new(registry);

        for pnode in &snapshot.nodes {
            let Ok(id) = Uuid::parse_str(&pnode.node_id) else {
                log::warn!("snapshot node dropped: invalid id {:?}", pnode.node_id);
                continue;
            };
            graph.create_node_with_id(
                id,
                Point2D::new(pnode.position_x, pnode.position_y),
                pnode.kind.into(),
            );
        }

        for plink in &snapshot.links {
            let from = Uuid::parse_str(&plink.from_node_id)
                .ok()
                .and_then(|id| graph.key_of(id));
            let to = Uuid::parse_str(&plink.to_node_id)
                .ok()
                .and_then(|id| graph.key_of(id));
            match (from, to) {
                (Some(from), Some(to)) => {
                    // Snapshots come from a graph that already passed the
                    // rule engine; restore links without re-validating.
                    graph.inner.add_edge(from, to, ());
                }
                _ => {
                    log::warn!(
                        "snapshot link dropped: missing endpoint {} -> {}",
                        plink.from_node_id,
                        plink.to_node_id
                    );
                }
            }
        }

        graph
    }
}

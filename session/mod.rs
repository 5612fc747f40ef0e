/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Shell-facing command boundary.
//!
//! The presentation shell decodes raw input into [`GraphIntent`] values
//! and applies them through [`EditorSession`]; nothing else mutates the
//! graph during an authoring session. Failures never propagate as errors
//! to the shell — they surface as [`SessionFeedback`] entries the shell
//! drains for user-visible messages.

use euclid::default::{Point2D, Vector2D};

use crate::graph::{GraphError, LinkVeto, NodeKey, RoomGraph};
use crate::registry::{KindRegistry, RoomKind};

/// Where the entrance lands when it is auto-created for an empty graph.
const ENTRANCE_SPAWN: Point2D<f32> = Point2D::new(200.0, 200.0);

/// Deterministic mutation intent boundary for graph state updates.
#[derive(Debug, Clone)]
pub enum GraphIntent {
    /// Create a placeholder node at `position`. The first create on an
    /// empty graph inserts the mandatory entrance node first.
    CreateNodeAt { position: Point2D<f32> },
    /// Create a node of an explicit kind (restore and scripting flows).
    CreateNode {
        position: Point2D<f32>,
        kind: RoomKind,
    },
    /// Start dragging a connection out of `source`.
    BeginLink { source: NodeKey },
    /// Abandon the in-flight connection drag.
    CancelLink,
    /// Drop the in-flight connection onto `target`.
    CompleteLink { target: NodeKey },
    Connect { source: NodeKey, target: NodeKey },
    Disconnect { source: NodeKey, target: NodeKey },
    DeleteSelectedLinks,
    DeleteSelectedNodes,
    DeleteNodes { keys: Vec<NodeKey> },
    Recategorize { key: NodeKey, kind: RoomKind },
    Drag { key: NodeKey, delta: Vector2D<f32> },
    SetDragging { key: NodeKey, dragging: bool },
    /// Click semantics: flip the node's selection flag.
    ToggleSelected { key: NodeKey },
    SetSelected { key: NodeKey, selected: bool },
    ClearSelection,
    SelectAll,
}

/// Outcomes the shell may want to surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionFeedback {
    /// A connect attempt was refused by the rule engine.
    LinkRejected {
        source: NodeKey,
        target: NodeKey,
        veto: LinkVeto,
    },
    /// An intent referenced a key absent from the graph.
    UnknownNode { key: NodeKey },
    /// Recategorize refused: the node is the entrance, already has a
    /// parent, or the kind is not offered by the picker.
    RecategorizeBlocked { key: NodeKey },
}

/// One authoring session: exclusive owner of the graph being edited.
pub struct EditorSession {
    graph: RoomGraph,
    /// Source of the connection drag in flight, if any.
    link_source: Option<NodeKey>,
    feedback: Vec<SessionFeedback>,
}

impl EditorSession {
    pub fn new(registry: KindRegistry) -> Self {
        Self::with_graph(RoomGraph::new(registry))
    }

    /// Resume a session over an existing graph (snapshot restore path).
    pub fn with_graph(graph: RoomGraph) -> Self {
        Self {
            graph,
            link_source: None,
            feedback: Vec::new(),
        }
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn into_graph(self) -> RoomGraph {
        self.graph
    }

    /// Source node of the in-flight connection drag, for line rendering.
    pub fn link_source(&self) -> Option<NodeKey> {
        self.link_source
    }

    /// Drain accumulated feedback for the shell to display.
    pub fn take_feedback(&mut self) -> Vec<SessionFeedback> {
        std::mem::take(&mut self.feedback)
    }

    pub fn apply_intents<I>(&mut self, intents: I)
    where
        I: IntoIterator<Item = GraphIntent>,
    {
        for intent in intents {
            self.apply_intent(intent);
        }
    }

    pub fn apply_intent(&mut self, intent: GraphIntent) {
        match intent {
            GraphIntent::CreateNodeAt { position } => {
                self.create_node_at(position);
            }
            GraphIntent::CreateNode { position, kind } => {
                self.graph.create_node(position, kind);
            }
            GraphIntent::BeginLink { source } => {
                if self.graph.node(source).is_some() {
                    self.link_source = Some(source);
                } else {
                    self.feedback.push(SessionFeedback::UnknownNode { key: source });
                }
            }
            GraphIntent::CancelLink => {
                self.link_source = None;
            }
            GraphIntent::CompleteLink { target } => {
                // Dropping a line on empty space never reaches here; a
                // completed drag with no source is a stale event and is
                // ignored.
                if let Some(source) = self.link_source.take() {
                    self.connect(source, target);
                }
            }
            GraphIntent::Connect { source, target } => {
                self.connect(source, target);
            }
            GraphIntent::Disconnect { source, target } => {
                self.graph.disconnect(source, target);
            }
            GraphIntent::DeleteSelectedLinks => {
                self.graph.delete_selected_links();
            }
            GraphIntent::DeleteSelectedNodes => {
                let selected = self.graph.selected_nodes();
                self.graph.delete_nodes(&selected);
            }
            GraphIntent::DeleteNodes { keys } => {
                self.graph.delete_nodes(&keys);
            }
            GraphIntent::Recategorize { key, kind } => {
                self.recategorize(key, kind);
            }
            GraphIntent::Drag { key, delta } => {
                if self.graph.drag(key, delta).is_err() {
                    self.feedback.push(SessionFeedback::UnknownNode { key });
                }
            }
            GraphIntent::SetDragging { key, dragging } => {
                self.graph.set_dragging(key, dragging);
            }
            GraphIntent::ToggleSelected { key } => {
                if let Some(node) = self.graph.node_mut(key) {
                    node.selected = !node.selected;
                }
            }
            GraphIntent::SetSelected { key, selected } => {
                self.graph.set_selected(key, selected);
            }
            GraphIntent::ClearSelection => {
                self.graph.clear_all_selected();
            }
            GraphIntent::SelectAll => {
                self.graph.select_all();
            }
        }
    }

    /// Create a placeholder node, inserting the entrance first when the
    /// graph is empty. Returns the placeholder's key.
    pub fn create_node_at(&mut self, position: Point2D<f32>) -> NodeKey {
        if self.graph.node_count() == 0 {
            let entrance = self
                .graph
                .registry()
                .entrance_kind()
                .unwrap_or(RoomKind::Entrance);
            self.graph.create_node(ENTRANCE_SPAWN, entrance);
        }
        let placeholder = self
            .graph
            .registry()
            .placeholder_kind()
            .unwrap_or(RoomKind::Unassigned);
        self.graph.create_node(position, placeholder)
    }

    fn connect(&mut self, source: NodeKey, target: NodeKey) {
        match self.graph.connect(source, target) {
            Ok(()) => {}
            Err(GraphError::LinkRejected(veto)) => {
                log::debug!("link {source:?} -> {target:?} rejected: {veto}");
                self.feedback.push(SessionFeedback::LinkRejected {
                    source,
                    target,
                    veto,
                });
            }
            Err(GraphError::UnknownNode(key)) => {
                self.feedback.push(SessionFeedback::UnknownNode { key });
            }
        }
    }

    /// Kind changes follow the editor contract: only parentless,
    /// non-entrance nodes offer the picker, and only picker kinds are
    /// accepted. Keeping the gate here leaves the store operation general
    /// while every session-driven graph keeps its layout invariants.
    fn recategorize(&mut self, key: NodeKey, kind: RoomKind) {
        let Some(node) = self.graph.node(key) else {
            self.feedback.push(SessionFeedback::UnknownNode { key });
            return;
        };
        let blocked = node.kind.is_entrance()
            || self.graph.parents(key).next().is_some()
            || !self.graph.registry().is_selectable(kind);
        if blocked {
            log::debug!("recategorize of {:?} to {kind:?} blocked", node.id);
            self.feedback
                .push(SessionFeedback::RecategorizeBlocked { key });
            return;
        }
        if self.graph.recategorize(key, kind).is_err() {
            self.feedback.push(SessionFeedback::UnknownNode { key });
        }
    }
}

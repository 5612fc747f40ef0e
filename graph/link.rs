/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Link validation: the rule engine gating every `connect`.
//!
//! [`check_link`] is a pure predicate over the current graph; it mutates
//! nothing and is safe to call from shell hover feedback as well as from
//! the store's connect path. Rules are evaluated in a fixed order so the
//! reported [`LinkVeto`] is deterministic for a given graph state.

use super::{GraphError, NodeKey, RoomGraph};

/// Why a candidate link was refused.
///
/// Variants are ordered by evaluation priority: when several rules would
/// reject the same candidate, the earliest one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkVeto {
    /// The target is still the placeholder kind.
    TargetUnassigned,
    /// Source and target are the same node.
    SelfLink,
    /// The link already exists.
    DuplicateLink,
    /// The target is the source's parent; a 2-cycle is never legal.
    BackLink,
    /// The target already has a parent; every node accepts at most one.
    TargetHasParent,
    /// Both endpoints are corridors, or neither is. Room and corridor
    /// class must alternate across every link.
    NoAlternation,
    /// The source already carries its maximum number of corridor children.
    CorridorLimit,
    /// The entrance is always a root, never a child.
    TargetIsEntrance,
    /// The source already has a child; only corridors branch.
    RoomSlotTaken,
    /// Another boss room is already connected into the layout.
    BossRoomAlreadyLinked,
}

impl std::fmt::Display for LinkVeto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkVeto::TargetUnassigned => write!(f, "target has no kind assigned yet"),
            LinkVeto::SelfLink => write!(f, "a node cannot lead to itself"),
            LinkVeto::DuplicateLink => write!(f, "link already exists"),
            LinkVeto::BackLink => write!(f, "target is already the source's parent"),
            LinkVeto::TargetHasParent => write!(f, "target already has a parent"),
            LinkVeto::NoAlternation => write!(f, "rooms and corridors must alternate"),
            LinkVeto::CorridorLimit => write!(f, "source has reached its corridor child limit"),
            LinkVeto::TargetIsEntrance => write!(f, "the entrance can never be a child"),
            LinkVeto::RoomSlotTaken => write!(f, "source already has a child room"),
            LinkVeto::BossRoomAlreadyLinked => {
                write!(f, "another boss room is already connected")
            }
        }
    }
}

/// Decide whether a link from `source` to `target` may be added.
///
/// Pure: evaluates against the graph as-is and performs no mutation.
/// Unknown keys are reported as [`GraphError::UnknownNode`]; rule
/// violations as [`GraphError::LinkRejected`].
pub fn check_link(graph: &RoomGraph, source: NodeKey, target: NodeKey) -> Result<(), GraphError> {
    let source_node = graph.node(source).ok_or(GraphError::UnknownNode(source))?;
    let target_node = graph.node(target).ok_or(GraphError::UnknownNode(target))?;

    let veto = |rule: LinkVeto| Err(GraphError::LinkRejected(rule));

    if target_node.kind.is_unassigned() {
        return veto(LinkVeto::TargetUnassigned);
    }
    if source == target {
        return veto(LinkVeto::SelfLink);
    }
    if graph.has_link(source, target) {
        return veto(LinkVeto::DuplicateLink);
    }
    if graph.has_link(target, source) {
        return veto(LinkVeto::BackLink);
    }
    if graph.parents(target).next().is_some() {
        return veto(LinkVeto::TargetHasParent);
    }
    if source_node.kind.is_corridor() == target_node.kind.is_corridor() {
        return veto(LinkVeto::NoAlternation);
    }
    if target_node.kind.is_corridor()
        && graph.children(source).count() >= graph.registry().max_child_corridors()
    {
        return veto(LinkVeto::CorridorLimit);
    }
    if target_node.kind.is_entrance() {
        return veto(LinkVeto::TargetIsEntrance);
    }
    if !target_node.kind.is_corridor() && graph.children(source).count() > 0 {
        return veto(LinkVeto::RoomSlotTaken);
    }
    if target_node.kind.is_boss_room() {
        // Global scan: at most one boss room may be wired into the layout,
        // however many disconnected boss rooms exist.
        let boss_already_linked = graph
            .nodes()
            .any(|(key, node)| node.kind.is_boss_room() && graph.parents(key).next().is_some());
        if boss_already_linked {
            return veto(LinkVeto::BossRoomAlreadyLinked);
        }
    }

    Ok(())
}

/// Boolean convenience over [`check_link`] for shell hover feedback.
pub fn can_link(graph: &RoomGraph, source: NodeKey, target: NodeKey) -> bool {
    check_link(graph, source, target).is_ok()
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Room kind registry: the fixed set of node categories and their facets.
//!
//! Supplied read-only at graph construction time. The registry also owns
//! the branching tunable (`max_child_corridors`) consumed by the link
//! validator.

use crate::settings::EditorSettings;

/// Category of a room node.
///
/// Exactly one `Entrance` and one `Unassigned` (placeholder) kind exist;
/// `Room`, `Corridor`, and `BossRoom` are the placeable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomKind {
    /// The single layout root. Never a child, never deletable.
    Entrance,
    /// Placeholder for a freshly created node; cannot be linked.
    Unassigned,
    Room,
    Corridor,
    BossRoom,
}

impl RoomKind {
    /// Connector class: corridors alternate with rooms across every link.
    pub fn is_corridor(self) -> bool {
        matches!(self, RoomKind::Corridor)
    }

    pub fn is_boss_room(self) -> bool {
        matches!(self, RoomKind::BossRoom)
    }

    pub fn is_entrance(self) -> bool {
        matches!(self, RoomKind::Entrance)
    }

    pub fn is_unassigned(self) -> bool {
        matches!(self, RoomKind::Unassigned)
    }
}

/// Registry entry for one kind: authoring-UI metadata only.
#[derive(Debug, Clone)]
pub struct KindInfo {
    pub kind: RoomKind,
    /// Label shown by the shell's kind picker.
    pub display_name: &'static str,
    /// Whether the shell offers this kind in its picker. Entrance and the
    /// placeholder are assigned by the core, never picked.
    pub selectable: bool,
}

/// Read-only kind configuration handed to [`crate::graph::RoomGraph`] at
/// construction time.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    entries: Vec<KindInfo>,
    max_child_corridors: usize,
}

/// Default cap on corridor children per node.
const DEFAULT_MAX_CHILD_CORRIDORS: usize = 3;

impl Default for KindRegistry {
    fn default() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            max_child_corridors: DEFAULT_MAX_CHILD_CORRIDORS,
        };
        registry.seed_defaults();
        registry
    }
}

impl KindRegistry {
    fn seed_defaults(&mut self) {
        let defaults = [
            (RoomKind::Entrance, "Entrance", false),
            (RoomKind::Unassigned, "None", false),
            (RoomKind::Room, "Room", true),
            (RoomKind::Corridor, "Corridor", true),
            (RoomKind::BossRoom, "Boss Room", true),
        ];

        for (kind, display_name, selectable) in defaults {
            self.entries.push(KindInfo {
                kind,
                display_name,
                selectable,
            });
        }
    }

    /// Registry with the default kind set and tunables from `settings`.
    pub fn from_settings(settings: &EditorSettings) -> Self {
        let mut registry = Self::default();
        registry.max_child_corridors = settings.max_child_corridors;
        registry
    }

    /// Maximum number of corridor children a single node may accept.
    pub fn max_child_corridors(&self) -> usize {
        self.max_child_corridors
    }

    pub fn entries(&self) -> &[KindInfo] {
        &self.entries
    }

    pub fn info(&self, kind: RoomKind) -> Option<&KindInfo> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }

    /// The entrance kind, looked up by facet (used when auto-creating the
    /// first node of a new graph).
    pub fn entrance_kind(&self) -> Option<RoomKind> {
        self.find_kind(|kind| kind.is_entrance())
    }

    /// The placeholder kind assigned to freshly created nodes.
    pub fn placeholder_kind(&self) -> Option<RoomKind> {
        self.find_kind(|kind| kind.is_unassigned())
    }

    /// Kinds the shell's picker may offer.
    pub fn selectable_kinds(&self) -> impl Iterator<Item = RoomKind> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.selectable)
            .map(|entry| entry.kind)
    }

    pub fn is_selectable(&self, kind: RoomKind) -> bool {
        self.info(kind).is_some_and(|entry| entry.selectable)
    }

    fn find_kind(&self, predicate: impl Fn(RoomKind) -> bool) -> Option<RoomKind> {
        self.entries
            .iter()
            .map(|entry| entry.kind)
            .find(|kind| predicate(*kind))
    }
}

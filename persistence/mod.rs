/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Serializable types for graph snapshots.
//!
//! The core defines the snapshot data only; the host picks the encoding
//! (JSON, TOML, anything serde-compatible) and the storage location.

use serde::{Deserialize, Serialize};

use crate::registry::RoomKind;

/// Room kind for persistence (mirrors `RoomKind` in the registry).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistedRoomKind {
    Entrance,
    Unassigned,
    Room,
    Corridor,
    BossRoom,
}

impl From<RoomKind> for PersistedRoomKind {
    fn from(kind: RoomKind) -> Self {
        match kind {
            RoomKind::Entrance => PersistedRoomKind::Entrance,
            RoomKind::Unassigned => PersistedRoomKind::Unassigned,
            RoomKind::Room => PersistedRoomKind::Room,
            RoomKind::Corridor => PersistedRoomKind::Corridor,
            RoomKind::BossRoom => PersistedRoomKind::BossRoom,
        }
    }
}

impl From<PersistedRoomKind> for RoomKind {
    fn from(kind: PersistedRoomKind) -> Self {
        match kind {
            PersistedRoomKind::Entrance => RoomKind::Entrance,
            PersistedRoomKind::Unassigned => RoomKind::Unassigned,
            PersistedRoomKind::Room => RoomKind::Room,
            PersistedRoomKind::Corridor => RoomKind::Corridor,
            PersistedRoomKind::BossRoom => RoomKind::BossRoom,
        }
    }
}

/// Persisted node.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PersistedRoomNode {
    /// Stable node identity.
    pub node_id: String,
    pub kind: PersistedRoomKind,
    pub position_x: f32,
    pub position_y: f32,
}

/// Persisted link.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PersistedLink {
    pub from_node_id: String,
    pub to_node_id: String,
}

/// Full graph snapshot handed to the host for saving.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<PersistedRoomNode>,
    pub links: Vec<PersistedLink>,
}

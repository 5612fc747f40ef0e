/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Authoring-time graph core for procedurally-composed level layouts.
//!
//! Nodes are rooms and corridors of typed kinds, directed links are
//! "leads to" adjacency, and a rule engine decides which links are legal
//! so authored layouts stay generatable (one entrance, one connected boss
//! room, alternating room/corridor structure, unique parentage).
//!
//! The crate is headless: a presentation shell decodes raw input into
//! [`session::GraphIntent`] values, applies them through
//! [`session::EditorSession`], and renders from the read-only queries on
//! [`graph::RoomGraph`]. Persistence is the host's concern; the core only
//! defines serde snapshot types in [`persistence`].

pub mod graph;
pub mod persistence;
pub mod registry;
pub mod session;
pub mod settings;

pub use graph::{GraphError, LinkVeto, LinkView, NodeKey, RoomGraph, RoomNode};
pub use registry::{KindRegistry, RoomKind};
pub use session::{EditorSession, GraphIntent, SessionFeedback};
pub use settings::EditorSettings;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

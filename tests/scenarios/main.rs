/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! End-to-end authoring scenarios driven through the session intent
//! boundary, the way a presentation shell would.

use euclid::default::Point2D;
use roomgraph::{
    EditorSession, EditorSettings, GraphIntent, KindRegistry, LinkVeto, NodeKey, RoomGraph,
    RoomKind, SessionFeedback,
};

struct Harness {
    session: EditorSession,
}

impl Harness {
    fn new() -> Self {
        Self {
            session: EditorSession::new(KindRegistry::default()),
        }
    }

    fn with_corridor_cap(cap: usize) -> Self {
        let settings = EditorSettings {
            max_child_corridors: cap,
        };
        Self {
            session: EditorSession::new(KindRegistry::from_settings(&settings)),
        }
    }

    fn add(&mut self, kind: RoomKind, x: f32, y: f32) -> NodeKey {
        let count_before = self.session.graph().node_count();
        self.session.apply_intent(GraphIntent::CreateNode {
            position: Point2D::new(x, y),
            kind,
        });
        assert_eq!(self.session.graph().node_count(), count_before + 1);
        self.session
            .graph()
            .nodes()
            .last()
            .map(|(key, _)| key)
            .expect("node was just created")
    }

    fn connect(&mut self, source: NodeKey, target: NodeKey) {
        self.session
            .apply_intent(GraphIntent::Connect { source, target });
    }

    fn last_veto(&mut self) -> Option<LinkVeto> {
        self.session
            .take_feedback()
            .into_iter()
            .rev()
            .find_map(|feedback| match feedback {
                SessionFeedback::LinkRejected { veto, .. } => Some(veto),
                _ => None,
            })
    }

    fn graph(&self) -> &RoomGraph {
        self.session.graph()
    }
}

#[test]
fn smoke_version_is_set() {
    assert!(!roomgraph::VERSION.is_empty());
}

// Scenario: a fresh graph gets its entrance automatically, exactly once.
#[test]
fn first_node_of_an_empty_graph_brings_the_entrance() {
    let mut h = Harness::new();
    h.session.apply_intent(GraphIntent::CreateNodeAt {
        position: Point2D::new(540.0, 320.0),
    });

    assert_eq!(h.graph().node_count(), 2);
    let entrance = h.graph().entrance().expect("entrance created");
    assert_eq!(h.graph().parents(entrance).count(), 0);

    h.session.apply_intent(GraphIntent::CreateNodeAt {
        position: Point2D::new(100.0, 100.0),
    });
    assert_eq!(h.graph().node_count(), 3);
    assert_eq!(
        h.graph()
            .nodes()
            .filter(|(_, node)| node.kind.is_entrance())
            .count(),
        1
    );
}

// Scenario A: entrance to room is rejected (no alternation); entrance to
// corridor succeeds.
#[test]
fn entrance_links_to_corridors_not_rooms() {
    let mut h = Harness::new();
    let entrance = h.add(RoomKind::Entrance, 200.0, 200.0);
    let room = h.add(RoomKind::Room, 400.0, 200.0);
    let corridor = h.add(RoomKind::Corridor, 300.0, 200.0);

    h.connect(entrance, room);
    assert_eq!(h.last_veto(), Some(LinkVeto::NoAlternation));
    assert_eq!(h.graph().link_count(), 0);

    h.connect(entrance, corridor);
    assert_eq!(h.last_veto(), None);
    assert!(h.graph().has_link(entrance, corridor));
}

// Scenario B: the corridor child cap holds at the configured limit.
#[test]
fn corridor_children_stop_at_the_cap() {
    let mut h = Harness::with_corridor_cap(3);
    let entrance = h.add(RoomKind::Entrance, 200.0, 200.0);

    for i in 0..3 {
        let corridor = h.add(RoomKind::Corridor, 300.0 + 40.0 * i as f32, 200.0);
        h.connect(entrance, corridor);
        assert_eq!(h.last_veto(), None);
    }

    let fourth = h.add(RoomKind::Corridor, 460.0, 200.0);
    h.connect(entrance, fourth);
    assert_eq!(h.last_veto(), Some(LinkVeto::CorridorLimit));
    assert_eq!(h.graph().children(entrance).count(), 3);
}

// Scenario C: a second boss room cannot join the layout until the first
// one is deleted.
#[test]
fn boss_room_uniqueness_recovers_after_delete() {
    let mut h = Harness::new();
    let entrance = h.add(RoomKind::Entrance, 200.0, 200.0);
    let corridor_a = h.add(RoomKind::Corridor, 300.0, 180.0);
    let corridor_b = h.add(RoomKind::Corridor, 300.0, 220.0);
    let boss_a = h.add(RoomKind::BossRoom, 400.0, 180.0);
    let boss_b = h.add(RoomKind::BossRoom, 400.0, 220.0);

    h.connect(entrance, corridor_a);
    h.connect(entrance, corridor_b);
    h.connect(corridor_a, boss_a);
    assert_eq!(h.last_veto(), None);

    h.connect(corridor_b, boss_b);
    assert_eq!(h.last_veto(), Some(LinkVeto::BossRoomAlreadyLinked));

    h.session.apply_intent(GraphIntent::DeleteNodes {
        keys: vec![boss_a],
    });
    assert!(h.graph().node(boss_a).is_none());

    h.connect(corridor_b, boss_b);
    assert_eq!(h.last_veto(), None);
    assert!(h.graph().has_link(corridor_b, boss_b));
}

// Scenario D: a node's single non-corridor child slot.
#[test]
fn one_room_child_per_corridor() {
    let mut h = Harness::new();
    let corridor = h.add(RoomKind::Corridor, 300.0, 200.0);
    let room = h.add(RoomKind::Room, 400.0, 200.0);
    let second_room = h.add(RoomKind::Room, 400.0, 260.0);

    h.connect(corridor, room);
    assert_eq!(h.last_veto(), None);

    h.connect(corridor, second_room);
    assert_eq!(h.last_veto(), Some(LinkVeto::RoomSlotTaken));
    assert_eq!(h.graph().children(corridor).count(), 1);
}

// A room with a corridor child refuses a second child of room class; the
// alternation rule front-runs the child-slot rule in diagnostics.
#[test]
fn room_with_corridor_child_rejects_a_room_child() {
    let mut h = Harness::new();
    let room = h.add(RoomKind::Room, 300.0, 200.0);
    let corridor = h.add(RoomKind::Corridor, 400.0, 200.0);
    let other_room = h.add(RoomKind::Room, 400.0, 260.0);

    h.connect(room, corridor);
    assert_eq!(h.last_veto(), None);

    h.connect(room, other_room);
    assert_eq!(h.last_veto(), Some(LinkVeto::NoAlternation));
    assert_eq!(h.graph().children(room).count(), 1);
}

// Scenario E: recategorizing across the corridor boundary severs child
// links while parent links survive. Driven at the store level — the
// session picker refuses nodes that still have a parent.
#[test]
fn recategorize_severs_children_keeps_parent() {
    let registry = KindRegistry::default();
    let mut graph = RoomGraph::new(registry);
    let entrance = graph.create_node(Point2D::new(200.0, 200.0), RoomKind::Entrance);
    let corridor = graph.create_node(Point2D::new(300.0, 200.0), RoomKind::Corridor);
    let room = graph.create_node(Point2D::new(400.0, 180.0), RoomKind::Room);
    graph.connect(entrance, corridor).unwrap();
    graph.connect(corridor, room).unwrap();

    graph.recategorize(corridor, RoomKind::Room).unwrap();

    assert_eq!(graph.children(corridor).count(), 0);
    assert_eq!(graph.parents(room).count(), 0);
    assert!(graph.has_link(entrance, corridor));
}

// Selection-driven batch link removal: only fully-selected pairs sever.
#[test]
fn delete_selected_links_is_pairwise() {
    let mut h = Harness::new();
    let entrance = h.add(RoomKind::Entrance, 200.0, 200.0);
    let corridor_a = h.add(RoomKind::Corridor, 300.0, 180.0);
    let corridor_b = h.add(RoomKind::Corridor, 300.0, 220.0);
    h.connect(entrance, corridor_a);
    h.connect(entrance, corridor_b);

    h.session.apply_intents([
        GraphIntent::SetSelected {
            key: entrance,
            selected: true,
        },
        GraphIntent::SetSelected {
            key: corridor_a,
            selected: true,
        },
        GraphIntent::DeleteSelectedLinks,
    ]);

    assert!(!h.graph().has_link(entrance, corridor_a));
    assert!(h.graph().has_link(entrance, corridor_b));
    assert!(h.graph().selected_nodes().is_empty());
}

// Disconnect is idempotent through the intent boundary too.
#[test]
fn disconnect_twice_equals_once() {
    let mut h = Harness::new();
    let entrance = h.add(RoomKind::Entrance, 200.0, 200.0);
    let corridor = h.add(RoomKind::Corridor, 300.0, 200.0);
    h.connect(entrance, corridor);

    h.session.apply_intent(GraphIntent::Disconnect {
        source: entrance,
        target: corridor,
    });
    let links_after_first: Vec<_> = h.graph().links().collect();

    h.session.apply_intent(GraphIntent::Disconnect {
        source: entrance,
        target: corridor,
    });
    let links_after_second: Vec<_> = h.graph().links().collect();

    assert_eq!(links_after_first, links_after_second);
    assert!(h.session.take_feedback().is_empty());
}

// A full authoring round-trip: build a small dungeon, snapshot it, and
// resume editing in a new session.
#[test]
fn snapshot_roundtrip_resumes_editing() {
    let mut h = Harness::new();
    let entrance = h.add(RoomKind::Entrance, 200.0, 200.0);
    let corridor = h.add(RoomKind::Corridor, 320.0, 200.0);
    let room = h.add(RoomKind::Room, 440.0, 200.0);
    h.connect(entrance, corridor);
    h.connect(corridor, room);
    assert_eq!(h.last_veto(), None);

    let snapshot = h.graph().to_snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let reloaded = serde_json::from_str(&json).unwrap();
    let restored = RoomGraph::from_snapshot(&reloaded, KindRegistry::default());

    let mut resumed = EditorSession::with_graph(restored);
    assert_eq!(resumed.graph().node_count(), 3);
    assert_eq!(resumed.graph().link_count(), 2);

    // The restored graph still enforces every rule.
    let restored_room = resumed
        .graph()
        .nodes()
        .find(|(_, node)| node.kind == RoomKind::Room)
        .map(|(key, _)| key)
        .unwrap();
    let new_corridor_pos = Point2D::new(560.0, 200.0);
    resumed.apply_intent(GraphIntent::CreateNode {
        position: new_corridor_pos,
        kind: RoomKind::Corridor,
    });
    let new_corridor = resumed
        .graph()
        .nodes()
        .last()
        .map(|(key, _)| key)
        .unwrap();
    resumed.apply_intent(GraphIntent::Connect {
        source: restored_room,
        target: new_corridor,
    });
    assert!(resumed.graph().has_link(restored_room, new_corridor));

    // The restored entrance still refuses deletion.
    let restored_entrance = resumed.graph().entrance().unwrap();
    resumed.apply_intent(GraphIntent::DeleteNodes {
        keys: vec![restored_entrance],
    });
    assert!(resumed.graph().node(restored_entrance).is_some());
}

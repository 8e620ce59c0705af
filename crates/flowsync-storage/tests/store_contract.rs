//! Behaviour every `FlowStore` backend must share.
//!
//! Each check is written once against `&mut dyn FlowStore` and run for both
//! the in-memory and the SQLite backend.

use serde_json::json;

use flowsync_core::{FlowContent, FlowEdge, FlowNode, Theme, UserId};
use flowsync_storage::{FlowStore, InMemoryStore, SqliteStore};

fn backends() -> Vec<(&'static str, Box<dyn FlowStore>)> {
    vec![
        ("memory", Box::new(InMemoryStore::new())),
        ("sqlite", Box::new(SqliteStore::in_memory().unwrap())),
    ]
}

fn two_nodes_one_edge() -> FlowContent {
    FlowContent::new(
        vec![
            FlowNode::new("n1").with_field("data", json!({ "label": "first" })),
            FlowNode::new("n2").with_field("position", json!({ "x": 5, "y": 7 })),
        ],
        vec![FlowEdge::new("n1", "n2").with_field("id", json!("e1-2"))],
        Theme::from("dark"),
    )
}

#[test]
fn save_then_load_round_trips_content_and_counts() {
    for (name, mut store) in backends() {
        let user = UserId::from("alice");
        store.put_document(&user, two_nodes_one_edge()).unwrap();

        let doc = store.get_document(&user).unwrap().expect(name);
        assert_eq!(doc.content(), two_nodes_one_edge(), "{name}");
        assert_eq!(doc.node_count, 2, "{name}");
        assert_eq!(doc.edge_count, 1, "{name}");
        assert_eq!(doc.theme.as_str(), "dark", "{name}");
    }
}

#[test]
fn unknown_user_loads_as_none() {
    for (name, store) in backends() {
        let loaded = store.get_document(&UserId::from("nobody")).unwrap();
        assert!(loaded.is_none(), "{name}");
    }
}

#[test]
fn delete_is_idempotent() {
    for (name, mut store) in backends() {
        let user = UserId::from("bob");
        store.put_document(&user, two_nodes_one_edge()).unwrap();
        assert!(store.delete_document(&user).unwrap(), "{name}");
        assert!(!store.delete_document(&user).unwrap(), "{name}");
        assert!(store.get_document(&user).unwrap().is_none(), "{name}");
    }
}

#[test]
fn remove_node_cascades_to_edges() {
    for (name, mut store) in backends() {
        let user = UserId::from("carol");
        store.put_document(&user, two_nodes_one_edge()).unwrap();

        let (doc, removal) = store.remove_node(&user, "n1").unwrap();
        assert_eq!(removal.nodes, 1, "{name}");
        assert_eq!(removal.edges, 1, "{name}");

        let stored = store.get_document(&user).unwrap().unwrap();
        assert_eq!(stored, doc, "{name}");
        let ids: Vec<&str> = stored.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n2"], "{name}");
        assert!(stored.edges.is_empty(), "{name}");
        assert_eq!(stored.node_count, 1, "{name}");
        assert_eq!(stored.edge_count, 0, "{name}");
    }
}

#[test]
fn node_edits_on_missing_document_fail_without_creating_it() {
    for (name, mut store) in backends() {
        let user = UserId::from("ghost");
        let err = store.append_node(&user, FlowNode::new("n")).unwrap_err();
        assert!(err.is_not_found(), "{name}: {err}");
        let err = store.remove_node(&user, "n").unwrap_err();
        assert!(err.is_not_found(), "{name}: {err}");
        assert!(store.get_document(&user).unwrap().is_none(), "{name}");
    }
}

#[test]
fn append_node_unions_and_recounts() {
    for (name, mut store) in backends() {
        let user = UserId::from("dave");
        store.put_document(&user, two_nodes_one_edge()).unwrap();

        let extra = FlowNode::new("n3").with_field("data", json!({ "created_at": "t" }));
        let (_, appended) = store.append_node(&user, extra.clone()).unwrap();
        assert!(appended, "{name}");
        let (doc, appended) = store.append_node(&user, extra.clone()).unwrap();
        assert!(!appended, "{name}");

        let stored = store.get_document(&user).unwrap().unwrap();
        assert_eq!(stored, doc, "{name}");
        assert_eq!(stored.nodes.len(), 3, "{name}");
        assert_eq!(stored.nodes.last(), Some(&extra), "{name}");
        assert_eq!(stored.node_count, 3, "{name}");
    }
}

#[test]
fn updated_at_is_non_decreasing_across_writes() {
    for (name, mut store) in backends() {
        let user = UserId::from("erin");
        let first = store.put_document(&user, two_nodes_one_edge()).unwrap();
        let (second, _) = store.append_node(&user, FlowNode::new("n9")).unwrap();
        let (third, _) = store.remove_node(&user, "n9").unwrap();
        let fourth = store.put_document(&user, FlowContent::default()).unwrap();

        assert!(second.updated_at >= first.updated_at, "{name}");
        assert!(third.updated_at >= second.updated_at, "{name}");
        assert!(fourth.updated_at >= third.updated_at, "{name}");
    }
}

#[test]
fn list_documents_summarizes_every_user() {
    for (name, mut store) in backends() {
        store
            .put_document(&UserId::from("u2"), FlowContent::default())
            .unwrap();
        store
            .put_document(&UserId::from("u1"), two_nodes_one_edge())
            .unwrap();

        let mut users = store.list_documents().unwrap();
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        assert_eq!(users.len(), 2, "{name}");
        assert_eq!(users[0].user_id.as_str(), "u1", "{name}");
        assert_eq!(users[0].node_count, 2, "{name}");
        assert_eq!(users[0].theme.as_str(), "dark", "{name}");
        assert_eq!(users[1].edge_count, 0, "{name}");
        assert_eq!(users[1].theme.as_str(), "light", "{name}");
    }
}

//! End-to-end create flow: line source -> parser -> creator -> HTTP client
//!
//! Runs against a local mockito server standing in for Checkvist.

use std::io::Cursor;

use checkvist::api::CheckvistClient;
use checkvist::config::{ApiConfig, Credentials};
use checkvist::creator::{CreationStep, HierarchyCreator};
use checkvist::parser::parse_lines;
use checkvist::source::LineSource;
use mockito::{Matcher, Server};
use serde_json::json;

const LIST: u64 = 7;

fn client(url: String) -> CheckvistClient {
    let config = ApiConfig {
        base_url: url,
        timeout_ms: 2_000,
        default_list: Some(LIST),
        ..Default::default()
    };
    let credentials = Credentials {
        username: "user@example.com".to_string(),
        api_key: "secret".to_string(),
    };
    CheckvistClient::new(&config, credentials).expect("client should build")
}

fn task_body(id: u64, parent_id: u64, position: u32, content: &str) -> String {
    json!({
        "id": id,
        "parent_id": parent_id,
        "checklist_id": LIST,
        "position": position,
        "content": content,
    })
    .to_string()
}

#[tokio::test]
async fn test_piped_text_becomes_task_hierarchy() {
    let mut server = Server::new_async().await;
    let parent = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::Json(json!({ "content": "Buy groceries" })))
        .with_status(200)
        .with_body(task_body(500, 0, 1, "Buy groceries"))
        .expect(1)
        .create_async()
        .await;
    let carrots = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::Json(json!({ "content": "Carrots", "parent_id": 500, "position": 1 })))
        .with_status(200)
        .with_body(task_body(501, 500, 1, "Carrots"))
        .expect(1)
        .create_async()
        .await;
    let onions = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::Json(json!({ "content": "Onions", "parent_id": 500, "position": 2 })))
        .with_status(200)
        .with_body(task_body(502, 500, 2, "Onions"))
        .expect(1)
        .create_async()
        .await;
    let note = server
        .mock("POST", "/checklists/7/tasks/500/comments.json")
        .match_body(Matcher::Json(json!({ "comment": "From the market\n- organic if possible" })))
        .with_status(200)
        .with_body(r#"{"id": 9, "task_id": 500, "comment": "From the market\n- organic if possible"}"#)
        .expect(1)
        .create_async()
        .await;

    let input = "Buy groceries\n- Carrots\n- Onions\n\nFrom the market\n- organic if possible\n";
    let source = LineSource::from_reader(Cursor::new(input), &[]);
    let structure = parse_lines(source.into_lines().map(|l| l.text)).unwrap();

    let api = client(server.url());
    let created = HierarchyCreator::new(&api, LIST).create(&structure).await.unwrap();

    assert_eq!(created.parent.id, 500);
    assert_eq!(created.children.iter().map(|c| c.id).collect::<Vec<_>>(), vec![501, 502]);
    assert_eq!(created.note.map(|n| n.id), Some(9));

    parent.assert_async().await;
    carrots.assert_async().await;
    onions.assert_async().await;
    note.assert_async().await;
}

#[tokio::test]
async fn test_child_failure_stops_before_note() {
    let mut server = Server::new_async().await;
    let _parent = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::Json(json!({ "content": "Title" })))
        .with_status(200)
        .with_body(task_body(600, 0, 1, "Title"))
        .create_async()
        .await;
    let first = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::PartialJson(json!({ "content": "A" })))
        .with_status(200)
        .with_body(task_body(601, 600, 1, "A"))
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::PartialJson(json!({ "content": "B" })))
        .with_status(422)
        .with_body("Validation failed")
        .expect(1)
        .create_async()
        .await;
    let third = server
        .mock("POST", "/checklists/7/tasks.json")
        .match_body(Matcher::PartialJson(json!({ "content": "C" })))
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let note = server
        .mock("POST", "/checklists/7/tasks/600/comments.json")
        .expect(0)
        .create_async()
        .await;

    let structure = parse_lines(["Title", "- A", "- B", "- C", "", "never sent"]).unwrap();
    let api = client(server.url());
    let err = HierarchyCreator::new(&api, LIST).create(&structure).await.unwrap_err();

    assert_eq!(err.step(), CreationStep::Child { position: 2 });
    assert!(err.to_string().contains("422"));

    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
    note.assert_async().await;
}

#[tokio::test]
async fn test_parent_failure_sends_nothing_else() {
    let mut server = Server::new_async().await;
    let parent = server
        .mock("POST", "/checklists/7/tasks.json")
        .with_status(401)
        .with_body("Unauthenticated")
        .expect(1)
        .create_async()
        .await;

    let structure = parse_lines(["Title", "- A", "", "note"]).unwrap();
    let api = client(server.url());
    let err = HierarchyCreator::new(&api, LIST).create(&structure).await.unwrap_err();

    assert_eq!(err.step(), CreationStep::Parent);
    parent.assert_async().await;
}

#[tokio::test]
async fn test_note_goes_to_target_list_when_response_omits_checklist() {
    let mut server = Server::new_async().await;
    let _parent = server
        .mock("POST", "/checklists/7/tasks.json")
        .with_status(200)
        .with_body(r#"{"id": 700, "content": "Title"}"#)
        .create_async()
        .await;
    let note = server
        .mock("POST", "/checklists/7/tasks/700/comments.json")
        .match_body(Matcher::Json(json!({ "comment": "note" })))
        .with_status(200)
        .with_body(r#"{"id": 3, "task_id": 700, "comment": "note"}"#)
        .expect(1)
        .create_async()
        .await;

    let structure = parse_lines(["Title", "", "note"]).unwrap();
    let api = client(server.url());
    let created = HierarchyCreator::new(&api, LIST).create(&structure).await.unwrap();

    assert_eq!(created.parent.checklist_id, LIST);
    note.assert_async().await;
}

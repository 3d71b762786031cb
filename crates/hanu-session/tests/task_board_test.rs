mod common;

use common::{exchange, AgentCall, MockAgent, MockObjectStore};
use hanu_session::{SessionError, TaskBoard};
use hanu_types::{MediaKind, TaskMap, TaskStatus};
use serde_json::json;
use std::sync::atomic::Ordering;

fn board_with_task() -> TaskBoard {
    let mut tasks = TaskMap::new();
    tasks.insert(
        "t1".to_string(),
        serde_json::from_value(json!({
            "id": "t1",
            "type": "instagram_reel",
            "status": "completed",
            "args": {},
            "results": [{
                "id": "r1",
                "title": "Reel draft",
                "body": "First cut",
                "cta": "https://example.com/reel",
                "images_url": ["i0", "i1", "i2"],
                "videos_url": ["v0"],
                "documents_url": []
            }]
        }))
        .unwrap(),
    );

    let mut board = TaskBoard::new();
    board.replace_all("thread-1", tasks);
    board
}

#[test]
fn replace_all_adopts_the_mapping_and_clears_dirty() {
    let board = board_with_task();
    assert_eq!(board.tasks().len(), 1);
    assert!(!board.is_dirty());
    assert_eq!(board.thread_id(), Some("thread-1"));
}

#[test]
fn media_edit_at_one_index_leaves_everything_else_alone() {
    let mut board = board_with_task();

    board
        .set_media("t1", "r1", MediaKind::Images, 1, "edited")
        .unwrap();

    let result = &board.tasks()["t1"].results[0];
    assert_eq!(result.images_url, vec!["i0", "edited", "i2"]);
    assert_eq!(result.videos_url, vec!["v0"]);
    assert!(result.documents_url.is_empty());
    assert!(board.is_dirty());
}

#[test]
fn media_removal_shifts_later_entries_down() {
    let mut board = board_with_task();

    board
        .remove_media("t1", "r1", MediaKind::Images, 0)
        .unwrap();

    let result = &board.tasks()["t1"].results[0];
    assert_eq!(result.images_url, vec!["i1", "i2"]);
}

#[test]
fn media_edit_out_of_bounds_is_an_error() {
    let mut board = board_with_task();
    let err = board
        .set_media("t1", "r1", MediaKind::Documents, 0, "x")
        .unwrap_err();
    assert!(matches!(err, SessionError::MediaIndexOutOfBounds(0)));
}

#[test]
fn unknown_task_and_result_are_errors() {
    let mut board = board_with_task();
    assert!(matches!(
        board.set_status("nope", TaskStatus::Processing),
        Err(SessionError::UnknownTask(_))
    ));
    assert!(matches!(
        board.add_media("t1", "nope", MediaKind::Images, "u"),
        Err(SessionError::UnknownResult { .. })
    ));
}

#[tokio::test]
async fn save_pushes_the_edited_mapping_and_adopts_the_response() {
    let agent = MockAgent::new();
    let mut board = board_with_task();
    board.set_status("t1", TaskStatus::Processing).unwrap();

    // Backend acknowledges with its own authoritative copy.
    let mut server_tasks = board.tasks().clone();
    server_tasks.get_mut("t1").unwrap().task_type = "instagram_reel_v2".to_string();
    agent.push_ok(exchange(&[], server_tasks));

    board.save(&agent).await.unwrap();

    match &agent.calls()[0] {
        AgentCall::UpdateState { thread_id, tasks } => {
            assert_eq!(thread_id, "thread-1");
            let pushed = tasks.as_ref().unwrap();
            assert_eq!(pushed["t1"].status, TaskStatus::Processing);
        }
        other => panic!("unexpected call {:?}", other),
    }

    assert!(!board.is_dirty());
    assert_eq!(board.tasks()["t1"].task_type, "instagram_reel_v2");
}

#[tokio::test]
async fn failed_save_keeps_the_local_edits() {
    let agent = MockAgent::new();
    let mut board = board_with_task();
    board
        .edit_result("t1", "r1", Some("New title"), None, None)
        .unwrap();
    agent.push_err("503");

    let result = board.save(&agent).await;

    assert!(matches!(result, Err(SessionError::Agent(_))));
    assert!(board.is_dirty());
    assert_eq!(board.tasks()["t1"].results[0].title, "New title");
}

#[tokio::test]
async fn save_without_a_thread_is_rejected_locally() {
    let agent = MockAgent::new();
    let mut board = TaskBoard::new();

    let result = board.save(&agent).await;

    assert!(matches!(result, Err(SessionError::NoActiveThread)));
    assert!(agent.calls().is_empty());
}

#[tokio::test]
async fn refresh_fetches_without_pushing_edits() {
    let agent = MockAgent::new();
    let mut board = board_with_task();
    agent.push_ok(exchange(&[], TaskMap::new()));

    board.refresh(&agent).await.unwrap();

    assert_eq!(
        agent.calls(),
        vec![AgentCall::UpdateState {
            thread_id: "thread-1".to_string(),
            tasks: None,
        }]
    );
    assert!(board.tasks().is_empty());
}

#[tokio::test]
async fn attach_upload_appends_the_stored_url() {
    let store = MockObjectStore::new();
    let mut board = board_with_task();

    let url = board
        .attach_upload(
            &store,
            "t1",
            "r1",
            MediaKind::Documents,
            "brief.pdf",
            vec![1, 2, 3],
            "application/pdf",
        )
        .await
        .unwrap();

    assert!(url.ends_with(".pdf"));
    let result = &board.tasks()["t1"].results[0];
    assert_eq!(result.documents_url, vec![url]);
    assert!(board.is_dirty());
}

#[tokio::test]
async fn failed_upload_leaves_the_lists_untouched() {
    let store = MockObjectStore::new();
    store.fail.store(true, Ordering::SeqCst);
    let mut board = board_with_task();

    let result = board
        .attach_upload(
            &store,
            "t1",
            "r1",
            MediaKind::Images,
            "a.png",
            vec![],
            "image/png",
        )
        .await;

    assert!(matches!(result, Err(SessionError::Upload(_))));
    let task_result = &board.tasks()["t1"].results[0];
    assert_eq!(task_result.images_url, vec!["i0", "i1", "i2"]);
    assert!(!board.is_dirty());
}

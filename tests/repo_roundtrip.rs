mod support;

use support::sample_draft;
use taskdeck::error::Error;
use taskdeck::repo::{MemoryTaskRepository, TaskRepository};
use taskdeck::task::{parse_tags, TaskPatch};

#[tokio::test]
async fn create_then_list_preserves_every_field() {
    let repo = MemoryTaskRepository::new();
    let draft = sample_draft("Water plants");

    let id = repo.create_task(&draft).await.expect("create");
    let tasks = repo.list_tasks().await.expect("list");

    let stored = tasks.iter().find(|task| task.id == id).expect("stored");
    assert_eq!(stored.title, draft.title);
    assert_eq!(stored.description, draft.description);
    assert_eq!(stored.category, draft.category);
    assert_eq!(stored.tags, draft.tags);
    assert_eq!(stored.due_date, draft.due_date);
    assert_eq!(stored.completed, draft.completed);
    assert_eq!(stored.attachment_url, draft.attachment_url);
}

#[tokio::test]
async fn blank_tags_input_round_trips_as_empty_list() {
    let repo = MemoryTaskRepository::new();
    let mut draft = sample_draft("No tags");
    draft.tags = parse_tags("");

    let id = repo.create_task(&draft).await.expect("create");
    let tasks = repo.list_tasks().await.expect("list");
    let stored = tasks.iter().find(|task| task.id == id).expect("stored");
    assert!(stored.tags.is_empty());
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_store() {
    let repo = MemoryTaskRepository::new();
    let mut draft = sample_draft("x");
    draft.due_date = String::new();

    let err = repo.create_task(&draft).await.expect_err("validation");
    assert!(matches!(err, Error::MissingField("dueDate")));
    assert!(repo.list_tasks().await.expect("list").is_empty());
}

#[tokio::test]
async fn update_and_delete_report_unknown_ids() {
    let repo = MemoryTaskRepository::new();

    let err = repo
        .update_task("ghost", &TaskPatch::completed(true))
        .await
        .expect_err("unknown id");
    assert!(matches!(err, Error::NotFound(_)));

    let err = repo.delete_task("ghost").await.expect_err("unknown id");
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn generated_ids_are_unique() {
    let repo = MemoryTaskRepository::new();
    let first = repo
        .create_task(&sample_draft("one"))
        .await
        .expect("create");
    let second = repo
        .create_task(&sample_draft("two"))
        .await
        .expect("create");
    assert_ne!(first, second);
}

#[tokio::test]
async fn same_name_upload_overwrites_previous_blob() {
    let repo = MemoryTaskRepository::new();

    let first = repo
        .upload_attachment("report.pdf", b"v1".to_vec())
        .await
        .expect("upload");
    let second = repo
        .upload_attachment("report.pdf", b"v2".to_vec())
        .await
        .expect("upload");

    // Same path, so the second write wins.
    assert_eq!(first, second);
    assert_eq!(repo.blob("report.pdf"), Some(b"v2".to_vec()));
}

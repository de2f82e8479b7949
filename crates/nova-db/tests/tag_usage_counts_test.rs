//! Per-user tag listings: usage counts restricted to the caller's notes,
//! descending by count.

use nova_db::test_fixtures::{memory_db, seed_user};
use nova_db::{CreateNoteRequest, Database, NoteRepository, TagRepository};
use uuid::Uuid;

async fn note_with_tags(db: &Database, owner: Uuid, title: &str, tags: &[&str]) {
    db.notes
        .create(
            CreateNoteRequest {
                title: title.to_string(),
                content: "<p>body</p>".to_string(),
                tags: Some(tags.iter().map(|t| t.to_string()).collect()),
                ..Default::default()
            },
            owner,
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn counts_are_per_user_and_descending() {
    let db = memory_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    note_with_tags(&db, alice.id, "n1", &["rust", "notes"]).await;
    note_with_tags(&db, alice.id, "n2", &["rust"]).await;
    note_with_tags(&db, alice.id, "n3", &["rust", "notes", "misc"]).await;
    // Bob's usage must not leak into Alice's counts.
    note_with_tags(&db, bob.id, "b1", &["rust"]).await;

    let counts = db.tags.list_for_user(alice.id).await.unwrap();

    assert_eq!(counts.len(), 3);
    assert_eq!(counts[0].name, "rust");
    assert_eq!(counts[0].count, 3);
    assert_eq!(counts[1].name, "notes");
    assert_eq!(counts[1].count, 2);
    assert_eq!(counts[2].name, "misc");
    assert_eq!(counts[2].count, 1);
}

#[tokio::test]
async fn user_without_notes_sees_no_tags() {
    let db = memory_db().await;
    let alice = seed_user(&db, "alice").await;
    let ghost = seed_user(&db, "ghost").await;

    note_with_tags(&db, alice.id, "n1", &["rust"]).await;

    assert!(db.tags.list_for_user(ghost.id).await.unwrap().is_empty());
}

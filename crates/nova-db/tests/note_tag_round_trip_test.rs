//! Tag association round-trips: create with a tag set, fetch it back as a
//! set, replace destructively on update.

use std::collections::HashSet;

use nova_db::test_fixtures::{memory_db, seed_user};
use nova_db::{CreateNoteRequest, NoteRepository, TagRepository, UpdateNoteRequest};

fn tag_set(tags: &[String]) -> HashSet<String> {
    tags.iter().cloned().collect()
}

#[tokio::test]
async fn create_then_fetch_returns_tag_set() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let note = db
        .notes
        .create(
            CreateNoteRequest {
                title: "Sets".to_string(),
                content: "<p>tag round trip</p>".to_string(),
                tags: Some(vec!["a".to_string(), "b".to_string()]),
                ..Default::default()
            },
            user.id,
        )
        .await
        .unwrap();

    let fetched = db.notes.fetch(note.id, user.id).await.unwrap();
    assert_eq!(
        tag_set(&fetched.tags),
        HashSet::from(["a".to_string(), "b".to_string()])
    );
}

#[tokio::test]
async fn update_replaces_tags_destructively() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let note = db
        .notes
        .create(
            CreateNoteRequest {
                title: "Sets".to_string(),
                content: "<p>tag round trip</p>".to_string(),
                tags: Some(vec!["a".to_string(), "b".to_string()]),
                ..Default::default()
            },
            user.id,
        )
        .await
        .unwrap();

    db.notes
        .update(
            note.id,
            UpdateNoteRequest {
                title: "Sets".to_string(),
                content: "<p>tag round trip</p>".to_string(),
                tags: Some(vec!["b".to_string(), "c".to_string()]),
                ..Default::default()
            },
            user.id,
        )
        .await
        .unwrap();

    let fetched = db.notes.fetch(note.id, user.id).await.unwrap();
    // Old link "a" is gone; exactly {"b", "c"} remain.
    assert_eq!(
        tag_set(&fetched.tags),
        HashSet::from(["b".to_string(), "c".to_string()])
    );
}

#[tokio::test]
async fn update_without_tags_leaves_links_alone() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let note = db
        .notes
        .create(
            CreateNoteRequest {
                title: "Sets".to_string(),
                content: "<p>body</p>".to_string(),
                tags: Some(vec!["keep".to_string()]),
                ..Default::default()
            },
            user.id,
        )
        .await
        .unwrap();

    db.notes
        .update(
            note.id,
            UpdateNoteRequest {
                title: "Renamed".to_string(),
                content: "<p>body</p>".to_string(),
                tags: None,
                ..Default::default()
            },
            user.id,
        )
        .await
        .unwrap();

    let fetched = db.notes.fetch(note.id, user.id).await.unwrap();
    assert_eq!(fetched.title, "Renamed");
    assert_eq!(fetched.tags, vec!["keep".to_string()]);
}

#[tokio::test]
async fn duplicate_and_blank_tags_are_dropped() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let note = db
        .notes
        .create(
            CreateNoteRequest {
                title: "Dedup".to_string(),
                content: "<p>body</p>".to_string(),
                tags: Some(vec![
                    "rust".to_string(),
                    "rust".to_string(),
                    "  ".to_string(),
                ]),
                ..Default::default()
            },
            user.id,
        )
        .await
        .unwrap();

    let fetched = db.notes.fetch(note.id, user.id).await.unwrap();
    assert_eq!(fetched.tags, vec!["rust".to_string()]);
}

#[tokio::test]
async fn shared_tag_name_maps_to_one_row() {
    let db = memory_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    for user in [&alice, &bob] {
        db.notes
            .create(
                CreateNoteRequest {
                    title: "Shared".to_string(),
                    content: "<p>body</p>".to_string(),
                    tags: Some(vec!["common".to_string()]),
                    ..Default::default()
                },
                user.id,
            )
            .await
            .unwrap();
    }

    // Each user sees the tag once with their own count.
    let alice_tags = db.tags.list_for_user(alice.id).await.unwrap();
    assert_eq!(alice_tags.len(), 1);
    assert_eq!(alice_tags[0].name, "common");
    assert_eq!(alice_tags[0].count, 1);
}

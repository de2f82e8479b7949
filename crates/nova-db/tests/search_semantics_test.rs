//! Search semantics: case-insensitive substring over title/content/summary/
//! tag name, AND filtering across requested tags, newest-updated first.

use std::time::Duration;

use nova_db::test_fixtures::{memory_db, seed_user};
use nova_db::{CreateNoteRequest, Database, Note, NoteRepository};
use uuid::Uuid;

async fn make_note(
    db: &Database,
    owner: Uuid,
    title: &str,
    content: &str,
    summary: Option<&str>,
    tags: &[&str],
) -> Note {
    // Space creations out so updated_at ordering is deterministic.
    tokio::time::sleep(Duration::from_millis(5)).await;
    db.notes
        .create(
            CreateNoteRequest {
                title: title.to_string(),
                content: content.to_string(),
                summary: summary.map(String::from),
                tags: Some(tags.iter().map(|t| t.to_string()).collect()),
                ..Default::default()
            },
            owner,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn tag_filter_uses_and_semantics() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let both = make_note(&db, user.id, "Both", "<p>x</p>", None, &["t1", "t2"]).await;
    let _only_one = make_note(&db, user.id, "Only one", "<p>x</p>", None, &["t1"]).await;

    let hits = db
        .notes
        .search(None, &["t1".to_string(), "t2".to_string()], user.id)
        .await
        .unwrap();

    // The note carrying only t1 is excluded: AND, not OR.
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, both.id);
}

#[tokio::test]
async fn term_matches_title_content_summary_and_tag_name() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let in_title = make_note(&db, user.id, "Photosynthesis", "<p>x</p>", None, &[]).await;
    let in_content =
        make_note(&db, user.id, "Other", "<p>about photosynthesis</p>", None, &[]).await;
    let in_summary = make_note(
        &db,
        user.id,
        "Third",
        "<p>x</p>",
        Some("Covers photosynthesis."),
        &[],
    )
    .await;
    let in_tag = make_note(&db, user.id, "Fourth", "<p>x</p>", None, &["photosynthesis"]).await;
    let _miss = make_note(&db, user.id, "Unrelated", "<p>y</p>", None, &[]).await;

    let hits = db
        .notes
        .search(Some("PHOTOsynthesis"), &[], user.id)
        .await
        .unwrap();

    let ids: Vec<Uuid> = hits.iter().map(|n| n.id).collect();
    for expected in [in_title.id, in_content.id, in_summary.id, in_tag.id] {
        assert!(ids.contains(&expected), "missing {}", expected);
    }
    assert_eq!(hits.len(), 4);
}

#[tokio::test]
async fn results_are_newest_updated_first() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    let older = make_note(&db, user.id, "older match", "<p>x</p>", None, &[]).await;
    let newer = make_note(&db, user.id, "newer match", "<p>x</p>", None, &[]).await;

    let hits = db.notes.search(Some("match"), &[], user.id).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, newer.id);
    assert_eq!(hits[1].id, older.id);
}

#[tokio::test]
async fn search_is_scoped_to_the_caller() {
    let db = memory_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    make_note(&db, alice.id, "Secret plans", "<p>x</p>", None, &[]).await;

    let hits = db.notes.search(Some("secret"), &[], bob.id).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn like_wildcards_in_terms_are_literal() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    make_note(&db, user.id, "Progress", "<p>50% done</p>", None, &[]).await;
    make_note(&db, user.id, "Other", "<p>500 done</p>", None, &[]).await;

    let hits = db.notes.search(Some("50%"), &[], user.id).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Progress");
}

#[tokio::test]
async fn blank_term_and_no_tags_returns_everything() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice").await;

    make_note(&db, user.id, "One", "<p>x</p>", None, &[]).await;
    make_note(&db, user.id, "Two", "<p>y</p>", None, &[]).await;

    let hits = db.notes.search(Some("   "), &[], user.id).await.unwrap();
    assert_eq!(hits.len(), 2);
}

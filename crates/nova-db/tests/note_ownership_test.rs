//! Ownership boundary: another user's note always behaves as missing.

use nova_db::test_fixtures::{memory_db, seed_user};
use nova_db::{CreateNoteRequest, Error, NoteRepository, UpdateNoteRequest};

#[tokio::test]
async fn foreign_note_is_not_found_for_fetch_update_delete() {
    let db = memory_db().await;
    let owner = seed_user(&db, "owner").await;
    let intruder = seed_user(&db, "intruder").await;

    let note = db
        .notes
        .create(
            CreateNoteRequest {
                title: "Private".to_string(),
                content: "<p>secret</p>".to_string(),
                ..Default::default()
            },
            owner.id,
        )
        .await
        .unwrap();

    let fetch_err = db.notes.fetch(note.id, intruder.id).await.unwrap_err();
    assert!(matches!(fetch_err, Error::NotFound(_)), "{:?}", fetch_err);

    let update_err = db
        .notes
        .update(
            note.id,
            UpdateNoteRequest {
                title: "Taken over".to_string(),
                content: "<p>mine now</p>".to_string(),
                ..Default::default()
            },
            intruder.id,
        )
        .await
        .unwrap_err();
    assert!(matches!(update_err, Error::NotFound(_)), "{:?}", update_err);

    let delete_err = db.notes.delete(note.id, intruder.id).await.unwrap_err();
    assert!(matches!(delete_err, Error::NotFound(_)), "{:?}", delete_err);

    // None of the attempts touched the owner's data.
    let intact = db.notes.fetch(note.id, owner.id).await.unwrap();
    assert_eq!(intact.title, "Private");
    assert_eq!(intact.content, "<p>secret</p>");
}

#[tokio::test]
async fn set_summary_enforces_ownership() {
    let db = memory_db().await;
    let owner = seed_user(&db, "owner").await;
    let intruder = seed_user(&db, "intruder").await;

    let note = db
        .notes
        .create(
            CreateNoteRequest {
                title: "Private".to_string(),
                content: "<p>secret</p>".to_string(),
                ..Default::default()
            },
            owner.id,
        )
        .await
        .unwrap();

    let err = db
        .notes
        .set_summary(note.id, "rewritten", intruder.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{:?}", err);
}

#[tokio::test]
async fn listing_only_returns_own_notes() {
    let db = memory_db().await;
    let alice = seed_user(&db, "alice").await;
    let bob = seed_user(&db, "bob").await;

    db.notes
        .create(
            CreateNoteRequest {
                title: "Alice note".to_string(),
                content: "<p>a</p>".to_string(),
                ..Default::default()
            },
            alice.id,
        )
        .await
        .unwrap();

    let bobs = db.notes.list(bob.id).await.unwrap();
    assert!(bobs.is_empty());
}

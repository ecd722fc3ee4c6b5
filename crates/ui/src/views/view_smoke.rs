use std::sync::Arc;

use services::{AppServices, Clock};
use storage::repository::{Storage, StorageError, StudySetRepository};
use study_core::model::{StudySet, StudySetId, UserId};
use study_core::time::fixed_now;

use super::test_harness::{ViewHarness, ViewKind, seed_fixture};

#[tokio::test(flavor = "current_thread")]
async fn home_view_lists_viewer_sets() {
    let fixture = seed_fixture("Spanish verbs", &[("hablar", "to speak")]).await;
    let mut harness = ViewHarness::new(fixture.services, Some(fixture.owner), ViewKind::Home);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Your study sets"), "missing heading in {html}");
    assert!(html.contains("Spanish verbs"), "missing set title in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_without_viewer_explains_itself() {
    let fixture = seed_fixture("Hidden", &[]).await;
    let mut harness = ViewHarness::new(fixture.services, None, ViewKind::Home);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No user selected"), "missing hint in {html}");
    assert!(!html.contains("Hidden"), "leaked set title in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_set_view_renders_terms_and_ownership() {
    let fixture = seed_fixture("Capitals", &[("France", "Paris"), ("Peru", "Lima")]).await;
    let id = fixture.set.id().to_string();
    let mut harness = ViewHarness::new(
        fixture.services,
        Some(fixture.owner),
        ViewKind::StudySet(id),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Capitals"), "missing title in {html}");
    assert!(html.contains("2 terms"), "missing count in {html}");
    assert!(html.contains("Paris"), "missing definition in {html}");
    assert!(html.contains("You own this set"), "missing owner badge in {html}");
    assert!(html.contains("Flashcards"), "missing mode link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_set_view_hides_ownership_from_visitors() {
    let fixture = seed_fixture("Shared", &[("a", "b")]).await;
    let id = fixture.set.id().to_string();
    let mut harness = ViewHarness::new(
        fixture.services,
        Some(UserId::generate()),
        ViewKind::StudySet(id),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Shared"), "missing title in {html}");
    assert!(!html.contains("You own this set"), "unexpected badge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_set_view_reports_missing_set() {
    let fixture = seed_fixture("Present", &[]).await;
    let mut harness = ViewHarness::new(
        fixture.services,
        None,
        ViewKind::StudySet(StudySetId::generate().to_string()),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("find that study set"), "missing not-found text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_shows_first_term() {
    let fixture = seed_fixture("Colors", &[("rojo", "red"), ("verde", "green")]).await;
    let id = fixture.set.id().to_string();
    let edit_href = format!("/study-sets/{id}/edit");
    let mut harness = ViewHarness::new(
        fixture.services,
        Some(fixture.owner),
        ViewKind::Flashcards(id),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Colors"), "missing title in {html}");
    assert!(html.contains("rojo"), "missing first term in {html}");
    assert!(html.contains("1 / 2"), "missing progress in {html}");
    assert!(html.contains("Previous"), "missing browse labels in {html}");
    assert!(html.contains("Edit"), "missing edit link for owner in {html}");
    assert!(html.contains(&edit_href), "edit link should open the editor in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_hides_edit_link_from_visitors() {
    let fixture = seed_fixture("Colors", &[("rojo", "red")]).await;
    let id = fixture.set.id().to_string();
    let edit_href = format!("/study-sets/{id}/edit");
    let mut harness = ViewHarness::new(fixture.services, None, ViewKind::Flashcards(id));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("rojo"), "missing first term in {html}");
    assert!(!html.contains(&edit_href), "visitor got an edit link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn edit_view_lets_owner_manage_terms() {
    let fixture = seed_fixture("Capitals", &[("France", "Paris"), ("Peru", "Lima")]).await;
    let id = fixture.set.id().to_string();
    let mut harness = ViewHarness::new(
        fixture.services,
        Some(fixture.owner),
        ViewKind::EditStudySet(id),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Edit Capitals"), "missing heading in {html}");
    assert!(html.contains("Lima"), "missing definition in {html}");
    assert_eq!(html.matches("Remove").count(), 2, "expected one remove per term in {html}");
    assert!(html.contains("Add term"), "missing add form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn edit_view_refuses_visitors() {
    let fixture = seed_fixture("Capitals", &[("France", "Paris")]).await;
    let id = fixture.set.id().to_string();
    let mut harness = ViewHarness::new(
        fixture.services,
        Some(UserId::generate()),
        ViewKind::EditStudySet(id),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Only the owner can edit"), "missing refusal in {html}");
    assert!(!html.contains("Add term"), "visitor got the add form in {html}");
    assert!(!html.contains("Paris"), "visitor got the term list in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_empty_set_shows_completion() {
    let fixture = seed_fixture("Empty", &[]).await;
    let id = fixture.set.id().to_string();
    let mut harness = ViewHarness::new(fixture.services, None, ViewKind::Flashcards(id));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("This set has no cards yet."), "missing headline in {html}");
    assert!(html.contains("Back to set"), "missing leave action in {html}");
    assert!(html.contains("Reset flashcards"), "missing restart action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_rejects_malformed_id() {
    let fixture = seed_fixture("Any", &[]).await;
    let mut harness = ViewHarness::new(
        fixture.services,
        None,
        ViewKind::Flashcards("not-a-set".to_string()),
    );
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("find that study set"), "missing not-found text in {html}");
}

struct FailingStudySets;

#[async_trait::async_trait]
impl StudySetRepository for FailingStudySets {
    async fn upsert_study_set(&self, _set: &StudySet) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_study_set(&self, _id: StudySetId) -> Result<Option<StudySet>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_study_sets(
        &self,
        _owner: UserId,
        _limit: u32,
    ) -> Result<Vec<StudySet>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn delete_study_set(&self, _id: StudySetId) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_renders_error_when_storage_fails() {
    let mut storage = Storage::in_memory();
    storage.study_sets = Arc::new(FailingStudySets);
    let services = AppServices::from_storage(&storage, Clock::fixed(fixed_now()));
    let mut harness = ViewHarness::new(services, Some(UserId::generate()), ViewKind::Home);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error text in {html}");
}

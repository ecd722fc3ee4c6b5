use dioxus::prelude::*;
use dioxus_router::Link;
use services::{FlashcardServiceError, StudySetServiceError};
use study_core::model::StudySetId;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudySetDetailVm, map_study_set_detail};

#[component]
pub fn StudySetView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let viewer = ctx.viewer();
    let study_sets = ctx.study_sets();
    let flashcards = ctx.flashcards();

    let resource = use_resource(move || {
        let study_sets = study_sets.clone();
        let flashcards = flashcards.clone();
        let id = id.clone();
        async move {
            let study_set_id: StudySetId = id.parse().map_err(|_| ViewError::NotFound)?;
            let set = study_sets.get(study_set_id).await.map_err(|err| match err {
                StudySetServiceError::NotFound => ViewError::NotFound,
                other => {
                    warn!(error = %other, "failed to load study set");
                    ViewError::Unknown
                }
            })?;
            let cards = flashcards
                .list(study_set_id)
                .await
                .map_err(|err: FlashcardServiceError| {
                    warn!(error = %err, "failed to load flashcards");
                    ViewError::Unknown
                })?;
            let editable = study_sets.can_edit(viewer, &set);
            Ok::<_, ViewError>(map_study_set_detail(&set, &cards, editable))
        }
    });

    let body = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! { p { class: "muted", "Loading…" } },
        ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
        ViewState::Ready(detail) => rsx! { StudySetDetail { detail } },
    };

    rsx! {
        div { class: "page study-set-page", {body} }
    }
}

#[component]
fn StudySetDetail(detail: StudySetDetailVm) -> Element {
    rsx! {
        header {
            h2 { "{detail.title}" }
            if let Some(description) = detail.description.as_ref() {
                p { class: "muted", "{description}" }
            }
            if detail.editable {
                p { class: "muted owner-badge",
                    "You own this set · "
                    Link { class: "edit-link", to: Route::EditStudySet { id: detail.id.clone() }, "Edit terms" }
                }
            }
        }
        nav { class: "study-modes",
            Link { to: Route::Flashcards { id: detail.id.clone() }, "Flashcards" }
        }
        h3 { "Terms in this set ({detail.term_count_label})" }
        ul { class: "term-list",
            for (index, row) in detail.terms.iter().enumerate() {
                li { key: "{index}",
                    span { class: "term", "{row.term}" }
                    span { class: "definition", "{row.definition}" }
                }
            }
        }
    }
}

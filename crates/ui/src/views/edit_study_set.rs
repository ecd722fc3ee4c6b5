use dioxus::prelude::*;
use dioxus_router::Link;
use services::{FlashcardServiceError, StudySetServiceError};
use study_core::model::{FlashcardId, StudySetId};
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudySetDetailVm, map_study_set_detail};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EditState {
    Idle,
    Saving,
    Error(&'static str),
}

fn edit_error_message(err: &FlashcardServiceError) -> &'static str {
    match err {
        FlashcardServiceError::Forbidden => "Only the owner can change this study set.",
        FlashcardServiceError::NotFound => "That term no longer exists.",
        FlashcardServiceError::StudySetNotFound => ViewError::NotFound.message(),
        _ => ViewError::Unknown.message(),
    }
}

/// Owner-only page for adding and removing terms.
#[component]
pub fn EditStudySetView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let viewer = ctx.viewer();
    let study_sets = ctx.study_sets();
    let flashcards = ctx.flashcards();

    let resource = {
        let flashcards = flashcards.clone();
        let id = id.clone();
        use_resource(move || {
            let study_sets = study_sets.clone();
            let flashcards = flashcards.clone();
            let id = id.clone();
            async move {
                let study_set_id: StudySetId = id.parse().map_err(|_| ViewError::NotFound)?;
                let set = study_sets.get(study_set_id).await.map_err(|err| match err {
                    StudySetServiceError::NotFound => ViewError::NotFound,
                    other => {
                        warn!(error = %other, "failed to load study set for editing");
                        ViewError::Unknown
                    }
                })?;
                if !study_sets.can_edit(viewer, &set) {
                    return Err(ViewError::Forbidden);
                }
                let cards = flashcards.list(study_set_id).await.map_err(|err| {
                    warn!(error = %err, "failed to load flashcards for editing");
                    ViewError::Unknown
                })?;
                Ok::<_, ViewError>(map_study_set_detail(&set, &cards, true))
            }
        })
    };

    let mut term = use_signal(String::new);
    let mut definition = use_signal(String::new);
    let mut edit_state = use_signal(|| EditState::Idle);

    let add_term = {
        let flashcards = flashcards.clone();
        let id = id.clone();
        use_callback(move |()| {
            let Some(actor) = viewer else {
                return;
            };
            let Ok(study_set_id) = id.parse::<StudySetId>() else {
                return;
            };
            let new_term = term.read().trim().to_string();
            let new_definition = definition.read().trim().to_string();
            if new_term.is_empty() || new_definition.is_empty() {
                edit_state.set(EditState::Error("Enter both a term and a definition."));
                return;
            }
            if edit_state() == EditState::Saving {
                return;
            }
            let flashcards = flashcards.clone();
            let mut resource = resource;
            let mut term = term;
            let mut definition = definition;
            let mut edit_state = edit_state;
            spawn(async move {
                edit_state.set(EditState::Saving);
                match flashcards
                    .create(actor, study_set_id, &new_term, &new_definition)
                    .await
                {
                    Ok(_) => {
                        term.set(String::new());
                        definition.set(String::new());
                        edit_state.set(EditState::Idle);
                        resource.restart();
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to add term");
                        edit_state.set(EditState::Error(edit_error_message(&err)));
                    }
                }
            });
        })
    };

    let remove_term = {
        let id = id.clone();
        use_callback(move |card_id: String| {
            let Some(actor) = viewer else {
                return;
            };
            let (Ok(study_set_id), Ok(card_id)) =
                (id.parse::<StudySetId>(), card_id.parse::<FlashcardId>())
            else {
                return;
            };
            let flashcards = flashcards.clone();
            let mut resource = resource;
            let mut edit_state = edit_state;
            spawn(async move {
                match flashcards.delete(actor, study_set_id, card_id).await {
                    Ok(()) => {
                        edit_state.set(EditState::Idle);
                        resource.restart();
                    }
                    Err(err) => {
                        warn!(error = %err, "failed to remove term");
                        edit_state.set(EditState::Error(edit_error_message(&err)));
                    }
                }
            });
        })
    };

    let body = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! { p { class: "muted", "Loading…" } },
        ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
        ViewState::Ready(detail) => rsx! {
            TermEditor {
                detail,
                term: term(),
                definition: definition(),
                saving: edit_state() == EditState::Saving,
                on_term: move |value| term.set(value),
                on_definition: move |value| definition.set(value),
                on_add: add_term,
                on_remove: remove_term,
            }
        },
    };

    let error = match edit_state() {
        EditState::Error(message) => Some(message),
        EditState::Idle | EditState::Saving => None,
    };

    rsx! {
        div { class: "page edit-study-set-page",
            header {
                Link { to: Route::StudySet { id: id.clone() }, "← Done" }
            }
            if let Some(message) = error {
                p { class: "error", "{message}" }
            }
            {body}
        }
    }
}

#[component]
fn TermEditor(
    detail: StudySetDetailVm,
    term: String,
    definition: String,
    saving: bool,
    on_term: EventHandler<String>,
    on_definition: EventHandler<String>,
    on_add: Callback<()>,
    on_remove: Callback<String>,
) -> Element {
    rsx! {
        h2 { "Edit {detail.title}" }
        h3 { "Terms ({detail.term_count_label})" }
        ul { class: "term-list editable",
            for row in detail.terms.iter().cloned() {
                li { key: "{row.id}",
                    span { class: "term", "{row.term}" }
                    span { class: "definition", "{row.definition}" }
                    button {
                        class: "remove-term",
                        onclick: {
                            let card_id = row.id.clone();
                            move |_| on_remove.call(card_id.clone())
                        },
                        "Remove"
                    }
                }
            }
        }
        div { class: "add-term",
            input {
                id: "new-term",
                placeholder: "Term",
                value: "{term}",
                oninput: move |evt| on_term.call(evt.value()),
            }
            input {
                id: "new-definition",
                placeholder: "Definition",
                value: "{definition}",
                oninput: move |evt| on_definition.call(evt.value()),
            }
            button {
                id: "add-term",
                disabled: saving,
                onclick: move |_| on_add.call(()),
                "Add term"
            }
        }
    }
}

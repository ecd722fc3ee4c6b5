use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::FlashcardsModeError;
use study_core::model::StudySetId;
use study_core::study::Swipe;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CompletionVm, FlashcardsIntent, FlashcardsOutcome, FlashcardsVm};

/// Keyboard shortcuts: arrows drive the session, space flips the card.
fn intent_for_key(key: &Key) -> Option<FlashcardsIntent> {
    match key {
        Key::ArrowLeft => Some(FlashcardsIntent::Swipe(Swipe::Left)),
        Key::ArrowRight => Some(FlashcardsIntent::Swipe(Swipe::Right)),
        Key::Character(value) if value == " " => Some(FlashcardsIntent::Flip),
        _ => None,
    }
}

#[component]
pub fn FlashcardsView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let viewer = ctx.viewer();
    let flashcards_mode = ctx.flashcards_mode();

    let vm = use_signal(|| None::<FlashcardsVm>);

    let resource = {
        let id = id.clone();
        use_resource(move || {
            let flashcards_mode = flashcards_mode.clone();
            let id = id.clone();
            let mut vm = vm;
            async move {
                let study_set_id: StudySetId = id.parse().map_err(|_| ViewError::NotFound)?;
                let game = flashcards_mode
                    .start(study_set_id, viewer)
                    .await
                    .map_err(|err| match err {
                        FlashcardsModeError::NotFound => ViewError::NotFound,
                        other => {
                            warn!(error = %other, "failed to start flashcards");
                            ViewError::Unknown
                        }
                    })?;
                vm.set(Some(FlashcardsVm::new(game)));
                Ok::<_, ViewError>(())
            }
        })
    };

    let dispatch = {
        let id = id.clone();
        use_callback(move |intent: FlashcardsIntent| {
            let mut vm = vm;
            let outcome = vm.write().as_mut().map(|vm| vm.apply(intent));
            match outcome {
                Some(FlashcardsOutcome::Leave) => {
                    navigator.push(Route::StudySet { id: id.clone() });
                }
                Some(FlashcardsOutcome::Ignored) => {
                    debug!(?intent, "flashcards input ignored");
                }
                Some(FlashcardsOutcome::Stay) | None => {}
            }
        })
    };

    let on_key = move |evt: KeyboardEvent| {
        if let Some(intent) = intent_for_key(&evt.data.key()) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    };

    let snapshot = vm.read().clone();
    let body = match (view_state_from_resource(&resource), snapshot) {
        (ViewState::Error(err), _) => rsx! { p { class: "error", "{err.message()}" } },
        (_, Some(game)) => match game.completion() {
            Some(completion) => rsx! {
                CompletionPanel { completion, on_intent: dispatch }
            },
            None => rsx! {
                GamePanel { game, on_intent: dispatch }
            },
        },
        _ => rsx! { p { class: "muted", "Loading…" } },
    };

    let title = vm
        .read()
        .as_ref()
        .map(|game| game.title().to_string())
        .unwrap_or_default();
    let editable = vm.read().as_ref().is_some_and(FlashcardsVm::editable);

    rsx! {
        div {
            class: "page flashcards-page",
            id: "flashcards-root",
            tabindex: "0",
            onkeydown: on_key,
            onmounted: move |evt: MountedEvent| async move {
                let _ = evt.set_focus(true).await;
            },
            header { class: "flashcards-header",
                Link { to: Route::StudySet { id: id.clone() }, "← Back" }
                h2 { "{title}" }
                if editable {
                    Link { class: "edit-link", to: Route::EditStudySet { id: id.clone() }, "Edit" }
                }
            }
            {body}
        }
    }
}

#[component]
fn GamePanel(game: FlashcardsVm, on_intent: Callback<FlashcardsIntent>) -> Element {
    let (left_label, right_label) = game.button_labels();
    let sorting = game.sorting_enabled();
    let (left_class, right_class) = if sorting { ("tough", "known") } else { ("", "") };
    let percent = game.progress_percent();
    let progress_label = game.progress_label();

    rsx! {
        div { class: "card-stage",
            onclick: move |_| on_intent.call(FlashcardsIntent::Flip),
            if let Some(face) = game.card_face() {
                div { key: "{face.key}", class: "{face.class}", "{face.text}" }
            }
        }
        div { class: "controls",
            button {
                id: "flashcards-left",
                class: "{left_class}",
                onclick: move |_| on_intent.call(FlashcardsIntent::Swipe(Swipe::Left)),
                "{left_label}"
            }
            span { class: "progress-label", "{progress_label}" }
            button {
                id: "flashcards-right",
                class: "{right_class}",
                onclick: move |_| on_intent.call(FlashcardsIntent::Swipe(Swipe::Right)),
                "{right_label}"
            }
        }
        div { class: "progress",
            div { class: "progress-bar", style: "width: {percent}%" }
        }
        div { class: "settings",
            button {
                id: "flashcards-sorting",
                onclick: move |_| on_intent.call(FlashcardsIntent::SetSorting(!sorting)),
                if sorting { "Sorting: on" } else { "Sorting: off" }
            }
            button {
                id: "flashcards-restart",
                onclick: move |_| on_intent.call(FlashcardsIntent::Restart),
                "Reset flashcards"
            }
        }
    }
}

#[component]
fn CompletionPanel(completion: CompletionVm, on_intent: Callback<FlashcardsIntent>) -> Element {
    let primary = completion.primary.follow_up;
    let secondary = completion.secondary.follow_up;
    let tally = completion.tally;

    rsx! {
        section { class: "completion",
            h3 { "{completion.headline}" }
            p { class: "muted", "Still learning: {tally.tough} · Total: {tally.total}" }
            div { class: "completion-actions",
                button {
                    id: "flashcards-complete-primary",
                    onclick: move |_| on_intent.call(FlashcardsIntent::FollowUp(primary)),
                    strong { "{completion.primary.title}" }
                    p { class: "muted", "{completion.primary.description}" }
                }
                button {
                    id: "flashcards-complete-secondary",
                    onclick: move |_| on_intent.call(FlashcardsIntent::FollowUp(secondary)),
                    strong { "{completion.secondary.title}" }
                    p { class: "muted", "{completion.secondary.description}" }
                }
            }
        }
    }
}

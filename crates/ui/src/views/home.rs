use dioxus::prelude::*;
use dioxus_router::Link;
use tracing::warn;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StudySetListItemVm, map_study_set_list};

const STUDY_SET_PAGE_SIZE: u32 = 100;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let viewer = ctx.viewer();
    let study_sets = ctx.study_sets();

    let resource = use_resource(move || {
        let study_sets = study_sets.clone();
        async move {
            let Some(owner) = viewer else {
                return Ok::<_, ViewError>(None);
            };
            let sets = study_sets
                .list_for_owner(owner, STUDY_SET_PAGE_SIZE)
                .await
                .map_err(|err| {
                    warn!(error = %err, "failed to list study sets");
                    ViewError::Unknown
                })?;
            Ok(Some(map_study_set_list(&sets)))
        }
    });

    let body = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! { p { class: "muted", "Loading…" } },
        ViewState::Error(err) => rsx! { p { class: "error", "{err.message()}" } },
        ViewState::Ready(None) => rsx! {
            p { class: "muted", "No user selected. Start the app with --viewer <id>, or run the seed command first." }
        },
        ViewState::Ready(Some(items)) if items.is_empty() => rsx! {
            p { class: "muted", "You don't have any study sets yet." }
        },
        ViewState::Ready(Some(items)) => rsx! { StudySetList { items } },
    };

    rsx! {
        div { class: "page home-page",
            h2 { "Your study sets" }
            {body}
        }
    }
}

#[component]
fn StudySetList(items: Vec<StudySetListItemVm>) -> Element {
    rsx! {
        ul { class: "set-list",
            for item in items {
                li { key: "{item.id}",
                    Link { to: Route::StudySet { id: item.id.clone() }, "{item.title}" }
                    if let Some(description) = item.description.as_ref() {
                        p { class: "muted", "{description}" }
                    }
                }
            }
        }
    }
}

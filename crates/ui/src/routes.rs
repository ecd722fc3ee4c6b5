use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{EditStudySetView, FlashcardsView, HomeView, StudySetView};

#[derive(Clone, Routable, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/study-sets/:id", StudySetView)] StudySet { id: String },
        #[route("/study-sets/:id/edit", EditStudySetView)] EditStudySet { id: String },
        #[route("/study-sets/:id/flashcards", FlashcardsView)] Flashcards { id: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Study" }
            ul {
                li { Link { to: Route::Home {}, "Your study sets" } }
            }
        }
    }
}

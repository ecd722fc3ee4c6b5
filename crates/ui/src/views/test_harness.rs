use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, Clock, FlashcardService, FlashcardsModeService, NewUser, StudySetService,
};
use study_core::model::{StudySet, UserId};
use study_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{EditStudySetView, FlashcardsView, HomeView, StudySetView};

#[derive(Clone)]
struct TestApp {
    viewer: Option<UserId>,
    services: AppServices,
}

impl UiApp for TestApp {
    fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    fn study_sets(&self) -> Arc<StudySetService> {
        self.services.study_sets()
    }

    fn flashcards(&self) -> Arc<FlashcardService> {
        self.services.flashcards()
    }

    fn flashcards_mode(&self) -> Arc<FlashcardsModeService> {
        self.services.flashcards_mode()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    StudySet(String),
    EditStudySet(String),
    Flashcards(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::StudySet(id) => rsx! { StudySetView { id } },
        ViewKind::EditStudySet(id) => rsx! { EditStudySetView { id } },
        ViewKind::Flashcards(id) => rsx! { FlashcardsView { id } },
    }
}

/// Seeded services plus the ids the smoke tests need.
pub struct Fixture {
    pub services: AppServices,
    pub owner: UserId,
    pub set: StudySet,
}

/// One owner with one study set holding the given cards, in order.
pub async fn seed_fixture(title: &str, cards: &[(&str, &str)]) -> Fixture {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()));
    let owner = services
        .users()
        .create(NewUser {
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).expect("date"),
            password: "password".to_string(),
        })
        .await
        .expect("create user");
    let set = services
        .study_sets()
        .create(owner.id, title.to_string(), None)
        .await
        .expect("create set");
    for (term, definition) in cards {
        services
            .flashcards()
            .create(owner.id, set.id(), term, definition)
            .await
            .expect("create card");
    }
    Fixture {
        services,
        owner: owner.id,
        set,
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn new(services: AppServices, viewer: Option<UserId>, view: ViewKind) -> Self {
        let app = Arc::new(TestApp { viewer, services });
        let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
        Self { dom }
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use journey_core::time::fixed_clock;
use services::JourneyService;
use storage::repository::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::journey::JourneyTestHandles;
use crate::views::{AchievementsView, JourneyPage};
use crate::vm::{JourneyIntent, JourneyVm};

#[derive(Clone)]
struct TestApp {
    journey: Arc<JourneyService>,
}

impl UiApp for TestApp {
    fn journey(&self) -> Arc<JourneyService> {
        Arc::clone(&self.journey)
    }

    fn api_label(&self) -> String {
        "in-memory".to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Journey,
    Achievements,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    journey_handles: Option<JourneyTestHandles>,
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
    use_context_provider(|| props.view);
    if let Some(handles) = props.journey_handles.clone() {
        use_context_provider(|| handles);
    }
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
        ViewKind::Journey => rsx! { JourneyPage {} },
        ViewKind::Achievements => rsx! { AchievementsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub journey: Arc<JourneyService>,
    pub journey_handles: Option<JourneyTestHandles>,
}

impl ViewHarness {
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

    /// Drive until pending tasks have had a chance to finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn dispatch(&mut self, intent: JourneyIntent) {
        let handles = self
            .journey_handles
            .clone()
            .expect("journey harness has handles");
        let dispatch = handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn vm(&self) -> Option<JourneyVm> {
        let handles = self.journey_handles.as_ref()?;
        let vm = handles.vm();
        self.dom.in_runtime(|| vm.read().clone())
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

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let storage = Storage::from_in_memory(repo.clone());
    setup_view_harness_with_storage(view, repo, &storage)
}

/// Harness over `storage`; `repo` stays available for seeding and inspection.
pub fn setup_view_harness_with_storage(
    view: ViewKind,
    repo: InMemoryRepository,
    storage: &Storage,
) -> ViewHarness {
    let journey = Arc::new(JourneyService::from_storage(fixed_clock(), storage));
    let journey_handles = match view {
        ViewKind::Journey => Some(JourneyTestHandles::default()),
        ViewKind::Achievements => None,
    };

    let app = Arc::new(TestApp {
        journey: Arc::clone(&journey),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            journey_handles: journey_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        repo,
        journey,
        journey_handles,
    }
}

mod notice;
mod reading;
mod setup;
mod survey;

use std::sync::Arc;

use dioxus::prelude::*;
use services::JourneyView;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{JourneyAction, JourneyIntent, JourneyVm, Notice};

pub use notice::NoticeBanner;
pub use reading::ReadingScreen;
pub use setup::{BadgeShelf, SetupScreen};
pub use survey::SurveyScreen;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn JourneyPage() -> Element {
    let ctx = use_context::<AppContext>();
    let journey = ctx.journey();

    let vm = use_signal(|| None::<JourneyVm>);
    let pending = use_signal(|| None::<JourneyAction>);
    let mut notice = use_signal(|| None::<Notice>);

    let journey_for_resource = Arc::clone(&journey);
    let resource = use_resource(move || {
        let journey = Arc::clone(&journey_for_resource);
        let mut vm = vm;
        async move {
            let loaded = JourneyVm::load(&journey).await.map_err(|err| {
                warn!(error = %err, "failed to load journey");
                ViewError::from(&err)
            })?;
            vm.set(Some(loaded));
            Ok::<_, ViewError>(())
        }
    });

    let dispatch = use_callback(move |intent: JourneyIntent| {
        let mut vm = vm;
        let mut pending = pending;
        let mut notice = notice;

        // The screen is frozen while a request is in flight.
        if pending.read().is_some() {
            return;
        }
        let action = match vm.write().as_mut() {
            Some(current) => current.apply(intent),
            None => None,
        };
        let Some(action) = action else {
            return;
        };
        let Some(mut local) = vm.read().clone() else {
            return;
        };

        let journey = Arc::clone(&journey);
        pending.set(Some(action));
        spawn(async move {
            let outcome = local.perform(&journey, action).await;
            vm.set(Some(local));
            notice.set(outcome);
            pending.set(None);
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<JourneyTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let current = vm.read().clone();
    let in_flight = pending();

    rsx! {
        div { class: "page journey-page",
            if let Some(active) = notice() {
                NoticeBanner {
                    notice: active,
                    on_dismiss: move |()| notice.set(None),
                }
            }
            match (state, current) {
                (ViewState::Idle, _) => rsx! {
                    p { "Idle" }
                },
                (ViewState::Loading, _) | (ViewState::Ready(()), None) => rsx! {
                    p { "Loading..." }
                },
                (ViewState::Error(err), _) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                (ViewState::Ready(()), Some(current)) => match current.view() {
                    JourneyView::Setup => rsx! {
                        SetupScreen {
                            vm: current.setup(in_flight == Some(JourneyAction::StartSession)),
                            dispatch,
                        }
                    },
                    JourneyView::CompletionSurvey => rsx! {
                        div { class: "page--narrow",
                            SurveyScreen {
                                vm: current.survey(in_flight == Some(JourneyAction::CompleteSession)),
                                dispatch,
                            }
                        }
                    },
                    JourneyView::Reading { .. } => rsx! {
                        ReadingScreen { vm: current.reading(in_flight.is_some()), dispatch }
                    },
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct JourneyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<JourneyIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<JourneyVm>>>>>,
}

#[cfg(test)]
impl JourneyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<JourneyIntent>, vm: Signal<Option<JourneyVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<JourneyIntent> {
        (*self.dispatch.borrow()).expect("journey dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<JourneyVm>> {
        (*self.vm.borrow()).expect("journey vm registered")
    }
}

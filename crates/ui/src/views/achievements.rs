use dioxus::prelude::*;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{BadgeVm, map_badges};

#[component]
pub fn AchievementsView() -> Element {
    let ctx = use_context::<AppContext>();
    let journey = ctx.journey();

    let resource = use_resource(move || {
        let journey = journey.clone();
        async move {
            let badges = journey
                .list_badges()
                .await
                .map_err(|err| {
                    warn!(error = %err, "failed to load badges");
                    ViewError::from(&err)
                })?;
            Ok::<_, ViewError>(map_badges(&badges))
        }
    });

    let state = view_state_from_resource(&resource);
    rsx! {
        div { class: "page achievements-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your Achievements" }
                p { class: "view-subtitle", "Badges earned by finishing a journey." }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
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
                ViewState::Ready(badges) if badges.is_empty() => rsx! {
                    p { class: "hint center", "No badges yet. Complete a journey to earn one." }
                },
                ViewState::Ready(badges) => {
                    let rows = badges.iter().map(|badge: &BadgeVm| {
                        let earned = badge
                            .earned_on
                            .as_ref()
                            .map(|date| format!("Earned {date}"));
                        rsx! {
                            li { key: "{badge.id}", class: "progress-item",
                                span { "★ {badge.label}" }
                                if let Some(earned) = earned {
                                    span { class: "hint", "{earned}" }
                                }
                            }
                        }
                    });
                    rsx! {
                        ul { class: "card", {rows} }
                    }
                }
            }
        }
    }
}

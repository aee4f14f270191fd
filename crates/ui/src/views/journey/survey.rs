use dioxus::prelude::*;

use crate::vm::{JourneyIntent, SurveyVm};

const STARS: [u8; 5] = [1, 2, 3, 4, 5];

#[component]
pub fn SurveyScreen(vm: SurveyVm, dispatch: Callback<JourneyIntent>) -> Element {
    let rating = vm.rating;
    let stars = STARS.iter().map(|&star| {
        let class = if rating >= star {
            "btn btn-star btn-star--on"
        } else {
            "btn btn-secondary btn-star"
        };
        rsx! {
            button {
                key: "{star}",
                class,
                r#type: "button",
                aria_label: "{star} stars",
                disabled: vm.submitting,
                onclick: move |_| dispatch.call(JourneyIntent::SetRating(star)),
                "★"
            }
        }
    });
    let submit_label = if vm.submitting {
        "Completing..."
    } else {
        "Complete Journey"
    };

    rsx! {
        section { class: "card",
            header { class: "center",
                h2 { class: "card-title", "🎉 Journey Complete!" }
                p { class: "card-description",
                    "You've experienced the entire Bible story. How was your experience?"
                }
            }
            label { "Rate Your Experience (1-5 stars)" }
            div { class: "actions", {stars} }
            label { r#for: "final-reflection", "Final Reflection" }
            textarea {
                id: "final-reflection",
                placeholder: "What was the most meaningful part of your journey? How has this experience impacted your faith?",
                value: "{vm.reflection}",
                disabled: vm.submitting,
                oninput: move |evt| dispatch.call(JourneyIntent::EditFinalReflection(evt.value())),
            }
            button {
                id: "journey-complete",
                class: "btn btn-primary",
                r#type: "button",
                disabled: !vm.can_submit,
                onclick: move |_| dispatch.call(JourneyIntent::CompleteSession),
                "{submit_label}"
            }
        }
    }
}

use dioxus::prelude::*;

use crate::vm::{BadgeVm, JourneyIntent, SessionTypeOptionVm, SetupVm};

#[component]
pub fn SetupScreen(vm: SetupVm, dispatch: Callback<JourneyIntent>) -> Element {
    let options = vm.options.iter().map(|option| {
        rsx! {
            SessionTypeCard { key: "{option.title}", option: option.clone(), dispatch }
        }
    });
    let start_label = if vm.starting {
        "Starting..."
    } else {
        "Begin Your Journey"
    };

    rsx! {
        header { class: "view-header",
            h1 { class: "view-title", "Bible in a Day" }
            p { class: "view-subtitle",
                "Experience the complete story of God's love through an accelerated journey"
            }
        }
        div { class: "option-grid", {options} }
        div { class: "center",
            button {
                id: "journey-begin",
                class: "btn btn-primary btn-large",
                r#type: "button",
                disabled: vm.starting,
                onclick: move |_| dispatch.call(JourneyIntent::StartSession),
                "{start_label}"
            }
        }
        if !vm.badges.is_empty() {
            BadgeShelf { badges: vm.badges.clone() }
        }
    }
}

#[component]
fn SessionTypeCard(option: SessionTypeOptionVm, dispatch: Callback<JourneyIntent>) -> Element {
    let session_type = option.session_type;
    let class = if option.selected {
        "card option-card option-card--selected"
    } else {
        "card option-card"
    };
    let highlights = option.highlights.iter().map(|item| {
        rsx! {
            li { key: "{item}", "• {item}" }
        }
    });

    rsx! {
        button {
            class,
            r#type: "button",
            aria_pressed: option.selected,
            onclick: move |_| dispatch.call(JourneyIntent::SelectSessionType(session_type)),
            h3 { class: "card-title", "{option.title}" }
            p { class: "card-description", "{option.description}" }
            ul { {highlights} }
        }
    }
}

#[component]
pub fn BadgeShelf(badges: Vec<BadgeVm>) -> Element {
    let pills = badges.iter().map(|badge| {
        rsx! {
            span { key: "{badge.id}", class: "badge-pill", "★ {badge.label}" }
        }
    });

    rsx! {
        section { class: "card",
            h3 { class: "card-title", "Your Achievements" }
            div { class: "badge-list", {pills} }
        }
    }
}

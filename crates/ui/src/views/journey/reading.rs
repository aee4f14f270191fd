use dioxus::prelude::*;

use crate::vm::{JourneyIntent, ProgressItemVm, ReadingVm};

#[component]
pub fn ReadingScreen(vm: ReadingVm, dispatch: Callback<JourneyIntent>) -> Element {
    let section = vm.section.clone();
    let percent = vm.percent;

    rsx! {
        header {
            div { class: "reading-header",
                h1 { "Bible in a Day Journey" }
                span { class: "badge-pill", "{vm.session_label}" }
            }
            div { class: "progress-meta",
                span { "{vm.progress_label}" }
                span { "{vm.percent_label}" }
            }
            div { class: "progress-bar",
                div { class: "progress-bar-fill", style: "width: {percent}%" }
            }
            if let Some(started) = vm.started_label.as_ref() {
                p { class: "hint", "{started}" }
            }
        }
        section { class: "card",
            h2 { class: "card-title", "{section.title}" }
            p { class: "card-description", "{section.description}" }
            div { class: "section-meta",
                span { "{section.minutes_label}" }
                span { "{section.verses_label}" }
            }
            if vm.is_reading {
                if let Some(since) = vm.reading_since_label.as_ref() {
                    p { class: "hint", "{since}" }
                }
                div { class: "section-body",
                    div { class: "section-content",
                        p { "{section.content}" }
                        p { class: "hint center",
                            "Continue reading the full section in your Bible or Bible app..."
                        }
                    }
                    h3 { "Reflection Question:" }
                    p { class: "hint", "{section.reflection_question}" }
                    textarea {
                        placeholder: "Share your thoughts and reflections...",
                        value: "{vm.reflection}",
                        disabled: vm.busy,
                        oninput: move |evt| dispatch.call(JourneyIntent::EditReflection(evt.value())),
                    }
                    div { class: "actions",
                        button {
                            id: "journey-complete-section",
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: !vm.can_complete,
                            onclick: move |_| dispatch.call(JourneyIntent::CompleteSection),
                            "Complete Section"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: vm.busy,
                            onclick: move |_| dispatch.call(JourneyIntent::Pause),
                            "Pause"
                        }
                    }
                }
            } else {
                div { class: "center",
                    button {
                        id: "journey-start-section",
                        class: "btn btn-primary btn-large",
                        r#type: "button",
                        disabled: vm.busy,
                        onclick: move |_| dispatch.call(JourneyIntent::StartSection),
                        "Start Reading"
                    }
                    p { class: "hint", "Take your time to read and reflect on this section" }
                }
            }
        }
        if !vm.records.is_empty() {
            ProgressList { records: vm.records.clone() }
        }
    }
}

#[component]
fn ProgressList(records: Vec<ProgressItemVm>) -> Element {
    let rows = records.iter().map(|record| {
        let class = if record.is_completed {
            "progress-item progress-item--done"
        } else {
            "progress-item"
        };
        rsx! {
            div { key: "{record.id}", class,
                span { "{record.section_name}" }
                if record.is_completed {
                    span { class: "badge-pill", "Complete" }
                }
            }
        }
    });

    rsx! {
        section { class: "card",
            h3 { class: "card-title", "Your Progress" }
            {rows}
        }
    }
}

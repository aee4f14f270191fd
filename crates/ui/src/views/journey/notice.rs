use dioxus::prelude::*;

use crate::vm::{Notice, NoticeTone};

#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: Callback<()>) -> Element {
    let class = match notice.tone {
        NoticeTone::Info => "notice notice--info",
        NoticeTone::Destructive => "notice notice--destructive",
    };

    rsx! {
        div { class, role: "status",
            div {
                p { class: "notice-title", "{notice.title}" }
                p { "{notice.description}" }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}

use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;

/// Window shell of the journey client: stylesheet, window title, and the
/// router. A panic while rendering a page lands in `JourneyCrashed` instead
/// of tearing the window down.
#[component]
pub fn App() -> Element {
    let api_label = use_context::<AppContext>().api_label().to_string();

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Bible in a Day" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: move |errors: ErrorContext| rsx! {
                    JourneyCrashed { details: format!("{errors:?}"), api_label: api_label.clone() }
                },
                Router::<Route> {}
            }
        }
    }
}

/// Progress is saved on the server after every step, so restarting the
/// client resumes the journey where it stopped.
#[component]
pub(crate) fn JourneyCrashed(details: String, api_label: String) -> Element {
    rsx! {
        div { class: "fatal",
            h1 { "Something went wrong" }
            p { "Your progress is saved on {api_label}. Restart the app to pick up where you left off." }
            pre { "{details}" }
        }
    }
}

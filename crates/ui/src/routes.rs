use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{AchievementsView, JourneyPage};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", JourneyPage)] Journey {},
        #[route("/achievements", AchievementsView)] Achievements {},
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
    let ctx = use_context::<AppContext>();
    let api_label = ctx.api_label().to_string();
    rsx! {
        nav { class: "sidebar",
            h1 { "Bible in a Day" }
            ul {
                li { Link { to: Route::Journey {}, "Journey" } }
                li { Link { to: Route::Achievements {}, "Achievements" } }
            }
            p { class: "sidebar-footer", "{api_label}" }
        }
    }
}

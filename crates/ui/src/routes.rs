use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ActivityView, LearningView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ActivityView)] Activity {},
        #[route("/learning", LearningView)] Learning {},
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
    rsx! {
        nav { class: "sidebar",
            h1 { "Progress" }
            ul {
                li { Link { to: Route::Activity {}, "Activity" } }
                li { Link { to: Route::Learning {}, "Learning" } }
            }
        }
    }
}

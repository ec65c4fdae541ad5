//! Navigation Header Component
//!
//! App title, links to the two editors, and the storage status.

use dioxus::prelude::*;

use crate::app::Route;
use crate::context::use_store;

/// Navigation location within the application
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum NavLocation {
    Cards,
    Tutorial,
}

impl NavLocation {
    /// Get the display name for this location
    pub fn display_name(&self) -> &'static str {
        match self {
            NavLocation::Cards => "Cards",
            NavLocation::Tutorial => "Tutorial",
        }
    }

    /// Get the route for this location
    pub fn route(&self) -> Route {
        match self {
            NavLocation::Cards => Route::Cards {},
            NavLocation::Tutorial => Route::Tutorial {},
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct NavHeaderProps {
    /// Current location in the app
    pub current: NavLocation,
}

#[component]
pub fn NavHeader(props: NavHeaderProps) -> Element {
    let store = use_store();
    let status = if store.is_available() {
        "saved locally"
    } else {
        "memory only"
    };

    rsx! {
        header { class: "nav-header",
            span { class: "nav-title", "cardforge" }

            nav { class: "nav-links",
                for location in [NavLocation::Cards, NavLocation::Tutorial] {
                    Link {
                        key: "{location.display_name()}",
                        to: location.route(),
                        class: if location == props.current { "nav-link nav-link--active" } else { "nav-link" },
                        "{location.display_name()}"
                    }
                }
            }

            span { class: "nav-status", "{status}" }
        }
    }
}

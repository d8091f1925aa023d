mod api;
mod components;
mod coords;
mod pages;
mod ports;
mod store;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/country/:name")]
    Country { name: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::explorer::Explorer {}
    }
}

#[component]
fn Country(name: String) -> Element {
    rsx! {
        pages::explorer::CountryFocus { name }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        ErrorBoundary {
            handle_error: |_errors: ErrorContext| rsx! {
                div { class: "load-error",
                    h2 { "The map could not be loaded" }
                    p { "Check your connection and reload the page." }
                }
            },
            Router::<Route> {}
        }
    }
}

fn main() {
    dioxus::logger::initialize_default();
    launch(App);
}

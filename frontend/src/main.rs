//! Facet views entry point

use zoon::*;

mod app;
mod facet_store;
mod placeholder_rows;
mod renderers;
mod views;

pub fn main() {
    let app = app::FacetsApp::new();
    start_app("app", move || app.root());
}

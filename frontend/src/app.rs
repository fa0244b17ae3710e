//! FacetsApp - facet tabs, one store per facet, active panel

use indexmap::IndexMap;
use shared::{FacetId, ViewConfig};
use std::cell::RefCell;
use std::rc::Rc;
use zoon::*;

use crate::facet_store::{FacetStore, simulate_load};
use crate::views::facet_panel;

const DEFAULT_CONFIG: &str = include_str!("../facets.toml");

#[derive(Clone)]
pub struct FacetsApp {
    config: ViewConfig,
    stores: Rc<IndexMap<FacetId, FacetStore>>,
    active_facet: Mutable<FacetId>,
    /// Running demo loads; replacing a handle cancels the previous load.
    loaders: Rc<RefCell<IndexMap<FacetId, TaskHandle>>>,
}

impl FacetsApp {
    pub fn new() -> Self {
        let config = ViewConfig::from_toml_str(DEFAULT_CONFIG).unwrap_or_else(|error| {
            zoon::eprintln!("Using default view config: {}", error);
            ViewConfig::default()
        });

        let stores = config
            .view
            .facets
            .iter()
            .map(|facet| (*facet, FacetStore::new(*facet)))
            .collect();

        let app = Self {
            active_facet: Mutable::new(config.view.active_facet),
            config,
            stores: Rc::new(stores),
            loaders: Rc::default(),
        };
        for facet in app.config.view.facets.clone() {
            app.reload(facet);
        }
        app
    }

    fn reload(&self, facet: FacetId) {
        let Some(store) = self.stores.get(&facet) else {
            zoon::eprintln!("No store for facet {}", facet);
            return;
        };
        let handle = Task::start_droppable(simulate_load(store.clone()));
        self.loaders.borrow_mut().insert(facet, handle);
    }

    pub fn root(&self) -> impl Element {
        Column::new()
            .s(Width::fill())
            .s(Height::fill())
            .s(Padding::all(16))
            .s(Gap::new().y(12))
            .item(self.tabs())
            .item(El::new().s(Width::fill()).child_signal(self.active_facet.signal().map({
                let app = self.clone();
                move |facet| {
                    app.stores
                        .get(&facet)
                        .cloned()
                        .map(|store| facet_panel(store, app.config.view.show_state_badge))
                }
            })))
    }

    fn tabs(&self) -> impl Element {
        Row::new()
            .s(Gap::new().x(8))
            .items(self.config.view.facets.iter().map(|facet| self.tab(*facet)))
            .item(
                Button::new()
                    .s(Padding::new().x(12).y(6))
                    .s(Font::new().size(13))
                    .label("Reload")
                    .on_press({
                        let app = self.clone();
                        move || app.reload(app.active_facet.get())
                    }),
            )
    }

    fn tab(&self, facet: FacetId) -> impl Element {
        let active_facet = self.active_facet.clone();
        Button::new()
            .s(Padding::new().x(12).y(6))
            .s(RoundedCorners::all(4))
            .s(Font::new().size(13))
            .s(Background::new().color_signal(active_facet.signal().map(move |active| {
                if active == facet {
                    "oklch(90% 0.05 250)"
                } else {
                    "oklch(97% 0.01 250)"
                }
            })))
            .label(facet.display_name())
            .on_press(move || active_facet.set_neq(facet))
    }
}

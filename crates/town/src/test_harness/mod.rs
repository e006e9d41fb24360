//! # TestTown: headless harness for integration tests and benches
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + [`TownPlugin`], so tests
//! drive the town through the same command queue the UI uses and then
//! inspect the resulting resources.

mod queries;
mod setup;

use bevy::app::App;
use bevy::prelude::*;

use crate::catalog::CatalogSource;
use crate::TownPlugin;

pub struct TestTown {
    app: App,
}

impl TestTown {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty town using the built-in catalog.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// An empty town using the given catalog document.
    pub fn with_catalog(json: &str) -> Self {
        Self::build(Some(CatalogSource(json.to_string())))
    }

    fn build(source: Option<CatalogSource>) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        // The source must be present before the plugin builds.
        if let Some(source) = source {
            app.insert_resource(source);
        }
        app.add_plugins(TownPlugin);
        app.update();
        Self { app }
    }
}

impl Default for TestTown {
    fn default() -> Self {
        Self::new()
    }
}

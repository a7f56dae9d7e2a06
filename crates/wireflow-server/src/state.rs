//! Shared application state for the websocket server.
//!
//! The only state shared between connections is the immutable catalog;
//! every connection builds its own [`CommandSession`] with a private graph,
//! so no cross-session locking is needed.
//!
//! [`CommandSession`]: crate::session::CommandSession

use std::sync::Arc;

use wireflow_core::Catalog;

/// Shared state handed to every connection handler.
#[derive(Clone)]
pub struct AppState {
    /// The catalog of constructible box types, built once at startup.
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        AppState {
            catalog: Arc::new(catalog),
        }
    }
}

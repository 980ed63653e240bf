//! Application state for Axum handlers.

use todo_list_core::service::ItemService;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; the service shares its collaborators behind `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Item operations
    pub items: ItemService,
}

impl AppState {
    /// Create state around an existing service.
    #[must_use]
    pub const fn new(items: ItemService) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Axum requires Clone state
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}

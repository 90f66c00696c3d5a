//! Worker-global application instance.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the module alive, so the [`App`] lives for the
//! whole page session; a reload starts a fresh one (touched flags included).

use std::cell::RefCell;

use crate::app::{App, Event, Reply};
use crate::prefs::MemoryStore;

thread_local! {
    static APP: RefCell<App<MemoryStore>> = RefCell::new(App::new(MemoryStore::default()));
}

/// Execute a closure with read access to the app.
pub fn with_app<F, R>(f: F) -> R
where
    F: FnOnce(&App) -> R,
{
    APP.with(|a| f(&a.borrow()))
}

/// Execute a closure with mutable access to the app.
pub fn with_app_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut App) -> R,
{
    APP.with(|a| f(&mut a.borrow_mut()))
}

/// Feed one event to the app.
pub fn dispatch(event: Event<'_>) -> Reply {
    with_app_mut(|app| app.handle(event))
}

/// Start over with a fresh app, as after a page reload.
pub fn reset_app() {
    APP.with(|a| {
        *a.borrow_mut() = App::new(MemoryStore::default());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::CATALOG_JSON;
    use crate::prefs::TierControl;

    #[test]
    fn state_persists_across_calls() {
        reset_app();
        dispatch(Event::CatalogLoaded(CATALOG_JSON));
        with_app(|app| assert_eq!(app.catalog().map(|c| c.len()), Some(3)));
        reset_app();
    }

    #[test]
    fn reset_clears_touched_flags() {
        reset_app();
        dispatch(Event::TierTouched(TierControl::Cpu));
        with_app(|app| assert!(app.touched().any()));
        reset_app();
        with_app(|app| assert!(!app.touched().any()));
    }
}

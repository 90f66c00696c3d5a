//! Game requirements checker — in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing, the same router engine
//! that powers Axum.
//!
//! The user enters their hardware, picks a game from the catalog, and learns
//! whether they meet its Minimum or Recommended requirements. The last
//! profile is remembered in localStorage and used to pre-fill the form.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod prefs;
pub mod profile;
pub mod routes;
pub mod state;
pub mod tiers;

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method (e.g., "GET", "POST")
/// * `path`   — URL path (e.g., "/api/requirements")
/// * `query`  — Query string (e.g., "?game=civ6")
/// * `body`   — Request body (form data or JSON). Empty string for GET requests.
///
/// # Returns
/// An HTML string fragment suitable for HTMX to swap into the DOM. The
/// prefill and prefs state routes return JSON instead.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/catalog/load", "catalog_load").ok();
    router.insert("/api/catalog/failed", "catalog_failed").ok();
    router.insert("/api/games", "games").ok();
    router.insert("/api/requirements", "requirements").ok();
    router.insert("/api/prefill", "prefill").ok();
    router.insert("/api/form/touched", "touched").ok();
    router.insert("/api/check", "check").ok();
    router.insert("/api/prefs/state", "prefs_state").ok();
    router.insert("/api/prefs/restore", "prefs_restore").ok();
    router.insert("/api/config", "config").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("games", "GET") => routes::catalog::handle_games_get(query),
            ("requirements", "GET") => routes::check::handle_requirements_get(query),
            ("prefill", "GET") => routes::check::handle_prefill_get(query),
            ("prefs_state", "GET") => routes::prefs::handle_state_get(query),

            ("catalog_load", "POST") => routes::catalog::handle_load_post(body),
            ("catalog_failed", "POST") => routes::catalog::handle_failed_post(body),
            ("touched", "POST") => routes::check::handle_touched_post(body),
            ("check", "POST") => routes::check::handle_check_post(body),
            ("prefs_restore", "POST") => routes::prefs::handle_restore_post(body),
            ("config", "POST") => routes::prefs::handle_config_post(body),

            _ => {
                tracing::debug!(method, path, "method not allowed");
                method_not_allowed()
            }
        },
        Err(_) => {
            tracing::debug!(path, "route not found");
            not_found()
        }
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::CATALOG_JSON;

    #[test]
    fn returns_404_for_unknown_route() {
        let html = handle_request("GET", "/api/nonexistent", "", "");
        assert!(html.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let html = handle_request("POST", "/api/games", "", "");
        assert!(html.contains("405"));
        let html = handle_request("GET", "/api/check", "", "");
        assert!(html.contains("405"));
    }

    #[test]
    fn full_session_flow() {
        state::reset_app();

        let options = handle_request("POST", "/api/catalog/load", "", CATALOG_JSON);
        assert_eq!(options.matches("<option").count(), 3);
        assert_eq!(handle_request("POST", "/api/prefs/restore", "", ""), "ok");

        let prefill = handle_request("GET", "/api/prefill", "?controls=cpu,gpu&initial=true", "");
        assert_eq!(
            prefill,
            r#"[{"field":"cpuTier","value":"Low"},{"field":"gpuTier","value":"Low"}]"#
        );

        let reqs = handle_request("GET", "/api/requirements", "?game=civ6", "");
        assert!(reqs.contains("Civilization VI"));

        let result = handle_request(
            "POST",
            "/api/check",
            "",
            "game=civ6&cpuTier=Mid&gpuTier=Low&ramGb=8&storageGb=50&hasSsd=no",
        );
        assert!(result.contains("Minimum met, Recommended not met"));
        assert!(result.contains(r#"data-dimension="CPU""#));
        assert!(result.contains(r#"data-dimension="GPU""#));

        let record = handle_request("GET", "/api/prefs/state", "", "");
        assert!(record.contains(r#""gpuTier":"Low""#));

        state::reset_app();
    }

    #[test]
    fn catalog_failure_flow() {
        state::reset_app();
        let html = handle_request("POST", "/api/catalog/failed", "", "");
        assert!(html.contains("could not be loaded"));
        assert!(handle_request("POST", "/api/check", "", "game=civ6&ramGb=8").is_empty());
        state::reset_app();
    }

    #[test]
    fn touched_route_freezes_prefill() {
        state::reset_app();
        handle_request("POST", "/api/catalog/load", "", CATALOG_JSON);
        assert_eq!(handle_request("POST", "/api/form/touched", "", "control=gpu"), "ok");
        let prefill = handle_request("GET", "/api/prefill", "?game=civ6", "");
        assert_eq!(prefill, "[]");
        state::reset_app();
    }
}

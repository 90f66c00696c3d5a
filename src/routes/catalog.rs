//! `/api/catalog/*` and `/api/games` routes — catalog hand-off from the
//! JavaScript loader and the game `<select>` options.

use crate::app::{App, CatalogStatus, Event, Reply};
use crate::routes::util::escape_html;
use crate::state;

/// Shown once when the catalog cannot be fetched or parsed.
pub const CATALOG_UNAVAILABLE: &str = "The game list could not be loaded. Please try again later.";

// ── POST /api/catalog/load ─────────────────────────────────────────

/// Handle POST /api/catalog/load
/// Body: the raw catalog JSON fetched by the loader.
/// Returns the `<option>` list, or the unavailable notice if the JSON is rejected.
pub fn handle_load_post(body: &str) -> String {
    match state::dispatch(Event::CatalogLoaded(body.trim())) {
        Reply::CatalogReady(_) => state::with_app(render_game_options),
        _ => render_unavailable(),
    }
}

// ── POST /api/catalog/failed ───────────────────────────────────────

/// Handle POST /api/catalog/failed
/// Called by the loader when the fetch itself fails. No retry follows.
pub fn handle_failed_post(_body: &str) -> String {
    state::dispatch(Event::CatalogFailed);
    render_unavailable()
}

// ── GET /api/games ─────────────────────────────────────────────────

/// Handle GET /api/games
/// Returns the options for the game selector; empty while the fetch is pending.
pub fn handle_games_get(_query: &str) -> String {
    state::with_app(|app| match app.catalog_status() {
        CatalogStatus::Ready(_) => render_game_options(app),
        CatalogStatus::Unavailable => render_unavailable(),
        CatalogStatus::Pending => String::new(),
    })
}

fn render_game_options(app: &App) -> String {
    let Some(catalog) = app.catalog() else {
        return String::new();
    };
    let selected = app.selected_game().map(|g| g.id.as_str());
    let mut html = String::with_capacity(catalog.len() * 64);
    for game in catalog.games() {
        let sel = if Some(game.id.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(&game.id),
            sel,
            escape_html(&game.name)
        ));
    }
    html
}

fn render_unavailable() -> String {
    format!(
        r#"<div class="text-red-600 font-semibold" role="alert">{}</div>"#,
        CATALOG_UNAVAILABLE
    )
}

//! Check form routes — requirement display, tier pre-fill, touched
//! notifications and the check submission itself.

use crate::app::{Check, Event, Reply};
use crate::catalog::{GameRequirement, summary};
use crate::evaluate::Outcome;
use crate::prefs::{Controls, TierControl};
use crate::profile::ProfileInput;
use crate::routes::prefs::render_persist_script;
use crate::routes::util::{error_span, escape_html, get_param, parse_form_body, parse_query};
use crate::state;

/// Out-of-band swap that empties the result panel.
const CLEAR_RESULT: &str = r#"<div id="result" hx-swap-oob="true"></div>"#;

// ── GET /api/requirements ──────────────────────────────────────────

/// Handle GET /api/requirements?game={id}
/// Selects the game and returns its Minimum/Recommended summary. The prior
/// result is always cleared, so a stale verdict is never shown next to a
/// different game.
pub fn handle_requirements_get(query: &str) -> String {
    let params = parse_query(query);
    let id = get_param(&params, "game").unwrap_or("");

    match state::dispatch(Event::GameSelected(id)) {
        Reply::GameShown(_) => state::with_app(|app| {
            let mut html = app
                .selected_game()
                .map(render_requirements)
                .unwrap_or_default();
            html.push_str(CLEAR_RESULT);
            html
        }),
        _ => CLEAR_RESULT.to_string(),
    }
}

fn render_requirements(game: &GameRequirement) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div class="space-y-1">"#);
    html.push_str(&format!(
        r#"<p class="text-lg font-bold">{}</p>"#,
        escape_html(&game.name)
    ));
    html.push_str(&format!(
        r#"<p><strong>Minimum:</strong> {}</p>"#,
        escape_html(&summary(&game.min))
    ));
    html.push_str(&format!(
        r#"<p><strong>Recommended:</strong> {}</p>"#,
        escape_html(&summary(&game.rec))
    ));
    if let Some(note) = game.note.as_deref().filter(|n| !n.is_empty()) {
        html.push_str(&format!(
            r#"<p class="text-xs text-slate-500">{}</p>"#,
            escape_html(note)
        ));
    }
    if !game.source_url.is_empty() {
        html.push_str(&format!(
            r#"<a class="text-xs underline" href="{}" target="_blank" rel="noopener">Source</a>"#,
            escape_html(&game.source_url)
        ));
    }
    html.push_str("</div>");
    html
}

// ── GET /api/prefill ───────────────────────────────────────────────

/// Handle GET /api/prefill?game={id}&controls=cpu,gpu&initial=true
/// Returns a JSON array of `{field, value}` instructions. The page applies
/// them programmatically, which never counts as a touch.
pub fn handle_prefill_get(query: &str) -> String {
    let params = parse_query(query);
    let game = get_param(&params, "game").filter(|g| !g.is_empty());
    let controls = get_param(&params, "controls")
        .map(Controls::parse)
        .unwrap_or_default();
    let initial = get_param(&params, "initial") == Some("true");

    let plan = state::with_app(|app| app.prefill(game, controls, initial));
    serde_json::to_string(&plan).unwrap_or_else(|_| "[]".to_string())
}

// ── POST /api/form/touched ─────────────────────────────────────────

/// Handle POST /api/form/touched
/// Body: control=cpu|gpu
/// The page calls this only from trusted user input events. This is the one
/// way a selector becomes touched.
pub fn handle_touched_post(body: &str) -> String {
    let params = parse_form_body(body);
    match get_param(&params, "control").and_then(TierControl::parse) {
        Some(control) => {
            state::dispatch(Event::TierTouched(control));
            "ok".to_string()
        }
        None => error_span("Missing or unknown control parameter"),
    }
}

// ── POST /api/check ────────────────────────────────────────────────

/// Handle POST /api/check
/// Body: game={id}&ramGb={n}&storageGb={n}&hasSsd=yes|no[&cpuTier=..][&gpuTier=..]
/// Returns the verdict HTML followed by a script persisting the profile.
/// An unknown or empty game yields an empty response.
pub fn handle_check_post(body: &str) -> String {
    let params = parse_form_body(body);
    let game_id = get_param(&params, "game").unwrap_or("");
    let input = ProfileInput {
        cpu_tier: get_param(&params, "cpuTier"),
        gpu_tier: get_param(&params, "gpuTier"),
        ram_gb: get_param(&params, "ramGb").unwrap_or(""),
        storage_gb: get_param(&params, "storageGb").unwrap_or(""),
        has_ssd: get_param(&params, "hasSsd").unwrap_or(""),
    };

    match state::dispatch(Event::Submitted { game_id, input }) {
        Reply::Checked(check) => state::with_app(|app| {
            let Some(game) = app.game(&check.game_id) else {
                return String::new();
            };
            let mut html = render_check(&check, game);
            html.push_str(&render_persist_script(app));
            html
        }),
        _ => String::new(),
    }
}

fn render_check(check: &Check, game: &GameRequirement) -> String {
    let (icon, class) = match check.outcome {
        Outcome::RecommendedMet => ("\u{2705}", "text-emerald-700"),
        Outcome::MinimumMet(_) => ("\u{26A0}\u{FE0F}", "text-amber-700"),
        Outcome::MinimumNotMet(_) => ("\u{274C}", "text-red-700"),
    };

    let mut html = String::with_capacity(1024);
    html.push_str(&format!(r#"<div class="{}">"#, class));
    html.push_str(&format!(
        "{} <strong>{}</strong> for <strong>{}</strong>",
        icon,
        check.outcome.headline(),
        escape_html(&game.name)
    ));

    let failures = check.outcome.failures();
    if failures.is_empty() {
        html.push('.');
    } else {
        html.push_str(":<ul class=\"list-disc ml-5\">");
        for unmet in failures {
            html.push_str(&format!(
                r#"<li data-dimension="{}">{}</li>"#,
                unmet.dimension.label(),
                escape_html(&unmet.message)
            ));
        }
        html.push_str("</ul>");
    }

    if let Some(note) = game.note.as_deref().filter(|n| !n.is_empty()) {
        html.push_str(&format!("<small>{}</small>", escape_html(note)));
    }
    html.push_str("</div>");
    html
}

//! `/api/prefs/*` and `/api/config` routes — saved-profile hand-off between
//! the worker and the page's localStorage, plus runtime configuration.

use crate::app::{App, Event, Reply};
use crate::routes::util::{error_span, get_param, parse_form_body};
use crate::state;

// ── GET /api/prefs/state ───────────────────────────────────────────

/// Handle GET /api/prefs/state
/// Returns the saved profile record as JSON, or `{}` when nothing was saved.
pub fn handle_state_get(_query: &str) -> String {
    state::with_app(|app| app.prefs().export().unwrap_or_else(|| "{}".to_string()))
}

// ── POST /api/prefs/restore ────────────────────────────────────────

/// Handle POST /api/prefs/restore
/// Body: the raw record read from localStorage (or `state={record}`).
/// Called once on page load, before the first pre-fill. A malformed record
/// is accepted here and ignored when read.
pub fn handle_restore_post(body: &str) -> String {
    let params = parse_form_body(body);
    let record = get_param(&params, "state").unwrap_or(body.trim());
    match state::dispatch(Event::PrefsRestored(record)) {
        Reply::Restored(Ok(())) => "ok".to_string(),
        Reply::Restored(Err(e)) => format!("error: {}", e),
        _ => "ok".to_string(),
    }
}

// ── POST /api/config ───────────────────────────────────────────────

/// Handle POST /api/config
/// Body: JSON object with any of `storage_key`, `default_cpu_tier`,
/// `default_gpu_tier`.
pub fn handle_config_post(body: &str) -> String {
    match state::dispatch(Event::Configured(body.trim())) {
        Reply::Configured(Ok(())) => "ok".to_string(),
        Reply::Configured(Err(e)) => error_span(&format!("Config rejected: {}", e)),
        _ => "ok".to_string(),
    }
}

/// Script tag that writes the saved profile to localStorage.
///
/// A full or blocked localStorage throws; the catch keeps that from reaching
/// the user.
pub fn render_persist_script(app: &App) -> String {
    let Some(record) = app.prefs().export() else {
        return String::new();
    };
    let key = js_string(&app.config().storage_key);
    let value = js_string(&record);
    format!(
        r#"<script>
(function() {{
  try {{
    localStorage.setItem({key}, {value});
  }} catch (e) {{
    console.log('[gamecheck] profile not saved', e);
  }}
}})();
</script>"#,
        key = key,
        value = value
    )
}

/// Encode `s` as a JavaScript string literal that is safe inside `<script>`.
fn js_string(s: &str) -> String {
    serde_json::to_string(s)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::CATALOG_JSON;
    use crate::routes::check::handle_check_post;
    use crate::tiers::CpuTier;

    fn reset_loaded() {
        state::reset_app();
        state::dispatch(Event::CatalogLoaded(CATALOG_JSON));
    }

    #[test]
    fn state_is_empty_before_first_check() {
        reset_loaded();
        assert_eq!(handle_state_get(""), "{}");
        state::reset_app();
    }

    #[test]
    fn state_roundtrip_through_restore() {
        reset_loaded();
        handle_check_post("game=civ6&cpuTier=Enthusiast&gpuTier=Low&ramGb=24&storageGb=300&hasSsd=yes");
        let record = handle_state_get("");
        assert!(record.contains(r#""cpuTier":"Enthusiast""#));

        // Page reload: fresh worker state, record comes back from localStorage.
        reset_loaded();
        assert_eq!(handle_restore_post(&record), "ok");
        state::with_app(|app| {
            let saved = app.prefs().load();
            assert_eq!(saved.cpu_tier, Some(CpuTier::Enthusiast));
            assert_eq!(saved.ram_gb, Some(24.0));
            assert_eq!(saved.storage_gb, Some(300.0));
            assert_eq!(saved.has_ssd, Some(true));
        });
        state::reset_app();
    }

    #[test]
    fn malformed_restore_is_ignored_on_read() {
        reset_loaded();
        assert_eq!(handle_restore_post("{{{"), "ok");
        state::with_app(|app| assert_eq!(app.prefs().load(), Default::default()));
        state::reset_app();
    }

    #[test]
    fn persist_script_uses_configured_key() {
        reset_loaded();
        assert_eq!(handle_config_post(r#"{"storage_key":"my_rig"}"#), "ok");
        let html = handle_check_post("game=civ6&ramGb=8&storageGb=20&hasSsd=no");
        assert!(html.contains(r#"localStorage.setItem("my_rig", "#));
        assert!(html.contains(r#"\"ramGb\":8"#));
        state::reset_app();
    }

    #[test]
    fn config_rejects_invalid_json() {
        reset_loaded();
        let html = handle_config_post("storage_key=x");
        assert!(html.contains("Config rejected"));
        state::reset_app();
    }

    #[test]
    fn js_string_escapes_script_close() {
        assert_eq!(js_string("</script>"), r#""<\/script>""#);
    }
}

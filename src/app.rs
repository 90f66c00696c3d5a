//! Application state — the single context that owns the catalog, the
//! preference store, the touched flags and the last check result.
//!
//! Every trigger from the page arrives as one [`Event`] and is handled to
//! completion before the next one. There is no other mutable state.

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, GameRequirement};
use crate::config::AppConfig;
use crate::error::{CatalogError, ConfigError, StoreError};
use crate::evaluate::{Outcome, classify};
use crate::prefs::{
    Controls, MemoryStore, Prefill, PreferenceStore, ProfileStore, TierControl, TouchedFlags,
    plan_field_prefill, plan_tier_prefill,
};
use crate::profile::{HardwareProfile, ProfileInput};

/// Where the session's catalog stands.
#[derive(Debug, Clone, Default)]
pub enum CatalogStatus {
    /// Fetch still in flight.
    #[default]
    Pending,
    Ready(Catalog),
    /// Fetch or parse failed. Terminal for the session: no retry.
    Unavailable,
}

/// The result of the most recent submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub game_id: String,
    pub profile: HardwareProfile,
    pub outcome: Outcome,
}

/// A discrete trigger from the page.
#[derive(Debug, Clone)]
pub enum Event<'a> {
    /// The loader fetched the catalog; body is the raw JSON.
    CatalogLoaded(&'a str),
    CatalogFailed,
    GameSelected(&'a str),
    /// Genuine user interaction with a tier selector. Programmatic pre-fill
    /// never produces this event.
    TierTouched(TierControl),
    Submitted {
        game_id: &'a str,
        input: ProfileInput<'a>,
    },
    /// Saved record read from localStorage at page load.
    PrefsRestored(&'a str),
    Configured(&'a str),
}

/// What handling an [`Event`] produced, for the presentation layer to render.
#[derive(Debug)]
pub enum Reply {
    CatalogReady(usize),
    CatalogRejected(CatalogError),
    CatalogUnavailable,
    /// Requirements for the newly selected game are ready; prior result cleared.
    GameShown(String),
    /// Selected id is not in the catalog (or no catalog). Nothing to show.
    NoGame,
    Touched(TierControl),
    Checked(Check),
    /// Submission for a missing game: skipped without effect.
    Skipped,
    Restored(Result<(), StoreError>),
    Configured(Result<(), ConfigError>),
}

#[derive(Debug, Default)]
pub struct App<S: ProfileStore = MemoryStore> {
    config: AppConfig,
    catalog: CatalogStatus,
    prefs: PreferenceStore<S>,
    touched: TouchedFlags,
    selected: Option<String>,
    last_check: Option<Check>,
}

impl<S: ProfileStore> App<S> {
    pub fn new(backend: S) -> Self {
        Self {
            config: AppConfig::default(),
            catalog: CatalogStatus::Pending,
            prefs: PreferenceStore::new(backend),
            touched: TouchedFlags::default(),
            selected: None,
            last_check: None,
        }
    }

    pub fn handle(&mut self, event: Event<'_>) -> Reply {
        match event {
            Event::CatalogLoaded(json) => match self.load_catalog(json) {
                Ok(count) => Reply::CatalogReady(count),
                Err(e) => Reply::CatalogRejected(e),
            },
            Event::CatalogFailed => {
                self.catalog_failed();
                Reply::CatalogUnavailable
            }
            Event::GameSelected(id) => {
                if self.select_game(id) {
                    Reply::GameShown(id.to_string())
                } else {
                    Reply::NoGame
                }
            }
            Event::TierTouched(control) => {
                self.touched.mark(control);
                Reply::Touched(control)
            }
            Event::Submitted { game_id, input } => match self.submit(game_id, input) {
                Some(check) => Reply::Checked(check),
                None => Reply::Skipped,
            },
            Event::PrefsRestored(record) => Reply::Restored(self.prefs.restore(record)),
            Event::Configured(json) => Reply::Configured(self.configure(json)),
        }
    }

    fn load_catalog(&mut self, json: &str) -> Result<usize, CatalogError> {
        match Catalog::from_json(json) {
            Ok(catalog) => {
                let count = catalog.len();
                if catalog.is_empty() {
                    warn!("catalog loaded but lists no games");
                } else {
                    info!(games = count, "catalog loaded");
                }
                self.selected = catalog.first().map(|g| g.id.clone());
                self.catalog = CatalogStatus::Ready(catalog);
                self.last_check = None;
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "catalog rejected");
                self.catalog = CatalogStatus::Unavailable;
                self.selected = None;
                Err(e)
            }
        }
    }

    fn catalog_failed(&mut self) {
        warn!("catalog fetch failed, checks disabled for this session");
        self.catalog = CatalogStatus::Unavailable;
        self.selected = None;
        self.last_check = None;
    }

    /// Switch games. Always clears the previous result so it cannot be read
    /// as belonging to the new game.
    fn select_game(&mut self, id: &str) -> bool {
        self.last_check = None;
        if self.game(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            self.selected = None;
            false
        }
    }

    fn submit(&mut self, game_id: &str, input: ProfileInput<'_>) -> Option<Check> {
        let game = self.game(game_id)?;
        let profile = input.into_profile(self.config.default_cpu_tier, self.config.default_gpu_tier);
        let outcome = classify(&profile, game);
        debug!(game = game_id, outcome = outcome.headline(), "check evaluated");

        if let Err(e) = self.prefs.save(&profile) {
            // Persistence is best-effort; the check result stands either way.
            debug!(error = %e, "profile not persisted");
        }

        let check = Check {
            game_id: game_id.to_string(),
            profile,
            outcome,
        };
        self.selected = Some(check.game_id.clone());
        self.last_check = Some(check.clone());
        Some(check)
    }

    fn configure(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = AppConfig::from_json(json)?;
        debug!(storage_key = %config.storage_key, "config updated");
        self.config = config;
        Ok(())
    }

    // ── Queries ────────────────────────────────────────────────────

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.catalog {
            CatalogStatus::Ready(c) => Some(c),
            _ => None,
        }
    }

    pub fn catalog_status(&self) -> &CatalogStatus {
        &self.catalog
    }

    pub fn game(&self, id: &str) -> Option<&GameRequirement> {
        self.catalog().and_then(|c| c.get(id))
    }

    pub fn selected_game(&self) -> Option<&GameRequirement> {
        self.selected.as_deref().and_then(|id| self.game(id))
    }

    pub fn last_check(&self) -> Option<&Check> {
        self.last_check.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn touched(&self) -> &TouchedFlags {
        &self.touched
    }

    pub fn prefs(&self) -> &PreferenceStore<S> {
        &self.prefs
    }

    /// Pre-fill instructions for the form.
    ///
    /// `game_id` picks the game whose Minimum tiers act as defaults; without
    /// it the selected game is used. `initial` adds the saved RAM, storage
    /// and SSD values, which are only applied once at page load.
    pub fn prefill(&self, game_id: Option<&str>, controls: Controls, initial: bool) -> Vec<Prefill> {
        let saved = self.prefs.load();
        let game = match game_id {
            Some(id) => self.game(id),
            None => self.selected_game(),
        };
        let mut plan = if initial {
            plan_field_prefill(&saved)
        } else {
            Vec::new()
        };
        plan.extend(plan_tier_prefill(&saved, &self.touched, controls, game));
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::CATALOG_JSON;
    use crate::evaluate::Dimension;
    use crate::prefs::FormField;
    use crate::tiers::{CpuTier, GpuTier};

    struct FailingStore;

    impl ProfileStore for FailingStore {
        fn read(&self) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("private mode".to_string()))
        }

        fn write(&mut self, _record: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected("quota exceeded".to_string()))
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new(MemoryStore::default());
        assert!(matches!(app.handle(Event::CatalogLoaded(CATALOG_JSON)), Reply::CatalogReady(3)));
        app
    }

    fn input<'a>(cpu: &'a str, gpu: &'a str, ram: &'a str) -> ProfileInput<'a> {
        ProfileInput {
            cpu_tier: Some(cpu),
            gpu_tier: Some(gpu),
            ram_gb: ram,
            storage_gb: "100",
            has_ssd: "yes",
        }
    }

    #[test]
    fn catalog_load_selects_first_game() {
        let app = loaded_app();
        assert_eq!(app.selected_game().map(|g| g.id.as_str()), Some("anno117"));
    }

    #[test]
    fn catalog_failure_leaves_app_inert() {
        let mut app = App::new(MemoryStore::default());
        assert!(matches!(app.handle(Event::CatalogFailed), Reply::CatalogUnavailable));
        assert!(app.catalog().is_none());
        let reply = app.handle(Event::Submitted {
            game_id: "anno117",
            input: input("High", "High", "32"),
        });
        assert!(matches!(reply, Reply::Skipped));
        assert!(app.last_check().is_none());
    }

    #[test]
    fn rejected_catalog_is_unavailable() {
        let mut app = App::new(MemoryStore::default());
        let reply = app.handle(Event::CatalogLoaded("{}"));
        assert!(matches!(reply, Reply::CatalogRejected(CatalogError::Json(_))));
        assert!(matches!(app.catalog_status(), CatalogStatus::Unavailable));
    }

    #[test]
    fn submit_for_unknown_game_is_skipped() {
        let mut app = loaded_app();
        let reply = app.handle(Event::Submitted {
            game_id: "nope",
            input: input("High", "High", "32"),
        });
        assert!(matches!(reply, Reply::Skipped));
        assert_eq!(app.prefs().load(), Default::default());
    }

    #[test]
    fn submit_classifies_and_saves() {
        let mut app = loaded_app();
        let reply = app.handle(Event::Submitted {
            game_id: "anno117",
            input: input("Mid", "Mid", "32"),
        });
        let Reply::Checked(check) = reply else {
            panic!("expected a check");
        };
        assert!(matches!(check.outcome, Outcome::MinimumMet(_)));
        let dims: Vec<Dimension> = check.outcome.failures().iter().map(|f| f.dimension).collect();
        assert_eq!(dims, vec![Dimension::Cpu, Dimension::Gpu]);

        let saved = app.prefs().load();
        assert_eq!(saved.cpu_tier, Some(CpuTier::Mid));
        assert_eq!(saved.ram_gb, Some(32.0));
    }

    #[test]
    fn selecting_a_game_clears_previous_result() {
        let mut app = loaded_app();
        app.handle(Event::Submitted {
            game_id: "anno117",
            input: input("High", "High", "32"),
        });
        assert!(app.last_check().is_some());
        assert!(matches!(app.handle(Event::GameSelected("civ6")), Reply::GameShown(_)));
        assert!(app.last_check().is_none());
        assert!(matches!(app.handle(Event::GameSelected("gone")), Reply::NoGame));
        assert!(app.selected_game().is_none());
    }

    #[test]
    fn missing_selectors_default_to_configured_tier() {
        let mut app = loaded_app();
        app.handle(Event::Configured(r#"{"default_cpu_tier":"High","default_gpu_tier":"High"}"#));
        let reply = app.handle(Event::Submitted {
            game_id: "anno117",
            input: ProfileInput {
                ram_gb: "32",
                storage_gb: "100",
                has_ssd: "yes",
                ..Default::default()
            },
        });
        let Reply::Checked(check) = reply else {
            panic!("expected a check");
        };
        assert_eq!(check.profile.cpu_tier, CpuTier::High);
        assert_eq!(check.outcome, Outcome::RecommendedMet);
    }

    #[test]
    fn store_failure_does_not_affect_evaluation() {
        let mut app = App::new(FailingStore);
        app.handle(Event::CatalogLoaded(CATALOG_JSON));
        let reply = app.handle(Event::Submitted {
            game_id: "civ6",
            input: input("High", "Mid", "8"),
        });
        let Reply::Checked(check) = reply else {
            panic!("expected a check");
        };
        assert_eq!(check.outcome, Outcome::RecommendedMet);

        let saved = app.prefs().load();
        assert_eq!(saved.cpu_tier, Some(CpuTier::High));
        assert_eq!(saved.gpu_tier, Some(GpuTier::Mid));
        assert_eq!(saved.ram_gb, Some(8.0));
    }

    #[test]
    fn game_change_prefills_minimum_until_touched() {
        let mut app = loaded_app();
        let plan = app.prefill(Some("civ6"), Controls::default(), false);
        assert_eq!(plan[0].field, FormField::CpuTier);
        assert_eq!(plan[0].value, "Mid");

        app.handle(Event::TierTouched(TierControl::Gpu));
        app.handle(Event::GameSelected("anno117"));
        assert!(app.prefill(None, Controls::default(), false).is_empty());
    }

    #[test]
    fn touched_selector_survives_saved_profile_on_game_change() {
        let mut app = loaded_app();
        app.handle(Event::PrefsRestored(r#"{"cpuTier":"Low"}"#));
        app.handle(Event::TierTouched(TierControl::Cpu));
        app.handle(Event::GameSelected("civ6"));
        assert!(app.prefill(None, Controls::default(), false).is_empty());
    }

    #[test]
    fn lowercase_catalog_tiers_are_recognized() {
        let mut app = App::new(MemoryStore::default());
        let json = r#"[{"id":"g","name":"G",
            "min":{"cpuTier":"high","ramGb":8,"storageGb":10,"ssdRequired":false},
            "rec":{"cpuTier":"high","ramGb":8,"storageGb":10,"ssdRequired":false}}]"#;
        app.handle(Event::CatalogLoaded(json));
        let reply = app.handle(Event::Submitted {
            game_id: "g",
            input: input("Enthusiast", "Enthusiast", "64"),
        });
        let Reply::Checked(check) = reply else {
            panic!("expected a check");
        };
        assert_eq!(check.outcome, Outcome::RecommendedMet);
    }

    #[test]
    fn saved_profile_drives_prefill_after_restore() {
        let mut app = loaded_app();
        let reply = app.handle(Event::PrefsRestored(r#"{"cpuTier":"High","ramGb":16,"hasSsd":false}"#));
        assert!(matches!(reply, Reply::Restored(Ok(()))));
        let plan = app.prefill(None, Controls::default(), true);
        let fields: Vec<(FormField, &str)> =
            plan.iter().map(|p| (p.field, p.value.as_str())).collect();
        assert_eq!(
            fields,
            vec![
                (FormField::RamGb, "16"),
                (FormField::HasSsd, "no"),
                (FormField::CpuTier, "High"),
            ]
        );
    }

    #[test]
    fn bad_config_keeps_previous() {
        let mut app = loaded_app();
        let reply = app.handle(Event::Configured("nope"));
        assert!(matches!(reply, Reply::Configured(Err(_))));
        assert_eq!(app.config(), &AppConfig::default());
    }
}

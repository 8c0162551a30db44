//! The orchestrator — field changes in, regeneration fan-out.

use crate::{AppContext, EngineConfig};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tagsmith_bus::EventBus;
use tagsmith_preview::Preview;
use tagsmith_schema::{validate_field, FieldDescriptor, ValidationResult};
use tagsmith_state::{StateManager, WILDCARD};
use tagsmith_store::{export_form, import_form, Storage, StoreResult};
use tagsmith_tags::{compute_stats, generate, TagStats};
use tagsmith_types::{FieldValue, FormData};
use tracing::{debug, info, warn};

/// Event names published by the orchestrator.
pub mod events {
    /// One field was edited; payload carries the value and its validity.
    pub const FIELD_CHANGED: &str = "field:changed";
    /// A state-store mutation was applied.
    pub const STATE_CHANGED: &str = "state:changed";
    /// Markup and stats were regenerated.
    pub const TAGS_GENERATED: &str = "tags:generated";
    /// One platform preview was refreshed.
    pub const PREVIEW_UPDATED: &str = "preview:updated";
    /// A draft snapshot was persisted.
    pub const FORM_AUTOSAVED: &str = "form:autosaved";
    /// The whole form was replaced by an import.
    pub const FORM_IMPORTED: &str = "form:imported";
}

/// Where an edit currently is in its lifecycle.
///
/// Exposed for introspection; because edits run to completion, observers
/// between calls always see [`EditPhase::Idle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Idle,
    Validating,
    Committing,
}

/// Everything produced by one field change.
#[derive(Debug, Clone)]
pub struct ChangeOutcome {
    pub field: String,
    pub validation: ValidationResult,
    pub markup: String,
    pub stats: TagStats,
    pub previews: Vec<Preview>,
}

/// The stateful coordinator. Owns the field-value map; every mutation goes
/// through [`Orchestrator::handle_field_change`].
pub struct Orchestrator<S: Storage> {
    bus: Arc<EventBus>,
    state: StateManager,
    descriptors: Vec<FieldDescriptor>,
    form: FormData,
    store: S,
    config: EngineConfig,
    phase: EditPhase,
    last_autosave: Option<Instant>,
}

impl<S: Storage> Orchestrator<S> {
    /// Wires an orchestrator from a context and a storage collaborator.
    pub fn new(ctx: AppContext, store: S) -> Self {
        let mut state = StateManager::new();

        // Bridge state-store notifications onto the bus so collaborators can
        // watch `state:changed` without holding the store.
        let bus = Arc::clone(&ctx.bus);
        state.subscribe(WILDCARD, move |entry| {
            bus.publish(
                events::STATE_CHANGED,
                json!({
                    "key": entry.key,
                    "op": entry.op,
                    "new": entry.new,
                }),
            );
        });

        Self {
            bus: ctx.bus,
            state,
            descriptors: ctx.descriptors,
            form: FormData::new(),
            store,
            config: ctx.config,
            phase: EditPhase::Idle,
            last_autosave: None,
        }
    }

    /// The shared event bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// Read-only view of the owned field-value map.
    #[must_use]
    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// The current edit phase.
    #[must_use]
    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    /// The descriptor for a field, if the configuration defines one.
    #[must_use]
    pub fn descriptor(&self, field: &str) -> Option<&FieldDescriptor> {
        self.descriptors.iter().find(|d| d.name == field)
    }

    // ── The single field-change entry point ──────────────────────

    /// Processes one edit: validate, commit, regenerate, publish.
    ///
    /// The value is committed even when invalid; the verdict rides along in
    /// the `field:changed` payload. Fields without a descriptor, and fields
    /// currently hidden by their visibility condition, commit without
    /// validation.
    pub fn handle_field_change(&mut self, field: &str, value: FieldValue) -> ChangeOutcome {
        self.phase = EditPhase::Validating;
        let validation = match self.descriptor(field) {
            Some(descriptor) if descriptor.is_visible(&self.form) => {
                validate_field(descriptor, &value)
            }
            _ => ValidationResult::ok(),
        };
        if !validation.valid {
            debug!(
                "field `{field}` invalid: {}",
                validation.message.as_deref().unwrap_or("")
            );
        }

        self.phase = EditPhase::Committing;
        let json_value = serde_json::to_value(&value).unwrap_or(serde_json::Value::Null);
        self.state.set(&format!("form.{field}"), json_value.clone());
        self.form.set(field, value);

        self.bus.publish(
            events::FIELD_CHANGED,
            json!({
                "field": field,
                "value": json_value,
                "valid": validation.valid,
                "message": validation.message,
            }),
        );

        let (markup, stats, previews) = self.regenerate();
        self.phase = EditPhase::Idle;

        ChangeOutcome {
            field: field.to_string(),
            validation,
            markup,
            stats,
            previews,
        }
    }

    /// Snapshot of the map with hidden conditional fields filtered out.
    ///
    /// Hidden fields keep their stored value; they are only excluded from
    /// validation and generation.
    #[must_use]
    pub fn visible_form(&self) -> FormData {
        self.form.filtered(|name| {
            self.descriptor(name)
                .is_none_or(|d| d.is_visible(&self.form))
        })
    }

    /// Regenerates markup, stats, and previews from the visible snapshot and
    /// publishes the results.
    fn regenerate(&mut self) -> (String, TagStats, Vec<Preview>) {
        let visible = self.visible_form();

        let markup = generate(&visible);
        let stats = compute_stats(&visible);
        self.bus.publish(
            events::TAGS_GENERATED,
            json!({
                "markup": markup,
                "tag_count": stats.tag_count,
                "seo_score": stats.seo_score,
                "character_count": stats.character_count,
            }),
        );

        let mut previews = Vec::with_capacity(self.config.preview_platforms.len());
        for platform in &self.config.preview_platforms {
            let preview = tagsmith_preview::generate(&visible, platform);
            self.bus.publish(
                events::PREVIEW_UPDATED,
                json!({
                    "platform": platform,
                    "preview": serde_json::to_value(&preview).unwrap_or(serde_json::Value::Null),
                }),
            );
            previews.push(preview);
        }

        (markup, stats, previews)
    }

    // ── Undo ─────────────────────────────────────────────────────

    /// Reverts the most recent state mutation and re-syncs the owned map.
    ///
    /// Returns false when there is nothing to undo.
    pub fn undo_last_change(&mut self) -> bool {
        if !self.state.undo() {
            return false;
        }
        self.form = self.form_from_state();
        self.regenerate();
        true
    }

    /// Rebuilds the field-value map from `form.*` state keys.
    fn form_from_state(&self) -> FormData {
        let mut form = FormData::new();
        for key in self.state.keys() {
            let Some(field) = key.strip_prefix("form.") else {
                continue;
            };
            if let Some(value) = self.state.get(key) {
                match serde_json::from_value::<FieldValue>(value.clone()) {
                    Ok(v) => {
                        form.set(field, v);
                    }
                    Err(err) => warn!("state key `{key}` holds a non-field value: {err}"),
                }
            }
        }
        form
    }

    // ── Autosave ─────────────────────────────────────────────────

    /// Persists a draft snapshot if the map is non-empty and the configured
    /// interval has elapsed. Returns whether a snapshot was saved.
    pub fn autosave_tick(&mut self) -> bool {
        let due = self
            .last_autosave
            .is_none_or(|last| last.elapsed() >= self.config.autosave_interval);
        if !due {
            return false;
        }
        self.force_autosave()
    }

    /// Persists a draft snapshot now (still a no-op on an empty map).
    ///
    /// A storage failure is logged and reported as false; the edit pipeline
    /// is unaffected.
    pub fn force_autosave(&mut self) -> bool {
        if self.form.is_empty() {
            return false;
        }
        let value = match serde_json::to_value(&self.form) {
            Ok(value) => value,
            Err(err) => {
                warn!("autosave serialization failed: {err}");
                return false;
            }
        };

        let key = self.config.autosave_key.clone();
        if !self.store.save(&key, value, None) {
            warn!("autosave to `{key}` failed");
            return false;
        }

        self.last_autosave = Some(Instant::now());
        self.bus
            .publish(events::FORM_AUTOSAVED, json!({ "key": key }));
        debug!("autosaved draft under `{key}`");
        true
    }

    /// Interval loop driving [`Orchestrator::force_autosave`]. Spawn it as a
    /// task; it runs until the orchestrator is dropped by every other owner.
    pub async fn run_autosave(this: Arc<tokio::sync::Mutex<Self>>)
    where
        S: 'static,
    {
        // interval() rejects a zero period; clamp so a zero config still
        // polls rather than panicking.
        let period = this
            .lock()
            .await
            .config
            .autosave_interval
            .max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick completes immediately; skip it so the first save
        // happens one full period after startup.
        interval.tick().await;
        loop {
            interval.tick().await;
            this.lock().await.force_autosave();
        }
    }

    /// Restores the last autosaved draft, replacing the owned map.
    pub fn restore_draft(&mut self) -> bool {
        let key = self.config.autosave_key.clone();
        let Some(value) = self.store.load(&key) else {
            return false;
        };
        match serde_json::from_value::<FormData>(value) {
            Ok(form) => {
                self.replace_form(form);
                info!("restored draft from `{key}`");
                true
            }
            Err(err) => {
                warn!("stored draft under `{key}` is unreadable: {err}");
                false
            }
        }
    }

    // ── Document import/export ───────────────────────────────────

    /// Serializes the current map as a downloadable document.
    pub fn export_document(&self) -> StoreResult<String> {
        export_form(&self.form)
    }

    /// Replaces the map from an imported document. All-or-nothing: a
    /// malformed document leaves the current state untouched.
    pub fn import_document(&mut self, json: &str) -> StoreResult<()> {
        let form = import_form(json)?;
        self.replace_form(form);
        self.bus.publish(events::FORM_IMPORTED, json!({}));
        Ok(())
    }

    /// Swaps in a whole new map, mirroring it into the state store as one
    /// batch, then regenerates.
    fn replace_form(&mut self, form: FormData) {
        let old_keys: Vec<String> = self
            .state
            .keys()
            .filter(|k| k.starts_with("form."))
            .map(str::to_string)
            .collect();

        let pairs: Vec<(String, serde_json::Value)> = form
            .iter()
            .map(|(name, value)| {
                (
                    format!("form.{name}"),
                    serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
                )
            })
            .collect();

        self.state.batch(|state| {
            for key in &old_keys {
                state.delete(key);
            }
            for (key, value) in pairs {
                state.set(&key, value);
            }
        });

        self.form = form;
        self.regenerate();
    }

    /// Direct access to the storage collaborator.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

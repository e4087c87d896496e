//! Lifecycle engine
//!
//! Every mutating operation follows the same sequence: check preconditions,
//! rewrite the document, update the active pointer, rebuild the registry.
//! A failed precondition returns before anything is written. The three
//! writes are independent; a crash between them leaves the pointer or
//! registry stale, and the next rebuild repairs the registry.

use crate::active::ActivePointer;
use crate::clock::{Clock, SystemClock};
use crate::config::SpecsmithConfig;
use crate::error::{SpecError, SpecResult};
use crate::layout::ProjectLayout;
use crate::registry::{Registry, RegistryEntry};
use crate::store::SpecStore;
use crate::transition::{
    rewrites, Created, Imported, Listing, Outcome, SpecStatusReport, SwitchOutcome, Transition,
};
use specsmith_doc::document::keys;
use specsmith_doc::{render_template, slugify, Metadata, Priority, SpecDocument, SpecStatus, SpecSummary};
use std::sync::Arc;

/// Spec lifecycle state machine bound to one project root
#[derive(Debug, Clone)]
pub struct Lifecycle {
    layout: ProjectLayout,
    store: SpecStore,
    active: ActivePointer,
    registry: Registry,
    config: SpecsmithConfig,
    clock: Arc<dyn Clock>,
}

impl Lifecycle {
    /// Engine with default config and the system clock
    #[must_use]
    pub fn new(layout: ProjectLayout) -> Self {
        Self {
            store: SpecStore::new(layout.clone()),
            active: ActivePointer::new(&layout),
            registry: Registry::new(&layout),
            config: SpecsmithConfig::default(),
            clock: Arc::new(SystemClock),
            layout,
        }
    }

    /// Engine with config loaded from `.specs/config.toml`
    ///
    /// # Errors
    /// Returns `SpecError::Config` or `SpecError::Io` if the file is unusable.
    pub fn open(layout: ProjectLayout) -> SpecResult<Self> {
        let config = SpecsmithConfig::load(&layout)?;
        Ok(Self::new(layout).with_config(config))
    }

    /// Replace the clock
    #[inline]
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the config
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: SpecsmithConfig) -> Self {
        self.config = config;
        self
    }

    /// Project layout
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Active config
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SpecsmithConfig {
        &self.config
    }

    /// Date source
    #[inline]
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Document storage
    #[inline]
    #[must_use]
    pub fn store(&self) -> &SpecStore {
        &self.store
    }

    /// Active pointer value
    ///
    /// # Errors
    /// Returns `SpecError::Io` if the pointer file cannot be read.
    pub fn active(&self) -> SpecResult<Option<String>> {
        self.active.get()
    }

    /// Explicit id, else the active pointer
    ///
    /// # Errors
    /// Returns `SpecError::NoActiveSpec` when neither is available.
    pub fn resolve(&self, id: Option<&str>) -> SpecResult<String> {
        match id {
            Some(id) => Ok(id.to_string()),
            None => self.active.get()?.ok_or(SpecError::NoActiveSpec),
        }
    }

    /// Create a spec from the template
    ///
    /// The new spec becomes active only if nothing else is.
    ///
    /// # Errors
    /// `NotInitialized` without `.specs/`, `InvalidOperation` when the title
    /// has no usable characters, `AlreadyExists` when the id is taken.
    pub fn create(&self, title: &str, priority: Option<Priority>) -> SpecResult<Created> {
        self.layout.ensure_initialized()?;

        let id = slugify(title);
        if id.is_empty() {
            return Err(SpecError::InvalidOperation(format!(
                "title '{title}' produces an empty id"
            )));
        }
        if self.store.dir_exists(&id) {
            return Err(SpecError::AlreadyExists { id });
        }

        let priority = priority.unwrap_or(self.config.default_priority);
        let content = render_template(&id, title, &self.clock.today_string(), priority)?;
        self.store.write(&id, &content)?;

        let previous = self.active.get()?;
        if previous.is_none() {
            self.active.set(&id)?;
        }
        self.registry.rebuild()?;

        tracing::info!(spec_id = %id, priority = %priority, "spec created");
        Ok(Created {
            path: self.store.path(&id),
            activated: previous.is_none(),
            still_active: previous,
            title: title.to_string(),
            id,
        })
    }

    /// Pause a spec, optionally recording where work stopped
    ///
    /// The note goes at the top of the Resume Context section; a document
    /// without one only gets its status changed.
    ///
    /// # Errors
    /// `NotFound` when the document is missing.
    pub fn pause(&self, id: &str, note: Option<&str>) -> SpecResult<Outcome> {
        let doc = self.store.load(id)?;
        if !self.should_rewrite(&doc, SpecStatus::Paused) {
            return Ok(Outcome::Unchanged {
                id: id.to_string(),
                status: SpecStatus::Paused,
            });
        }

        let transition = self.apply(id, doc, SpecStatus::Paused, note)?;
        if self.active.is(id)? {
            self.active.clear()?;
        }
        self.registry.rebuild()?;
        Ok(Outcome::Changed(transition))
    }

    /// Make a spec active and point at it
    ///
    /// Whatever the pointer named before is left as it is; use
    /// [`Lifecycle::switch`] to pause it.
    ///
    /// # Errors
    /// `NotFound` when the document is missing.
    pub fn resume(&self, id: &str) -> SpecResult<Outcome> {
        let doc = self.store.load(id)?;
        if !self.should_rewrite(&doc, SpecStatus::Active) {
            self.active.set(id)?;
            return Ok(Outcome::Unchanged {
                id: id.to_string(),
                status: SpecStatus::Active,
            });
        }

        let transition = self.apply(id, doc, SpecStatus::Active, None)?;
        self.active.set(id)?;
        self.registry.rebuild()?;
        Ok(Outcome::Changed(transition))
    }

    /// Pause the active spec, then resume `target`
    ///
    /// # Errors
    /// `NotFound` when `target` has no document.
    pub fn switch(&self, target: &str) -> SpecResult<SwitchOutcome> {
        if !self.store.exists(target) {
            return Err(SpecError::not_found(target));
        }

        let current = self.active.get()?;
        if current.as_deref() == Some(target) {
            return Ok(SwitchOutcome::AlreadyActive {
                id: target.to_string(),
            });
        }

        let mut paused = None;
        let mut stale_pointer = None;
        if let Some(current) = current {
            if self.store.exists(&current) {
                paused = Some(self.pause(&current, None)?).filter(Outcome::is_changed);
            } else {
                tracing::warn!(spec_id = %current, "active pointer names a missing spec");
                stale_pointer = Some(current);
            }
        }

        let resumed = self.resume(target)?;
        Ok(SwitchOutcome::Switched {
            paused,
            stale_pointer,
            resumed,
        })
    }

    /// Mark a spec completed
    ///
    /// # Errors
    /// `NotFound` when the document is missing, `InvalidOperation` when
    /// tasks remain and `force` is not set.
    pub fn complete(&self, id: &str, force: bool) -> SpecResult<Outcome> {
        let doc = self.store.load(id)?;
        let progress = doc.progress();
        if !force && !progress.is_complete() {
            return Err(SpecError::tasks_remaining(id, progress.remaining()));
        }
        self.retire(id, doc, SpecStatus::Completed)
    }

    /// Mark a spec archived, whatever its status
    ///
    /// # Errors
    /// `NotFound` when the document is missing.
    pub fn archive(&self, id: &str) -> SpecResult<Outcome> {
        let doc = self.store.load(id)?;
        self.retire(id, doc, SpecStatus::Archived)
    }

    /// Store a generated document and make it active
    ///
    /// The id comes from the document header, else from `description`. An
    /// existing spec with that id is replaced.
    ///
    /// # Errors
    /// `NotInitialized` without `.specs/`, `InvalidOperation` when no id can
    /// be derived.
    pub fn import_generated(&self, content: &str, description: &str) -> SpecResult<Imported> {
        self.layout.ensure_initialized()?;

        let doc = SpecDocument::parse(content);
        let id = doc
            .metadata()
            .get_str(keys::ID)
            .map(|raw| slugify(&raw))
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| slugify(description));
        if id.is_empty() {
            return Err(SpecError::InvalidOperation(
                "generated spec has no usable id".to_string(),
            ));
        }

        let overwritten = self.store.exists(&id);
        if overwritten {
            tracing::warn!(spec_id = %id, "overwriting existing spec with generated content");
        }
        self.store.write(&id, content)?;
        self.active.set(&id)?;
        self.registry.rebuild()?;

        tracing::info!(spec_id = %id, "generated spec imported");
        Ok(Imported {
            path: self.store.path(&id),
            id,
            overwritten,
        })
    }

    /// Parsed spec with its resume context
    ///
    /// # Errors
    /// `NotFound` when the document is missing.
    pub fn status(&self, id: &str) -> SpecResult<SpecStatusReport> {
        let doc = self.store.load(id)?;
        Ok(SpecStatusReport {
            spec: doc.to_spec(id),
            context: doc.resume_context(),
            path: self.store.path(id),
            is_active: self.active.is(id)?,
        })
    }

    /// Summaries of every spec directory holding a readable document
    ///
    /// # Errors
    /// `Io` if the specs directory or a document cannot be read.
    pub fn list(&self) -> SpecResult<Listing> {
        let mut specs = Vec::new();
        for dir in self.store.dir_names()? {
            if !self.store.exists(&dir) {
                continue;
            }
            let doc = match self.store.load(&dir) {
                Ok(doc) => doc,
                Err(err) if err.is_invalid_data() => {
                    tracing::warn!(dir = %dir, error = %err, "skipping spec that is not valid UTF-8");
                    continue;
                }
                Err(err) => return Err(err),
            };
            let spec = doc.to_spec(&dir);
            let mut summary = SpecSummary::from(&spec);
            summary.id = dir;
            specs.push(summary);
        }

        Ok(Listing {
            specs,
            active: self.active.get()?,
        })
    }

    /// Regenerate `registry.md`
    ///
    /// # Errors
    /// `Io` if documents cannot be read or the registry cannot be written.
    pub fn rebuild_registry(&self) -> SpecResult<Vec<RegistryEntry>> {
        self.registry.rebuild()
    }

    fn should_rewrite(&self, doc: &SpecDocument, to: SpecStatus) -> bool {
        let from = doc.status_raw().and_then(|s| s.parse().ok());
        rewrites(from, to)
    }

    /// Completion and archival share the same side effects
    fn retire(&self, id: &str, doc: SpecDocument, to: SpecStatus) -> SpecResult<Outcome> {
        let transition = self.apply(id, doc, to, None)?;
        if self.active.is(id)? {
            self.active.clear()?;
        }
        self.registry.rebuild()?;
        Ok(Outcome::Changed(transition))
    }

    /// Write the new status and date, plus an optional note
    fn apply(
        &self,
        id: &str,
        mut doc: SpecDocument,
        to: SpecStatus,
        note: Option<&str>,
    ) -> SpecResult<Transition> {
        let from = doc.status_raw().unwrap_or_else(|| "unknown".to_string());
        let date = self.clock.today_string();

        doc.apply(
            &Metadata::new()
                .with(keys::STATUS, to.as_str())
                .with(keys::UPDATED, date.as_str()),
        );

        let note_saved = match note.map(str::trim).filter(|n| !n.is_empty()) {
            Some(note) => {
                let saved = doc.add_resume_note(note);
                if !saved {
                    tracing::warn!(spec_id = %id, "no Resume Context section; note not saved");
                }
                saved
            }
            None => false,
        };

        self.store.save(id, &doc)?;
        tracing::info!(spec_id = %id, from = %from, to = %to, "spec transitioned");

        Ok(Transition {
            id: id.to_string(),
            from,
            to,
            date,
            note_saved,
        })
    }
}

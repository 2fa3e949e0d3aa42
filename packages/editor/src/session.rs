//! # Script Session
//!
//! One open script: the document, its draft storage, the debounced
//! autosave and the current search query.
//!
//! The host drives time. Call [`ScriptSession::tick`] regularly with the
//! time since any fixed origin; a change noticed at a tick pushes the
//! autosave deadline out, and the draft is written once no change has
//! been seen for the configured quiet period.

use crate::autosave::Debouncer;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::mutations::{Direction, Mutation, MutationOutcome};
use crate::navigation::NavigationIntent;
use crate::persistence::RestoreOutcome;
use crate::storage::{DraftStorage, FileStorage};
use crate::Document;
use scriptpad_analysis::{build_scene_index, compute_stats, filter, FilterResult, SceneEntry, ScriptStats};
use scriptpad_model::{Block, BlockId, BlockKind};
use scriptpad_print::render_print_document;
use scriptpad_screen::{render_screen, ScreenView};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct ScriptSession<S: DraftStorage> {
    document: Document,
    storage: S,
    config: EditorConfig,
    debouncer: Debouncer,

    /// Document version last noticed by `tick`
    seen_version: u64,

    /// Document version last written to storage
    saved_version: u64,

    query: String,
}

impl ScriptSession<FileStorage> {
    /// Session over `dir`: config from `scriptpad.config.json`, draft in
    /// `<draftKey>.json`
    pub fn open_dir(dir: &Path) -> Result<Self, EditorError> {
        let config = EditorConfig::load(dir)?;
        let storage = FileStorage::new(dir)?;
        Ok(Self::open(storage, config))
    }
}

impl<S: DraftStorage> ScriptSession<S> {
    /// Seed a document, then restore the stored draft if there is one. A
    /// draft that needed repairs leaves the session dirty so the repaired
    /// blocks are written back.
    pub fn open(storage: S, config: EditorConfig) -> Self {
        let mut document = Document::new();
        let base = document.version();
        let mut write_back = false;

        match storage.load(&config.draft_key) {
            Ok(Some(raw)) => {
                let outcome = document.restore(&raw);
                info!(key = %config.draft_key, ?outcome, "restored draft");
                write_back = outcome.needs_write_back();
            }
            Ok(None) => debug!(key = %config.draft_key, "no stored draft, starting from seed"),
            Err(err) => warn!(key = %config.draft_key, error = %err, "failed to load draft"),
        }

        let version = if write_back { base } else { document.version() };
        Self {
            document,
            storage,
            debouncer: Debouncer::new(config.autosave_delay()),
            config,
            seen_version: version,
            saved_version: version,
            query: String::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn blocks(&self) -> &[Block] {
        self.document.blocks()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn add(&mut self, block: Block) -> BlockId {
        self.document.add(block)
    }

    pub fn add_kind(&mut self, kind: BlockKind) -> BlockId {
        self.document.add_kind(kind)
    }

    pub fn update(&mut self, id: &BlockId, block: Block) -> bool {
        self.document.update(id, block)
    }

    pub fn delete(&mut self, id: &BlockId) -> bool {
        self.document.delete(id)
    }

    pub fn move_block(&mut self, id: &BlockId, direction: Direction) -> bool {
        self.document.move_block(id, direction)
    }

    pub fn focus(&mut self, id: &BlockId) -> bool {
        self.document.focus(id)
    }

    pub fn navigate_to(&mut self, id: &BlockId) -> bool {
        self.document.navigate_to(id)
    }

    pub fn apply(&mut self, mutation: Mutation) -> MutationOutcome {
        self.document.apply(mutation)
    }

    pub fn restore(&mut self, raw: &str) -> RestoreOutcome {
        self.document.restore(raw)
    }

    pub fn snapshot(&self) -> String {
        self.document.serialize()
    }

    pub fn drain_intents(&mut self) -> Vec<NavigationIntent> {
        self.document.drain_intents()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> FilterResult<'_> {
        filter(self.document.blocks(), &self.query)
    }

    pub fn stats(&self) -> ScriptStats {
        compute_stats(self.document.blocks())
    }

    pub fn scene_index(&self) -> Vec<SceneEntry> {
        let categorizer = self.config.categorizer.build();
        build_scene_index(self.document.blocks(), categorizer.as_ref())
    }

    /// Editable pages for the current query
    pub fn screen(&self) -> ScreenView {
        render_screen(
            &self.filter(),
            self.document.active(),
            &self.config.screen_options(),
        )
    }

    /// Print document of every block, whatever the query
    pub fn print_html(&self) -> String {
        render_print_document(self.document.blocks(), &self.config.page)
    }

    /// True while changes have not reached storage
    pub fn is_dirty(&self) -> bool {
        self.document.version() != self.saved_version
    }

    pub fn autosave_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Advance the autosave clock. Returns true if the draft was written.
    /// A failed write is retried one quiet period later.
    pub fn tick(&mut self, now: Duration) -> bool {
        let version = self.document.version();
        if version != self.seen_version {
            self.seen_version = version;
            self.debouncer.schedule(now);
            return false;
        }
        if self.debouncer.poll(now) {
            if self.save() {
                return true;
            }
            self.debouncer.schedule(now);
        }
        false
    }

    /// Write the draft now if anything is unsaved
    pub fn flush(&mut self) -> bool {
        self.debouncer.flush();
        self.seen_version = self.document.version();
        if !self.is_dirty() {
            return false;
        }
        self.save()
    }

    /// Final flush
    pub fn close(mut self) -> bool {
        self.flush()
    }

    fn save(&mut self) -> bool {
        let snapshot = self.document.serialize();
        match self.storage.save(&self.config.draft_key, &snapshot) {
            Ok(()) => {
                self.saved_version = self.document.version();
                debug!(
                    key = %self.config.draft_key,
                    version = self.saved_version,
                    bytes = snapshot.len(),
                    "saved draft"
                );
                true
            }
            Err(err) => {
                warn!(key = %self.config.draft_key, error = %err, "failed to save draft");
                false
            }
        }
    }
}

impl<S: DraftStorage> Drop for ScriptSession<S> {
    fn drop(&mut self) {
        if self.is_dirty() {
            self.save();
        }
    }
}

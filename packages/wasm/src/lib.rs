//! WebAssembly bindings for the Scriptpad editor.
//!
//! The host owns persistence: it passes the stored draft in when the
//! editor is created, and stores whatever `tick`/`flush` hand back.
//! Structured results cross the boundary as JSON strings.

use scriptpad_editor::{
    Direction, DraftStorage, EditorConfig, Mutation, ScriptSession, StorageError,
};
use scriptpad_model::{Block, BlockId, BlockKind};
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Draft storage backed by the host: one value in, latest save out
#[derive(Debug, Default)]
pub struct HostStorage {
    initial: Option<String>,
    outbox: Option<String>,
}

impl HostStorage {
    pub fn new(initial: Option<String>) -> Self {
        Self {
            initial,
            outbox: None,
        }
    }

    /// Latest saved draft not yet collected by the host
    pub fn take_saved(&mut self) -> Option<String> {
        self.outbox.take()
    }
}

impl DraftStorage for HostStorage {
    fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.initial.clone())
    }

    fn save(&mut self, _key: &str, value: &str) -> Result<(), StorageError> {
        self.outbox = Some(value.to_string());
        Ok(())
    }
}

#[wasm_bindgen]
pub struct ScriptEditor {
    session: ScriptSession<HostStorage>,
}

#[wasm_bindgen]
impl ScriptEditor {
    /// Create an editor from the stored draft (if any) and an optional
    /// JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(draft: Option<String>, config_json: Option<String>) -> Result<ScriptEditor, JsValue> {
        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("Config error: {}", e)))?,
            None => EditorConfig::default(),
        };
        Ok(Self {
            session: ScriptSession::open(HostStorage::new(draft), config),
        })
    }

    /// Append a template block. `kind` is a shortcut letter (s/a/c/t) or
    /// one of scene/action/dialogue/transition.
    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&mut self, kind: &str) -> Result<String, JsValue> {
        let kind = parse_kind(kind)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown block kind: {}", kind)))?;
        Ok(self.session.add_kind(kind).to_string())
    }

    #[wasm_bindgen(js_name = addScene)]
    pub fn add_scene(&mut self) -> String {
        self.session.add_kind(BlockKind::SceneHeading).to_string()
    }

    #[wasm_bindgen(js_name = addAction)]
    pub fn add_action(&mut self) -> String {
        self.session.add_kind(BlockKind::Action).to_string()
    }

    #[wasm_bindgen(js_name = addDialogue)]
    pub fn add_dialogue(&mut self) -> String {
        self.session.add_kind(BlockKind::DialogueLine).to_string()
    }

    #[wasm_bindgen(js_name = addTransition)]
    pub fn add_transition(&mut self) -> String {
        self.session.add_kind(BlockKind::Transition).to_string()
    }

    /// Replace a block with one given in the draft wire format
    #[wasm_bindgen(js_name = updateBlock)]
    pub fn update_block(&mut self, id: &str, block_json: &str) -> Result<bool, JsValue> {
        let block: Block = serde_json::from_str(block_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid block: {}", e)))?;
        Ok(self.session.update(&BlockId::from(id), block))
    }

    #[wasm_bindgen(js_name = deleteBlock)]
    pub fn delete_block(&mut self, id: &str) -> bool {
        self.session.delete(&BlockId::from(id))
    }

    #[wasm_bindgen(js_name = moveUp)]
    pub fn move_up(&mut self, id: &str) -> bool {
        self.session.move_block(&BlockId::from(id), Direction::Previous)
    }

    #[wasm_bindgen(js_name = moveDown)]
    pub fn move_down(&mut self, id: &str) -> bool {
        self.session.move_block(&BlockId::from(id), Direction::Next)
    }

    pub fn focus(&mut self, id: &str) -> bool {
        self.session.focus(&BlockId::from(id))
    }

    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&mut self, id: &str) -> bool {
        self.session.navigate_to(&BlockId::from(id))
    }

    /// Apply a JSON mutation; returns the outcome as JSON
    #[wasm_bindgen(js_name = applyMutation)]
    pub fn apply_mutation(&mut self, mutation_json: &str) -> Result<String, JsValue> {
        let mutation: Mutation = serde_json::from_str(mutation_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid mutation: {}", e)))?;
        let outcome = self.session.apply(mutation);
        to_json(&outcome)
    }

    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&mut self, query: &str) {
        self.session.set_query(query);
    }

    pub fn query(&self) -> String {
        self.session.query().to_string()
    }

    pub fn blocks(&self) -> Result<String, JsValue> {
        to_json(&self.session.blocks())
    }

    pub fn stats(&self) -> Result<String, JsValue> {
        to_json(&self.session.stats())
    }

    #[wasm_bindgen(js_name = sceneIndex)]
    pub fn scene_index(&self) -> Result<String, JsValue> {
        to_json(&self.session.scene_index())
    }

    /// Screen pages for the current query as a virtual DOM
    #[wasm_bindgen(js_name = screenView)]
    pub fn screen_view(&self) -> Result<String, JsValue> {
        to_json(&self.session.screen())
    }

    #[wasm_bindgen(js_name = printHtml)]
    pub fn print_html(&self) -> String {
        self.session.print_html()
    }

    pub fn snapshot(&self) -> String {
        self.session.snapshot()
    }

    /// Load a snapshot; returns the restore outcome as JSON
    pub fn restore(&mut self, raw: &str) -> Result<String, JsValue> {
        let outcome = self.session.restore(raw);
        to_json(&outcome)
    }

    #[wasm_bindgen(js_name = drainIntents)]
    pub fn drain_intents(&mut self) -> Result<String, JsValue> {
        let intents = self.session.drain_intents();
        to_json(&intents)
    }

    #[wasm_bindgen(js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// Advance the autosave clock; returns the draft to store when one is due
    pub fn tick(&mut self, now_ms: f64) -> Option<String> {
        let now = Duration::from_millis(now_ms.max(0.0) as u64);
        if self.session.tick(now) {
            self.session.storage_mut().take_saved()
        } else {
            None
        }
    }

    /// Draft to store right away, if anything is unsaved
    pub fn flush(&mut self) -> Option<String> {
        if self.session.flush() {
            self.session.storage_mut().take_saved()
        } else {
            None
        }
    }
}

/// Storage key hosts should use for the draft
#[wasm_bindgen(js_name = draftKey)]
pub fn draft_key() -> String {
    scriptpad_editor::DEFAULT_DRAFT_KEY.to_string()
}

fn parse_kind(kind: &str) -> Option<BlockKind> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "scene" | "sceneheading" => Some(BlockKind::SceneHeading),
        "action" => Some(BlockKind::Action),
        "dialogue" | "character" => Some(BlockKind::DialogueLine),
        "transition" => Some(BlockKind::Transition),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => BlockKind::from_shortcut(key),
                _ => None,
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

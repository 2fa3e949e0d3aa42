//! Draft persistence through a session backed by files on disk

use scriptpad_editor::{
    DraftStorage, EditorConfig, FileStorage, ScriptSession, CONFIG_FILE_NAME, DEFAULT_DRAFT_KEY,
};
use scriptpad_model::{Block, BlockKind};
use std::time::Duration;

#[test]
fn test_draft_survives_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let snapshot = {
        let mut session = ScriptSession::open(FileStorage::new(dir.path())?, EditorConfig::default());
        session.add(Block::action("The lights go out."));
        session.tick(Duration::from_millis(0));
        assert!(session.tick(Duration::from_millis(400)));
        session.snapshot()
    };

    assert!(dir.path().join("script_editor_draft.json").exists());
    let reopened = ScriptSession::open(FileStorage::new(dir.path())?, EditorConfig::default());
    assert_eq!(reopened.snapshot(), snapshot);
    assert_eq!(reopened.blocks().len(), 5);
    Ok(())
}

#[test]
fn test_drop_flushes_pending_changes() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    {
        let mut session = ScriptSession::open(FileStorage::new(dir.path())?, EditorConfig::default());
        session.add_kind(BlockKind::SceneHeading);
        session.tick(Duration::from_millis(0));
        assert!(session.autosave_pending());
    }

    let storage = FileStorage::new(dir.path())?;
    let saved = storage.load(DEFAULT_DRAFT_KEY)?.expect("draft written on drop");
    let value: serde_json::Value = serde_json::from_str(&saved)?;
    assert_eq!(value.as_array().map(Vec::len), Some(5));
    Ok(())
}

#[test]
fn test_open_dir_uses_configured_key() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"{"draftKey": "pilot", "autosaveMs": 50}"#,
    )?;

    let mut session = ScriptSession::open_dir(dir.path())?;
    assert_eq!(session.config().autosave_delay(), Duration::from_millis(50));
    session.add_kind(BlockKind::Action);
    assert!(session.close());

    assert!(dir.path().join("pilot.json").exists());
    assert!(!dir.path().join("script_editor_draft.json").exists());
    Ok(())
}

#[test]
fn test_corrupt_draft_keeps_seed() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("script_editor_draft.json"), "{ not json")?;

    let session = ScriptSession::open(FileStorage::new(dir.path())?, EditorConfig::default());
    assert_eq!(session.blocks().len(), 4);
    assert!(!session.is_dirty());
    Ok(())
}

#[test]
fn test_repaired_draft_keeps_ids_on_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join("script_editor_draft.json"),
        r#"[{"type":"Action","text":"No id."},{"id":"t","type":"Transition","text":"CUT TO:"}]"#,
    )?;

    let first_ids: Vec<String> = {
        let session = ScriptSession::open(FileStorage::new(dir.path())?, EditorConfig::default());
        assert!(session.is_dirty());
        session.blocks().iter().map(|b| b.id().to_string()).collect()
    };

    let reopened = ScriptSession::open(FileStorage::new(dir.path())?, EditorConfig::default());
    let second_ids: Vec<String> = reopened.blocks().iter().map(|b| b.id().to_string()).collect();
    assert_eq!(second_ids, first_ids);
    assert_eq!(second_ids[1], "t");
    assert!(!reopened.is_dirty());
    Ok(())
}

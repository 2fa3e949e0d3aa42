//! # Content Blocks
//!
//! One block is one atomic unit of script content. The wire format matches
//! the persisted draft layout: a JSON object tagged by `type`, with
//! camelCase field names (`sceneNo`, `time`, ...). Text fields that are
//! missing or `null` load as empty strings.

use crate::BlockId;
use serde::{Deserialize, Deserializer, Serialize};

/// Label given to freshly added scene headings
pub const DEFAULT_SCENE_LABEL: &str = "SCENE: ";

/// Text given to freshly added transitions, and printed for blank ones
pub const DEFAULT_TRANSITION: &str = "CUT TO";

/// A content block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Block {
    SceneHeading(SceneHeading),
    Action(Action),
    #[serde(rename = "CharDialogueInline")]
    DialogueLine(DialogueLine),
    Transition(Transition),
}

/// Marks the start of a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneHeading {
    #[serde(default = "BlockId::unassigned")]
    pub id: BlockId,
    /// Free-form label, e.g. "SCENE: 1"
    #[serde(rename = "sceneNo", default, deserialize_with = "text")]
    pub scene_label: String,
    #[serde(default, deserialize_with = "text")]
    pub location: String,
    #[serde(rename = "time", default, deserialize_with = "text")]
    pub time_of_day: String,
}

/// Narrative description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default = "BlockId::unassigned")]
    pub id: BlockId,
    #[serde(default, deserialize_with = "text")]
    pub text: String,
}

/// One speaker turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    #[serde(default = "BlockId::unassigned")]
    pub id: BlockId,
    #[serde(default, deserialize_with = "text")]
    pub character: String,
    #[serde(default, deserialize_with = "text")]
    pub dialogue: String,
}

/// Scene transition, e.g. "CUT TO"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(default = "BlockId::unassigned")]
    pub id: BlockId,
    #[serde(default, deserialize_with = "text")]
    pub text: String,
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Block variant without content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    SceneHeading,
    Action,
    DialogueLine,
    Transition,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::SceneHeading,
        BlockKind::Action,
        BlockKind::DialogueLine,
        BlockKind::Transition,
    ];

    /// Map the letter of an add-block shortcut (Alt+S/A/C/T) to a kind
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            's' => Some(BlockKind::SceneHeading),
            'a' => Some(BlockKind::Action),
            'c' => Some(BlockKind::DialogueLine),
            't' => Some(BlockKind::Transition),
            _ => None,
        }
    }

    /// A new block of this kind with a fresh id and template content
    pub fn template(&self) -> Block {
        match self {
            BlockKind::SceneHeading => Block::scene(DEFAULT_SCENE_LABEL, "", ""),
            BlockKind::Action => Block::action(""),
            BlockKind::DialogueLine => Block::dialogue("", ""),
            BlockKind::Transition => Block::transition(DEFAULT_TRANSITION),
        }
    }
}

impl Block {
    pub fn scene(
        label: impl Into<String>,
        location: impl Into<String>,
        time_of_day: impl Into<String>,
    ) -> Self {
        Block::SceneHeading(SceneHeading {
            id: BlockId::generate(),
            scene_label: label.into(),
            location: location.into(),
            time_of_day: time_of_day.into(),
        })
    }

    pub fn action(text: impl Into<String>) -> Self {
        Block::Action(Action {
            id: BlockId::generate(),
            text: text.into(),
        })
    }

    pub fn dialogue(character: impl Into<String>, dialogue: impl Into<String>) -> Self {
        Block::DialogueLine(DialogueLine {
            id: BlockId::generate(),
            character: character.into(),
            dialogue: dialogue.into(),
        })
    }

    pub fn transition(text: impl Into<String>) -> Self {
        Block::Transition(Transition {
            id: BlockId::generate(),
            text: text.into(),
        })
    }

    pub fn id(&self) -> &BlockId {
        match self {
            Block::SceneHeading(b) => &b.id,
            Block::Action(b) => &b.id,
            Block::DialogueLine(b) => &b.id,
            Block::Transition(b) => &b.id,
        }
    }

    pub fn set_id(&mut self, id: BlockId) {
        match self {
            Block::SceneHeading(b) => b.id = id,
            Block::Action(b) => b.id = id,
            Block::DialogueLine(b) => b.id = id,
            Block::Transition(b) => b.id = id,
        }
    }

    pub fn with_id(mut self, id: impl Into<BlockId>) -> Self {
        self.set_id(id.into());
        self
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Block::SceneHeading(_) => BlockKind::SceneHeading,
            Block::Action(_) => BlockKind::Action,
            Block::DialogueLine(_) => BlockKind::DialogueLine,
            Block::Transition(_) => BlockKind::Transition,
        }
    }

    pub fn is_scene_heading(&self) -> bool {
        matches!(self, Block::SceneHeading(_))
    }
}

/// Starting document: one block of each kind
pub fn seed_blocks() -> Vec<Block> {
    vec![
        Block::scene(DEFAULT_SCENE_LABEL, "", ""),
        Block::action("Action"),
        Block::dialogue("Character", "Dialogue"),
        Block::transition(DEFAULT_TRANSITION),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_one_of_each_kind() {
        let seed = seed_blocks();
        let kinds: Vec<BlockKind> = seed.iter().map(Block::kind).collect();
        assert_eq!(kinds, BlockKind::ALL.to_vec());
    }

    #[test]
    fn test_templates() {
        match BlockKind::SceneHeading.template() {
            Block::SceneHeading(s) => assert_eq!(s.scene_label, "SCENE: "),
            other => panic!("Expected scene heading, got {:?}", other),
        }
        match BlockKind::Transition.template() {
            Block::Transition(t) => assert_eq!(t.text, "CUT TO"),
            other => panic!("Expected transition, got {:?}", other),
        }
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(BlockKind::from_shortcut('S'), Some(BlockKind::SceneHeading));
        assert_eq!(BlockKind::from_shortcut('a'), Some(BlockKind::Action));
        assert_eq!(BlockKind::from_shortcut('c'), Some(BlockKind::DialogueLine));
        assert_eq!(BlockKind::from_shortcut('t'), Some(BlockKind::Transition));
        assert_eq!(BlockKind::from_shortcut('x'), None);
    }

    #[test]
    fn test_wire_format() {
        let block = Block::dialogue("JOHN", "Hello").with_id("d1");
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "CharDialogueInline");
        assert_eq!(json["id"], "d1");
        assert_eq!(json["character"], "JOHN");

        let scene = Block::scene("SCENE: 1", "KITCHEN", "NIGHT").with_id("s1");
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["sceneNo"], "SCENE: 1");
        assert_eq!(json["time"], "NIGHT");
    }

    #[test]
    fn test_missing_and_null_fields_load_as_empty() {
        let block: Block =
            serde_json::from_str(r#"{"id":"a1","type":"Action","text":null}"#).unwrap();
        assert_eq!(block, Block::action("").with_id("a1"));

        let block: Block = serde_json::from_str(r#"{"type":"SceneHeading"}"#).unwrap();
        assert!(block.id().is_unassigned());
        match block {
            Block::SceneHeading(s) => {
                assert_eq!(s.scene_label, "");
                assert_eq!(s.location, "");
                assert_eq!(s.time_of_day, "");
            }
            other => panic!("Expected scene heading, got {:?}", other),
        }
    }
}

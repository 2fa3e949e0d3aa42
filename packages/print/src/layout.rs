use scriptpad_model::{Block, BlockId, DEFAULT_TRANSITION};
use serde::Serialize;

/// Glyph printed at the vertical center between speaker and dialogue
pub const DIALOGUE_SEPARATOR: char = ':';

/// One formatted item of the print flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PrintItem {
    /// Three-column row: label left, location centered, time right
    SceneRow {
        block_id: BlockId,
        left: String,
        center: String,
        right: String,
    },
    /// Left half of the page only, line breaks kept
    Action { block_id: BlockId, text: String },
    /// Speaker right-aligned against the center, separator on the center,
    /// dialogue from just right of center to the right margin
    Dialogue {
        block_id: BlockId,
        character: String,
        separator: char,
        text: String,
    },
    /// Centered, uppercase
    Transition { block_id: BlockId, text: String },
}

impl PrintItem {
    pub fn block_id(&self) -> &BlockId {
        match self {
            PrintItem::SceneRow { block_id, .. }
            | PrintItem::Action { block_id, .. }
            | PrintItem::Dialogue { block_id, .. }
            | PrintItem::Transition { block_id, .. } => block_id,
        }
    }
}

/// Flat print representation, one item per block in document order
pub type PrintFlow = Vec<PrintItem>;

/// Lay out every block for print
pub fn layout(blocks: &[Block]) -> PrintFlow {
    blocks.iter().map(layout_block).collect()
}

fn layout_block(block: &Block) -> PrintItem {
    match block {
        Block::SceneHeading(scene) => PrintItem::SceneRow {
            block_id: scene.id.clone(),
            left: scene.scene_label.to_uppercase(),
            center: scene.location.to_uppercase(),
            right: scene.time_of_day.to_uppercase(),
        },
        Block::Action(action) => PrintItem::Action {
            block_id: action.id.clone(),
            text: action.text.trim().to_string(),
        },
        Block::DialogueLine(line) => PrintItem::Dialogue {
            block_id: line.id.clone(),
            character: line.character.trim().to_string(),
            separator: DIALOGUE_SEPARATOR,
            text: line.dialogue.trim().to_string(),
        },
        Block::Transition(transition) => {
            let text = if transition.text.trim().is_empty() {
                DEFAULT_TRANSITION
            } else {
                transition.text.as_str()
            };
            PrintItem::Transition {
                block_id: transition.id.clone(),
                text: text.to_uppercase(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_row_uppercased() {
        let flow = layout(&[Block::scene("scene: 4", "roof top", "dusk")]);
        match &flow[0] {
            PrintItem::SceneRow { left, center, right, .. } => {
                assert_eq!(left, "SCENE: 4");
                assert_eq!(center, "ROOF TOP");
                assert_eq!(right, "DUSK");
            }
            other => panic!("Expected scene row, got {:?}", other),
        }
    }

    #[test]
    fn test_action_and_dialogue_trimmed_with_line_breaks_kept() {
        let flow = layout(&[
            Block::action("\n  First line\nsecond line  \n"),
            Block::dialogue("  John ", " Wait.\nNo. "),
        ]);
        assert_eq!(
            flow[0],
            PrintItem::Action {
                block_id: flow[0].block_id().clone(),
                text: "First line\nsecond line".to_string(),
            }
        );
        match &flow[1] {
            PrintItem::Dialogue { character, separator, text, .. } => {
                assert_eq!(character, "John");
                assert_eq!(*separator, ':');
                assert_eq!(text, "Wait.\nNo.");
            }
            other => panic!("Expected dialogue, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_transition_prints_default() {
        let flow = layout(&[Block::transition("  "), Block::transition("fade out")]);
        let texts: Vec<&str> = flow
            .iter()
            .map(|item| match item {
                PrintItem::Transition { text, .. } => text.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["CUT TO", "FADE OUT"]);
    }

    #[test]
    fn test_one_item_per_block_in_order() {
        let blocks = vec![
            Block::transition("a"),
            Block::action("b"),
            Block::scene("c", "d", "e"),
        ];
        let flow = layout(&blocks);
        let ids: Vec<&BlockId> = flow.iter().map(PrintItem::block_id).collect();
        let expected: Vec<&BlockId> = blocks.iter().map(Block::id).collect();
        assert_eq!(ids, expected);
    }
}

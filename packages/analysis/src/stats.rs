use scriptpad_model::Block;
use serde::Serialize;
use std::collections::HashSet;

/// Aggregate counts over the full, unfiltered block sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptStats {
    pub scene_count: usize,
    /// Distinct non-blank speaker names, trimmed and compared case-insensitively
    pub unique_character_count: usize,
    /// Whitespace-delimited words in action text and dialogue
    pub word_count: usize,
    pub action_count: usize,
    pub dialogue_count: usize,
}

/// Single pass over `blocks`
pub fn compute_stats(blocks: &[Block]) -> ScriptStats {
    let mut stats = ScriptStats::default();
    let mut speakers: HashSet<String> = HashSet::new();

    for block in blocks {
        match block {
            Block::SceneHeading(_) => stats.scene_count += 1,
            Block::Action(action) => {
                stats.action_count += 1;
                stats.word_count += action.text.split_whitespace().count();
            }
            Block::DialogueLine(line) => {
                stats.dialogue_count += 1;
                stats.word_count += line.dialogue.split_whitespace().count();

                let name = line.character.trim();
                if !name.is_empty() {
                    speakers.insert(name.to_uppercase());
                }
            }
            Block::Transition(_) => {}
        }
    }

    stats.unique_character_count = speakers.len();
    stats
}

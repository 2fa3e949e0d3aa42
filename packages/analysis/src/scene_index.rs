//! # Scene Index
//!
//! Numbered list of scene headings for the navigation drawer.
//!
//! Entries are numbered 1..N among scene headings only, however many other
//! blocks sit between them. Each entry carries a category tag used purely
//! as a visual grouping cue; the categorization scheme is a strategy
//! ([`SceneCategorizer`]) so drawer styles differ without a second model.

use scriptpad_model::{Block, BlockId};
use serde::{Deserialize, Serialize, Serializer};

/// Number of rotating fallback buckets
pub const OTHER_BUCKETS: usize = 5;

const UNTITLED_LOCATION: &str = "UNTITLED SCENE";
const DEFAULT_CHIP: &str = "SC.";

/// Visual grouping bucket of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneCategory {
    Night,
    Morning,
    Afternoon,
    Evening,
    Day,
    /// Rotating fallback for unmatched or blank times, `0..OTHER_BUCKETS`
    Other(u8),
    /// Single shared tag (uniform drawer style)
    Unclassified,
}

impl SceneCategory {
    pub fn tag(&self) -> String {
        match self {
            SceneCategory::Night => "night".to_string(),
            SceneCategory::Morning => "morning".to_string(),
            SceneCategory::Afternoon => "afternoon".to_string(),
            SceneCategory::Evening => "evening".to_string(),
            SceneCategory::Day => "day".to_string(),
            SceneCategory::Other(bucket) => format!("other-{}", bucket),
            SceneCategory::Unclassified => "unclassified".to_string(),
        }
    }
}

impl Serialize for SceneCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

/// Strategy mapping a scene's time of day to a category
pub trait SceneCategorizer: std::fmt::Debug {
    /// `scene_index` is the zero-based position among scene headings
    fn categorize(&self, time_of_day: &str, scene_index: usize) -> SceneCategory;
}

/// Keyword buckets on the time of day, rotating fallback otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeOfDayCategorizer;

impl SceneCategorizer for TimeOfDayCategorizer {
    fn categorize(&self, time_of_day: &str, scene_index: usize) -> SceneCategory {
        let time = time_of_day.trim().to_uppercase();

        // first keyword in this order wins ("DAY/NIGHT" is a night scene)
        if time.contains("NIGHT") {
            SceneCategory::Night
        } else if time.contains("MORNING") {
            SceneCategory::Morning
        } else if time.contains("EVENING") {
            SceneCategory::Evening
        } else if time.contains("AFTERNOON") {
            SceneCategory::Afternoon
        } else if time.contains("DAY") {
            SceneCategory::Day
        } else {
            SceneCategory::Other((scene_index % OTHER_BUCKETS) as u8)
        }
    }
}

/// Same tag for every scene
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCategorizer;

impl SceneCategorizer for UniformCategorizer {
    fn categorize(&self, _time_of_day: &str, _scene_index: usize) -> SceneCategory {
        SceneCategory::Unclassified
    }
}

/// Configurable choice of categorizer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategorizerKind {
    #[default]
    TimeOfDay,
    Uniform,
}

impl CategorizerKind {
    pub fn build(&self) -> Box<dyn SceneCategorizer> {
        match self {
            CategorizerKind::TimeOfDay => Box::new(TimeOfDayCategorizer),
            CategorizerKind::Uniform => Box::new(UniformCategorizer),
        }
    }
}

/// One navigable scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEntry {
    pub scene_id: BlockId,
    /// 1-based position among scene headings
    pub display_number: usize,
    /// Scene label without trailing colons, e.g. "SCENE" or "SC. 4"
    pub label: String,
    /// Uppercased location, "UNTITLED SCENE" when blank
    pub location: String,
    /// Uppercased time of day, may be empty
    pub time_of_day: String,
    pub category: SceneCategory,
}

fn chip_label(scene_label: &str) -> String {
    let trimmed = scene_label.trim_end_matches(|c: char| c == ':' || c.is_whitespace());
    if trimmed.trim().is_empty() {
        DEFAULT_CHIP.to_string()
    } else {
        trimmed.trim_start().to_uppercase()
    }
}

/// Scene headings of `blocks` in document order
pub fn build_scene_index(blocks: &[Block], categorizer: &dyn SceneCategorizer) -> Vec<SceneEntry> {
    blocks
        .iter()
        .filter_map(|block| match block {
            Block::SceneHeading(scene) => Some(scene),
            Block::Action(_) | Block::DialogueLine(_) | Block::Transition(_) => None,
        })
        .enumerate()
        .map(|(index, scene)| {
            let location = scene.location.trim();
            SceneEntry {
                scene_id: scene.id.clone(),
                display_number: index + 1,
                label: chip_label(&scene.scene_label),
                location: if location.is_empty() {
                    UNTITLED_LOCATION.to_string()
                } else {
                    location.to_uppercase()
                },
                time_of_day: scene.time_of_day.trim().to_uppercase(),
                category: categorizer.categorize(&scene.time_of_day, index),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbering_skips_other_blocks() {
        let blocks = vec![
            Block::action("opening"),
            Block::scene("SCENE: 1", "Kitchen", "Night"),
            Block::action("a"),
            Block::dialogue("A", "b"),
            Block::transition("CUT TO"),
            Block::scene("SCENE: 2", "Garden", "Day"),
            Block::action("c"),
            Block::scene("SCENE: 3", "", ""),
        ];

        let index = build_scene_index(&blocks, &TimeOfDayCategorizer);
        let numbers: Vec<usize> = index.iter().map(|e| e.display_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(&index[0].scene_id, blocks[1].id());
        assert_eq!(&index[1].scene_id, blocks[5].id());
    }

    #[test]
    fn test_display_metadata() {
        let blocks = vec![
            Block::scene("SCENE: ", "kitchen", " night "),
            Block::scene("", "  ", ""),
        ];
        let index = build_scene_index(&blocks, &TimeOfDayCategorizer);

        assert_eq!(index[0].label, "SCENE");
        assert_eq!(index[0].location, "KITCHEN");
        assert_eq!(index[0].time_of_day, "NIGHT");
        assert_eq!(index[1].label, "SC.");
        assert_eq!(index[1].location, "UNTITLED SCENE");
        assert_eq!(index[1].time_of_day, "");
    }

    #[test]
    fn test_time_of_day_buckets() {
        let c = TimeOfDayCategorizer;
        assert_eq!(c.categorize("Night", 0), SceneCategory::Night);
        assert_eq!(c.categorize("MIDNIGHT", 0), SceneCategory::Night);
        assert_eq!(c.categorize("early morning", 0), SceneCategory::Morning);
        assert_eq!(c.categorize("Afternoon", 0), SceneCategory::Afternoon);
        assert_eq!(c.categorize("EVENING", 0), SceneCategory::Evening);
        assert_eq!(c.categorize("DAY", 0), SceneCategory::Day);
        assert_eq!(c.categorize("INT/EXT DAY", 0), SceneCategory::Day);
    }

    #[test]
    fn test_fallback_rotates_by_scene_index() {
        let c = TimeOfDayCategorizer;
        assert_eq!(c.categorize("", 0), SceneCategory::Other(0));
        assert_eq!(c.categorize("DUSK", 1), SceneCategory::Other(1));
        assert_eq!(c.categorize("", 4), SceneCategory::Other(4));
        assert_eq!(c.categorize("", 5), SceneCategory::Other(0));
        assert_eq!(c.categorize("DAY/NIGHT", 2), SceneCategory::Night);
    }

    #[test]
    fn test_uniform_categorizer() {
        let blocks = vec![
            Block::scene("S", "A", "NIGHT"),
            Block::scene("S", "B", "DAY"),
        ];
        let index = build_scene_index(&blocks, CategorizerKind::Uniform.build().as_ref());
        assert!(index
            .iter()
            .all(|e| e.category == SceneCategory::Unclassified));
    }

    #[test]
    fn test_category_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&SceneCategory::Other(3)).unwrap(),
            "\"other-3\""
        );
        assert_eq!(serde_json::to_string(&SceneCategory::Night).unwrap(), "\"night\"");
    }

    #[test]
    fn test_empty_index() {
        let blocks = vec![Block::action("no scenes here")];
        assert!(build_scene_index(&blocks, &TimeOfDayCategorizer).is_empty());
    }
}

use crate::VNode;
use scriptpad_analysis::{BlockHighlights, Field, FilterResult, Segment};
use scriptpad_model::{Action, Block, BlockId, DialogueLine, PageGeometry, SceneHeading, Transition};
use serde::Serialize;
use tracing::{debug, instrument};

/// Blocks per screen page
pub const DEFAULT_BLOCKS_PER_PAGE: usize = 15;

const ACTION_WIDTH: &str = "55%";
const DIALOGUE_WIDTH: &str = "90%";
const DIALOGUE_COLUMNS: &str = "40% max-content 55%";
const TIME_RIGHT_PAD: &str = "4.5rem";
const DIALOGUE_SEPARATOR: &str = ":";

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenOptions {
    pub blocks_per_page: usize,
    pub page: PageGeometry,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            blocks_per_page: DEFAULT_BLOCKS_PER_PAGE,
            page: PageGeometry::default(),
        }
    }
}

/// Result summary shown above the pages while a query is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBanner {
    pub query: String,
    pub result_count: usize,
}

impl SearchBanner {
    pub fn message(&self) -> String {
        match self.result_count {
            0 => format!("No results found for \"{}\"", self.query),
            1 => format!("Found 1 result for \"{}\"", self.query),
            n => format!("Found {} results for \"{}\"", n, self.query),
        }
    }
}

/// Rendered screen: page shells holding block rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub pages: Vec<VNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<SearchBanner>,
}

impl ScreenView {
    /// Block rows across all pages, in order
    pub fn rows(&self) -> impl Iterator<Item = &VNode> {
        self.pages.iter().flat_map(|page| page.children().iter())
    }
}

/// Chunk `items` into groups of `per_page`; always at least one group
pub fn paginate<T>(items: &[T], per_page: usize) -> Vec<&[T]> {
    let mut pages: Vec<&[T]> = items.chunks(per_page.max(1)).collect();
    if pages.is_empty() {
        pages.push(&[]);
    }
    pages
}

/// Visible rows for a growing text field
pub fn textarea_rows(text: &str) -> usize {
    text.split('\n').count().max(1)
}

#[instrument(skip_all, fields(blocks = filtered.len(), query = %filtered.query))]
pub fn render_screen(
    filtered: &FilterResult<'_>,
    active: Option<&BlockId>,
    options: &ScreenOptions,
) -> ScreenView {
    let pages: Vec<VNode> = paginate(&filtered.entries, options.blocks_per_page)
        .into_iter()
        .enumerate()
        .map(|(index, entries)| {
            page_shell(&options.page, index).with_children(
                entries
                    .iter()
                    .map(|entry| render_row(entry, filtered.is_active(), active)),
            )
        })
        .collect();

    debug!(pages = pages.len(), "Rendered screen view");

    ScreenView {
        pages,
        banner: filtered.is_active().then(|| SearchBanner {
            query: filtered.query.clone(),
            result_count: filtered.len(),
        }),
    }
}

fn inches(value: f64) -> String {
    format!("{}in", value)
}

fn page_shell(page: &PageGeometry, index: usize) -> VNode {
    VNode::element("div")
        .with_class("screen-page")
        .with_attr("data-page", index.to_string())
        .with_style("width", inches(page.width_in))
        .with_style("max-width", "100%")
        .with_style("min-height", inches(page.content_height_in()))
        .with_style("padding-top", inches(page.margins_in.top))
        .with_style("padding-right", inches(page.margins_in.right))
        .with_style("padding-bottom", inches(page.margins_in.bottom))
        .with_style("padding-left", inches(page.margins_in.left))
        .with_style("font-family", page.font_family.clone())
        .with_style("font-size", format!("{}pt", page.font_size_pt))
        .with_style("line-height", page.line_height.to_string())
}

fn render_row(entry: &BlockHighlights<'_>, filtering: bool, active: Option<&BlockId>) -> VNode {
    let block = entry.block;
    let id = block.id();

    let content = match block {
        Block::SceneHeading(scene) => scene_heading(scene),
        Block::Action(action) => action_block(action, entry, filtering),
        Block::DialogueLine(line) => dialogue_block(line, entry, filtering),
        Block::Transition(transition) => transition_block(transition),
    };

    let mut row = VNode::element("div")
        .with_class("block")
        .with_key(id.as_str())
        .with_attr("data-block-id", id.as_str())
        .with_attr("data-kind", kind_name(block))
        .with_child(controls())
        .with_child(content);

    if active == Some(id) {
        row = row.with_attr("data-active", "true");
    }

    row
}

fn kind_name(block: &Block) -> &'static str {
    match block {
        Block::SceneHeading(_) => "scene-heading",
        Block::Action(_) => "action",
        Block::DialogueLine(_) => "dialogue",
        Block::Transition(_) => "transition",
    }
}

fn controls() -> VNode {
    let button = |action: &str, label: &str| {
        VNode::element("button")
            .with_attr("type", "button")
            .with_attr("data-action", action)
            .with_child(VNode::text(label))
    };

    VNode::element("div")
        .with_class("block-controls")
        .with_attr("data-reveal", "hover focus")
        .with_child(button("move-up", "↑"))
        .with_child(button("move-down", "↓"))
        .with_child(button("delete", "Delete"))
}

fn input(field: &str, value: &str, placeholder: &str) -> VNode {
    VNode::element("input")
        .with_attr("type", "text")
        .with_attr("data-field", field)
        .with_attr("value", value)
        .with_attr("placeholder", placeholder)
}

fn textarea(field: &str, value: &str, placeholder: &str) -> VNode {
    VNode::element("textarea")
        .with_attr("data-field", field)
        .with_attr("value", value)
        .with_attr("placeholder", placeholder)
        .with_attr("rows", textarea_rows(value).to_string())
        .with_attr("data-autogrow", "true")
        .with_attr("data-preserve-scroll", "true")
        .with_style("white-space", "pre-wrap")
        .with_style("min-height", "24px")
        .with_style("resize", "none")
        .with_style("overflow", "hidden")
}

fn highlighted(segments: Option<&[Segment<'_>]>, fallback: &str) -> Vec<VNode> {
    match segments {
        Some(segments) => segments
            .iter()
            .map(|segment| match segment {
                Segment::Plain(text) => VNode::text(*text),
                Segment::Match(text) => VNode::element("mark")
                    .with_class("search-hit")
                    .with_child(VNode::text(*text)),
            })
            .collect(),
        None => vec![VNode::text(fallback)],
    }
}

fn read_only(field: &str, segments: Option<&[Segment<'_>]>, fallback: &str) -> VNode {
    VNode::element("div")
        .with_class("read-only")
        .with_attr("data-field", field)
        .with_style("white-space", "pre-wrap")
        .with_style("text-align", "left")
        .with_children(highlighted(segments, fallback))
}

fn scene_heading(scene: &SceneHeading) -> VNode {
    VNode::element("div")
        .with_class("scene-heading")
        .with_style("display", "flex")
        .with_style("font-weight", "700")
        .with_child(
            input("sceneNo", &scene.scene_label, "SCENE: 1")
                .with_style("max-width", "33%")
                .with_style("text-transform", "uppercase"),
        )
        .with_child(
            input("location", &scene.location, "LOCATION")
                .with_style("text-align", "center")
                .with_style("text-transform", "uppercase"),
        )
        .with_child(
            input("time", &scene.time_of_day, "INT/EXT/DAY")
                .with_style("text-align", "right")
                .with_style("padding-right", TIME_RIGHT_PAD)
                .with_style("text-transform", "uppercase"),
        )
}

fn action_block(action: &Action, entry: &BlockHighlights<'_>, filtering: bool) -> VNode {
    let field = if filtering {
        read_only("text", entry.field(Field::Text), &action.text)
    } else {
        textarea("text", &action.text, "Action…").with_style("text-align", "left")
    };

    VNode::element("div")
        .with_class("action")
        .with_style("width", ACTION_WIDTH)
        .with_child(field)
}

fn dialogue_block(line: &DialogueLine, entry: &BlockHighlights<'_>, filtering: bool) -> VNode {
    let dialogue = if filtering {
        read_only("dialogue", entry.field(Field::Dialogue), &line.dialogue)
    } else {
        textarea("dialogue", &line.dialogue, "Dialogue…").with_style("text-align", "left")
    };

    VNode::element("div")
        .with_class("dialogue")
        .with_style("width", DIALOGUE_WIDTH)
        .with_style("margin", "0 auto")
        .with_style("display", "grid")
        .with_style("grid-template-columns", DIALOGUE_COLUMNS)
        .with_child(
            input("character", &line.character, "Character")
                .with_style("text-align", "right")
                .with_style("font-weight", "700"),
        )
        .with_child(
            VNode::element("div")
                .with_class("separator")
                .with_style("font-weight", "700")
                .with_child(VNode::text(DIALOGUE_SEPARATOR)),
        )
        .with_child(dialogue)
}

fn transition_block(transition: &Transition) -> VNode {
    input("text", &transition.text, "CUT TO")
        .with_class("transition")
        .with_style("width", "100%")
        .with_style("text-align", "center")
        .with_style("font-weight", "700")
        .with_style("text-transform", "uppercase")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptpad_analysis::filter;

    fn by_field<'a>(row: &'a VNode, field: &str) -> &'a VNode {
        row.find(&|n| n.attr("data-field") == Some(field))
            .unwrap_or_else(|| panic!("no field {}", field))
    }

    #[test]
    fn test_paginate_chunks_and_never_empty() {
        let items: Vec<u32> = (0..32).collect();
        let pages = paginate(&items, 15);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 15);
        assert_eq!(pages[2].len(), 2);

        let none: Vec<u32> = Vec::new();
        let pages = paginate(&none, 15);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());

        assert_eq!(paginate(&items, 0).len(), 32);
    }

    #[test]
    fn test_textarea_rows_total_over_empty_input() {
        assert_eq!(textarea_rows(""), 1);
        assert_eq!(textarea_rows("one"), 1);
        assert_eq!(textarea_rows("one\ntwo\n"), 3);
    }

    #[test]
    fn test_rows_are_keyed_by_block_id() {
        let blocks = vec![Block::action("a"), Block::transition("CUT TO")];
        let view = render_screen(&filter(&blocks, ""), None, &ScreenOptions::default());

        let keys: Vec<&str> = view.rows().filter_map(VNode::key).collect();
        assert_eq!(keys, vec![blocks[0].id().as_str(), blocks[1].id().as_str()]);
        assert!(view.banner.is_none());
    }

    #[test]
    fn test_editable_without_query() {
        let blocks = vec![Block::action("The door"), Block::dialogue("JOHN", "Hi")];
        let view = render_screen(&filter(&blocks, ""), None, &ScreenOptions::default());
        let rows: Vec<&VNode> = view.rows().collect();

        assert_eq!(by_field(rows[0], "text").tag(), Some("textarea"));
        assert_eq!(by_field(rows[1], "dialogue").tag(), Some("textarea"));
        assert_eq!(by_field(rows[1], "character").attr("value"), Some("JOHN"));
    }

    #[test]
    fn test_read_only_highlights_while_filtering() {
        let blocks = vec![Block::action("The door creaks"), Block::dialogue("JOHN", "door?")];
        let view = render_screen(&filter(&blocks, "door"), None, &ScreenOptions::default());
        let rows: Vec<&VNode> = view.rows().collect();

        let action = by_field(rows[0], "text");
        assert_eq!(action.tag(), Some("div"));
        assert_eq!(action.text_content(), "The door creaks");
        let mark = action.find(&|n| n.tag() == Some("mark")).unwrap();
        assert_eq!(mark.text_content(), "door");

        let dialogue = by_field(rows[1], "dialogue");
        assert_eq!(dialogue.tag(), Some("div"));

        let banner = view.banner.unwrap();
        assert_eq!(banner.result_count, 2);
        assert_eq!(banner.message(), "Found 2 results for \"door\"");
    }

    #[test]
    fn test_banner_messages() {
        let none = SearchBanner { query: "x".into(), result_count: 0 };
        assert_eq!(none.message(), "No results found for \"x\"");
        let one = SearchBanner { query: "x".into(), result_count: 1 };
        assert_eq!(one.message(), "Found 1 result for \"x\"");
    }

    #[test]
    fn test_controls_always_present() {
        let blocks = vec![Block::scene("S", "L", "T")];
        let view = render_screen(&filter(&blocks, ""), None, &ScreenOptions::default());
        let row = view.rows().next().unwrap();

        for action in ["move-up", "move-down", "delete"] {
            assert!(row.find(&|n| n.attr("data-action") == Some(action)).is_some());
        }
    }

    #[test]
    fn test_scene_fields_uppercase_for_display() {
        let blocks = vec![Block::scene("scene: 1", "kitchen", "night")];
        let view = render_screen(&filter(&blocks, ""), None, &ScreenOptions::default());
        let row = view.rows().next().unwrap();

        for field in ["sceneNo", "location", "time"] {
            assert_eq!(by_field(row, field).style("text-transform"), Some("uppercase"));
        }
        assert_eq!(by_field(row, "location").attr("value"), Some("kitchen"));
    }

    #[test]
    fn test_active_marker_and_page_geometry() {
        let blocks = vec![Block::action("a"), Block::action("b")];
        let active = blocks[1].id().clone();
        let view = render_screen(&filter(&blocks, ""), Some(&active), &ScreenOptions::default());

        let marked: Vec<&VNode> = view
            .rows()
            .filter(|r| r.attr("data-active") == Some("true"))
            .collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].key(), Some(active.as_str()));

        let page = &view.pages[0];
        assert_eq!(page.style("width"), Some("8.5in"));
        assert_eq!(page.style("min-height"), Some("9in"));
        assert_eq!(page.style("padding-left"), Some("1.5in"));
        assert_eq!(page.style("font-size"), Some("12pt"));
    }
}

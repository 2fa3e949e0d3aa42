use scriptpad_model::BlockId;
use serde::Serialize;

/// Presentation side effect requested by the document.
///
/// The core never touches a view; the host drains these after each
/// operation and applies them. Applying the same intent twice is harmless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum NavigationIntent {
    /// Move input focus into the block's first field
    Focus { block_id: BlockId },
    /// Scroll the block into view, centered
    Reveal { block_id: BlockId },
    /// Close the scene navigation panel
    ClosePanel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let intent = NavigationIntent::Reveal {
            block_id: BlockId::from("b1"),
        };
        assert_eq!(
            serde_json::to_string(&intent).unwrap(),
            r#"{"type":"reveal","blockId":"b1"}"#
        );
        assert_eq!(
            serde_json::to_string(&NavigationIntent::ClosePanel).unwrap(),
            r#"{"type":"closePanel"}"#
        );
    }
}

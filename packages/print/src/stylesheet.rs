use crate::compiler::PRINT_CONTAINER_ID;
use scriptpad_model::PageGeometry;

/// Gutter kept clear on both sides of the vertical center, in inches
pub const MID_GAP_IN: f64 = 0.15;

/// Right padding of the scene time column
const TIME_RIGHT_PAD_REM: f64 = 4.5;

/// Vertical rhythm between consecutive print blocks
const BLOCK_SPACING_EM: f64 = 0.9;

/// Print stylesheet for `page`.
///
/// Screen media hides the print container; print media hides everything
/// else and lays the container out against the physical page.
pub fn print_stylesheet(page: &PageGeometry) -> String {
    let m = &page.margins_in;
    let id = PRINT_CONTAINER_ID;

    let rules = [
        format!("@media screen {{ #{id} {{ display: none !important; }} }}"),
        "@media print {".to_string(),
        format!(
            "  @page {{ size: {}in {}in; margin: {}in {}in {}in {}in; }}",
            page.width_in, page.height_in, m.top, m.right, m.bottom, m.left
        ),
        "  html, body { margin: 0 !important; padding: 0 !important; background: #fff !important; }"
            .to_string(),
        "  * { -webkit-print-color-adjust: exact; print-color-adjust: exact; box-sizing: border-box; }"
            .to_string(),
        format!("  :root {{ --mid-gap: {}in; }}", MID_GAP_IN),
        "  body * { visibility: hidden !important; }".to_string(),
        format!("  #{id}, #{id} * {{ visibility: visible !important; }}"),
        format!("  #{id} {{ position: absolute !important; left: 0; top: 0; }}"),
        format!(
            "  #{id} {{ font-family: {} !important; font-size: {}pt !important; line-height: {} !important; }}",
            page.font_family, page.font_size_pt, page.line_height
        ),
        "  .pb { margin: 0 !important; padding: 0 !important; }".to_string(),
        format!("  .pb + .pb {{ margin-top: {}em !important; }}", BLOCK_SPACING_EM),
        "  .p-scene { font-weight: 700; text-transform: uppercase; display: grid; grid-template-columns: 33% 34% 33%; }"
            .to_string(),
        "  .p-scene > .l { text-align: left; }".to_string(),
        "  .p-scene > .c { text-align: center; }".to_string(),
        format!(
            "  .p-scene > .r {{ text-align: right; padding-right: {}rem; }}",
            TIME_RIGHT_PAD_REM
        ),
        "  .p-action { width: calc(50% - var(--mid-gap)); white-space: pre-wrap; }".to_string(),
        "  .p-dialogue { width: 90%; margin-left: auto; margin-right: auto; display: grid; grid-template-columns: calc(50% - var(--mid-gap)) max-content calc(50% - var(--mid-gap)); gap: .5rem; align-items: start; }"
            .to_string(),
        "  .p-dialogue .char, .p-dialogue .sep { font-weight: 700; }".to_string(),
        "  .p-dialogue .char { text-align: right; }".to_string(),
        "  .p-dialogue .txt { white-space: pre-wrap; }".to_string(),
        "  .p-trans { text-align: center; font-weight: 700; text-transform: uppercase; margin: 1em 0 1.2em 0 !important; }"
            .to_string(),
        "  .p-allow-break { break-inside: auto; page-break-inside: auto; }".to_string(),
        "}".to_string(),
    ];

    let mut css = rules.join("\n");
    css.push('\n');
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use scriptpad_model::Margins;

    #[test]
    fn test_page_rule_uses_geometry() {
        let css = print_stylesheet(&PageGeometry::default());
        assert!(css.contains("@page { size: 8.5in 11in; margin: 1in 1in 1in 1.5in; }"));
        assert!(css.contains("font-size: 12pt"));
        assert!(css.contains("line-height: 1.15"));
    }

    #[test]
    fn test_custom_geometry() {
        let page = PageGeometry {
            width_in: 8.27,
            height_in: 11.69,
            margins_in: Margins {
                top: 0.5,
                right: 0.75,
                bottom: 0.5,
                left: 1.0,
            },
            font_family: "monospace".to_string(),
            font_size_pt: 11.0,
            line_height: 1.2,
        };
        let css = print_stylesheet(&page);
        assert!(css.contains("size: 8.27in 11.69in; margin: 0.5in 0.75in 0.5in 1in;"));
        assert!(css.contains("font-family: monospace !important"));
    }

    #[test]
    fn test_action_never_crosses_center_and_nothing_clips() {
        let css = print_stylesheet(&PageGeometry::default());
        assert!(css.contains(".p-action { width: calc(50% - var(--mid-gap));"));
        assert!(css.contains("break-inside: auto"));
        assert!(css.contains("--mid-gap: 0.15in"));
        assert!(css.contains(".pb + .pb { margin-top: 0.9em !important; }"));
    }
}

//! Browser tests for the JS-facing surface

#![cfg(target_arch = "wasm32")]

use scriptpad_wasm::ScriptEditor;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn test_unknown_kind_is_an_error() {
    let mut editor = ScriptEditor::new(None, None).unwrap();
    assert!(editor.add_block("montage").is_err());
    assert!(editor.add_block("t").is_ok());
}

#[wasm_bindgen_test]
fn test_invalid_inputs_are_errors() {
    assert!(ScriptEditor::new(None, Some("{\"blocksPerPage\": 0}".to_string())).is_err());

    let mut editor = ScriptEditor::new(None, None).unwrap();
    assert!(editor.update_block("any", "not json").is_err());
    assert!(editor.apply_mutation("{\"op\":\"explode\"}").is_err());
}

#[wasm_bindgen_test]
fn test_restore_reports_outcome() {
    let mut editor = ScriptEditor::new(None, None).unwrap();
    assert_eq!(editor.restore("{}").unwrap(), "{\"status\":\"notAList\"}");
    assert_eq!(
        editor.restore("[]").unwrap(),
        "{\"status\":\"restored\",\"blocks\":0,\"skipped\":0,\"reissued\":0}"
    );
}

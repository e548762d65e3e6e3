//! TEXT escaping and parameter quoting.

use json2ical_core::escape::{escape_text, quote_param};

#[test]
fn plain_text_is_unchanged() {
    assert_eq!(escape_text("Team sync"), "Team sync");
    assert_eq!(escape_text(""), "");
}

#[test]
fn each_special_character_is_escaped() {
    assert_eq!(escape_text("\\"), "\\\\");
    assert_eq!(escape_text(";"), "\\;");
    assert_eq!(escape_text(","), "\\,");
    assert_eq!(escape_text("\n"), "\\n");
}

#[test]
fn mixed_text() {
    assert_eq!(
        escape_text("Room 4, floor 2; bring C:\\slides\nthanks"),
        "Room 4\\, floor 2\\; bring C:\\\\slides\\nthanks"
    );
}

#[test]
fn colon_quote_and_control_characters_pass_through() {
    assert_eq!(escape_text("a:b\"c\td\re"), "a:b\"c\td\re");
}

#[test]
fn unicode_passes_through() {
    assert_eq!(escape_text("Café, 東京"), "Café\\, 東京");
}

#[test]
fn escaping_is_not_idempotent() {
    let once = escape_text("a,b");
    let twice = escape_text(&once);
    assert_eq!(once, "a\\,b");
    assert_eq!(twice, "a\\\\\\,b");
}

#[test]
fn param_without_special_characters_is_bare() {
    assert_eq!(quote_param("Jane Doe"), "Jane Doe");
    assert_eq!(quote_param("America/New_York"), "America/New_York");
}

#[test]
fn param_with_delimiters_is_quoted() {
    assert_eq!(quote_param("Doe, Jane"), "\"Doe, Jane\"");
    assert_eq!(quote_param("a;b"), "\"a;b\"");
    assert_eq!(quote_param("x:y"), "\"x:y\"");
}

#[test]
fn param_drops_dquote_and_flattens_newlines() {
    assert_eq!(quote_param("The \"Boss\""), "The Boss");
    assert_eq!(quote_param("line1\nline2"), "line1 line2");
}

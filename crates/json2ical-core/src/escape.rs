//! Escaping for iCalendar property values and parameter values.

/// Escape free text for a TEXT property value (SUMMARY, DESCRIPTION, LOCATION).
///
/// Exactly four characters are rewritten: `\` → `\\`, `;` → `\;`, `,` → `\,`
/// and LF → `\n`. Everything else, control characters included, passes through.
///
/// Not idempotent: escaping twice double-escapes. Call once, when writing.
///
/// ```
/// use json2ical_core::escape::escape_text;
/// assert_eq!(escape_text("a;b,c\\d\ne"), "a\\;b\\,c\\\\d\\ne");
/// ```
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a parameter value (CN, TZID).
///
/// RFC 5545 has no escape mechanism for parameters: DQUOTE cannot appear at
/// all, and a value containing `:`, `;` or `,` must be quoted. Line breaks
/// become spaces so the value stays on one content line.
pub fn quote_param(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != '"')
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if cleaned.contains([':', ';', ',']) {
        format!("\"{}\"", cleaned)
    } else {
        cleaned
    }
}

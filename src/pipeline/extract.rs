//! Resilient JSON extraction from raw model output.
//!
//! The model is asked for exactly one raw JSON object but routinely wraps
//! it in prose or markdown fences, and long responses can arrive truncated.
//! The extractor scans for the first balanced top-level object with a small
//! character state machine, and falls back to a last-brace heuristic when
//! the balance never closes. The fallback trades strictness for resilience
//! against truncated output: the candidate it returns may still fail to
//! parse downstream, which is the accepted outcome.

/// Return the substring containing the first top-level balanced JSON
/// object, or `None` if the text holds no extractable structure.
///
/// Brace depth is only counted outside string literals; an unescaped `"`
/// toggles the in-string flag, and a backslash escapes exactly the next
/// character. When the scan ends with the depth still open (truncated
/// response), the substring from the first `{` to the last `}` in the
/// text is returned instead, if such a brace exists.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (offset, ch) in text[start..].char_indices() {
        if !escape && ch == '"' {
            in_string = !in_string;
        }

        if !in_string {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = start + offset + ch.len_utf8();
                        return Some(&text[start..end]);
                    }
                }
                _ => {}
            }
        }

        // A backslash escapes the next character unless it is itself
        // escaped.
        escape = ch == '\\' && !escape;
    }

    // Truncated response: settle for everything up to the last `}`.
    let last = text.rfind('}')?;
    if last > start {
        Some(&text[start..=last])
    } else {
        None
    }
}

/// Strip the formatting artifacts models add despite "JSON only"
/// instructions: a leading byte-order-mark and Markdown code fences
/// (```json ... ``` or ``` ... ```), wherever they appear.
///
/// Idempotent: sanitizing already-clean text is a no-op.
pub fn sanitize(text: &str) -> String {
    let text = text.trim_start_matches('\u{feff}');
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Extract the first balanced `{...}` span, skipping any surrounding
/// prose. Brace counting ignores braces inside JSON strings, including
/// escaped quotes.
pub fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_fences_with_language_tag() {
        let raw = "```json\n{\"a\":1}\n```";
        assert_eq!(sanitize(raw), "{\"a\":1}");
    }

    #[test]
    fn sanitize_strips_bare_fences() {
        let raw = "```\n{\"a\":1}\n```\n";
        assert_eq!(sanitize(raw), "{\"a\":1}");
    }

    #[test]
    fn sanitize_strips_leading_bom() {
        let raw = "\u{feff}{\"a\":1}";
        assert_eq!(sanitize(raw), "{\"a\":1}");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for raw in [
            "{\"a\":1}",
            "```json\n{\"a\":1}\n```",
            "\u{feff}```\n{\"a\": [1, 2]}\n```",
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn extract_object_isolates_json_from_prose() {
        let raw = "Here is the result: {\"recommendation\":\"HOLD\"} Hope this helps!";
        assert_eq!(extract_object(raw), Some("{\"recommendation\":\"HOLD\"}"));
    }

    #[test]
    fn extract_object_handles_nested_braces() {
        let raw = "x {\"a\":{\"b\":{}}} y {\"c\":2}";
        assert_eq!(extract_object(raw), Some("{\"a\":{\"b\":{}}}"));
    }

    #[test]
    fn extract_object_ignores_braces_inside_strings() {
        let raw = "{\"note\":\"closing } inside\",\"v\":1} trailing";
        assert_eq!(
            extract_object(raw),
            Some("{\"note\":\"closing } inside\",\"v\":1}")
        );
    }

    #[test]
    fn extract_object_ignores_escaped_quotes() {
        let raw = "{\"note\":\"say \\\"}\\\" loud\",\"v\":1}";
        assert_eq!(extract_object(raw), Some(raw));
    }

    #[test]
    fn extract_object_returns_none_without_json() {
        assert_eq!(extract_object("not json at all"), None);
        assert_eq!(extract_object("unbalanced { forever"), None);
    }
}

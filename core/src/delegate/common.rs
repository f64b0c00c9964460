use regex::Regex;

/// Finds the `}` closing the first type whose declaration contains `anchor`.
///
/// Counts braces from the first `{` after `anchor`. This is a plain depth
/// counter: braces inside string literals or comments throw it off.
pub(crate) fn find_closing_brace(content: &str, anchor: &str) -> Option<usize> {
    let start = content.find(anchor)?;
    let open = start + content[start..].find('{')?;

    let mut depth = 1usize;
    for (offset, byte) in content.as_bytes()[open + 1..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1 + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Inserts `text` right after the first match of `re`. Returns false when nothing matched.
pub(crate) fn insert_after(content: &mut String, re: &Regex, text: &str) -> bool {
    let Some(pos) = re.find(content.as_str()).map(|m| m.end()) else {
        return false;
    };
    content.insert_str(pos, text);
    true
}

/// True when any of `patterns` matches.
pub(crate) fn matches_any(content: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(content))
}

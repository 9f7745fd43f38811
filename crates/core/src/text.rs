//! Small text utilities shared across crates.

/// Truncates a string to the given maximum byte length at a char boundary.
///
/// Used to keep error messages and traces bounded when they embed response bodies.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}

/// Strip a markdown code fence wrapping a chat response body.
///
/// Handles `` ```json ... ``` ``, bare `` ``` ... ``` ``, and other language tags.
#[must_use]
pub fn strip_markdown_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") {
        let without_prefix = trimmed.strip_prefix("```").unwrap_or(trimmed);
        let without_suffix = without_prefix.strip_suffix("```").unwrap_or(without_prefix);
        return without_suffix
            .split_once('\n')
            .map_or_else(|| without_suffix.trim(), |(_, rest)| rest.trim());
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_shorter_than_limit() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_at_limit() {
        assert_eq!(truncate("hello world", 5), "hello");
    }

    #[test]
    fn truncate_respects_char_boundary() {
        // each hangul syllable is 3 bytes
        assert_eq!(truncate("잘한 점", 4), "잘");
    }

    #[test]
    fn strips_json_fence() {
        let input = "```json\n{\"개선점\": \"시간관리\"}\n```";
        assert_eq!(strip_markdown_fence(input), "{\"개선점\": \"시간관리\"}");
    }

    #[test]
    fn strips_plain_fence() {
        let input = "```\n{\"k\": \"v\"}\n```";
        assert_eq!(strip_markdown_fence(input), "{\"k\": \"v\"}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_markdown_fence("  plain text  "), "plain text");
    }

    #[test]
    fn strips_fence_with_surrounding_whitespace() {
        let input = "  ```json\n{\"k\": \"v\"}\n```  ";
        assert_eq!(strip_markdown_fence(input), "{\"k\": \"v\"}");
    }
}

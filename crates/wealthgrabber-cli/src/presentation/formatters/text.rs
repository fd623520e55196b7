/// Cut `text` to `max_len` characters, marking the cut with `...`
pub fn truncate(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();

    if char_count <= max_len {
        text.to_string()
    } else if max_len <= 3 {
        text.chars().take(max_len).collect()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// A line of `width` copies of `c`
pub fn rule(c: char, width: usize) -> String {
    std::iter::repeat_n(c, width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("TFSA", 10), "TFSA");
        assert_eq!(truncate("Private Credit Holdings", 10), "Private...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_rule() {
        assert_eq!(rule('=', 3), "===");
        assert_eq!(rule('-', 0), "");
    }
}

use chrono::DateTime;

/// Shortens a signature or address to its ends for display. Counts
/// characters, not bytes, so arbitrary input cannot split a code point.
pub(crate) fn shorten(id: &str, len: usize) -> String {
    let total = id.chars().count();
    if total <= 2 * len {
        return id.to_string();
    }
    let head: String = id.chars().take(len).collect();
    let tail: String = id.chars().skip(total - len).collect();
    format!("{head}...{tail}")
}

pub(crate) fn truncate_question(question: &str, len: usize) -> String {
    match question.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &question[..idx]),
        None => question.to_string(),
    }
}

/// Renders a string-encoded epoch timestamp. The program writes the real
/// value on creation; until then the account holds a zero placeholder.
pub(crate) fn format_timestamp(epoch: &str) -> String {
    let secs: i64 = epoch.parse().unwrap_or(0);
    if secs == 0 {
        return "pending".to_string();
    }
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => epoch.to_string(),
    }
}

pub(crate) fn vote_bar(count: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (count as usize * width).div_ceil(max as usize)
    };
    let mut bar = "\u{2588}".repeat(filled);
    bar.push_str(&" ".repeat(width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        assert_eq!(shorten("abcdefghij", 3), "abc...hij");
        assert_eq!(shorten("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_shorten_multibyte() {
        assert_eq!(shorten("éééééééééé", 3), "ééé...ééé");
        assert_eq!(shorten("éééééé", 3), "éééééé");
    }

    #[test]
    fn test_truncate_question() {
        assert_eq!(truncate_question("Favorite color?", 8), "Favorite...");
        assert_eq!(truncate_question("Q?", 8), "Q?");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("0000000000"), "pending");
        assert_eq!(format_timestamp("garbage"), "pending");
        assert_eq!(format_timestamp("1700000000"), "2023-11-14 22:13:20 UTC");
    }

    #[test]
    fn test_vote_bar() {
        assert_eq!(vote_bar(0, 0, 4), "    ");
        assert_eq!(vote_bar(2, 4, 4), "\u{2588}\u{2588}  ");
        assert_eq!(vote_bar(4, 4, 4), "\u{2588}\u{2588}\u{2588}\u{2588}");
    }
}

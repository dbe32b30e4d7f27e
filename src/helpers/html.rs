//! HTML helper functions

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Count words in plain text (CJK characters count one each)
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c > '\u{4E00}' && c < '\u{9FFF}' {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
        }
    }

    count
}

/// Estimated reading time in whole minutes, rounded up
pub fn reading_time(words: usize, words_per_minute: usize) -> usize {
    let wpm = words_per_minute.max(1);
    words.div_ceil(wpm)
}

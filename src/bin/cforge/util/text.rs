/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push('…');
    out
}

pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_triplet(v: [f64; 3], precision: usize) -> String {
    format!(
        "{:.p$}  {:.p$}  {:.p$}",
        v[0],
        v[1],
        v[2],
        p = precision
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_short_text() {
        assert_eq!(wrap("unexpected end", 20), vec!["unexpected end"]);
    }

    #[test]
    fn wrap_long_text() {
        assert_eq!(
            wrap("malformed number at line 7", 12),
            vec!["malformed", "number at", "line 7"]
        );
    }

    #[test]
    fn wrap_empty_text() {
        assert_eq!(wrap("   ", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_keeps_oversized_word() {
        assert_eq!(wrap("a verylongword b", 4), vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn truncate_short_and_exact() {
        assert_eq!(truncate("grid", 10), "grid");
        assert_eq!(truncate("grid", 4), "grid");
    }

    #[test]
    fn truncate_long() {
        assert_eq!(truncate("electron density", 8), "electro…");
        assert_eq!(truncate("density", 1), "…");
        assert_eq!(truncate("density", 0), "");
    }

    #[test]
    fn truncate_unicode() {
        assert_eq!(truncate("Ångström units", 5), "Ångs…");
    }

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_250_000), "1,250,000");
    }

    #[test]
    fn formats_triplets() {
        assert_eq!(format_triplet([0.2, -1.5, 3.0], 2), "0.20  -1.50  3.00");
    }
}

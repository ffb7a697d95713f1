//! Greedy line breaking and ellipsis fitting, independent of any backend.

const ELLIPSIS: char = '…';

/// Breaks `text` into lines no wider than `max_width`.
///
/// Breaks happen on whitespace; a word wider than the line is split by
/// character. Explicit newlines always break, and empty lines between them
/// are kept so `"a\n\nb"` yields three lines. Trailing newlines are ignored.
pub fn wrap_lines(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let text = text.trim_end_matches(['\n', '\r']);
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut has_words = false;

        for word in paragraph.split_whitespace() {
            has_words = true;
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if measure(&candidate) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            if measure(word) <= max_width {
                line = word.to_string();
            } else {
                for ch in word.chars() {
                    let mut next = line.clone();
                    next.push(ch);
                    if !line.is_empty() && measure(&next) > max_width {
                        lines.push(std::mem::take(&mut line));
                        line.push(ch);
                    } else {
                        line = next;
                    }
                }
            }
        }

        if !line.is_empty() || !has_words {
            lines.push(line);
        }
    }
    lines
}

/// Keeps at most `max_lines` lines. When lines are dropped, the last kept
/// line is shortened until it fits `max_width` with a trailing ellipsis.
pub fn fit_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let mut base = last.trim_end().to_string();
        loop {
            let candidate = format!("{}{}", base, ELLIPSIS);
            if base.is_empty() || measure(&candidate) <= max_width {
                *last = candidate;
                break;
            }
            base.pop();
            base = base.trim_end().to_string();
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every character is 1 unit wide.
    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    #[test]
    fn wraps_on_whitespace() {
        let lines = wrap_lines("alpha beta gamma", 11.0, chars);
        assert_eq!(lines, ["alpha beta", "gamma"]);
    }

    #[test]
    fn splits_long_words() {
        let lines = wrap_lines("abcdefghij", 4.0, chars);
        assert_eq!(lines, ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_blank_lines_between_paragraphs() {
        let lines = wrap_lines("one\n\ntwo\n", 10.0, chars);
        assert_eq!(lines, ["one", "", "two"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_lines("", 10.0, chars).is_empty());
        assert!(wrap_lines("   \n ", 10.0, chars).is_empty());
    }

    #[test]
    fn fit_adds_ellipsis_only_when_truncating() {
        let lines = vec!["abcd".to_string(), "efgh".to_string()];
        assert_eq!(fit_lines(lines.clone(), 2, 4.0, chars), lines);

        let fitted = fit_lines(lines, 1, 4.0, chars);
        assert_eq!(fitted, ["abc…"]);
    }

    #[test]
    fn fit_to_zero_lines() {
        let lines = vec!["abcd".to_string()];
        assert!(fit_lines(lines, 0, 4.0, chars).is_empty());
    }
}

use crate::fonts::Font;

/// Width-aware word wrap. Explicit newlines start new lines (a blank source
/// line survives as an empty output line); within a line, breaks happen
/// between words so no output line measures wider than `max_width`, except a
/// single character that alone exceeds it. A word wider than the budget is
/// hard-broken mid-word.
///
/// Pure function of its inputs: rewrapping the same text yields the same
/// lines.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        if source_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if font.text_width(&candidate, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if font.text_width(word, size) <= max_width {
                current = word.to_string();
            } else {
                current = break_long_word(word, font, size, max_width, &mut lines);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Hard-break a word that alone exceeds the line width. Full pieces are
/// pushed onto `lines`; the trailing remainder is returned as the new
/// current line.
fn break_long_word(
    word: &str,
    font: Font,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
) -> String {
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if font.text_width(&piece, size) > max_width && piece.chars().count() > 1 {
            let overflow = piece.pop().unwrap();
            lines.push(std::mem::take(&mut piece));
            piece.push(overflow);
        }
    }
    piece
}

/// Clip to at most `budget` characters. No ellipsis; the clipped tail is
/// simply dropped.
pub(crate) fn truncate_chars(s: &str, budget: usize) -> &str {
    match s.char_indices().nth(budget) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

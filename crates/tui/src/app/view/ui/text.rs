use crate::app::util::text::char_width;

pub(super) fn visual_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

pub(super) fn truncate_to_width(text: &str, width: usize) -> String {
    if visual_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let target = width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > target {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Keeps the cursor of a single-line field visible: returns the slice of `chars` that fits
/// in `width` columns and the cursor column inside it.
pub(super) fn scroll_to_cursor(chars: &[char], cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let cursor = cursor.min(chars.len());
    let mut start = 0;
    while start < cursor
        && chars[start..cursor].iter().copied().map(char_width).sum::<usize>() >= width
    {
        start += 1;
    }
    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = char_width(*ch);
        if used + w > width {
            break;
        }
        visible.push(*ch);
        used += w;
    }
    let cursor_col = chars[start..cursor].iter().copied().map(char_width).sum();
    (visible, cursor_col)
}

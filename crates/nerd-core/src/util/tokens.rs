//! Text scanning helpers shared by the extractors.
//!
//! These are pure functions over `&str` that return borrowed slices of the
//! input. None of them allocate beyond the returned `Vec`, and none of them
//! fail: an absent pattern simply yields nothing.

/// Splits text into whitespace-separated tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Returns the content of the first `open ... close` block (may span lines).
pub fn block_between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let start = text.find(open)? + open.len();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

/// Returns the content of every non-overlapping `open ... close` block.
///
/// Blocks without a closing marker are ignored.
pub fn blocks_between<'a>(text: &'a str, open: &str, close: &str) -> Vec<&'a str> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(open) {
        let start = pos + found + open.len();
        let Some(len) = text[start..].find(close) else {
            break;
        };
        blocks.push(&text[start..start + len]);
        pos = start + len + close.len();
    }

    blocks
}

/// Returns every value of `tag>value</tag>` in document order.
///
/// Matching starts at `tag>` rather than `<tag>` so that namespaced or
/// attribute-less variants of the opening tag are accepted as well.
pub fn tag_values<'a>(text: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("{tag}>");
    let close = format!("</{tag}>");
    blocks_between(text, &open, &close)
}

/// Returns the first `tag>value<` where the value does not cross a line break.
pub fn first_inline_value<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("{tag}>");
    let mut pos = 0;

    while let Some(found) = text[pos..].find(&open) {
        let start = pos + found + open.len();
        let rest = &text[start..];
        let end = rest.find('<')?;
        let value = &rest[..end];
        if !value.contains('\n') {
            return Some(value);
        }
        pos = start;
    }

    None
}

/// Returns every span that follows `prefix` and ends right before `terminator`
/// on the same line.
///
/// `"Aggregate aggr0 (online, raid_dp)"` with prefix `"Aggregate "` and
/// terminator `" ("` yields `"aggr0"`. A prefix whose line has no terminator
/// is skipped and scanning resumes right after it.
pub fn delimited_spans<'a>(text: &'a str, prefix: &str, terminator: &str) -> Vec<&'a str> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(prefix) {
        let start = pos + found + prefix.len();
        let line_end = text[start..]
            .find('\n')
            .map(|n| start + n)
            .unwrap_or(text.len());

        match text[start..line_end].find(terminator) {
            Some(len) => {
                spans.push(&text[start..start + len]);
                pos = start + len;
            }
            None => pos = start,
        }
    }

    spans
}

/// Returns the `<tag>value</tag>` that follows each occurrence of `label`.
///
/// Used for counter dumps where a counter name is followed, possibly several
/// lines later, by its sample value. Each match consumes the text up to the
/// closing tag, so one value is never attributed to two labels.
pub fn labelled_values<'a>(text: &'a str, label: &str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let mut values = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(label) {
        let after_label = pos + found + label.len();
        let Some(open_at) = text[after_label..].find(&open) else {
            break;
        };
        let start = after_label + open_at + open.len();
        let Some(len) = text[start..].find(&close) else {
            break;
        };
        values.push(&text[start..start + len]);
        pos = start + len + close.len();
    }

    values
}

/// Token appended to a masked value in place of the hidden remainder.
pub const REDACTION_MARKER: &str = "•••";

/// Keeps the first `visible` characters of `raw` and replaces the rest with
/// [`REDACTION_MARKER`].
///
/// At least one character is always hidden, so the full value never appears in
/// the output even when it is shorter than `visible`. Empty input stays empty.
pub fn mask_identifier(raw: &str, visible: usize) -> String {
    let total = raw.chars().count();
    if total == 0 {
        return String::new();
    }
    let shown = visible.min(total - 1);
    let mut masked: String = raw.chars().take(shown).collect();
    masked.push_str(REDACTION_MARKER);
    masked
}

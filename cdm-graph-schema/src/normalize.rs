//! Hierarchical level name normalization.

/// Normalize a CDM level name to its flat snake_case form.
///
/// Trims, lowercases, and replaces internal spaces with underscores, so
/// `"Record ID"` becomes `"record_id"`. Blank cells and the literal `"nan"`
/// (a spreadsheet-export artifact) are absent entirely and yield `None`.
///
/// Normalization is idempotent: an already-normalized name passes through
/// unchanged.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    Some(trimmed.to_lowercase().replace(' ', "_"))
}

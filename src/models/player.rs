//! Player identity and roster helpers.

/// Unique identifier for a player (the display name; names are unique within a roster).
pub type PlayerId = String;

/// Built-in roster used when no players file is available and no override was applied.
pub const FALLBACK_ROSTER: [&str; 10] = [
    "Mesut", "Berk", "Mumtaz", "Ahmet", "Erdem", "Sercan", "Sezgin", "Batuhan", "Emre", "Okan",
];

/// Normalize a raw list of names into a roster: trim whitespace, drop empties,
/// dedupe while preserving first-occurrence order.
pub fn normalize_roster<I, S>(names: I) -> Vec<PlayerId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<PlayerId> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if !out.iter().any(|p| p == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// The built-in fallback roster as owned player ids.
pub fn fallback_roster() -> Vec<PlayerId> {
    FALLBACK_ROSTER.iter().map(|s| s.to_string()).collect()
}

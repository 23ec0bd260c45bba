use chrono::{SecondsFormat, Utc};

/// Current UTC time as a fixed-width RFC 3339 string.
///
/// Microsecond precision with a `Z` suffix keeps lexical and chronological
/// order identical, which history ordering relies on.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_fixed_width_utc() {
        let a = now_rfc3339();
        let b = now_rfc3339();
        assert!(a.ends_with('Z'));
        assert_eq!(a.len(), b.len());
        assert!(a <= b);
    }
}

//! Declared-field license classification.

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered classification rules; the first pattern found in the input wins.
///
/// `LGPL` must stay ahead of the generic `GPL` rule, which additionally refuses
/// a `GPL` directly preceded by `L`.
static DECLARED_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"BSD-", "BSD"),
        (r"Apache", "Apache"),
        (r"ISC", "ISC"),
        (r"MIT", "MIT"),
        (r"^WTFPL$", "WTF"),
        (r"(?i)unlicen[sc]e", "Unlicense"),
        (r"(?i)CC-BY(-\d(\.\d)*)?", "CC-BY"),
        (r"(?i)Public Domain", "Public Domain"),
        (r"LGPL(-.+)*", "LGPL"),
        (r"(^|[^L])GPL(-.+)*", "GPL"),
    ]
    .into_iter()
    .map(|(pattern, license)| (Regex::new(pattern).expect("valid license pattern"), license))
    .collect()
});

/// Map a declared license string to a canonical identifier.
///
/// Strings that match no rule are returned unchanged.
pub fn classify_declared(license: &str) -> String {
    DECLARED_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(license))
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| license.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lgpl_is_never_gpl() {
        assert_eq!(classify_declared("LGPL-3.0"), "LGPL");
        assert_eq!(classify_declared("LGPL-2.1-or-later"), "LGPL");
        assert_eq!(classify_declared("LGPL"), "LGPL");
    }

    #[test]
    fn test_gpl_variants() {
        assert_eq!(classify_declared("GPL-3.0"), "GPL");
        assert_eq!(classify_declared("GPL"), "GPL");
        assert_eq!(classify_declared("(GPL-2.0)"), "GPL");
        assert_eq!(classify_declared("AGPL-3.0"), "GPL");
    }

    #[test]
    fn test_prefixed_families() {
        assert_eq!(classify_declared("BSD-3-Clause"), "BSD");
        assert_eq!(classify_declared("BSD-2-Clause"), "BSD");
        assert_eq!(classify_declared("Apache-2.0"), "Apache");
        assert_eq!(classify_declared("Apache License, Version 2.0"), "Apache");
        assert_eq!(classify_declared("ISC"), "ISC");
        assert_eq!(classify_declared("MIT"), "MIT");
        assert_eq!(classify_declared("MIT/X11"), "MIT");
    }

    #[test]
    fn test_wtfpl_is_exact() {
        assert_eq!(classify_declared("WTFPL"), "WTF");
        assert_eq!(classify_declared("WTFPL-2.0"), "WTFPL-2.0");
    }

    #[test]
    fn test_case_insensitive_rules() {
        assert_eq!(classify_declared("unlicense"), "Unlicense");
        assert_eq!(classify_declared("UNLICENCE"), "Unlicense");
        assert_eq!(classify_declared("cc-by-4.0"), "CC-BY");
        assert_eq!(classify_declared("CC-BY-3.0"), "CC-BY");
        assert_eq!(classify_declared("public domain"), "Public Domain");
    }

    #[test]
    fn test_rule_order_decides_expressions() {
        assert_eq!(classify_declared("(MIT OR Apache-2.0)"), "Apache");
        assert_eq!(classify_declared("BSD-3-Clause OR MIT"), "BSD");
    }

    #[test]
    fn test_unmatched_passes_through() {
        assert_eq!(classify_declared("Artistic-2.0"), "Artistic-2.0");
        assert_eq!(classify_declared("UNKNOWN"), "UNKNOWN");
        assert_eq!(classify_declared("BSD"), "BSD");
    }
}

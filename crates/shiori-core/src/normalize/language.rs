/// Sentinel returned for language codes outside the lookup table.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Maps an ISO/legacy language code to its canonical short form.
///
/// The table is closed: any code not listed here, including the empty
/// string, maps to [`UNKNOWN_LANGUAGE`].
pub fn canonical_language(code: &str) -> &'static str {
    match code.trim().to_lowercase().as_str() {
        "en-us" | "en-gb" | "en-ca" | "en" | "eng" => "en",
        "fre" | "fra" => "fr",
        "spa" | "esp" => "es",
        "ger" | "deu" => "de",
        "por" => "pt",
        "zho" => "zh",
        "jpn" => "ja",
        "rus" => "ru",
        "ita" => "it",
        "grc" => "el",
        "gla" => "ga",
        "mul" => "mix",
        _ => UNKNOWN_LANGUAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_variants_collapse() {
        for code in ["en-US", "en-GB", "en-CA", "en", "eng", "  ENG  "] {
            assert_eq!(canonical_language(code), "en", "failed for code: {code}");
        }
    }

    #[test]
    fn legacy_codes() {
        for (code, expected) in [
            ("fre", "fr"),
            ("fra", "fr"),
            ("spa", "es"),
            ("esp", "es"),
            ("ger", "de"),
            ("deu", "de"),
            ("por", "pt"),
            ("zho", "zh"),
            ("jpn", "ja"),
            ("rus", "ru"),
            ("ita", "it"),
            ("grc", "el"),
            ("gla", "ga"),
            ("mul", "mix"),
        ] {
            assert_eq!(canonical_language(code), expected, "failed for code: {code}");
        }
    }

    #[test]
    fn unlisted_codes_are_unknown() {
        assert_eq!(canonical_language("klingon"), UNKNOWN_LANGUAGE);
        assert_eq!(canonical_language("nl"), UNKNOWN_LANGUAGE);
        assert_eq!(canonical_language(""), UNKNOWN_LANGUAGE);
        assert_eq!(canonical_language("   "), UNKNOWN_LANGUAGE);
    }
}

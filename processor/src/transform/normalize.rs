//! Text normalization shared by every stage that touches names.

use deunicode::deunicode;

/// Transliterate free text to its closest ASCII form ("Zoë Müller" -> "Zoe Muller").
pub fn normalize_name(name: &str) -> String {
    deunicode(name)
}

/// Team names are only trimmed; nulls become empty strings.
pub fn normalize_team_name(name: Option<&str>) -> &str {
    name.map(str::trim).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize_name("Vinícius Júnior"), "Vinicius Junior");
        assert_eq!(normalize_name("Łukasz Piszczek"), "Lukasz Piszczek");
        assert_eq!(normalize_name("Martin Ødegaard"), "Martin Odegaard");
        assert_eq!(normalize_name("Ibrahimović"), "Ibrahimovic");
    }

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(normalize_name("Harry Kane"), "Harry Kane");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_team_name_trim_only() {
        assert_eq!(normalize_team_name(Some("  Arsenal Sarandí ")), "Arsenal Sarandí");
        assert_eq!(normalize_team_name(None), "");
    }
}

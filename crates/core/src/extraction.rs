//! Placeholder extraction engine.
//!
//! Scans template markup for `{{name}}` tokens and returns the distinct
//! names in first-occurrence order. Extraction is total: any string is
//! accepted and markup without tokens simply yields an empty list.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

/// Regex pattern matching `{{name}}` tokens, where `name` is any non-empty
/// run of characters other than `}`.
pub const PLACEHOLDER_PATTERN: &str = r"\{\{([^}]+)\}\}";

/// Compiled regex for `{{placeholder}}` extraction. Compiled once, reused forever.
static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

/// Extract the distinct placeholder names referenced in `markup`.
///
/// Names are returned verbatim (no trimming) in the order they first appear.
pub fn extract_placeholders(markup: &str) -> Vec<String> {
    let names: IndexSet<&str> = PLACEHOLDER_RE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Wrap a placeholder name in its `{{...}}` marker.
pub fn placeholder_token(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_in_first_occurrence_order() {
        let markup =
            "<span>{{fecha_inicio}}</span><span>{{fecha_inicio}}</span><span>{{salario}}</span>";
        assert_eq!(extract_placeholders(markup), vec!["fecha_inicio", "salario"]);
    }

    #[test]
    fn keeps_first_occurrence_order_not_sorted() {
        let result = extract_placeholders("{{zeta}} {{alpha}} {{zeta}} {{mid}}");
        assert_eq!(result, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn no_tokens_returns_empty() {
        assert!(extract_placeholders("").is_empty());
        assert!(extract_placeholders("<p>Sin marcadores</p>").is_empty());
    }

    #[test]
    fn single_braces_are_not_tokens() {
        assert!(extract_placeholders("{nombre} and {{}}").is_empty());
    }

    #[test]
    fn unterminated_token_is_ignored() {
        assert_eq!(
            extract_placeholders("{{abierto <b>{{cerrado}}</b>"),
            vec!["abierto <b>{{cerrado"]
        );
        assert!(extract_placeholders("texto {{sin_cierre").is_empty());
    }

    #[test]
    fn names_are_not_trimmed() {
        assert_eq!(extract_placeholders("{{ nombre }}"), vec![" nombre "]);
    }

    #[test]
    fn extra_opening_brace_becomes_part_of_name() {
        assert_eq!(extract_placeholders("{{{a}}}"), vec!["{a"]);
    }

    #[test]
    fn accepts_non_ascii_and_multiline_names() {
        assert_eq!(
            extract_placeholders("{{año}} {{linea\ndos}}"),
            vec!["año", "linea\ndos"]
        );
    }

    #[test]
    fn tokens_inside_attributes_are_found() {
        let markup = r#"<span class="placeholder" data-placeholder="{{nombre}}">{{nombre}}</span>"#;
        assert_eq!(extract_placeholders(markup), vec!["nombre"]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let markup = "{{b}}{{a}}{{b}}{{c}}{{a}}";
        assert_eq!(extract_placeholders(markup), extract_placeholders(markup));
    }

    #[test]
    fn never_returns_duplicates() {
        let samples = [
            "{{x}}{{x}}{{x}}",
            "{{x}}}{{x}}",
            "{{{x}}}{{x}}",
            "}}{{y}}{{",
            "\u{0}{{\u{0}}}",
        ];
        for sample in samples {
            let names = extract_placeholders(sample);
            let unique: IndexSet<&String> = names.iter().collect();
            assert_eq!(unique.len(), names.len(), "duplicates for {sample:?}");
        }
    }

    #[test]
    fn token_round_trips_through_extraction() {
        let token = placeholder_token("salario");
        assert_eq!(token, "{{salario}}");
        assert_eq!(extract_placeholders(&token), vec!["salario"]);
    }
}

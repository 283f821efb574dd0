//! Property tests for identifier sanitizing and parsing

use proptest::prelude::*;
use umlforge::plugins::drawio::{clean_value, sanitize_identifier};

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        None => true,
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
    }
}

fn member_diagram(label: &str) -> String {
    let escaped = label
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;");
    format!(
        r#"<mxGraphModel><root><mxCell id="2" value="Box" style="swimlane;" vertex="1" parent="1"/><mxCell id="3" value="{escaped}" style="text;" vertex="1" parent="2"/></root></mxGraphModel>"#
    )
}

proptest! {
    #[test]
    fn sanitized_names_are_identifiers(raw in "\\PC*") {
        let name = sanitize_identifier(&raw);
        prop_assert!(is_identifier(&name), "not an identifier: {:?}", name);
    }

    #[test]
    fn sanitizing_is_idempotent(raw in "\\PC*") {
        let once = sanitize_identifier(&raw);
        prop_assert_eq!(sanitize_identifier(&once), once.clone());
    }

    #[test]
    fn cleaned_values_have_no_outer_whitespace(raw in "[ a-z<>/&;]{0,40}") {
        let cleaned = clean_value(&raw);
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn reparse_is_stable(label in "[-+#~]? ?[a-z]{1,8}(: ?[A-Za-z]{1,8}|\\(([a-z]{1,4}: ?[a-z]{1,4})?\\)(: ?[a-z]{1,6})?)") {
        let input = member_diagram(&label);
        let first = umlforge::parse(&input).unwrap();
        let second = umlforge::parse(&input).unwrap();
        prop_assert_eq!(first, second);
    }
}

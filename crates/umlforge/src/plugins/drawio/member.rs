//! Member text parsing
//!
//! Class boxes list one member per child cell, written in the usual UML
//! shorthand: `+ name: Type` for attributes and
//! `- name(arg: Type, ...): Return` for methods.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::database::{Attribute, Method, Parameter, Visibility};

static HTML_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

const DEFAULT_ATTRIBUTE_TYPE: &str = "String";

/// A member recovered from a cell label
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMember {
    Attribute(Attribute),
    Method(Method),
}

/// Strip HTML tags, decode the common entities and trim
pub fn clean_value(value: &str) -> String {
    let stripped = HTML_TAG_RE.replace_all(value, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // `&amp;` last so an escaped entity is not decoded twice
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Reduce `raw` to a valid identifier
///
/// Every character other than a letter, digit or underscore is removed,
/// then leading digits are dropped so the result starts with a letter or
/// underscore. The result may be empty.
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .skip_while(|c| c.is_numeric())
        .collect()
}

/// Visibility from a leading `+`, `-` or `#`
pub fn extract_visibility(raw_name: &str) -> Option<Visibility> {
    raw_name.trim_start().chars().next().and_then(Visibility::from_char)
}

/// Parse an already-cleaned member label
///
/// Text with `(` is a method, otherwise text with `:` is an attribute;
/// anything else is not a member.
pub fn parse_member(text: &str) -> Option<ParsedMember> {
    if text.contains('(') {
        Some(ParsedMember::Method(parse_method(text)))
    } else if text.contains(':') {
        Some(ParsedMember::Attribute(parse_attribute(text)))
    } else {
        trace!(text, "Label is neither attribute nor method");
        None
    }
}

/// Parse `[vis]name: Type`; visibility defaults to private
pub fn parse_attribute(text: &str) -> Attribute {
    let (raw_name, raw_type) = text.split_once(':').unwrap_or((text, ""));
    let raw_type = raw_type.trim();
    let attr_type = if raw_type.is_empty() {
        DEFAULT_ATTRIBUTE_TYPE
    } else {
        raw_type
    };

    Attribute::new(sanitize_identifier(raw_name), attr_type)
        .with_visibility(extract_visibility(raw_name).unwrap_or(Visibility::Private))
}

/// Parse `[vis]name(p: T, ...)[: Return]`; visibility defaults to public
pub fn parse_method(text: &str) -> Method {
    let (raw_name, rest) = text.split_once('(').unwrap_or((text, ""));
    let (params, after) = rest.split_once(')').unwrap_or((rest, ""));

    let mut method = Method::new(sanitize_identifier(raw_name))
        .with_visibility(extract_visibility(raw_name).unwrap_or(Visibility::Public));

    for fragment in params.split(',') {
        if let Some(param) = parse_parameter(fragment) {
            method = method.with_parameter(param);
        }
    }

    if let Some((_, return_part)) = after.split_once(':') {
        let return_type = return_part.split(')').next().unwrap_or_default().trim();
        if !return_type.is_empty() {
            method = method.with_return_type(return_type);
        }
    }

    method
}

/// Parse `name: Type`; fragments without exactly one `:` are skipped
fn parse_parameter(fragment: &str) -> Option<Parameter> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return None;
    }

    let mut parts = fragment.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(param_type), None) => Some(Parameter::new(
            sanitize_identifier(name.trim()),
            param_type.trim(),
        )),
        _ => {
            trace!(fragment, "Skipping malformed parameter");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_value_strips_html() {
        assert_eq!(clean_value("<b>Person</b>"), "Person");
        assert_eq!(clean_value("  <div>+ name: <i>String</i></div> "), "+ name: String");
        assert_eq!(clean_value("items: List&lt;String&gt;"), "items: List<String>");
        assert_eq!(clean_value("a&nbsp;b"), "a b");
        assert_eq!(clean_value("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("na-me"), "name");
        assert_eq!(sanitize_identifier("+ first name"), "firstname");
        assert_eq!(sanitize_identifier("_id$"), "_id");
        assert_eq!(sanitize_identifier("2fast"), "fast");
        assert_eq!(sanitize_identifier("prénom"), "prénom");
        assert_eq!(sanitize_identifier("---"), "");
    }

    #[test]
    fn test_attribute_defaults_to_private() {
        let attr = parse_attribute("value:int");
        assert_eq!(attr.name, "value");
        assert_eq!(attr.attr_type, "int");
        assert_eq!(attr.visibility, Visibility::Private);
    }

    #[test]
    fn test_attribute_visibility_prefixes() {
        assert_eq!(parse_attribute("+ a: int").visibility, Visibility::Public);
        assert_eq!(parse_attribute("- a: int").visibility, Visibility::Private);
        assert_eq!(parse_attribute("# a: int").visibility, Visibility::Protected);
    }

    #[test]
    fn test_attribute_empty_type_defaults_to_string() {
        let attr = parse_attribute("+ label:");
        assert_eq!(attr.name, "label");
        assert_eq!(attr.attr_type, "String");
    }

    #[test]
    fn test_attribute_splits_at_first_colon() {
        let attr = parse_attribute("map: Map<String: int>");
        assert_eq!(attr.name, "map");
        assert_eq!(attr.attr_type, "Map<String: int>");
    }

    #[test]
    fn test_method_defaults_to_public_void() {
        let method = parse_method("value()");
        assert_eq!(method.name, "value");
        assert_eq!(method.visibility, Visibility::Public);
        assert_eq!(method.return_type, "void");
        assert!(method.parameters.is_empty());
    }

    #[test]
    fn test_method_full_signature() {
        let method = parse_method("# compute(x: int, y-val: double): boolean");
        assert_eq!(method.name, "compute");
        assert_eq!(method.visibility, Visibility::Protected);
        assert_eq!(method.return_type, "boolean");
        assert_eq!(
            method.parameters,
            vec![Parameter::new("x", "int"), Parameter::new("yval", "double")]
        );
    }

    #[test]
    fn test_method_return_type_comes_after_closing_paren() {
        let method = parse_method("+ find(id: long): Person");
        assert_eq!(method.return_type, "Person");
        assert_eq!(method.parameters, vec![Parameter::new("id", "long")]);
    }

    #[test]
    fn test_malformed_parameters_are_skipped() {
        let method = parse_method("- f(a: int, broken, b: c: d, : String)");
        let names: Vec<_> = method.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", ""]);
    }

    #[test]
    fn test_empty_return_type_is_void() {
        assert_eq!(parse_method("run():").return_type, "void");
        assert_eq!(parse_method("run(").return_type, "void");
    }

    #[test]
    fn test_parse_member_classification() {
        assert!(matches!(parse_member("x: int"), Some(ParsedMember::Attribute(_))));
        assert!(matches!(parse_member("x(): int"), Some(ParsedMember::Method(_))));
        assert_eq!(parse_member("just a note"), None);
    }
}

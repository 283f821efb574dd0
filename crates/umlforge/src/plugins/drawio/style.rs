//! draw.io style strings
//!
//! A style is a `;`-separated list of `key=value` pairs and bare tokens,
//! e.g. `swimlane;fontStyle=1;endArrow=block;endFill=0;`.

use chumsky::prelude::*;

use super::database::RelationKind;

/// A parsed style entry: a key with an optional value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    pub key: String,
    pub value: Option<String>,
}

/// A cell style, keeping the raw text alongside its parsed entries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    raw: String,
    entries: Vec<StyleEntry>,
}

/// Italic bit of draw.io's `fontStyle` bitmask
const FONT_STYLE_ITALIC: u32 = 2;

impl Style {
    /// Parse a style string; never fails, unrecognized text becomes bare tokens
    pub fn parse(raw: &str) -> Self {
        let entries = style_parser()
            .parse(raw)
            .into_result()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(key, value): (&str, Option<&str>)| {
                let key = key.trim();
                if key.is_empty() {
                    return None;
                }
                Some(StyleEntry {
                    key: key.to_string(),
                    value: value.map(|v| v.trim().to_string()),
                })
            })
            .collect();

        Self {
            raw: raw.to_string(),
            entries,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    /// Value of the last entry named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.key == key)
            .and_then(|e| e.value.as_deref())
    }

    /// Whether the raw style text contains `needle` anywhere
    pub fn contains(&self, needle: &str) -> bool {
        self.raw.contains(needle)
    }

    /// Titled container shape used for class boxes
    pub fn is_swimlane(&self) -> bool {
        self.contains("swimlane")
    }

    /// Whether `fontStyle` has the italic bit set
    pub fn is_italic(&self) -> bool {
        self.get("fontStyle")
            .and_then(|v| v.parse::<u32>().ok())
            .is_some_and(|bits| bits & FONT_STYLE_ITALIC != 0)
    }

    /// Relation kind implied by the connector's `endArrow`
    pub fn relation_kind(&self) -> RelationKind {
        match self.get("endArrow") {
            Some("diamondThin") => RelationKind::Aggregation,
            Some(arrow) if arrow.starts_with("diamond") => RelationKind::Composition,
            Some(arrow) if arrow.starts_with("block") => RelationKind::Inheritance,
            _ => RelationKind::Association,
        }
    }
}

fn style_parser<'src>() -> impl Parser<'src, &'src str, Vec<(&'src str, Option<&'src str>)>> {
    let key = none_of("=;").repeated().to_slice();
    let value = just('=')
        .ignore_then(none_of(";").repeated().to_slice())
        .or_not();

    key.then(value)
        .separated_by(just(';'))
        .collect()
        .then_ignore(end())
}

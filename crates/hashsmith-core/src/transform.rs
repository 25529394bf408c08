use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Named text transforms applied to literal base values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    Lower,
    Upper,
    /// First character upper-cased, the remainder lower-cased.
    Capitalize,
    /// Every alphabetic run starts upper-cased.
    Title,
    Reverse,
    /// a→@, e→3, i→1, o→0, s→$, l→1 after lower-casing.
    LeetBasic,
    /// [`Transform::LeetBasic`] plus t→7, b→6, g→9, z→2, h→#.
    LeetAdvanced,
    /// Left-pad an all-digit value to two characters.
    #[serde(rename = "zero_pad_2")]
    ZeroPad2,
    /// Left-pad an all-digit value to four characters.
    #[serde(rename = "zero_pad_4")]
    ZeroPad4,
}

const LEET_BASIC: &[(char, char)] = &[
    ('a', '@'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '$'),
    ('l', '1'),
];

const LEET_ADVANCED: &[(char, char)] = &[
    ('a', '@'),
    ('e', '3'),
    ('i', '1'),
    ('o', '0'),
    ('s', '$'),
    ('l', '1'),
    ('t', '7'),
    ('b', '6'),
    ('g', '9'),
    ('z', '2'),
    ('h', '#'),
];

impl Transform {
    pub const ALL: [Transform; 9] = [
        Transform::Lower,
        Transform::Upper,
        Transform::Capitalize,
        Transform::Title,
        Transform::Reverse,
        Transform::LeetBasic,
        Transform::LeetAdvanced,
        Transform::ZeroPad2,
        Transform::ZeroPad4,
    ];

    /// Stable identifier, identical to the serialized form.
    pub fn id(&self) -> &'static str {
        match self {
            Transform::Lower => "lower",
            Transform::Upper => "upper",
            Transform::Capitalize => "capitalize",
            Transform::Title => "title",
            Transform::Reverse => "reverse",
            Transform::LeetBasic => "leet_basic",
            Transform::LeetAdvanced => "leet_advanced",
            Transform::ZeroPad2 => "zero_pad_2",
            Transform::ZeroPad4 => "zero_pad_4",
        }
    }

    /// Apply the transform. Total: inapplicable inputs come back unchanged.
    pub fn apply(&self, text: &str) -> String {
        match self {
            Transform::Lower => text.to_lowercase(),
            Transform::Upper => text.to_uppercase(),
            Transform::Capitalize => capitalize(text),
            Transform::Title => to_title_case(text),
            Transform::Reverse => text.chars().rev().collect(),
            Transform::LeetBasic => leet(text, LEET_BASIC),
            Transform::LeetAdvanced => leet(text, LEET_ADVANCED),
            Transform::ZeroPad2 => zero_pad(text, 2),
            Transform::ZeroPad4 => zero_pad(text, 4),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Dispatch a named transform over `text`.
pub fn apply(text: &str, transform: Transform) -> String {
    transform.apply(text)
}

/// Caller-supplied single-argument string function.
#[derive(Clone)]
pub struct CustomTransform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl CustomTransform {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(func))
    }

    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for CustomTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomTransform(..)")
    }
}

/// One step of a literal's transform list: either named or opaque.
#[derive(Debug, Clone)]
pub enum Alteration {
    Named(Transform),
    Custom(CustomTransform),
}

impl Alteration {
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Alteration::Custom(CustomTransform::new(func))
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Alteration::Named(transform) => transform.apply(text),
            Alteration::Custom(custom) => custom.apply(text),
        }
    }
}

impl From<Transform> for Alteration {
    fn from(value: Transform) -> Self {
        Alteration::Named(value)
    }
}

impl From<CustomTransform> for Alteration {
    fn from(value: CustomTransform) -> Self {
        Alteration::Custom(value)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn to_title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

// Table outputs never appear as table inputs, so a single pass per char
// matches applying the substitutions one after another.
fn leet(value: &str, table: &[(char, char)]) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|ch| {
            table
                .iter()
                .find(|(from, _)| *from == ch)
                .map_or(ch, |(_, to)| *to)
        })
        .collect()
}

fn zero_pad(value: &str, width: usize) -> String {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return value.to_string();
    }
    format!("{value:0>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leet_basic_rewrites_password() {
        assert_eq!(Transform::LeetBasic.apply("password"), "p@$$w0rd");
        assert_eq!(Transform::LeetBasic.apply("HELLO"), "h3110");
    }

    #[test]
    fn leet_advanced_extends_basic_table() {
        for entry in LEET_BASIC {
            assert!(LEET_ADVANCED.contains(entry), "missing {entry:?}");
        }
        assert_eq!(Transform::LeetAdvanced.apply("The Big Zoo"), "7#3 619 200");
    }

    #[test]
    fn zero_pad_only_touches_digits() {
        assert_eq!(Transform::ZeroPad2.apply("5"), "05");
        assert_eq!(Transform::ZeroPad2.apply("42"), "42");
        assert_eq!(Transform::ZeroPad2.apply("123"), "123");
        assert_eq!(Transform::ZeroPad4.apply("123"), "0123");
        assert_eq!(Transform::ZeroPad4.apply("abc"), "abc");
        assert_eq!(Transform::ZeroPad4.apply("12a"), "12a");
        assert_eq!(Transform::ZeroPad4.apply(""), "");
    }

    #[test]
    fn case_transforms_follow_word_rules() {
        assert_eq!(Transform::Capitalize.apply("hELLO world"), "Hello world");
        assert_eq!(Transform::Title.apply("hello world"), "Hello World");
        assert_eq!(Transform::Title.apply("mary-jane o'neil"), "Mary-Jane O'Neil");
        assert_eq!(Transform::Capitalize.apply(""), "");
    }

    #[test]
    fn unicode_is_handled_per_character() {
        assert_eq!(Transform::Upper.apply("café"), "CAFÉ");
        assert_eq!(Transform::Lower.apply("RÉSUMÉ"), "résumé");
        assert_eq!(Transform::Reverse.apply("naïve"), "evïan");
        assert_eq!(Transform::Capitalize.apply("éclair"), "Éclair");
    }

    #[test]
    fn ids_match_serialized_names() {
        for transform in Transform::ALL {
            let json = serde_json::to_value(transform).expect("serialize transform");
            assert_eq!(json.as_str(), Some(transform.id()));
        }
    }

    #[test]
    fn custom_alteration_calls_closure() {
        let alteration = Alteration::custom(|text| format!("{text}!"));
        assert_eq!(alteration.apply("hello"), "hello!");
        assert_eq!(Alteration::from(Transform::Upper).apply("hi"), "HI");
    }
}

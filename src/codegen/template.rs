//! Translation text split into literal runs and variable interpolations.
//!
//! Only `{name}` where `name` is one of the entry's declared variables becomes
//! an interpolation. Every other brace stays literal text, so translation
//! text can never inject syntax into the generated file.

use regex::Regex;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Variable(String),
}

/// A compiled accessor body, substituted at call time by the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Split `text` on placeholders naming one of `variables`.
    pub fn compile<'a>(text: &str, variables: impl IntoIterator<Item = &'a str>) -> Template {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());
        let declared: Vec<&str> = variables.into_iter().collect();

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for cap in regex.captures_iter(text) {
            let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            if !declared.contains(&name.as_str()) {
                continue;
            }
            literal.push_str(&text[last..whole.start()]);
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Variable(name.as_str().to_string()));
            last = whole.end();
        }

        literal.push_str(&text[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Template { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the body needs no call-time substitution.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Concatenated literal text; only meaningful when [`is_static`](Self::is_static).
    pub fn literal_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.as_str(),
                Segment::Variable(_) => "",
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_declared_placeholder() {
        let template = Template::compile("Bye {value}", ["value"]);
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("Bye ".to_string()),
                Segment::Variable("value".to_string())
            ]
        );
        assert!(!template.is_static());
    }

    #[test]
    fn test_undeclared_placeholder_stays_literal() {
        let template = Template::compile("Use {PropertyName} here", []);
        assert!(template.is_static());
        assert_eq!(template.literal_text(), "Use {PropertyName} here");
    }

    #[test]
    fn test_mixed_placeholders() {
        let template = Template::compile("{a} and {b} but not {c}", ["a", "b"]);
        assert_eq!(
            template.segments(),
            &[
                Segment::Variable("a".to_string()),
                Segment::Literal(" and ".to_string()),
                Segment::Variable("b".to_string()),
                Segment::Literal(" but not {c}".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = Template::compile("{x}{x}", ["x"]);
        assert_eq!(
            template.segments(),
            &[
                Segment::Variable("x".to_string()),
                Segment::Variable("x".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_text() {
        let template = Template::compile("", ["x"]);
        assert!(template.segments().is_empty());
        assert!(template.is_static());
    }

    #[test]
    fn test_stray_braces_are_literal() {
        let template = Template::compile("{ {value} }", ["value"]);
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("{ ".to_string()),
                Segment::Variable("value".to_string()),
                Segment::Literal(" }".to_string()),
            ]
        );
    }
}

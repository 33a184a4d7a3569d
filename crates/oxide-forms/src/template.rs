//! Field templates.
//!
//! A template is text with the placeholders `{label}`, `{input}`, `{hint}`
//! and `{error}`. Each placeholder is substituted at its first occurrence
//! only; repeats and anything else in braces are kept verbatim. Substituted
//! content is never rescanned. A template line that holds only placeholders
//! which all rendered empty is dropped, so an absent hint does not leave a
//! blank line behind.

use std::collections::HashSet;

/// Placeholders recognized in field templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Label,
    Input,
    Hint,
    Error,
}

impl Placeholder {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "label" => Some(Self::Label),
            "input" => Some(Self::Input),
            "hint" => Some(Self::Hint),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// The rendered parts substituted into a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParts {
    pub label: String,
    pub input: String,
    pub hint: String,
    pub error: String,
}

impl TemplateParts {
    fn get(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Label => &self.label,
            Placeholder::Input => &self.input,
            Placeholder::Hint => &self.hint,
            Placeholder::Error => &self.error,
        }
    }
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    lines: Vec<Vec<Segment>>,
}

impl Template {
    /// Parses a template; it never fails, unknown tokens stay literal.
    pub fn parse(source: &str) -> Self {
        let mut seen = HashSet::new();
        Self {
            lines: source
                .split('\n')
                .map(|line| parse_line(line, &mut seen))
                .collect(),
        }
    }

    /// Returns whether the template references `placeholder`.
    pub fn contains(&self, placeholder: Placeholder) -> bool {
        self.lines
            .iter()
            .flatten()
            .any(|s| *s == Segment::Slot(placeholder))
    }

    /// Substitutes `parts` and drops lines left empty.
    pub fn render(&self, parts: &TemplateParts) -> String {
        let mut rendered = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let mut out = String::new();
            let mut has_slot = false;
            let mut has_content = false;
            for segment in line {
                match segment {
                    Segment::Literal(text) => {
                        has_content |= !text.trim().is_empty();
                        out.push_str(text);
                    }
                    Segment::Slot(placeholder) => {
                        has_slot = true;
                        let value = parts.get(*placeholder);
                        has_content |= !value.is_empty();
                        out.push_str(value);
                    }
                }
            }
            if has_slot && !has_content {
                continue;
            }
            rendered.push(out);
        }
        rendered.join("\n")
    }
}

fn parse_line(line: &str, seen: &mut HashSet<Placeholder>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = line;

    while let Some(start) = rest.find('{') {
        literal.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let slot = after
            .find('}')
            .and_then(|end| Placeholder::parse(&after[..end]).map(|p| (p, end)))
            .filter(|(placeholder, _)| seen.insert(*placeholder));
        match slot {
            Some((placeholder, end)) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot(placeholder));
                rest = &after[end + 1..];
            }
            None => {
                literal.push('{');
                rest = after;
            }
        }
    }
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts() -> TemplateParts {
        TemplateParts {
            label: "<label>Name</label>".to_string(),
            input: "<input>".to_string(),
            hint: String::new(),
            error: String::new(),
        }
    }

    #[test]
    fn test_drops_empty_placeholder_lines() {
        let template = Template::parse("{label}\n{input}\n{hint}\n{error}");
        assert_eq!(template.render(&parts()), "<label>Name</label>\n<input>");
    }

    #[test]
    fn test_unknown_placeholders_are_kept() {
        let template = Template::parse("{before}{input}{after");
        assert_eq!(template.render(&parts()), "{before}<input>{after");
    }

    #[test]
    fn test_static_template() {
        let template = Template::parse("<hr>");
        assert_eq!(template.render(&parts()), "<hr>");
        assert!(!template.contains(Placeholder::Input));
    }

    #[test]
    fn test_substituted_content_is_not_rescanned() {
        let template = Template::parse("{label}");
        let parts = TemplateParts {
            label: "{input}".to_string(),
            input: "X".to_string(),
            ..Default::default()
        };
        assert_eq!(template.render(&parts), "{input}");
    }

    #[test]
    fn test_custom_order_and_literals() {
        let template = Template::parse("<div class=\"wrap\">{input}{label}</div>\n{hint}");
        assert_eq!(
            template.render(&parts()),
            "<div class=\"wrap\"><input><label>Name</label></div>"
        );
    }

    #[test]
    fn test_placeholder_substituted_once() {
        let template = Template::parse("{input}{input}\n{label} {input}");
        assert_eq!(
            template.render(&parts()),
            "<input>{input}\n<label>Name</label> {input}"
        );
    }

    #[test]
    fn test_line_with_literal_text_is_kept() {
        let template = Template::parse("Hint: {hint}");
        assert_eq!(template.render(&parts()), "Hint: ");
    }
}

//! Output patterns and the formatter registry.

use std::sync::Arc;

use tracing::debug;

use crate::config::PatternConfig;
use crate::error::{Error, Result};
use crate::status::{OsuStatus, StatusMask};
use crate::tokens::Tokens;

/// A named template bound to the token set it was formatted with.
#[derive(Debug, Clone)]
pub struct OutputPattern {
    pub name: String,
    pub pattern: String,
    /// Statuses on which this pattern is written to disk.
    pub save_event: StatusMask,
    /// Kept in memory only, never persisted.
    pub is_memory_format: bool,
    tokens: Arc<Tokens>,
}

impl OutputPattern {
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        save_event: StatusMask,
        is_memory_format: bool,
        tokens: Arc<Tokens>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            save_event,
            is_memory_format,
            tokens,
        }
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// Render the template against the tokens it was built from.
    pub fn formatted(&self) -> String {
        render_template(&self.pattern, &self.tokens)
    }
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Replace every `!name!` with the token's value.
///
/// `!!` renders a literal `!`. Unknown tokens render empty. A `!` that does
/// not open a well-formed token name is kept as-is.
pub fn render_template(template: &str, tokens: &Tokens) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('!') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('!') {
            Some(0) => {
                out.push('!');
                rest = &after[1..];
            }
            Some(end) if is_token_name(&after[..end]) => {
                out.push_str(tokens.get(&after[..end]).unwrap_or(""));
                rest = &after[end + 1..];
            }
            _ => {
                out.push('!');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Turns a token map into zero or more output patterns.
pub trait PatternFormatter {
    fn format(&self, tokens: &Tokens, status: OsuStatus) -> Result<Vec<OutputPattern>>;
}

/// Ordered set of formatters.
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: Vec<Box<dyn PatternFormatter>>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, formatter: Box<dyn PatternFormatter>) {
        self.formatters.push(formatter);
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Concatenate every formatter's patterns in registration order.
    pub fn format_all(&self, tokens: &Tokens, status: OsuStatus) -> Result<Vec<OutputPattern>> {
        let mut patterns = Vec::new();
        for formatter in &self.formatters {
            let produced = formatter.format(tokens, status)?;
            if !produced.is_empty() {
                patterns.extend(produced);
            }
        }
        debug!("Formatted {} pattern(s) for {}", patterns.len(), status);
        Ok(patterns)
    }
}

/// Formatter for user-defined `!token!` templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateFormatter {
    patterns: Vec<PatternConfig>,
}

impl TemplateFormatter {
    pub fn new(patterns: Vec<PatternConfig>) -> Result<Self> {
        for pattern in &patterns {
            validate_pattern_name(&pattern.name)?;
        }
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[PatternConfig] {
        &self.patterns
    }
}

fn validate_pattern_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidPattern("pattern name is empty".to_string()));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(Error::InvalidPattern(format!(
            "pattern name {:?} is not a plain file name",
            name
        )));
    }
    Ok(())
}

impl PatternFormatter for TemplateFormatter {
    fn format(&self, tokens: &Tokens, _status: OsuStatus) -> Result<Vec<OutputPattern>> {
        let tokens = Arc::new(tokens.clone());
        Ok(self
            .patterns
            .iter()
            .map(|p| {
                OutputPattern::new(
                    p.name.as_str(),
                    p.template.as_str(),
                    p.save_event,
                    p.memory,
                    Arc::clone(&tokens),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::StaticFormatter;

    fn tokens() -> Tokens {
        [("artist", "Camellia"), ("title", "GHOST"), ("empty", "")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_render_replaces_tokens() {
        let out = render_template("!artist! - !title!", &tokens());
        assert_eq!(out, "Camellia - GHOST");
    }

    #[test]
    fn test_render_unknown_token_is_empty() {
        assert_eq!(render_template("[!nope!]", &tokens()), "[]");
        assert_eq!(render_template("[!empty!]", &tokens()), "[]");
    }

    #[test]
    fn test_render_escaped_bang() {
        assert_eq!(render_template("wow!!", &tokens()), "wow!");
    }

    #[test]
    fn test_render_keeps_stray_bang() {
        assert_eq!(render_template("Hi! !title!", &tokens()), "Hi! GHOST");
        assert_eq!(render_template("end!", &tokens()), "end!");
    }

    #[test]
    fn test_registry_concatenates_in_order() {
        let mut registry = FormatterRegistry::new();
        registry.register(Box::new(StaticFormatter::named(&["A", "B"])));
        registry.register(Box::new(StaticFormatter::named(&[])));
        registry.register(Box::new(StaticFormatter::named(&["C"])));

        let patterns = registry.format_all(&tokens(), OsuStatus::Playing).unwrap();
        let names: Vec<_> = patterns.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_template_formatter_binds_tokens() {
        let formatter = TemplateFormatter::new(vec![PatternConfig::new("np", "!artist! - !title!")])
            .unwrap();
        let patterns = formatter.format(&tokens(), OsuStatus::Listening).unwrap();

        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].name, "np");
        assert_eq!(patterns[0].save_event, StatusMask::ALL);
        assert!(!patterns[0].is_memory_format);
        assert_eq!(patterns[0].formatted(), "Camellia - GHOST");
    }

    #[test]
    fn test_template_formatter_rejects_path_names() {
        let result = TemplateFormatter::new(vec![PatternConfig::new("../np", "x")]);
        assert!(matches!(result, Err(Error::InvalidPattern(_))));

        let result = TemplateFormatter::new(vec![PatternConfig::new("  ", "x")]);
        assert!(matches!(result, Err(Error::InvalidPattern(_))));
    }
}

//! Marker pattern registry.
//!
//! Each pattern is a case-insensitive regex credited to a [`Category`].
//! Whole-message patterns credit the entire unit text, captured-group
//! patterns credit only their first capture group.

use memsift_core::{CaptureMode, Category, ExtractionConfig, PatternDef};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::trace;

/// Error type for pattern building.
#[derive(Debug)]
pub enum BuildError {
    /// The regex pattern is invalid.
    Regex(String),

    /// The category is invalid.
    Category(String),

    /// The capture mode is invalid.
    Mode(String),

    /// A captured-group pattern has no capture group.
    MissingGroup,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regex(e) => write!(f, "invalid regex: {e}"),
            Self::Category(c) => write!(f, "invalid category: {c}"),
            Self::Mode(m) => write!(f, "invalid capture mode: {m}"),
            Self::MissingGroup => write!(f, "captured_group pattern needs a capture group"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<regex::Error> for BuildError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

/// A compiled marker pattern.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    pub id: String,
    pub category: Category,
    pub mode: CaptureMode,
    regex: Regex,
}

impl MarkerPattern {
    /// Compile a definition. Matching is always case-insensitive and
    /// `^`/`$` bind to line boundaries.
    pub fn build(def: &PatternDef) -> Result<Self, BuildError> {
        let category =
            Category::from_str(&def.category).map_err(|e| BuildError::Category(e.to_string()))?;
        let mode = CaptureMode::from_str(&def.mode).map_err(|e| BuildError::Mode(e.to_string()))?;

        let regex = RegexBuilder::new(&def.pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()?;

        if mode == CaptureMode::CapturedGroup && regex.captures_len() < 2 {
            return Err(BuildError::MissingGroup);
        }

        Ok(Self {
            id: def.id.clone(),
            category,
            mode,
            regex,
        })
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// One credited match inside a text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    pub pattern_id: String,
    pub category: Category,
    pub text: String,
}

/// The ordered set of marker patterns plus the capture filters.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<MarkerPattern>,
    min_capture_len: usize,
    denylist: Vec<String>,
}

impl PatternRegistry {
    /// Compile the built-in patterns followed by `config.extra_patterns`.
    ///
    /// # Errors
    /// Returns the id of the first definition that fails to compile.
    pub fn new(config: &ExtractionConfig) -> Result<Self, (String, BuildError)> {
        let patterns = default_patterns()
            .iter()
            .chain(&config.extra_patterns)
            .map(|def| MarkerPattern::build(def).map_err(|e| (def.id.clone(), e)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            min_capture_len: config.min_capture_len,
            denylist: config.denylist.iter().map(|d| d.to_lowercase()).collect(),
        })
    }

    #[must_use]
    pub fn patterns(&self) -> &[MarkerPattern] {
        &self.patterns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `captured` survives the false-positive filters.
    fn accepts(&self, captured: &str) -> bool {
        !captured.is_empty()
            && captured.chars().count() >= self.min_capture_len
            && !self.denylist.iter().any(|d| *d == captured.to_lowercase())
    }

    /// Run every pattern against `text`.
    ///
    /// Captured-group patterns run first and credit every accepted capture;
    /// the first pattern to capture a given span owns it. A whole-message
    /// pattern credits the trimmed text at most once per category, and not
    /// at all for a category that already has an accepted capture here.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<MarkerMatch> {
        self.scan_parts(text, &[])
    }

    /// Like [`scan`](Self::scan), but captured-group patterns also run over
    /// `later_parts`. Whole-message patterns only ever see `text`.
    #[must_use]
    pub fn scan_parts(&self, text: &str, later_parts: &[&str]) -> Vec<MarkerMatch> {
        let mut found = Vec::new();
        let mut spans: HashSet<(usize, usize, usize)> = HashSet::new();
        let mut credited: HashSet<Category> = HashSet::new();

        let sources = std::iter::once(text).chain(later_parts.iter().copied());
        for (part, part_text) in sources.enumerate() {
            for pattern in self
                .patterns
                .iter()
                .filter(|p| p.mode == CaptureMode::CapturedGroup)
            {
                for caps in pattern.regex.captures_iter(part_text) {
                    let Some(group) = caps.get(1) else {
                        continue;
                    };
                    if !spans.insert((part, group.start(), group.end())) {
                        continue;
                    }
                    let captured = group.as_str().trim();
                    if !self.accepts(captured) {
                        trace!("Pattern {} capture '{captured}' filtered", pattern.id);
                        continue;
                    }
                    credited.insert(pattern.category);
                    found.push(MarkerMatch {
                        pattern_id: pattern.id.clone(),
                        category: pattern.category,
                        text: captured.to_string(),
                    });
                }
            }
        }

        let whole = text.trim();
        if whole.is_empty() {
            return found;
        }

        for pattern in self
            .patterns
            .iter()
            .filter(|p| p.mode == CaptureMode::WholeMessage)
        {
            if credited.contains(&pattern.category) || !pattern.is_match(text) {
                continue;
            }
            credited.insert(pattern.category);
            found.push(MarkerMatch {
                pattern_id: pattern.id.clone(),
                category: pattern.category,
                text: whole.to_string(),
            });
        }

        found
    }
}

/// Built-in marker set.
#[must_use]
pub fn default_patterns() -> Vec<PatternDef> {
    let mut patterns = Vec::new();
    patterns.extend(capture_patterns());
    patterns.extend(bio_markers());
    patterns.extend(project_markers());
    patterns.extend(generic_markers());
    patterns
}

/// `TO:BIO <rest>`, `memory/to-bio: <rest>`, `memory/project: <rest>`, `PROJECT: <rest>`.
/// The captured line may start on the line after the marker.
fn capture_patterns() -> Vec<PatternDef> {
    use CaptureMode::CapturedGroup;
    vec![
        PatternDef::new(
            "to_bio_line",
            r"\bTO:BIO\s+([^\r\n]+)",
            Category::ToBio,
            CapturedGroup,
        ),
        PatternDef::new(
            "memory_to_bio_line",
            r"\bmemory/to[-_]bio\s*:\s*([^\r\n]+)",
            Category::ToBio,
            CapturedGroup,
        ),
        PatternDef::new(
            "memory_project_line",
            r"\bmemory/project\s*:\s*([^\r\n]+)",
            Category::Project,
            CapturedGroup,
        ),
        PatternDef::new(
            "project_line",
            r"\bPROJECT\s*:\s*([^\r\n]+)",
            Category::Project,
            CapturedGroup,
        ),
    ]
}

fn bio_markers() -> Vec<PatternDef> {
    use CaptureMode::WholeMessage;
    vec![
        PatternDef::new("to_bio", r"\bTO\s*:?\s*BIO\b", Category::ToBio, WholeMessage),
        PatternDef::new(
            "memory_to_bio",
            r"\bmemory/to[-_]bio\b",
            Category::ToBio,
            WholeMessage,
        ),
        PatternDef::new(
            "add_this_to_bio",
            r"\badd this to bio\b",
            Category::ToBio,
            WholeMessage,
        ),
    ]
}

fn project_markers() -> Vec<PatternDef> {
    use CaptureMode::WholeMessage;
    vec![
        PatternDef::new(
            "memory_project",
            r"\bmemory/project\b",
            Category::Project,
            WholeMessage,
        ),
        PatternDef::new(
            "save_in_project",
            r"\bsave this in project\b",
            Category::Project,
            WholeMessage,
        ),
    ]
}

fn generic_markers() -> Vec<PatternDef> {
    [
        ("save_in_memory", r"\bsave this in my memory\b"),
        ("save_note", r"\bsave this note\b"),
        ("for_memory_use", r"\bfor memory use\b"),
        ("update_memory", r"\bupdate memory\b"),
        ("core_pattern", r"\bcore pattern\b"),
        ("add_to_canon", r"\badd to canon\b"),
        ("primary_alignment", r"\bprimary alignment\b"),
        ("tuck_away", r"\btuck this away\b"),
    ]
    .into_iter()
    .map(|(id, pattern)| PatternDef::new(id, pattern, Category::Generic, CaptureMode::WholeMessage))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn registry() -> PatternRegistry {
        PatternRegistry::new(&ExtractionConfig::default()).expect("default patterns compile")
    }

    fn texts(matches: &[MarkerMatch]) -> Vec<(Category, &str)> {
        matches.iter().map(|m| (m.category, m.text.as_str())).collect()
    }

    #[test]
    fn every_marker_phrase_is_recognized() {
        let registry = registry();
        let samples = [
            "TO:BIO - test message",
            "TO BIO - test message",
            "memory/project - test",
            "memory/to-bio - test",
            "memory/to_bio - test",
            "add this to bio please",
            "save this in my memory",
            "save this in project",
            "save this note for later",
            "for memory use only",
            "update memory with this",
            "this is a core pattern",
            "add to canon",
            "primary alignment note",
            "tuck this away for later",
        ];
        for sample in samples {
            assert!(!registry.scan(sample).is_empty(), "not matched: {sample}");
        }
    }

    #[test]
    fn plain_text_does_not_match() {
        let registry = registry();
        assert!(registry.scan("we went hiking in the biology lab").is_empty());
        assert!(registry.scan("").is_empty());
    }

    #[test]
    fn capture_wins_over_whole_message_in_same_category() {
        let matches = registry().scan("TO:BIO I live in Seattle");
        assert_eq!(texts(&matches), vec![(Category::ToBio, "I live in Seattle")]);
    }

    #[test]
    fn matching_ignores_case() {
        let registry = registry();
        assert_eq!(
            registry.scan("TO:BIO x marks it"),
            registry.scan("to:bio x marks it")
        );
    }

    #[test]
    fn capture_stops_at_end_of_line() {
        let matches = registry().scan("notes\nmemory/project: garden planner\nmore text");
        assert_eq!(texts(&matches), vec![(Category::Project, "garden planner")]);
    }

    #[test]
    fn short_or_denylisted_capture_falls_back_to_whole_message() {
        let registry = registry();

        let matches = registry.scan("TO:BIO abc");
        assert_eq!(texts(&matches), vec![(Category::ToBio, "TO:BIO abc")]);

        let matches = registry.scan("TO:BIO content");
        assert_eq!(texts(&matches), vec![(Category::ToBio, "TO:BIO content")]);
    }

    #[test]
    fn capture_reads_the_line_after_a_bare_marker() {
        let registry = registry();
        assert_eq!(
            texts(&registry.scan("TO:BIO\nI live in Seattle")),
            vec![(Category::ToBio, "I live in Seattle")]
        );
        assert_eq!(
            texts(&registry.scan("memory/to-bio:\nprefers tea")),
            vec![(Category::ToBio, "prefers tea")]
        );
        assert_eq!(
            texts(&registry.scan("PROJECT:\n  kiln controller\nmore")),
            vec![(Category::Project, "kiln controller")]
        );
    }

    #[test]
    fn later_parts_only_feed_capture_patterns() {
        let matches = registry().scan_parts("hello", &["TO:BIO plays chess", "add to canon"]);
        assert_eq!(texts(&matches), vec![(Category::ToBio, "plays chess")]);
    }

    #[test]
    fn one_unit_can_yield_several_categories() {
        let matches = registry().scan("TO:BIO likes tea\nPROJECT: tea tracker\nsave this note");
        let mut got = texts(&matches);
        got.sort();
        assert_eq!(
            got,
            vec![
                (Category::ToBio, "likes tea"),
                (Category::Project, "tea tracker"),
                (
                    Category::Generic,
                    "TO:BIO likes tea\nPROJECT: tea tracker\nsave this note"
                ),
            ]
        );
    }

    #[test]
    fn repeated_captures_are_all_credited() {
        let matches = registry().scan("TO:BIO owns a bike\nTO:BIO plays chess");
        assert_eq!(
            texts(&matches),
            vec![(Category::ToBio, "owns a bike"), (Category::ToBio, "plays chess")]
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn extra_patterns_extend_registry() {
        let config = ExtractionConfig {
            extra_patterns: vec![PatternDef::new(
                "remember",
                r"\bremember:\s*([^\r\n]+)",
                Category::Generic,
                CaptureMode::CapturedGroup,
            )],
            ..ExtractionConfig::default()
        };
        let registry = PatternRegistry::new(&config).expect("extra pattern compiles");
        assert_eq!(registry.len(), default_patterns().len() + 1);
        assert_eq!(
            texts(&registry.scan("Remember: dentist on Friday")),
            vec![(Category::Generic, "dentist on Friday")]
        );
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        let bad_regex = PatternDef::new("bad", "(", Category::Generic, CaptureMode::WholeMessage);
        assert!(matches!(
            MarkerPattern::build(&bad_regex),
            Err(BuildError::Regex(_))
        ));

        let no_group = PatternDef::new("ng", "x", Category::Generic, CaptureMode::CapturedGroup);
        assert!(matches!(
            MarkerPattern::build(&no_group),
            Err(BuildError::MissingGroup)
        ));

        let mut bad_category = no_group;
        bad_category.category = "weather".to_string();
        assert!(matches!(
            MarkerPattern::build(&bad_category),
            Err(BuildError::Category(_))
        ));
    }
}

use regex::Regex;

use crate::core::MError;

/// The classes of line found in a solution-sets file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A comment-style line marking a solution-set boundary (`#`, optional spaces, optional `/`).
    Separator,
    /// A solution row, starting with a digit.
    Data,
    /// A separator-shaped line with alphanumeric content after the marker, printed by the
    /// evaluator as a banner. The separator pattern shadows this class, so a banner still
    /// classifies as [`LineKind::Separator`]; the class exists for the anchored patterns used by
    /// [`crate::sets::SetReducer`], which does tell banners apart and drops them.
    Informational,
    /// A line containing only spaces (or nothing at all).
    Blank,
}

/// Classifier for the lines of a solution-sets stream. The patterns are compiled once at
/// construction and never change afterwards.
pub struct LineClassifier {
    separator: Regex,
    data: Regex,
    informational: Regex,
    blank: Regex,
}

impl LineClassifier {
    pub fn new() -> Self {
        LineClassifier {
            separator: Regex::new(r"^# */?").expect("valid separator pattern"),
            data: Regex::new(r"^[0-9]").expect("valid data pattern"),
            informational: Regex::new(r"^# +[A-Za-z0-9]").expect("valid informational pattern"),
            blank: Regex::new(r"^ *$").expect("valid blank pattern"),
        }
    }

    /// Classify one line, without its trailing newline. The patterns are checked in precedence
    /// order: separator, data, informational, blank.
    ///
    /// # Arguments
    ///
    /// * `line`: The line to classify.
    ///
    /// returns: `Result<LineKind, MError>` The line class, or [`MError::LineFormat`] when the
    /// line matches no pattern.
    pub fn classify(&self, line: &str) -> Result<LineKind, MError> {
        if self.separator.is_match(line) {
            Ok(LineKind::Separator)
        } else if self.data.is_match(line) {
            Ok(LineKind::Data)
        } else if self.informational.is_match(line) {
            Ok(LineKind::Informational)
        } else if self.blank.is_match(line) {
            Ok(LineKind::Blank)
        } else {
            Err(MError::LineFormat(line.to_string()))
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

//! Failure taxonomy of the decision engine.
//!
//! Everything here is fatal for the current analysis: malformed input
//! (classification and parse failures) or an internal consistency violation.
//! Unanalyzable sources are not errors; they resolve to the unbounded
//! verdict instead.

use std::fmt;

use maxarity_parser::{CallableError, ClassifyError, ParseError};

#[derive(Debug)]
pub enum ArityError {
    /// The leading token shape is incompatible with any bare callable
    /// definition.
    Classify(ClassifyError),
    /// Malformed source text after classification succeeded.
    Parse(ParseError),
    /// The parsed parameter list disagrees with the runtime-reported
    /// declared parameter count. Indicates an analysis defect, never a
    /// recoverable condition.
    InconsistentParameterCount { parsed: u32, reported: u32 },
    /// A binding reference had no enclosing callable-definition ancestor.
    /// Indicates an analysis defect.
    MissingEnclosingCallable,
    /// The trailing rest parameter binds a destructuring pattern rather
    /// than a plain identifier.
    RestPatternUnsupported { pos: u32 },
}

impl From<CallableError> for ArityError {
    fn from(err: CallableError) -> ArityError {
        match err {
            CallableError::Classify(err) => ArityError::Classify(err),
            CallableError::Parse(err) => ArityError::Parse(err),
        }
    }
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityError::Classify(err) => write!(f, "classification failed: {err}"),
            ArityError::Parse(err) => write!(f, "parse failed: {err}"),
            ArityError::InconsistentParameterCount { parsed, reported } => write!(
                f,
                "inconsistent parameter count: parsed {parsed}, runtime reported {reported}"
            ),
            ArityError::MissingEnclosingCallable => {
                write!(f, "could not locate an enclosing callable for a reference")
            }
            ArityError::RestPatternUnsupported { pos } => {
                write!(f, "rest parameter at {pos} binds a pattern, not an identifier")
            }
        }
    }
}

impl std::error::Error for ArityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArityError::Classify(err) => Some(err),
            ArityError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

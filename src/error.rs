use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while decoding record text.
///
/// Line numbers are 1-based and count every physical line, including blank
/// lines that the decoder skips.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: depth {depth} skips a level, at most {allowed} is allowed here")]
    DepthJump {
        line: usize,
        depth: usize,
        allowed: usize,
    },

    #[error("line {line}: invalid depth `{text}`")]
    InvalidDepth { line: usize, text: String },

    #[error("line {line}: missing tag")]
    MissingTag { line: usize },

    #[error("line {line}: malformed pointer `{text}`")]
    MalformedPointer { line: usize, text: String },

    #[error("line {line}: depth {depth} exceeds the limit of {limit}")]
    DepthLimit {
        line: usize,
        depth: usize,
        limit: usize,
    },
}

impl ParseError {
    /// Line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::DepthJump { line, .. }
            | ParseError::InvalidDepth { line, .. }
            | ParseError::MissingTag { line }
            | ParseError::MalformedPointer { line, .. }
            | ParseError::DepthLimit { line, .. } => *line,
        }
    }

    /// Whether the error is about the nesting structure rather than a single line's syntax.
    pub fn is_structural(&self) -> bool {
        matches!(self, ParseError::DepthJump { .. } | ParseError::DepthLimit { .. })
    }
}

/// Errors raised by [`crate::Node::try_new`] for fields that cannot be
/// written as a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("invalid tag `{0}`")]
    InvalidTag(String),

    #[error("invalid pointer `{0}`")]
    InvalidPointer(String),

    #[error("value {0:?} spans several lines")]
    InvalidValue(String),
}

/// Errors raised while reading a date value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("empty date")]
    Empty,

    #[error("unrecognised date `{0}`")]
    Unrecognised(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line() {
        let err = ParseError::DepthJump {
            line: 4,
            depth: 3,
            allowed: 1,
        };
        assert_eq!(err.line(), 4);
        assert!(err.is_structural());
        assert_eq!(
            err.to_string(),
            "line 4: depth 3 skips a level, at most 1 is allowed here"
        );

        let err = ParseError::MissingTag { line: 2 };
        assert!(!err.is_structural());
        assert_eq!(err.to_string(), "line 2: missing tag");
    }
}

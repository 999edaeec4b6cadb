use std::fmt;

/// Error raised while mapping wire JSON to domain types.
///
/// Carries a human-readable message plus, when known, the JSON path of the
/// offending node (`notification.actions.open`) and the line/column reported
/// by the underlying parser for malformed documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    path: Option<String>,
    line: Option<usize>,
    column: Option<usize>,
}

impl ParseError {
    /// Create an error with no position information.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            line: None,
            column: None,
        }
    }

    /// Create an error pointing at a JSON path. An empty path means the
    /// document root and is recorded as no path.
    pub fn at_path(message: impl Into<String>, path: &str) -> Self {
        Self {
            message: message.into(),
            path: if path.is_empty() {
                None
            } else {
                Some(path.to_owned())
            },
            line: None,
            column: None,
        }
    }

    /// The failure description.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// JSON path of the offending node, when known.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// `(line, column)` of the failure, when the parser reported one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match (self.line, self.column) {
            (Some(line), Some(column)) => Some((line, column)),
            _ => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = &self.path {
            write!(f, " at {path}")?;
        }
        if let Some((line, column)) = self.location() {
            write!(f, " (line {line}, column {column})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports 0/0 when no position applies.
        let line = err.line();
        let column = err.column();
        Self {
            message: format!("invalid JSON: {err}"),
            path: None,
            line: (line > 0).then_some(line),
            column: (line > 0).then_some(column),
        }
    }
}

/// Structured error details returned by the API alongside `ok=false`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorDetails {
    pub error: Option<String>,
    pub path: Option<String>,
    pub location: Option<ErrorLocation>,
}

/// Line/column position of a server-reported error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorLocation {
    pub line: u64,
    pub column: u64,
}

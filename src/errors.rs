use std::fmt;

use thiserror::Error;

/// Machine-checkable diagnostic codes. The code, directive index, and path of
/// a [`Diagnostic`] are the stability contract; the message is for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    UnknownDirective,
    InvalidPlan,
    InvalidPath,
    MissingField,
    TypeMismatch,
    NonScalarItem,
    NonScalarField,
    MissingCoverage,
    UnsupportedVersion,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::UnknownDirective => "unknown_directive",
            DiagnosticCode::InvalidPlan => "invalid_plan",
            DiagnosticCode::InvalidPath => "invalid_path",
            DiagnosticCode::MissingField => "missing_field",
            DiagnosticCode::TypeMismatch => "type_mismatch",
            DiagnosticCode::NonScalarItem => "non_scalar_item",
            DiagnosticCode::NonScalarField => "non_scalar_field",
            DiagnosticCode::MissingCoverage => "missing_coverage",
            DiagnosticCode::UnsupportedVersion => "unsupported_version",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured evaluation failure. `directive` is `None` for errors raised
/// by the evaluator itself (version and coverage checks) rather than by a
/// specific directive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub directive: Option<usize>,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        code: DiagnosticCode,
        directive: Option<usize>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            directive,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Operator report form, one `key=value` per line. The directive index is
    /// rendered as `-1` when the error did not originate in a directive.
    pub fn report(&self) -> String {
        let directive = self.directive.map(|i| i as i64).unwrap_or(-1);
        format!(
            "code={}\ndirective={}\npath={}\nmessage={}",
            self.code, directive, self.path, self.message
        )
    }
}

/// Errors surfaced by the library. Parse failures keep only the underlying
/// message; evaluation failures carry the full [`Diagnostic`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON document: {0}")]
    Document(String),

    #[error("invalid plan: {0}")]
    Plan(String),

    #[error("plan generation failed: {0}")]
    Generate(String),

    #[error("node kind \"{0}\" is not scalar")]
    NotScalar(crate::document::Kind),

    #[error(transparent)]
    Diagnostic(#[from] Diagnostic),
}

impl Error {
    /// Operator report form for any error. Non-diagnostic errors report as
    /// `code=error` with no directive or path.
    pub fn report(&self) -> String {
        match self {
            Error::Diagnostic(diagnostic) => diagnostic.report(),
            other => format!("code=error\ndirective=-1\npath=\nmessage={other}"),
        }
    }

    /// The diagnostic carried by this error, if evaluation produced one.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Diagnostic(diagnostic) => Some(diagnostic),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

//! Error adapter for converting KinfolkError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Family import
//! errors carry the TOML source and the span of the offending value, so they
//! render with a labeled snippet; every other error renders as a plain
//! message with a code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use kinfolk::{KinfolkError, family::FamilyError};

/// Adapter for a family document import error.
pub struct ImportAdapter<'a> {
    err: &'a toml::de::Error,
    src: &'a str,
}

impl<'a> ImportAdapter<'a> {
    /// Create a new import adapter.
    pub fn new(err: &'a toml::de::Error, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ImportAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ImportAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid family document: {}", self.err.message())
    }
}

impl std::error::Error for ImportAdapter<'_> {}

impl MietteDiagnostic for ImportAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("kinfolk::import"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a family document holds [[persons]] and [[relations]] tables; dates are quoted \"YYYY-MM-DD\" strings",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        let label = LabeledSpan::new_primary_with_span(Some(self.err.message().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`KinfolkError`] variants without a source snippet.
pub struct ErrorAdapter<'a>(pub &'a KinfolkError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            KinfolkError::Io(_) => "kinfolk::io",
            KinfolkError::Family(_) => "kinfolk::family",
            KinfolkError::Import { .. } => "kinfolk::import",
            KinfolkError::Config(_) => "kinfolk::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            KinfolkError::Family(FamilyError::PersonOutOfBounds { .. }) => {
                "use --list to see the valid person indices"
            }
            KinfolkError::Family(FamilyError::RelationOutOfBounds { .. }) => {
                "relations refer to persons by their position in the [[persons]] list, starting at 0"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either an import diagnostic or a plain error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An import error with source location information.
    Import(ImportAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Import(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Import(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Import(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Import(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Import(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Import(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`KinfolkError`] into a list of reportable errors.
pub fn to_reportables(err: &KinfolkError) -> Vec<Reportable<'_>> {
    match err {
        KinfolkError::Import { err, src } => vec![Reportable::Import(ImportAdapter::new(err, src))],
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use kinfolk::{TreeBuilder, family::Family};

    use super::*;

    fn import_error(source: &str) -> KinfolkError {
        TreeBuilder::default()
            .parse(source)
            .expect_err("document should be rejected")
    }

    #[test]
    fn test_import_error_has_labeled_span() {
        let source = "[[persons]]\nfirst_name = \"A\"\nlast_name = \"B\"\ngender = \"robot\"\nbirth_date = \"2000-01-01\"\n";
        let err = import_error(source);

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        match &reportables[0] {
            Reportable::Import(d) => {
                assert!(d.to_string().starts_with("invalid family document"));
                let labels: Vec<_> = d.labels().unwrap().collect();
                assert_eq!(labels.len(), 1);
                assert!(labels[0].primary());
                assert!(d.source_code().is_some());
            }
            Reportable::Error(_) => panic!("Expected Import"),
        }
    }

    #[test]
    fn test_family_error_code_and_help() {
        let err = TreeBuilder::default()
            .render_svg(&Family::sample(), 99)
            .unwrap_err();

        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.code().unwrap().to_string(), "kinfolk::family");
                assert!(e.help().unwrap().to_string().contains("--list"));
                assert!(e.labels().is_none());
            }
            Reportable::Import(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_config_error() {
        let err = KinfolkError::Config("bad color".to_string());

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].to_string(), "Configuration error: bad color");
        assert_eq!(reportables[0].code().unwrap().to_string(), "kinfolk::config");
        assert!(reportables[0].help().is_none());
    }
}

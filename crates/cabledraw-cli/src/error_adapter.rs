//! Error adapter for converting CabledrawError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Malformed cable
//! designs are reported against their JSON source with the offending position
//! labeled; every other error is reported with a code and, where one applies,
//! a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use cabledraw::{CabledrawError, RenderError};

/// Adapter for a cable design that failed to parse.
pub struct ParseAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    /// Create a new parse adapter.
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the position the parser stopped at. Truncated input
    /// points just past the end.
    fn span(&self) -> SourceSpan {
        let offset = if self.err.is_eof() {
            self.src.len()
        } else {
            byte_offset(self.src, self.err.line(), self.err.column())
        };
        let len = usize::from(offset < self.src.len());
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid cable design")
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("cabledraw::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.err.is_data() {
            Some(Box::new(
                "a cable design needs `dimensions` with `oal_mm` and `tolerance_mm`",
            ))
        } else {
            None
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(message(self.err)), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`CabledrawError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a CabledrawError);

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
            CabledrawError::Io(_) => "cabledraw::io",
            CabledrawError::Parse { .. } => "cabledraw::parse",
            CabledrawError::Template(_) => "cabledraw::template",
            CabledrawError::Config(_) => "cabledraw::config",
            CabledrawError::Serialize(_) => "cabledraw::serialize",
            CabledrawError::Render(err) => match err {
                RenderError::InvalidTopology(_) => "cabledraw::render::topology",
                RenderError::MissingTopology { .. } => "cabledraw::render::pass_order",
                RenderError::InvalidDimension(_) => "cabledraw::render::dimension",
                RenderError::InvalidAnchor { .. } => "cabledraw::render::anchor",
                RenderError::InvalidCable(_) => "cabledraw::render::cable",
                RenderError::InvalidInput(_) => "cabledraw::render::input",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            CabledrawError::Render(RenderError::InvalidTopology(_)) => {
                "use a wider page or smaller side margins"
            }
            CabledrawError::Render(RenderError::InvalidAnchor { .. }) => {
                "label anchors are `endA`, `endB`, `cable` or `dimension`"
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
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A malformed design with its source.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CabledrawError`] into a reportable error.
pub fn to_reportable(err: &CabledrawError) -> Reportable<'_> {
    match err {
        CabledrawError::Parse { err, src } => Reportable::Parse(ParseAdapter::new(err, src)),
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// The parser's message without its trailing " at line L column C".
fn message(err: &serde_json::Error) -> String {
    let message = err.to_string();
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message,
    }
}

/// Converts a 1-based line and column into a byte offset into `src`,
/// clamped to its length.
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

#[cfg(test)]
mod tests {
    use cabledraw::DrawingBuilder;

    use super::*;

    fn parse_error(src: &str) -> CabledrawError {
        DrawingBuilder::default()
            .parse(src)
            .expect_err("source should not parse")
    }

    #[test]
    fn test_byte_offset() {
        let src = "ab\ncde\nf";
        assert_eq!(byte_offset(src, 1, 1), 0);
        assert_eq!(byte_offset(src, 2, 2), 4);
        assert_eq!(byte_offset(src, 3, 1), 7);
        assert_eq!(byte_offset(src, 3, 9), src.len());
        assert_eq!(byte_offset(src, 0, 0), 0);
    }

    #[test]
    fn test_parse_error_points_at_source() {
        let src = "{\n  \"dimensions\": {\"oal_mm\": 150, \"tolerance_mm\": true}\n}";
        let err = parse_error(src);

        let reportable = to_reportable(&err);
        let Reportable::Parse(adapter) = &reportable else {
            panic!("Expected Parse");
        };

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert!(labels[0].label().unwrap().contains("invalid type"));
        assert!(!labels[0].label().unwrap().contains(" at line "));

        // Points into the second line, at or just past `true`
        let offset = labels[0].offset();
        assert!(offset > src.find("true").unwrap());
        assert!(offset <= src.find("true").unwrap() + 4);
        assert_eq!(reportable.code().unwrap().to_string(), "cabledraw::parse");
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_truncated_source_points_at_end() {
        let src = "{\"dimensions\": ";
        let err = parse_error(src);

        let Reportable::Parse(adapter) = to_reportable(&err) else {
            panic!("Expected Parse");
        };
        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), src.len());
        assert_eq!(labels[0].len(), 0);
        assert!(adapter.help().is_none());
    }

    #[test]
    fn test_render_error_has_code_and_help() {
        let err = CabledrawError::Render(RenderError::InvalidTopology("too narrow".to_string()));

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Error(_)));
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "cabledraw::render::topology"
        );
        assert!(reportable.help().is_some());
        assert_eq!(
            reportable.to_string(),
            "Render error: invalid topology: too narrow"
        );
    }

    #[test]
    fn test_serialize_error_code() {
        let source = serde_json::from_str::<f64>("nope").unwrap_err();
        let err = CabledrawError::Serialize(source);
        let reportable = to_reportable(&err);
        assert_eq!(
            reportable.code().unwrap().to_string(),
            "cabledraw::serialize"
        );
    }

    #[test]
    fn test_config_error_code() {
        let err = CabledrawError::Config("bad".to_string());
        let reportable = to_reportable(&err);
        assert_eq!(reportable.code().unwrap().to_string(), "cabledraw::config");
        assert!(reportable.help().is_none());
    }
}

//! Shadow reports and their rendering as diagnostics.

use shade_core::text::{LineMap, TextRange};
use shade_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use shade_scope::BindingId;

/// One inner binding found shadowing an outer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowReport {
    pub inner: BindingId,
    pub outer: BindingId,
    pub name: String,
    pub inner_range: TextRange,
    /// `None` when the outer binding is a built-in global.
    pub outer_range: Option<TextRange>,
}

impl ShadowReport {
    pub fn is_global(&self) -> bool {
        self.outer_range.is_none()
    }
}

/// Sink for shadow reports, called in traversal order.
pub trait Reporter {
    fn report(&mut self, report: ShadowReport);
}

impl Reporter for Vec<ShadowReport> {
    fn report(&mut self, report: ShadowReport) {
        self.push(report);
    }
}

/// Render a report as a located diagnostic.
///
/// Line and column numbers in the message are 1-based. A report against a
/// source binding carries a related "was declared here" entry. Without a
/// line map (the tree has no source text) diagnostics carry offsets only.
pub fn render(report: &ShadowReport, file: &str, line_map: Option<&LineMap>) -> Diagnostic {
    let locate = |diagnostic: Diagnostic, pos| match line_map {
        Some(line_map) => diagnostic.with_start(line_map.line_and_column_of(pos)),
        None => diagnostic,
    };

    let Some(outer_range) = report.outer_range else {
        let diagnostic = Diagnostic::with_location(
            file.to_string(),
            report.inner_range,
            &messages::_0_IS_ALREADY_A_GLOBAL_VARIABLE,
            &[&report.name],
        );
        return locate(diagnostic, report.inner_range.pos);
    };

    let related = Diagnostic::with_location(
        file.to_string(),
        outer_range,
        &messages::_0_WAS_DECLARED_HERE,
        &[&report.name],
    );
    let related = locate(related, outer_range.pos);

    let diagnostic = match line_map {
        Some(line_map) => {
            let outer_start = line_map.line_and_column_of(outer_range.pos);
            let line = (outer_start.line + 1).to_string();
            let column = (outer_start.character + 1).to_string();
            Diagnostic::with_location(
                file.to_string(),
                report.inner_range,
                &messages::_0_IS_ALREADY_DECLARED_IN_THE_UPPER_SCOPE_ON_LINE_1_COLUMN_2,
                &[&report.name, &line, &column],
            )
        }
        None => Diagnostic::with_location(
            file.to_string(),
            report.inner_range,
            &messages::_0_IS_ALREADY_DECLARED_IN_THE_UPPER_SCOPE_AT_OFFSET_1,
            &[&report.name, &outer_range.pos.to_string()],
        ),
    };
    locate(diagnostic, report.inner_range.pos).with_related(related)
}

pub fn render_all(reports: &[ShadowReport], file: &str, line_map: Option<&LineMap>) -> DiagnosticCollection {
    let mut diagnostics = DiagnosticCollection::new();
    for report in reports {
        diagnostics.add(render(report, file, line_map));
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outer_range: Option<TextRange>) -> ShadowReport {
        ShadowReport {
            inner: BindingId(1),
            outer: BindingId(0),
            name: "a".to_string(),
            inner_range: TextRange::new(22, 23),
            outer_range,
        }
    }

    #[test]
    fn test_render_upper_scope() {
        let source = "let a = 1;\nfunction f(a) {}";
        let diag = render(&report(Some(TextRange::new(4, 5))), "main.ts", Some(&LineMap::new(source)));
        assert_eq!(diag.code, 9001);
        assert_eq!(diag.message_text, "'a' is already declared in the upper scope on line 1 column 5.");
        assert_eq!(diag.to_string(), format!("main.ts(2,12): error SH9001: {}", diag.message_text));
        assert_eq!(diag.related_information.len(), 1);
        assert_eq!(diag.related_information[0].message_text, "'a' was declared here.");
    }

    #[test]
    fn test_render_global() {
        let diag = render(&report(None), "main.ts", Some(&LineMap::new("")));
        assert_eq!(diag.code, 9002);
        assert_eq!(diag.message_text, "'a' is already a global variable.");
        assert!(diag.related_information.is_empty());
    }

    #[test]
    fn test_vec_reporter_keeps_order() {
        let mut sink: Vec<ShadowReport> = Vec::new();
        sink.report(report(None));
        sink.report(report(Some(TextRange::new(4, 5))));
        assert!(sink[0].is_global());
        assert!(!sink[1].is_global());
    }

    #[test]
    fn test_render_all() {
        let source = "let a = 1;\nfunction f(a) {}";
        let diagnostics = render_all(&[report(None), report(None)], "main.ts", Some(&LineMap::new(source)));
        assert_eq!(diagnostics.error_count(), 2);
    }

    #[test]
    fn test_render_without_source() {
        let diag = render(&report(Some(TextRange::new(4, 5))), "main.ts", None);
        assert_eq!(diag.code, 9004);
        assert!(diag.start.is_none());
        assert_eq!(
            diag.to_string(),
            "main.ts(22): error SH9004: 'a' is already declared in the upper scope at offset 4."
        );
        assert!(diag.related_information[0].start.is_none());
        assert_eq!(diag.related_information[0].to_string(), "main.ts(4): message SH9003: 'a' was declared here.");

        let global = render(&report(None), "main.ts", None);
        assert_eq!(global.to_string(), "main.ts(22): error SH9002: 'a' is already a global variable.");
    }
}

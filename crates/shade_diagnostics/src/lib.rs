//! shade_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Analyses produce structured reports; this crate turns them into
//! located, human-readable diagnostics and collects them per run.

use shade_core::text::{LineAndColumn, TextRange};
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 9001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source range where this diagnostic occurred, if any.
    pub range: Option<TextRange>,
    /// Line and column (0-based) of `range.pos`, when a line map was available.
    pub start: Option<LineAndColumn>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
    /// Related diagnostics.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    /// Create a new diagnostic with file and range info.
    pub fn with_location(
        file: String,
        range: TextRange,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            range: Some(range),
            start: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
            related_information: Vec::new(),
        }
    }

    /// Attach a resolved line and column for `range.pos`.
    pub fn with_start(mut self, start: LineAndColumn) -> Self {
        self.start = Some(start);
        self
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            match (self.start, self.range) {
                (Some(start), _) => write!(f, "({},{})", start.line + 1, start.character + 1)?,
                (None, Some(range)) => write!(f, "({})", range.pos)?,
                (None, None) => {}
            }
            write!(f, ": ")?;
        }
        write!(f, "{} SH{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated during a run.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Shadowing (9000-9099)
    // ========================================================================
    pub const _0_IS_ALREADY_DECLARED_IN_THE_UPPER_SCOPE_ON_LINE_1_COLUMN_2: DiagnosticMessage =
        diag!(9001, Error, "'{0}' is already declared in the upper scope on line {1} column {2}.");
    pub const _0_IS_ALREADY_A_GLOBAL_VARIABLE: DiagnosticMessage =
        diag!(9002, Error, "'{0}' is already a global variable.");
    pub const _0_WAS_DECLARED_HERE: DiagnosticMessage =
        diag!(9003, Message, "'{0}' was declared here.");
    pub const _0_IS_ALREADY_DECLARED_IN_THE_UPPER_SCOPE_AT_OFFSET_1: DiagnosticMessage =
        diag!(9004, Error, "'{0}' is already declared in the upper scope at offset {1}.");
}

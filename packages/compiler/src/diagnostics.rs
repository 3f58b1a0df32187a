use std::sync::Mutex;
use tracing::warn;
use weave_linter::Diagnostic;

/// Receives advisory lint findings. Reporting never affects the compile.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, document_id: &str, diagnostics: &[Diagnostic]);
}

/// Logs every finding as a warning
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, document_id: &str, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            warn!(
                document = document_id,
                rule = %diagnostic.rule,
                line = diagnostic.location.line,
                column = diagnostic.location.column,
                "{}",
                diagnostic.message
            );
        }
    }
}

/// Buffers findings for hosts that present them on their own
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<(String, Diagnostic)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything collected so far
    pub fn take(&self) -> Vec<(String, Diagnostic)> {
        match self.reports.lock() {
            Ok(mut reports) => std::mem::take(&mut *reports),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.lock().map(|reports| reports.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, document_id: &str, diagnostics: &[Diagnostic]) {
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.extend(
            diagnostics
                .iter()
                .map(|diagnostic| (document_id.to_string(), diagnostic.clone())),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_parser::ast::Span;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.report("a.weave", &[Diagnostic::warning("img-alt", "missing alt", Span::new(0, 4))]);
        sink.report("b.weave", &[]);

        assert_eq!(sink.len(), 1);
        let reports = sink.take();
        assert_eq!(reports[0].0, "a.weave");
        assert_eq!(reports[0].1.rule, "img-alt");
        assert!(sink.is_empty());
    }
}

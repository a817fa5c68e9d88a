//! Where the dispatch loop reports recoverable conditions.

use tracing::{debug, error, warn};

use crate::error::HookError;

/// Tracing target for the dispatch loop.
pub const HOST_TARGET: &str = "hookline::host";

/// Receives every condition the dispatch loop recovers from.
///
/// Diagnostics never reach the hook's primary output.
pub trait DiagnosticSink {
    /// Records one recovered condition.
    fn report(&mut self, diagnostic: &HookError);
}

/// Emits diagnostics as `tracing` events under [`HOST_TARGET`].
///
/// Skipped message kinds are logged at debug level, handler failures at error
/// level, and everything else at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn report(&mut self, diagnostic: &HookError) {
        match diagnostic {
            HookError::UnrecognizedMessageKind { .. } => {
                debug!(target: HOST_TARGET, %diagnostic, "skipped host message");
            }
            HookError::HandlerFailure { .. } => {
                error!(target: HOST_TARGET, %diagnostic, "hook handler failed");
            }
            _ => {
                warn!(target: HOST_TARGET, %diagnostic, "skipped hook input");
            }
        }
    }
}

/// Collects diagnostics in memory.
impl DiagnosticSink for Vec<HookError> {
    fn report(&mut self, diagnostic: &HookError) {
        self.push(diagnostic.clone());
    }
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &mut D {
    fn report(&mut self, diagnostic: &HookError) {
        (**self).report(diagnostic);
    }
}

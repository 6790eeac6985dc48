//! Confirmation capability for ambiguous speaker prefixes.

/// Failure to obtain a yes/no answer.
///
/// The speaker-label extractor treats this as recoverable: the line is kept
/// unchanged (the documented default policy) and the occurrence is counted
/// and logged, never silently skipped.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    #[error("standard input is not a terminal")]
    NonInteractive,

    #[error("failed to read confirmation response: {0}")]
    Io(#[from] std::io::Error),
}

/// Synchronous yes/no query, invoked only when speaker-label classification
/// is ambiguous. The pipeline calls this capability but never implements it;
/// the interactive prompt lives in the binary.
pub trait Confirm {
    fn confirm(&mut self, line: &str) -> Result<bool, ConfirmError>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, line: &str) -> Result<bool, ConfirmError> {
        Ok(self(line))
    }
}

// ============================================================================
// madmeasurer-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING
//
// Commands return CoreError like the engine does. The only addition is a way
// to say which path or step a failure belongs to, which is folded into an
// OperationFailed message.

use std::fmt;

use madmeasurer_core::{CoreError, CoreResult};

pub type CliResult<T> = CoreResult<T>;

pub trait CliErrorContext<T> {
    /// Prefixes the error with a lazily built description of the failed step.
    fn cli_with_context<C, F>(self, describe: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_with_context<C, F>(self, describe: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| CoreError::OperationFailed(format!("{}: {}", describe(), e.into())))
    }
}

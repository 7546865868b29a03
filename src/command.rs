use crate::env::Environment;
use crate::error::CommandError;
use std::io::Write;

/// Object-safe trait for any command the interpreter can execute.
///
/// The `ADD`, `REM` and `PRINT` built-ins implement it through a blanket impl.
pub trait ExecutableCommand {
    /// Executes the command, writing its console output to `stdout`.
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<(), CommandError>;
}

/// Factory that tries to create a command from its leading word and operands.
///
/// Returns `None` when the factory doesn't recognize the `name`, and `Some(Err(..))`
/// when it does but the operands don't fit the command's grammar.
pub trait CommandFactory {
    fn try_create(
        &self,
        name: &str,
        args: &[&str],
    ) -> Option<Result<Box<dyn ExecutableCommand>, CommandError>>;
}

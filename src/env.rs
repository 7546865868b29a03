use crate::container::Container;
use crate::error::CommandError;
use crate::factory::TransportRegistry;
use tracing::warn;

/// Mutable state that commands operate on during one run.
///
/// The environment contains:
/// - `container`: the transports added so far, in insertion order.
/// - `transports`: the factories `ADD` builds transports with.
/// - `strict`: whether failures that are silent no-ops by default get reported.
pub struct Environment {
    pub container: Container,
    pub transports: TransportRegistry,
    pub strict: bool,
}

impl Environment {
    /// An empty container with the default planes/trains/trucks registry.
    pub fn new(strict: bool) -> Self {
        Self {
            container: Container::new(),
            transports: TransportRegistry::default(),
            strict,
        }
    }

    /// Apply the error policy to a command failure.
    ///
    /// In lenient mode tolerated failures are logged and swallowed; anything else,
    /// and every failure in strict mode, is handed back to the caller.
    pub fn tolerate(&self, err: CommandError) -> Result<(), CommandError> {
        if !self.strict && err.is_tolerated() {
            warn!(error = %err, "ignored");
            Ok(())
        } else {
            Err(err)
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(false)
    }
}

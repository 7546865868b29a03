use thiserror::Error;

/// Failures of the transport factory.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A key required by the requested variant is absent from the parameters.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A numeric field holds text that does not parse as a number.
    #[error("field `{field}` expects a number, got `{value}`")]
    Format { field: String, value: String },

    /// No factory recognizes the type tag.
    #[error("unknown transport type `{0}`")]
    UnknownType(String),
}

/// Failures of a single command line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// The line does not follow the command's grammar.
    #[error("{command}: {message}")]
    Syntax { command: String, message: String },

    #[error("unsupported operator `{0}`")]
    UnknownOperator(String),

    #[error("cannot build transport: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CommandError {
    /// Whether the lenient policy skips this failure without reporting it.
    ///
    /// Unknown words and tags, unbuildable transports and unsupported operators are
    /// silent no-ops in lenient mode. Grammar violations and I/O failures never are.
    pub fn is_tolerated(&self) -> bool {
        matches!(
            self,
            CommandError::UnknownCommand(_)
                | CommandError::UnknownOperator(_)
                | CommandError::Transport(_)
        )
    }

    pub(crate) fn syntax(command: &str, message: impl Into<String>) -> Self {
        CommandError::Syntax {
            command: command.to_string(),
            message: message.into(),
        }
    }
}

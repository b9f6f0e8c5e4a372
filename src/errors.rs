use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum StrataError {
    #[error("{0}")]
    #[diagnostic(code(strata::invalid_arguments))]
    InvalidArguments(String),

    #[error("{0}")]
    #[diagnostic(code(strata::refused))]
    Refused(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(strata::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(strata::io))]
    Io(#[from] std::io::Error),

    #[error("{}", .0.message())]
    #[diagnostic(code(strata::git))]
    Git(#[from] git2::Error),
}

impl StrataError {
    /// Process exit status for this failure when exits are strict.
    pub fn exit_code(&self) -> i32 {
        match self {
            StrataError::InvalidArguments(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, StrataError>;

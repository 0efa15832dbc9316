use std::io;

#[derive(thiserror::Error, Debug)]
pub enum ConsoleError {
    /// stdin reached end of file while a prompt was waiting
    #[error("input closed")]
    InputClosed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Rejected score entry; the prompt is repeated.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid input. Please enter a number.")]
    NotANumber,
    #[error("Invalid grade {0}. Must be between 0 and 100.")]
    OutOfRange(f64),
}

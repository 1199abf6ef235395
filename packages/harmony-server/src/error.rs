use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The listening socket could not be opened.
    #[error("Could not bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("Request body of {0} bytes exceeds the limit")]
    PayloadTooLarge(usize),
}

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("IO Error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Input Error: {source}")]
    Input {
        #[from]
        source: inquire::error::InquireError,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO Error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("PDF Error: {source}")]
    Pdf {
        #[from]
        source: lopdf::Error,
    },
}

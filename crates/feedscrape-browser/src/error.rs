use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

impl From<Error> for feedscrape_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Browser(msg) => feedscrape_core::Error::Browser(msg),
            Error::Cdp(msg) => feedscrape_core::Error::Browser(format!("CDP error: {}", msg)),
            Error::Io(e) => feedscrape_core::Error::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

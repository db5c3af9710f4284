use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure surfaced to the caller of a signed request.
///
/// Construction problems are reported before any network activity through
/// [`RequestError`]; everything else maps a transport- or read-stage failure.
/// Note that a non-2xx HTTP status is *not* an error: the response body is
/// handed back as-is.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not build request : {0}")]
    Request(#[from] RequestError),
    #[error("request timed out")]
    Timeout,
    #[error("connection failed : {0}")]
    Connection(String),
    #[error("could not read response body : {0}")]
    Body(String),
}

/// A request that could not be constructed.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("{0:?} is not a known catalog item type")]
    UnknownItemType(String),
    #[error("item number is not specified")]
    MissingItemNumber,
    #[error("invalid request target : {0}")]
    InvalidUri(#[from] url::ParseError),
    #[error("could not serialize query parameters : {0}")]
    InvalidQuery(#[from] serde_urlencoded::ser::Error),
    #[error("environment variable {0} is not set")]
    MissingEnvVar(&'static str),
    #[error("could not initialize HTTP client : {0}")]
    Client(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else if err.is_connect() {
            Error::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            Error::Body(err.to_string())
        } else if err.is_builder() {
            Error::Request(RequestError::Client(err.to_string()))
        } else {
            Error::Connection(err.to_string())
        }
    }
}

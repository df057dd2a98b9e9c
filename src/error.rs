use thiserror::Error;

/// Result type alias for the storage SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the storage SDK
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration was missing or invalid at construction
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP transport reported a failure: connection error, non-2xx
    /// status, or an undecodable response body. Surfaced unmodified.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but the response lacked an expected field
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid base URL
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// I/O error while reading a local file source
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = Error::Configuration("api key is empty".to_string());
        assert_eq!(err.to_string(), "configuration error: api key is empty");
    }

    #[test]
    fn test_malformed_response_display() {
        let err = Error::MalformedResponse("missing signedURL".to_string());
        assert!(err.to_string().contains("missing signedURL"));
    }

    #[test]
    fn test_invalid_url_from_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("no such file"));
    }
}

use std::fmt;


#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}


// Everything that can go wrong with a single request to the remote authority. None of these
// ever reach the UI: the transport wrapper logs them and drops the continuation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RequestError {
    // The request never reached the server (connection refused, DNS, CORS, ...).
    Network(String),
    // The server answered with a non-2xx status.
    Status(u16),
    // The body was not the JSON we expected.
    Parse(String),
    // Base URL cannot be extended with a path.
    InvalidUrl(String),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Network(message) => write!(f, "network error: {}", message),
            RequestError::Status(status) => write!(f, "HTTP error! status: {}", status),
            RequestError::Parse(message) => write!(f, "malformed response: {}", message),
            RequestError::InvalidUrl(url) => write!(f, "invalid URL: {}", url),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self { RequestError::Parse(err.to_string()) }
}

use std::fmt;
use std::process::ExitCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    ConfigError(String),
    NetworkError(String),
    DecodeError(String),
    UpdateError(String),
    IoError(std::io::Error),
}

impl Error {
    /// Process exit status reported for this kind of failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::IoError(_) => ExitCode::from(1),
            Error::ConfigError(_) => ExitCode::from(2),
            Error::NetworkError(_) => ExitCode::from(3),
            Error::DecodeError(_) => ExitCode::from(4),
            Error::UpdateError(_) => ExitCode::from(5),
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ConfigError(e) => write!(f, "Config error: {}", e),
            Error::NetworkError(e) => write!(f, "Network error: {}", e),
            Error::DecodeError(e) => write!(f, "Decode error: {}", e),
            Error::UpdateError(e) => write!(f, "Update error: {}", e),
            Error::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::NetworkError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::DecodeError(err.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Error {
        Error::DecodeError(err.to_string())
    }
}

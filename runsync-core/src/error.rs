#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Transport failure: {0}")]
    TransportFailure(reqwest::Error),
    #[error("Decode failure: {0}")]
    DecodeFailure(serde_json::Error),
    #[error("Asset failure: {0}")]
    AssetFailure(String),
    #[error("Inconsistent order: runs[{index}] has order {order:?}")]
    InconsistentOrder { index: usize, order: Option<u32> },
    #[error("Current run not set")]
    CurrentRunNotSet,
    #[error("No next run")]
    NoNextRun,
    #[error("Run not found")]
    RunNotFound,
    #[error("std::io error: {0}")]
    IoError(std::io::Error),
    #[error("YAML error: {0}")]
    YamlError(serde_yaml::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeFailure(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err)
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error during msgpack serialisation: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("Error during msgpack deserialisation: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

impl IoError {
    pub fn file(path: &str, source: std::io::Error) -> Self {
        IoError::File {
            path: path.to_string(),
            source,
        }
    }
}

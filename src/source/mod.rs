//! Loading the ordered topic list.
//!
//! Topics are always fetched in full before allocation starts; sources
//! never stream.

use crate::Topic;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[cfg(feature = "remote")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

pub trait TopicSource {
    fn load_topics(&self) -> SourceResult<Vec<Topic>>;
}

impl TopicSource for Vec<Topic> {
    fn load_topics(&self) -> SourceResult<Vec<Topic>> {
        Ok(self.clone())
    }
}

pub mod file;
#[cfg(feature = "remote")]
pub mod remote;

pub use file::{
    CsvTopicFile, JsonTopicFile, load_topics_from_csv, load_topics_from_json, parse_topics_json,
};
#[cfg(feature = "remote")]
pub use remote::HttpTopicSource;

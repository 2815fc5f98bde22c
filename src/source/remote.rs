use tracing::debug;

use super::{SourceResult, TopicSource, file::parse_topics_json};
use crate::Topic;

/// Topics served by the topic API at `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTopicSource {
    pub url: String,
}

impl HttpTopicSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl TopicSource for HttpTopicSource {
    fn load_topics(&self) -> SourceResult<Vec<Topic>> {
        let body = reqwest::blocking::get(&self.url)?
            .error_for_status()?
            .text()?;
        let topics = parse_topics_json(&body)?;
        debug!(url = %self.url, topics = topics.len(), "fetched topics");
        Ok(topics)
    }
}

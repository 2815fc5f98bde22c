use serde::{Deserialize, Deserializer, Serialize};

/// One curriculum unit, in teaching order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    #[serde(default, deserialize_with = "lenient_string")]
    pub topic: String,
    #[serde(default, alias = "sub_topic", deserialize_with = "lenient_string")]
    pub sub_topic: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub objectives: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub activities: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub aids: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reference: String,
}

impl Topic {
    pub fn new(topic: impl Into<String>, sub_topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            sub_topic: sub_topic.into(),
            ..Self::default()
        }
    }

    pub fn with_objectives(mut self, objectives: impl Into<String>) -> Self {
        self.objectives = objectives.into();
        self
    }

    pub fn with_activities(mut self, activities: impl Into<String>) -> Self {
        self.activities = activities.into();
        self
    }

    pub fn with_aids(mut self, aids: impl Into<String>) -> Self {
        self.aids = aids.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// The six content fields in column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.topic.as_str(),
            self.sub_topic.as_str(),
            self.objectives.as_str(),
            self.activities.as_str(),
            self.aids.as_str(),
            self.reference.as_str(),
        ]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
}

/// Topic records come from loosely-typed sources, so scalars are coerced to
/// text and `null` becomes empty. Objects and arrays are still rejected.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LenientValue>::deserialize(deserializer)?;
    Ok(match value {
        None => String::new(),
        Some(LenientValue::Text(s)) => s,
        Some(LenientValue::Integer(v)) => v.to_string(),
        Some(LenientValue::Float(v)) => v.to_string(),
        Some(LenientValue::Flag(v)) => v.to_string(),
    })
}

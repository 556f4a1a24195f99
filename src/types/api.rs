use serde::{Deserialize, Deserializer};

/// One entry of `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub clues_count: usize,
}

/// Body of `GET /category?id=N`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub clues_count: usize,
    #[serde(default)]
    pub clues: Vec<RawClue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawClue {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
}

impl RawClue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// jService has clues whose text is `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Topic labels: the closed set of categories a headline can land in.
//
// The order of TopicLabel::ALL is the order of the classifier's probability
// vector: index i of the vector is the probability of ALL[i].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicLabel {
    QuantumComputing,
    Blockchain,
    GeneralKnowledge,
    PoliticalNews,
    Science,
    ArtificialIntelligence,
    MachineLearning,
    DeepLearning,
    DataScience,
    NeuralNetworks,
    Geography,
    History,
    Sports,
}

impl TopicLabel {
    pub const ALL: [TopicLabel; 13] = [
        TopicLabel::QuantumComputing,
        TopicLabel::Blockchain,
        TopicLabel::GeneralKnowledge,
        TopicLabel::PoliticalNews,
        TopicLabel::Science,
        TopicLabel::ArtificialIntelligence,
        TopicLabel::MachineLearning,
        TopicLabel::DeepLearning,
        TopicLabel::DataScience,
        TopicLabel::NeuralNetworks,
        TopicLabel::Geography,
        TopicLabel::History,
        TopicLabel::Sports,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TopicLabel::QuantumComputing => "Quantum Computing",
            TopicLabel::Blockchain => "Blockchain",
            TopicLabel::GeneralKnowledge => "General Knowledge",
            TopicLabel::PoliticalNews => "Political News",
            TopicLabel::Science => "Science",
            TopicLabel::ArtificialIntelligence => "Artificial Intelligence",
            TopicLabel::MachineLearning => "Machine Learning",
            TopicLabel::DeepLearning => "Deep Learning",
            TopicLabel::DataScience => "Data Science",
            TopicLabel::NeuralNetworks => "Neural Networks",
            TopicLabel::Geography => "Geography",
            TopicLabel::History => "History",
            TopicLabel::Sports => "Sports",
        }
    }

    /// Label at position `index` of the probability vector.
    pub fn from_index(index: usize) -> Option<TopicLabel> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for TopicLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The category assigned to a title: a topic, or the sentinel for titles
/// with nothing left to classify after preprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Category {
    Topic(TopicLabel),
    Uncategorized,
}

pub const UNCATEGORIZED: &str = "Uncategorized";

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Topic(label) => label.as_str(),
            Category::Uncategorized => UNCATEGORIZED,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNCATEGORIZED {
            return Ok(Category::Uncategorized);
        }
        TopicLabel::ALL
            .iter()
            .find(|l| l.as_str() == s)
            .map(|l| Category::Topic(*l))
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {s:?}"))
    }
}

impl From<Category> for String {
    fn from(c: Category) -> String {
        c.as_str().to_string()
    }
}

impl TryFrom<String> for Category {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Index of the largest value; ties go to the earliest index. Returns None
/// for an empty slice or one containing NaN.
pub fn argmax(values: &[f64]) -> Option<usize> {
    if values.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

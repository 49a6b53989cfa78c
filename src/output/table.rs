// ResultTable: the (title, category) pairs produced by one categorization.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::classify::labels::Category;

/// One classified headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub title: String,
    pub category: Category,
}

/// Classified headlines in scrape order. Titles are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ClassificationResult>,
}

impl ResultTable {
    /// Zip titles with their categories. Both must have the same length.
    pub fn from_pairs(titles: Vec<String>, categories: Vec<Category>) -> Result<Self> {
        if titles.len() != categories.len() {
            anyhow::bail!(
                "Got {} categories for {} titles",
                categories.len(),
                titles.len()
            );
        }
        Ok(Self {
            rows: titles
                .into_iter()
                .zip(categories)
                .map(|(title, category)| ClassificationResult { title, category })
                .collect(),
        })
    }

    pub fn rows(&self) -> &[ClassificationResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.title.as_str())
    }
}

impl FromIterator<ClassificationResult> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ClassificationResult>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

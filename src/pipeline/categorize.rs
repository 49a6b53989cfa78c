// Categorize pipeline: titles -> classifier -> result table.
//
// Shared by the `categorize` CLI command and the web UI's categorize action.
// The classifier runs over the whole batch in one call; any failure aborts
// the step and no table is produced.

use anyhow::{Context, Result};
use tracing::info;

use crate::classify::traits::TopicClassifier;
use crate::output::table::ResultTable;
use crate::scrape::client::HeadlineClient;

/// Classify `titles` and pair each with its category, preserving order.
pub async fn categorize_titles(
    classifier: &dyn TopicClassifier,
    titles: &[String],
) -> Result<ResultTable> {
    let categories = classifier
        .classify(titles)
        .await
        .context("Categorization failed")?;
    ResultTable::from_pairs(titles.to_vec(), categories)
}

/// Scrape the source page, then categorize everything found.
///
/// Fails with a readable message if the page has no headlines, since there
/// is nothing to categorize.
pub async fn scrape_and_categorize(
    client: &HeadlineClient,
    classifier: &dyn TopicClassifier,
) -> Result<ResultTable> {
    let titles = client.fetch_titles().await?;
    if titles.is_empty() {
        anyhow::bail!("No headlines found at {}", client.url());
    }

    let table = categorize_titles(classifier, &titles).await?;
    info!(rows = table.len(), "Scrape and categorize complete");
    Ok(table)
}

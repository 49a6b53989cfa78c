// Pipelines: the steps that turn scraped titles into a result table.

pub mod categorize;

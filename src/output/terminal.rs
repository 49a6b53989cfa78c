// Colored terminal output for scraped titles and categorized results.
//
// main.rs display code delegates here so the CLI and the web UI share the
// same table data without sharing formatting.

use std::collections::BTreeMap;

use colored::Colorize;

use super::table::ResultTable;
use crate::classify::labels::Category;

const TITLE_WIDTH: usize = 72;

/// Display a numbered list of scraped titles.
pub fn display_titles(titles: &[String]) {
    if titles.is_empty() {
        println!("No headlines found on the source page.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Scraped {} titles ===", titles.len()).bold()
    );
    println!();
    for (i, title) in titles.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, title);
    }
    println!();
}

/// Display the categorized results as a two-column table plus a per-topic tally.
pub fn display_results(table: &ResultTable) {
    if table.is_empty() {
        println!("No titles to categorize.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Categorized {} titles ===", table.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<width$}  {}",
        "#".dimmed(),
        "Title".dimmed(),
        "Category".dimmed(),
        width = TITLE_WIDTH + 3,
    );

    for (i, row) in table.rows().iter().enumerate() {
        let title = super::truncate_chars(&row.title, TITLE_WIDTH);
        println!(
            "  {:>4}  {:<width$}  {}",
            format!("{}.", i + 1),
            title,
            colorize_category(&row.category),
            width = TITLE_WIDTH + 3,
        );
    }

    println!("\n  {}", "By topic:".bold());
    for (label, count) in tally(table) {
        println!("    {label:<24} {count}");
    }
    println!();
}

/// Count titles per category, sorted by category name.
pub fn tally(table: &ResultTable) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for row in table.rows() {
        *counts.entry(row.category.as_str()).or_insert(0) += 1;
    }
    counts
}

fn colorize_category(category: &Category) -> colored::ColoredString {
    match category {
        Category::Topic(label) => label.as_str().cyan(),
        Category::Uncategorized => category.as_str().dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::labels::TopicLabel;

    #[test]
    fn test_tally_counts_duplicates() {
        let table = ResultTable::from_pairs(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                Category::Topic(TopicLabel::Sports),
                Category::Uncategorized,
                Category::Topic(TopicLabel::Sports),
            ],
        )
        .unwrap();
        let t = tally(&table);
        assert_eq!(t["Sports"], 2);
        assert_eq!(t["Uncategorized"], 1);
    }
}

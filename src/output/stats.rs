//! Statistics read back from the destination table
//!
//! Used by `--stats` and printed at the end of a pipeline run.

use crate::storage::BookStore;
use crate::FolioError;

/// Summary of the destination table contents
#[derive(Debug, Clone, Default)]
pub struct TableStatistics {
    /// Total number of stored books
    pub total_books: u64,

    /// Books per category, sorted by category name
    pub by_category: Vec<(String, u64)>,

    /// Books per stored rating text, sorted by rating
    pub by_rating: Vec<(String, u64)>,
}

/// Loads statistics from storage
pub fn load_statistics(store: &dyn BookStore) -> Result<TableStatistics, FolioError> {
    Ok(TableStatistics {
        total_books: store.count_books()?,
        by_category: store.count_by_category()?,
        by_rating: store.count_by_rating()?,
    })
}

/// Formats statistics as a plain-text block
pub fn format_statistics(stats: &TableStatistics) -> String {
    let mut out = String::new();

    out.push_str("=== Book Table Statistics ===\n\n");
    out.push_str(&format!("Total books: {}\n", stats.total_books));

    if !stats.by_category.is_empty() {
        out.push_str(&format!("\nCategories ({}):\n", stats.by_category.len()));
        let width = stats
            .by_category
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        for (name, count) in &stats.by_category {
            out.push_str(&format!("  {:<width$}  {}\n", name, count, width = width));
        }
    }

    if !stats.by_rating.is_empty() {
        out.push_str("\nRatings:\n");
        for (rating, count) in &stats.by_rating {
            out.push_str(&format!("  {:<5}  {}\n", rating, count));
        }
    }

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &TableStatistics) {
    print!("{}", format_statistics(stats));
}

//! Level calculation.
//!
//! The level of a text is the highest rank among its characters: how far
//! through the reference vocabulary a reader must be to know every character.

use crate::rank::{Rank, RankTable};

/// Computes levels against a rank table.
///
/// Text is decomposed into Unicode scalar values; there is no clustering of
/// combining sequences.
///
/// # Example
///
/// ```
/// use ranklevel_core::{LevelCalculator, RankTable};
///
/// let table = RankTable::from_sequence(["一", "二", "三"]);
/// let calculator = LevelCalculator::new(&table);
///
/// assert_eq!(calculator.level_of("二十"), 2);
/// assert_eq!(calculator.level_of(""), 0);
/// assert_eq!(calculator.level_text("三一"), "3");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LevelCalculator<'a> {
    table: &'a RankTable,
}

impl<'a> LevelCalculator<'a> {
    pub fn new(table: &'a RankTable) -> Self {
        Self { table }
    }

    /// Maximum rank over the characters of `text`; 0 if none are ranked.
    pub fn level_of(&self, text: &str) -> Rank {
        text.chars()
            .map(|c| self.table.rank_of(c))
            .max()
            .unwrap_or(0)
    }

    /// The level rendered as display text for a destination field.
    pub fn level_text(&self, text: &str) -> String {
        self.level_of(text).to_string()
    }

    pub fn table(&self) -> &'a RankTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RankTable {
        RankTable::from_sequence(["一", "二", "三", "口", "日"])
    }

    #[test]
    fn test_empty_text_is_level_zero() {
        let table = table();
        assert_eq!(LevelCalculator::new(&table).level_of(""), 0);
    }

    #[test]
    fn test_unranked_text_is_level_zero() {
        let table = table();
        let calculator = LevelCalculator::new(&table);
        assert_eq!(calculator.level_of("abc"), 0);
        assert_eq!(calculator.level_of("ひらがな、。"), 0);
    }

    #[test]
    fn test_level_is_max_rank() {
        let table = table();
        let calculator = LevelCalculator::new(&table);
        assert_eq!(calculator.level_of("二十"), 2);
        assert_eq!(calculator.level_of("日本語"), 5);
        assert_eq!(calculator.level_of("三日一"), 5);

        for text in ["一口", "三十日", "x二y"] {
            let expected = text.chars().map(|c| table.rank_of(c)).max().unwrap_or(0);
            assert_eq!(calculator.level_of(text), expected);
        }
    }

    #[test]
    fn test_level_text() {
        let table = table();
        let calculator = LevelCalculator::new(&table);
        assert_eq!(calculator.level_text("口"), "4");
        assert_eq!(calculator.level_text("kana"), "0");
    }
}

//! The immutable character → rank mapping.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{info, warn};

use super::reader::{read_rows, ReferenceRow};
use super::source::ReferenceSource;
use crate::error::ConfigurationError;

/// 1-based position in the reference vocabulary; 0 means "not ranked".
pub type Rank = u32;

/// One ranked character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankEntry {
    pub character: char,
    pub rank: Rank,
}

/// Mapping from character to rank.
///
/// Every row of the ordered sequence consumes one position. Duplicate
/// characters keep the rank of their first occurrence; rows that are not a
/// single character consume their position without being ranked.
///
/// # Example
///
/// ```
/// use ranklevel_core::RankTable;
///
/// let table = RankTable::from_sequence(["一", "二", "三"]);
/// assert_eq!(table.rank_of('二'), 2);
/// assert_eq!(table.rank_of('十'), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankTable {
    ranks: HashMap<char, Rank>,
    positions: Rank,
}

impl RankTable {
    /// Builds a table directly from an ordered sequence, without seeding.
    pub fn from_sequence<I, T>(sequence: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut table = Self::default();
        for token in sequence {
            table.push(token.as_ref());
        }
        table
    }

    /// Loads a table from a reference file.
    ///
    /// Seed entries from `source` take ranks `1..=seed.len()` ahead of the
    /// file rows, unless the file already starts with them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the file is missing, unreadable, not
    /// UTF-8, or ranks no characters at all.
    pub fn load(source: &ReferenceSource) -> Result<Self, ConfigurationError> {
        let path = source.path();
        let rows = read_rows(path, source.delimiter())?;

        let seeded = !source.seed().is_empty() && !starts_with_seed(&rows, source.seed());
        let mut table = Self::default();
        if seeded {
            for &c in source.seed() {
                table.push_char(c);
            }
        }

        let mut ranked_rows = 0usize;
        for row in &rows {
            if table.push(&row.token) {
                ranked_rows += 1;
            } else if single_char(&row.token).is_none() {
                warn!(
                    event = "rank_row_skipped",
                    path = %path.display(),
                    line = row.line,
                    token = %row.token,
                );
            }
        }

        if ranked_rows == 0 {
            return Err(ConfigurationError::Empty {
                path: path.to_path_buf(),
            });
        }

        info!(
            event = "rank_table_built",
            path = %path.display(),
            entries = table.len(),
            max_rank = table.max_rank(),
            seeded = seeded,
        );
        Ok(table)
    }

    /// Returns the rank of `c`, or 0 if it is not ranked.
    pub fn rank_of(&self, c: char) -> Rank {
        self.ranks.get(&c).copied().unwrap_or(0)
    }

    /// Number of ranked characters.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Highest position consumed by the sequence.
    pub fn max_rank(&self) -> Rank {
        self.positions
    }

    /// Ranked characters in rank order.
    pub fn entries(&self) -> Vec<RankEntry> {
        let mut entries: Vec<RankEntry> = self
            .ranks
            .iter()
            .map(|(&character, &rank)| RankEntry { character, rank })
            .collect();
        entries.sort_by_key(|e| e.rank);
        entries
    }

    /// Consumes one position; returns whether a new character was ranked.
    fn push(&mut self, token: &str) -> bool {
        match single_char(token) {
            Some(c) => self.push_char(c),
            None => {
                self.positions += 1;
                false
            }
        }
    }

    fn push_char(&mut self, c: char) -> bool {
        self.positions += 1;
        let rank = self.positions;
        match self.ranks.entry(c) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(rank);
                true
            }
        }
    }
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn starts_with_seed(rows: &[ReferenceRow], seed: &[char]) -> bool {
    rows.len() >= seed.len()
        && rows
            .iter()
            .zip(seed)
            .all(|(row, &c)| single_char(&row.token) == Some(c))
}

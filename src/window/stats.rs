//! Player statistics table shown beside the board.

use crate::snapshot::{GameSnapshot, PlayerSnapshot};

/// Per-player, per-attribute grid.
///
/// Columns are players and rows are attributes. Both counts are fixed when
/// the table is created; refreshing only replaces the cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStatTable {
    headers: Vec<String>,
    attributes: Vec<String>,
    /// Values by column, then row.
    values: Vec<Vec<String>>,
}

impl PlayerStatTable {
    /// Build the table from the players of a snapshot.
    ///
    /// Attribute names come from the first player.
    #[must_use]
    pub fn new(snapshot: &GameSnapshot) -> Self {
        let headers = snapshot
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| format!("[{i}] {}", p.name))
            .collect();
        let attributes = snapshot
            .players
            .first()
            .map(|p| p.stats.iter().map(|s| s.name.clone()).collect())
            .unwrap_or_default();
        let mut table = Self {
            headers,
            attributes,
            values: Vec::new(),
        };
        table.refresh(snapshot);
        table
    }

    /// Re-read every player's values.
    ///
    /// Players or attributes that did not exist at construction are ignored;
    /// missing values show as empty.
    pub fn refresh(&mut self, snapshot: &GameSnapshot) {
        self.values = (0..self.column_count())
            .map(|col| self.column_values(snapshot.players.get(col)))
            .collect();
    }

    fn column_values(&self, player: Option<&PlayerSnapshot>) -> Vec<String> {
        self.attributes
            .iter()
            .enumerate()
            .map(|(row, name)| {
                player
                    .and_then(|p| {
                        p.stats
                            .get(row)
                            .filter(|s| &s.name == name)
                            .or_else(|| p.stats.iter().find(|s| &s.name == name))
                    })
                    .map(|s| s.value.clone())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Number of players.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of attributes.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.attributes.len()
    }

    /// Column header, `[index] name`.
    #[must_use]
    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col).map(String::as_str)
    }

    /// Row header, the attribute name.
    #[must_use]
    pub fn attribute(&self, row: usize) -> Option<&str> {
        self.attributes.get(row).map(String::as_str)
    }

    /// Value of an attribute for a player.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        self.values.get(col)?.get(row).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{BoardSize, PlayerStat};

    fn player(name: &str, money: i64) -> PlayerSnapshot {
        PlayerSnapshot {
            name: name.to_string(),
            money,
            stats: vec![PlayerStat::new("name", name), PlayerStat::new("money", &money)],
        }
    }

    fn snapshot(players: Vec<PlayerSnapshot>) -> GameSnapshot {
        GameSnapshot {
            players,
            ..GameSnapshot::empty(BoardSize::new(5, 5))
        }
    }

    #[test]
    fn test_table_shape() {
        let table = PlayerStatTable::new(&snapshot(vec![player("alice", 10), player("bob", 20)]));
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.header(1), Some("[1] bob"));
        assert_eq!(table.attribute(1), Some("money"));
        assert_eq!(table.value(1, 0), Some("10"));
        assert_eq!(table.value(0, 1), Some("bob"));
        assert_eq!(table.value(2, 0), None);
    }

    #[test]
    fn test_refresh_keeps_extent() {
        let mut table = PlayerStatTable::new(&snapshot(vec![player("alice", 10), player("bob", 20)]));
        table.refresh(&snapshot(vec![player("alice", 15), player("bob", 5), player("carol", 1)]));

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(1, 0), Some("15"));
        assert_eq!(table.value(1, 1), Some("5"));
    }

    #[test]
    fn test_refresh_with_missing_player() {
        let mut table = PlayerStatTable::new(&snapshot(vec![player("alice", 10), player("bob", 20)]));
        table.refresh(&snapshot(vec![player("alice", 11)]));
        assert_eq!(table.value(1, 1), Some(""));
    }

    #[test]
    fn test_no_players() {
        let table = PlayerStatTable::new(&snapshot(vec![]));
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }
}

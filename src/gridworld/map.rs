//! Grid map parsing and validation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single cell of a grid map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Start position of every episode
    Start,
    /// Safe cell
    Frozen,
    /// Terminal cell with reward 0
    Hole,
    /// Terminal cell with reward 1
    Goal,
}

impl Cell {
    fn from_char(character: char, row: usize, column: usize) -> Result<Self> {
        match character {
            'S' => Ok(Cell::Start),
            'F' => Ok(Cell::Frozen),
            'H' => Ok(Cell::Hole),
            'G' => Ok(Cell::Goal),
            _ => Err(Error::InvalidMapCharacter {
                character,
                row,
                column,
            }),
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Start => 'S',
            Cell::Frozen => 'F',
            Cell::Hole => 'H',
            Cell::Goal => 'G',
        }
    }

    /// Whether entering this cell ends the episode.
    pub fn is_terminal(self) -> bool {
        matches!(self, Cell::Hole | Cell::Goal)
    }
}

/// A validated rectangular grid map.
///
/// States are row-major cell indices in `[0, rows * columns)`. A valid map is
/// non-empty, rectangular, contains exactly one start cell, and at least one
/// goal cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    cells: Vec<Cell>,
    rows: usize,
    columns: usize,
    start: usize,
}

impl GridMap {
    /// Parse a map from text rows over the alphabet `{S, F, H, G}`.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyMap);
        }

        let columns = rows[0].as_ref().chars().count();
        if columns == 0 {
            return Err(Error::EmptyMap);
        }

        let mut cells = Vec::with_capacity(rows.len() * columns);
        let mut start = None;
        let mut has_goal = false;

        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let got = row.chars().count();
            if got != columns {
                return Err(Error::RaggedMap {
                    row: row_index,
                    expected: columns,
                    got,
                });
            }

            for (column_index, character) in row.chars().enumerate() {
                let cell = Cell::from_char(character, row_index, column_index)?;
                let state = row_index * columns + column_index;
                match cell {
                    Cell::Start => {
                        if let Some(first) = start {
                            return Err(Error::MultipleStarts {
                                first,
                                second: state,
                            });
                        }
                        start = Some(state);
                    }
                    Cell::Goal => has_goal = true,
                    _ => {}
                }
                cells.push(cell);
            }
        }

        let start = start.ok_or(Error::MissingStart)?;
        if !has_goal {
            return Err(Error::MissingGoal);
        }

        Ok(Self {
            cells,
            rows: rows.len(),
            columns,
            start,
        })
    }

    /// Parse a map from a single string.
    ///
    /// Rows are separated by newlines or `/`, so both file contents and the
    /// compact descriptions stored in saved-agent metadata round-trip.
    pub fn from_text(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text
            .split(['\n', '/'])
            .map(str::trim)
            .filter(|row| !row.is_empty())
            .collect();
        Self::parse(&rows)
    }

    /// Load a map from a text file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("read map file {}", path.as_ref().display()),
            source,
        })?;
        Self::from_text(&text)
    }

    /// Compact single-line description of the map, e.g. `SFFF/FHFF/FFHF/HFFG`.
    pub fn describe(&self) -> String {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Number of states (cells) in the map.
    pub fn state_count(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// State index of the start cell.
    pub fn start_state(&self) -> usize {
        self.start
    }

    /// Cell at the given state index.
    ///
    /// # Panics
    ///
    /// Panics if `state` is out of bounds; callers obtain states from the
    /// environment, which only produces valid indices.
    pub fn cell(&self, state: usize) -> Cell {
        self.cells[state]
    }
}

impl Default for GridMap {
    /// The 4x4 lecture map: one learnable path, three holes.
    ///
    /// ```text
    /// SFFF
    /// FHFF
    /// FFHF
    /// HFFG
    /// ```
    fn default() -> Self {
        use Cell::{Frozen as F, Goal, Hole as H, Start};
        Self {
            cells: vec![
                Start, F, F, F, //
                F, H, F, F, //
                F, F, H, F, //
                H, F, F, Goal,
            ],
            rows: 4,
            columns: 4,
            start: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_map() {
        let map = GridMap::parse(&["SFFF", "FHFF", "FFHF", "HFFG"]).unwrap();
        assert_eq!(map, GridMap::default());
        assert_eq!(map.state_count(), 16);
        assert_eq!(map.start_state(), 0);
        assert_eq!(map.cell(15), Cell::Goal);
        assert_eq!(map.cell(5), Cell::Hole);
    }

    #[test]
    fn test_describe_roundtrip() {
        let map = GridMap::default();
        assert_eq!(map.describe(), "SFFF/FHFF/FFHF/HFFG");
        assert_eq!(GridMap::from_text(&map.describe()).unwrap(), map);
    }

    #[test]
    fn test_from_text_newlines() {
        let map = GridMap::from_text("SFFF\nFHFF\nFFHF\nHFFG\n").unwrap();
        assert_eq!(map, GridMap::default());
    }

    #[test]
    fn test_invalid_character() {
        let err = GridMap::parse(&["SF", "FX"]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidMapCharacter {
                character: 'X',
                row: 1,
                column: 1,
            }
        ));
    }

    #[test]
    fn test_ragged_rows() {
        let err = GridMap::parse(&["SFG", "FF"]).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedMap {
                row: 1,
                expected: 3,
                got: 2,
            }
        ));
    }

    #[test]
    fn test_missing_start() {
        let err = GridMap::parse(&["FF", "FG"]).unwrap_err();
        assert!(matches!(err, Error::MissingStart));
    }

    #[test]
    fn test_multiple_starts() {
        let err = GridMap::parse(&["SF", "SG"]).unwrap_err();
        assert!(matches!(err, Error::MultipleStarts { first: 0, second: 2 }));
    }

    #[test]
    fn test_missing_goal() {
        let err = GridMap::parse(&["SF", "FH"]).unwrap_err();
        assert!(matches!(err, Error::MissingGoal));
    }

    #[test]
    fn test_empty_map() {
        let rows: [&str; 0] = [];
        assert!(matches!(GridMap::parse(&rows).unwrap_err(), Error::EmptyMap));
    }
}

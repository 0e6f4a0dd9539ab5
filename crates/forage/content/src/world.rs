//! Plain-text world layouts.
//!
//! One line per row; the number of lines is the grid size and every line must
//! hold at least that many symbols (extra symbols are ignored):
//!
//! | symbol | cell |
//! |---|---|
//! | `.` | grass |
//! | `#` | rock |
//! | `~` | pond |
//! | `*` | gem source, treated as grass |

use forage_core::{GridWorld, RockKind, Terrain, WorldError};

/// Built-in 12x12 layout used when no world file is given.
pub const DEMO_WORLD: &str = "\
............
..##.....~~.
..#......~~.
............
.....##.....
.~~..#......
.~~.........
........#...
...*....##..
............
.##.....~...
............
";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldParseError {
    #[error("world layout is empty")]
    Empty,

    #[error("row {row} has {actual} symbols, expected at least {expected}")]
    ShortRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown symbol {symbol:?} at row {row}, column {column}")]
    UnknownSymbol {
        row: usize,
        column: usize,
        symbol: char,
    },

    #[error(transparent)]
    World(#[from] WorldError),
}

/// Boulder variant for the rock at `(x, y)`.
///
/// Derived from the coordinates so the same file always looks the same.
pub fn rock_variant(x: usize, y: usize) -> RockKind {
    RockKind::new(((x * 7 + y * 13) % usize::from(RockKind::VARIANTS)) as u8 + 1)
}

/// Parses a world layout. Trailing blank lines are ignored.
pub fn parse_world(text: &str) -> Result<GridWorld, WorldParseError> {
    let mut rows: Vec<&str> = text.lines().collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(WorldParseError::Empty);
    }

    let size = rows.len();
    let mut terrain = Vec::with_capacity(size * size);

    for (y, row) in rows.iter().enumerate() {
        let symbols: Vec<char> = row.trim_end_matches('\r').chars().collect();
        if symbols.len() < size {
            return Err(WorldParseError::ShortRow {
                row: y,
                expected: size,
                actual: symbols.len(),
            });
        }

        for (x, symbol) in symbols.into_iter().take(size).enumerate() {
            let cell = match symbol {
                '.' | '*' => Terrain::Grass,
                '#' => Terrain::Rock(rock_variant(x, y)),
                '~' => Terrain::Pond,
                symbol => {
                    return Err(WorldParseError::UnknownSymbol {
                        row: y,
                        column: x,
                        symbol,
                    });
                }
            };
            terrain.push(cell);
        }
    }

    Ok(GridWorld::with_terrain(size as u32, terrain)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forage_core::{Cell, CellContent, ContentMask};

    #[test]
    fn demo_world_is_square() {
        let world = parse_world(DEMO_WORLD).unwrap();
        assert_eq!(world.size(), 12);
        assert_eq!(world.content_at(Cell::new(9, 1)), Some(CellContent::Water));
        assert!(matches!(
            world.content_at(Cell::new(2, 1)),
            Some(CellContent::Obstacle(_))
        ));
        // The gem source is plain grass.
        assert_eq!(world.content_at(Cell::new(3, 8)), Some(CellContent::Empty));
    }

    #[test]
    fn parses_symbols_and_ignores_carriage_returns() {
        let world = parse_world(".#~\r\n*..\r\n...\r\n").unwrap();
        assert_eq!(world.terrain_at(Cell::new(2, 0)), Some(Terrain::Pond));
        assert_eq!(world.terrain_at(Cell::new(0, 1)), Some(Terrain::Grass));
        assert_eq!(
            world.occupied_cells(ContentMask::OBSTACLE).len(),
            1
        );
    }

    #[test]
    fn extra_columns_are_ignored() {
        let world = parse_world("..xx\n..yy\n").unwrap();
        assert_eq!(world.size(), 2);
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(parse_world(""), Err(WorldParseError::Empty));
        assert_eq!(parse_world("\n\n"), Err(WorldParseError::Empty));
    }

    #[test]
    fn rejects_short_rows() {
        assert_eq!(
            parse_world("...\n..\n...\n"),
            Err(WorldParseError::ShortRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn rejects_unknown_symbols_with_position() {
        assert_eq!(
            parse_world("..\n.x\n"),
            Err(WorldParseError::UnknownSymbol {
                row: 1,
                column: 1,
                symbol: 'x'
            })
        );
    }

    #[test]
    fn rock_variants_are_stable() {
        assert_eq!(rock_variant(3, 4), rock_variant(3, 4));
        for x in 0..10 {
            let variant = rock_variant(x, 0).variant();
            assert!((1..=4).contains(&variant));
        }
    }
}

use crate::grid::Grid;
use crate::types::Position;
use thiserror::Error;

/// Text layouts describe a maze one row per line:
/// `%` wall, `.` food, `o` capsule, `P` Pacman, `G` ghost, space for an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid layout character '{character}' at row {row}, column {column}")]
    InvalidCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("layout has no Pacman start")]
    MissingPacman,

    #[error("layout has more than one Pacman start")]
    MultiplePacmen,
}

/// The static description of a maze and its starting positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub walls: Grid,
    pub food: Grid,
    pub capsules: Vec<Position>,
    pub pacman_start: Position,
    /// Ghost starts in reading order; ghost `i` becomes agent `i + 1`.
    pub ghost_starts: Vec<Position>,
}

impl Layout {
    /// Parses a text layout.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        if rows.is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = rows[0].chars().count();
        let height = rows.len();

        let mut walls = Grid::new(width, height);
        let mut food = Grid::new(width, height);
        let mut capsules = Vec::new();
        let mut pacman_start = None;
        let mut ghost_starts = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    got,
                });
            }

            for (column, character) in line.chars().enumerate() {
                let pos = Position::new(column as i32, row as i32);
                match character {
                    '%' => walls.set(pos, true),
                    '.' => food.set(pos, true),
                    'o' => capsules.push(pos),
                    'P' => {
                        if pacman_start.replace(pos).is_some() {
                            return Err(LayoutError::MultiplePacmen);
                        }
                    }
                    'G' => ghost_starts.push(pos),
                    ' ' => {}
                    _ => {
                        return Err(LayoutError::InvalidCharacter {
                            character,
                            row,
                            column,
                        })
                    }
                }
            }
        }

        Ok(Self {
            walls,
            food,
            capsules,
            pacman_start: pacman_start.ok_or(LayoutError::MissingPacman)?,
            ghost_starts,
        })
    }

    pub fn width(&self) -> usize {
        self.walls.width()
    }

    pub fn height(&self) -> usize {
        self.walls.height()
    }

    /// Serializes the layout back to its text form.
    pub fn to_layout_string(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());

        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let pos = Position::new(x, y);
                let c = if self.walls.get(pos) {
                    '%'
                } else if pos == self.pacman_start {
                    'P'
                } else if self.ghost_starts.contains(&pos) {
                    'G'
                } else if self.capsules.contains(&pos) {
                    'o'
                } else if self.food.get(pos) {
                    '.'
                } else {
                    ' '
                };
                out.push(c);
            }
            out.push('\n');
        }

        out
    }
}

/// Built-in layouts.
pub mod layouts {
    use super::{Layout, LayoutError};

    pub const TEST_CLASSIC: &str = "\
%%%%%
% . %
%.G.%
% . %
%. .%
%   %
%  .%
%   %
%P .%
%%%%%";

    pub const MINIMAX_CLASSIC: &str = "\
%%%%%%%%%
%.P    G%
% %.%G%%%
%G    %%%
%%%%%%%%%";

    pub const TRAPPED_CLASSIC: &str = "\
%%%%%%%%
%   P G%
%G%%%%%%
%....  %
%%%%%%%%";

    pub const SMALL_CLASSIC: &str = "\
%%%%%%%%%%%%%%%%%%%%
%......%G  G%......%
%.%%...%%  %%...%%.%
%.%o.%........%.o%.%
%.%%.%.%%%%%%.%.%%.%
%........P.........%
%%%%%%%%%%%%%%%%%%%%";

    pub const OPEN_CLASSIC: &str = "\
%%%%%%%%%%
%P.......%
%........%
%...GG...%
%........%
%..o.....%
%%%%%%%%%%";

    pub const NAMES: &[&str] = &[
        "testClassic",
        "minimaxClassic",
        "trappedClassic",
        "smallClassic",
        "openClassic",
    ];

    /// Looks up a built-in layout's text by name.
    pub fn by_name(name: &str) -> Option<&'static str> {
        match name {
            "testClassic" => Some(TEST_CLASSIC),
            "minimaxClassic" => Some(MINIMAX_CLASSIC),
            "trappedClassic" => Some(TRAPPED_CLASSIC),
            "smallClassic" => Some(SMALL_CLASSIC),
            "openClassic" => Some(OPEN_CLASSIC),
            _ => None,
        }
    }

    /// Parses a built-in layout. Returns None for unknown names.
    pub fn load(name: &str) -> Option<Result<Layout, LayoutError>> {
        by_name(name).map(Layout::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimax_classic() {
        let layout = Layout::parse(layouts::MINIMAX_CLASSIC).unwrap();

        assert_eq!(layout.width(), 9);
        assert_eq!(layout.height(), 5);
        assert_eq!(layout.pacman_start, Position::new(2, 1));
        assert_eq!(
            layout.ghost_starts,
            vec![Position::new(7, 1), Position::new(5, 2), Position::new(1, 3)]
        );
        assert_eq!(layout.food.count(), 2);
        assert!(layout.capsules.is_empty());
        assert!(layout.walls.get(Position::new(0, 0)));
        assert!(!layout.walls.get(Position::new(3, 1)));
    }

    #[test]
    fn test_all_builtin_layouts_parse() {
        for name in layouts::NAMES {
            let layout = layouts::load(name)
                .expect("known layout")
                .unwrap_or_else(|e| panic!("{name} failed to parse: {e}"));
            assert!(layout.food.count() > 0, "{name} has no food");
        }
        assert!(layouts::load("mediumClassic").is_none());
    }

    #[test]
    fn test_round_trip_text() {
        let layout = Layout::parse(layouts::SMALL_CLASSIC).unwrap();
        assert_eq!(layout.to_layout_string().trim_end(), layouts::SMALL_CLASSIC);
        assert_eq!(layout.capsules.len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Layout::parse("\n  \n"), Err(LayoutError::Empty));
        assert_eq!(Layout::parse("%%%\n%P.%\n%%%"), Err(LayoutError::RaggedRow {
            row: 1,
            expected: 3,
            got: 4,
        }));
        assert_eq!(
            Layout::parse("%%%\n%x%\n%%%"),
            Err(LayoutError::InvalidCharacter {
                character: 'x',
                row: 1,
                column: 1,
            })
        );
        assert_eq!(Layout::parse("%%%\n%.%\n%%%"), Err(LayoutError::MissingPacman));
        assert_eq!(
            Layout::parse("%%%%\n%PP%\n%%%%"),
            Err(LayoutError::MultiplePacmen)
        );
    }
}

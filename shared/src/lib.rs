//! Protocol definitions shared between the snake server and its clients.
//!
//! Everything here is pure data: the grid constants, the `Direction`
//! command-byte mapping and the text snapshot codec. The wire format is
//! deliberately simple ASCII — clients send a single command byte per turn
//! request, the server answers every tick with concatenated `"x,y,s;"` /
//! `"x,y,f;"` records that clients split on `';'`.

/// Reference window size the grid was originally derived from.
pub const WINDOW_WIDTH: i32 = 641;
pub const WINDOW_HEIGHT: i32 = 481;
/// Pixel size of one grid cell in the reference client.
pub const CELL_SIZE: i32 = 20;

/// Playfield dimensions in cells (32 x 24 with the defaults above).
pub const GRID_WIDTH: i32 = WINDOW_WIDTH / CELL_SIZE;
pub const GRID_HEIGHT: i32 = WINDOW_HEIGHT / CELL_SIZE;

pub const DEFAULT_PORT: u16 = 1025;
pub const TICK_INTERVAL_MS: u64 = 100;
pub const MAX_PLAYERS: usize = 1;
pub const DESIRED_FRUIT_COUNT: usize = 1;

/// A grid cell coordinate. Signed so an out-of-bounds head can be
/// represented without clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the position lies inside `[0, width) x [0, height)`.
    pub fn in_bounds(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// Axis of travel, used by the no-reversal turn rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// One of the four travel directions. North decreases `y` (screen
/// coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Unit vector for one tick of travel.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::East | Direction::West => Axis::Horizontal,
            Direction::North | Direction::South => Axis::Vertical,
        }
    }

    /// Maps a client command byte to a direction. Case-sensitive; any
    /// unrecognized byte is `None` and must be ignored by the server.
    pub fn from_command_byte(byte: u8) -> Option<Direction> {
        match byte {
            b'n' => Some(Direction::North),
            b's' => Some(Direction::South),
            b'e' => Some(Direction::East),
            b'w' => Some(Direction::West),
            _ => None,
        }
    }

    /// Inverse of [`Direction::from_command_byte`].
    pub fn command_byte(&self) -> u8 {
        match self {
            Direction::North => b'n',
            Direction::South => b's',
            Direction::East => b'e',
            Direction::West => b'w',
        }
    }
}

/// What occupies a snapshot cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Snake,
    Fruit,
}

impl CellKind {
    fn tag(&self) -> char {
        match self {
            CellKind::Snake => 's',
            CellKind::Fruit => 'f',
        }
    }
}

/// One `"x,y,tag;"` record of a tick snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCell {
    pub pos: Position,
    pub kind: CellKind,
}

impl SnapshotCell {
    pub fn snake(x: i32, y: i32) -> Self {
        Self {
            pos: Position::new(x, y),
            kind: CellKind::Snake,
        }
    }

    pub fn fruit(x: i32, y: i32) -> Self {
        Self {
            pos: Position::new(x, y),
            kind: CellKind::Fruit,
        }
    }
}

/// Serializes one tick's cells into the wire text. Callers are expected to
/// pass snake segments first (in world iteration order) and fruits last,
/// matching the record order clients rely on.
pub fn encode_snapshot(cells: &[SnapshotCell]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(cells.len() * 8);
    for cell in cells {
        // Writing to a String cannot fail.
        let _ = write!(out, "{},{},{};", cell.pos.x, cell.pos.y, cell.kind.tag());
    }
    out
}

/// Parses wire text back into cells. Empty and malformed records are
/// skipped silently; a client renders whatever it can understand.
pub fn parse_snapshot(text: &str) -> Vec<SnapshotCell> {
    let mut cells = Vec::new();
    for record in text.split(';') {
        if record.is_empty() {
            continue;
        }
        let mut fields = record.split(',');
        let (Some(x), Some(y), Some(tag)) = (fields.next(), fields.next(), fields.next()) else {
            continue;
        };
        let (Ok(x), Ok(y)) = (x.trim().parse::<i32>(), y.trim().parse::<i32>()) else {
            continue;
        };
        let kind = match tag.trim() {
            "s" => CellKind::Snake,
            "f" => CellKind::Fruit,
            _ => continue,
        };
        cells.push(SnapshotCell {
            pos: Position::new(x, y),
            kind,
        });
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(0, 0).in_bounds(32, 24));
        assert!(Position::new(31, 23).in_bounds(32, 24));
        assert!(!Position::new(32, 0).in_bounds(32, 24));
        assert!(!Position::new(0, 24).in_bounds(32, 24));
        assert!(!Position::new(-1, 5).in_bounds(32, 24));
        assert!(!Position::new(5, -1).in_bounds(32, 24));
    }

    #[test]
    fn test_grid_dimensions_from_window() {
        assert_eq!(GRID_WIDTH, 32);
        assert_eq!(GRID_HEIGHT, 24);
    }

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::North.delta(), (0, -1));
        assert_eq!(Direction::South.delta(), (0, 1));
        assert_eq!(Direction::East.delta(), (1, 0));
        assert_eq!(Direction::West.delta(), (-1, 0));
    }

    #[test]
    fn test_direction_axes() {
        assert_eq!(Direction::East.axis(), Axis::Horizontal);
        assert_eq!(Direction::West.axis(), Axis::Horizontal);
        assert_eq!(Direction::North.axis(), Axis::Vertical);
        assert_eq!(Direction::South.axis(), Axis::Vertical);
    }

    #[test]
    fn test_command_byte_mapping() {
        assert_eq!(Direction::from_command_byte(b'n'), Some(Direction::North));
        assert_eq!(Direction::from_command_byte(b's'), Some(Direction::South));
        assert_eq!(Direction::from_command_byte(b'e'), Some(Direction::East));
        assert_eq!(Direction::from_command_byte(b'w'), Some(Direction::West));
    }

    #[test]
    fn test_command_byte_is_case_sensitive() {
        assert_eq!(Direction::from_command_byte(b'N'), None);
        assert_eq!(Direction::from_command_byte(b'E'), None);
        assert_eq!(Direction::from_command_byte(b'x'), None);
        assert_eq!(Direction::from_command_byte(0), None);
    }

    #[test]
    fn test_command_byte_inverse() {
        for dir in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            assert_eq!(Direction::from_command_byte(dir.command_byte()), Some(dir));
        }
    }

    #[test]
    fn test_encode_snapshot_exact_format() {
        let cells = vec![
            SnapshotCell::snake(1, 1),
            SnapshotCell::snake(2, 1),
            SnapshotCell::fruit(5, 5),
        ];
        assert_eq!(encode_snapshot(&cells), "1,1,s;2,1,s;5,5,f;");
    }

    #[test]
    fn test_encode_empty_snapshot() {
        assert_eq!(encode_snapshot(&[]), "");
    }

    #[test]
    fn test_encode_negative_coordinate() {
        // Out-of-bounds heads are sent as-is, never clamped.
        let cells = vec![SnapshotCell::snake(-1, 3)];
        assert_eq!(encode_snapshot(&cells), "-1,3,s;");
    }

    #[test]
    fn test_parse_snapshot_roundtrip() {
        let cells = vec![
            SnapshotCell::snake(1, 1),
            SnapshotCell::snake(2, 1),
            SnapshotCell::fruit(5, 5),
        ];
        let parsed = parse_snapshot(&encode_snapshot(&cells));
        assert_eq!(parsed, cells);
    }

    #[test]
    fn test_parse_skips_malformed_records() {
        let parsed = parse_snapshot("1,1,s;garbage;2,s;,,;9,9,q;3,3,f;");
        assert_eq!(
            parsed,
            vec![SnapshotCell::snake(1, 1), SnapshotCell::fruit(3, 3)]
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_snapshot("").is_empty());
        assert!(parse_snapshot(";;;").is_empty());
    }
}

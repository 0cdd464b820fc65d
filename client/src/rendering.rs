//! ASCII rendering of server snapshots.
//!
//! The server is authoritative; the client draws whatever entity list it
//! last received. Cells outside the visible grid (a dead snake's head may
//! be out of bounds) are simply not drawn.

use shared::{CellKind, SnapshotCell};

const SNAKE_CHAR: char = 'o';
const FRUIT_CHAR: char = '*';
const EMPTY_CHAR: char = '.';

/// Renders one snapshot as a `height`-line grid string.
pub fn render_frame(cells: &[SnapshotCell], width: usize, height: usize) -> String {
    let mut grid = vec![vec![EMPTY_CHAR; width]; height];

    for cell in cells {
        if cell.pos.x < 0 || cell.pos.y < 0 {
            continue;
        }
        let (x, y) = (cell.pos.x as usize, cell.pos.y as usize);
        if x >= width || y >= height {
            continue;
        }
        grid[y][x] = match cell.kind {
            CellKind::Snake => SNAKE_CHAR,
            CellKind::Fruit => FRUIT_CHAR,
        };
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::SnapshotCell;

    #[test]
    fn test_render_empty_grid() {
        let frame = render_frame(&[], 3, 2);
        assert_eq!(frame, "...\n...\n");
    }

    #[test]
    fn test_render_snake_and_fruit() {
        let cells = [
            SnapshotCell::snake(0, 0),
            SnapshotCell::snake(1, 0),
            SnapshotCell::fruit(2, 1),
        ];
        let frame = render_frame(&cells, 3, 2);
        assert_eq!(frame, "oo.\n..*\n");
    }

    #[test]
    fn test_out_of_bounds_cells_skipped() {
        let cells = [
            SnapshotCell::snake(-1, 0),
            SnapshotCell::snake(0, 5),
            SnapshotCell::snake(5, 0),
            SnapshotCell::snake(1, 1),
        ];
        let frame = render_frame(&cells, 3, 2);
        assert_eq!(frame, "...\n.o.\n");
    }

    #[test]
    fn test_later_cells_overdraw_earlier() {
        // A fruit spawned under a snake segment stays hidden until the
        // body moves off it; fruits are sent after snakes.
        let cells = [SnapshotCell::snake(1, 0), SnapshotCell::fruit(1, 0)];
        let frame = render_frame(&cells, 3, 1);
        assert_eq!(frame, ".*.\n");
    }
}

use std::ops::Index;
use std::ops::IndexMut;

use owo_colors::OwoColorize;

use crate::env::Vec2D;

/// Represents a single tile of the board
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Free,
    Wall,
    Food,
    Capsule,
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Cell::Free => write!(f, " "),
            Cell::Wall => write!(f, "{}", "%".blue()),
            Cell::Food => write!(f, "."),
            Cell::Capsule => write!(f, "{}", "o".bright_white()),
        }
    }
}

/// Static part of the board: walls, food and capsules.
/// `(0, 0)` is the bottom left corner.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Grid {
        Grid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    pub fn has(&self, p: Vec2D) -> bool {
        p.within(self.width, self.height)
    }

    /// Outside of the board counts as wall.
    pub fn is_wall(&self, p: Vec2D) -> bool {
        !self.has(p) || self[p] == Cell::Wall
    }

    pub fn positions(&self, cell: Cell) -> impl Iterator<Item = Vec2D> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(|(i, _)| Vec2D::new((i % self.width) as _, (i / self.width) as _))
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|c| **c == cell).count()
    }
}

impl Index<Vec2D> for Grid {
    type Output = Cell;

    fn index(&self, p: Vec2D) -> &Self::Output {
        assert!(self.has(p));
        &self.cells[p.y as usize * self.width + p.x as usize]
    }
}

impl IndexMut<Vec2D> for Grid {
    fn index_mut(&mut self, p: Vec2D) -> &mut Self::Output {
        assert!(self.has(p));
        &mut self.cells[p.y as usize * self.width + p.x as usize]
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {{")?;
        for y in 0..self.height as i16 {
            write!(f, "  ")?;
            for x in 0..self.width as i16 {
                write!(f, "{:?}", self[Vec2D::new(x, self.height as i16 - y - 1)])?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::env::v2;

    #[test]
    fn grid_cells() {
        let mut grid = Grid::new(4, 3);
        grid[v2(1, 2)] = Cell::Food;
        grid[v2(3, 0)] = Cell::Wall;
        println!("{:?}", grid);

        assert_eq!(grid[v2(1, 2)], Cell::Food);
        assert!(grid.is_wall(v2(3, 0)));
        assert!(grid.is_wall(v2(-1, 0)));
        assert!(grid.is_wall(v2(0, 3)));
        assert!(!grid.is_wall(v2(0, 0)));
        assert_eq!(grid.count(Cell::Free), 10);
        assert_eq!(grid.positions(Cell::Food).collect::<Vec<_>>(), vec![v2(1, 2)]);
    }
}

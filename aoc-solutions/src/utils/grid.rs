//! Bounded 2-D grids addressed in reading order

use aoc_solver::ParseError;
use std::collections::VecDeque;
use std::fmt;
use std::ops::{Index, IndexMut};

/// A grid position.
///
/// Field order makes the derived `Ord` compare rows first and then columns,
/// which is the "reading order" several puzzles use to break ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub y: usize,
    pub x: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { y, x }
    }

    /// Orthogonal neighbours in reading order: up, left, right, down.
    ///
    /// Neighbours that would fall off the top or left edge are skipped;
    /// callers check the right and bottom edges against their grid.
    pub fn neighbours(self) -> impl Iterator<Item = Point> {
        let up = self.y.checked_sub(1).map(|y| Point::new(self.x, y));
        let left = self.x.checked_sub(1).map(|x| Point::new(x, self.y));
        let right = Some(Point::new(self.x + 1, self.y));
        let down = Some(Point::new(self.x, self.y + 1));
        [up, left, right, down].into_iter().flatten()
    }

    pub fn manhattan(self, other: Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Grid of `width` x `height` cells all set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Parse a grid from text, one row per line.
    ///
    /// Rows shorter than the widest row are padded as if they ended in
    /// spaces. `cell` maps each byte to a value and may reject it.
    pub fn parse<F>(input: &str, mut cell: F) -> Result<Self, ParseError>
    where
        F: FnMut(Point, u8) -> Result<T, ParseError>,
    {
        let rows: Vec<&str> = input.lines().filter(|l| !l.trim().is_empty()).collect();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let height = rows.len();
        if width == 0 {
            return Err(ParseError::MissingData("empty grid".into()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let bytes = row.as_bytes();
            for x in 0..width {
                let b = bytes.get(x).copied().unwrap_or(b' ');
                cells.push(cell(Point::new(x, y), b)?);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    pub fn get(&self, p: Point) -> Option<&T> {
        if self.contains(p) {
            self.cells.get(p.y * self.width + p.x)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, p: Point) -> Option<&mut T> {
        if self.contains(p) {
            self.cells.get_mut(p.y * self.width + p.x)
        } else {
            None
        }
    }

    /// All positions in reading order
    pub fn points(&self) -> impl Iterator<Item = Point> + use<T> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Point::new(x, y)))
    }

    /// Cells in reading order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Positions and cells in reading order
    pub fn enumerate(&self) -> impl Iterator<Item = (Point, &T)> {
        self.points().zip(self.cells.iter())
    }

    /// In-bounds orthogonal neighbours of `p`, in reading order
    pub fn neighbours(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbours().filter(|n| self.contains(*n))
    }

    /// Breadth-first step counts from `start` through cells for which
    /// `passable` holds. `start` itself is always entered. Unreachable cells
    /// are `None`.
    pub fn distances_from<F>(&self, start: Point, mut passable: F) -> Grid<Option<u32>>
    where
        F: FnMut(Point, &T) -> bool,
    {
        let mut dist = Grid::new(self.width, self.height, None);
        if !self.contains(start) {
            return dist;
        }
        dist[start] = Some(0);

        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            let d = dist[p].unwrap_or(0);
            for n in self.neighbours(p) {
                if dist[n].is_none() && passable(n, &self[n]) {
                    dist[n] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
        dist
    }

    /// Render one character per cell, one line per row
    pub fn render<F>(&self, mut glyph: F) -> String
    where
        F: FnMut(&T) -> char,
    {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(&mut glyph));
            out.push('\n');
        }
        out
    }
}

impl<T> Index<Point> for Grid<T> {
    type Output = T;

    fn index(&self, p: Point) -> &T {
        &self.cells[p.y * self.width + p.x]
    }
}

impl<T> IndexMut<Point> for Grid<T> {
    fn index_mut(&mut self, p: Point) -> &mut T {
        &mut self.cells[p.y * self.width + p.x]
    }
}

//! Boards drawn as text.
//!
//! ```text
//! S..#....
//! .#.#.##.
//! .#...#G.
//! ```
//!
//! `.` is an open cell, `#` a blocked one, `S` the start and `G` the goal.
//! Every line must have the same width. The first line is the northmost row,
//! so the last line is `y = 0`.

use std::fmt;

use gridpath_core::Point;

use crate::config::{Algorithm, SearchConfig};

pub const OPEN: char = '.';
pub const BLOCKED: char = '#';
pub const START: char = 'S';
pub const GOAL: char = 'G';

/// A parsed text board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: i32,
    height: i32,
    blocked: Vec<Point>,
    start: Point,
    goal: Point,
}

impl Layout {
    /// Parse a board. Leading and trailing whitespace of the whole text is
    /// ignored, but not of individual lines.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LayoutError::Empty);
        }
        let lines: Vec<&str> = s.lines().collect();
        let height = lines.len() as i32;
        let mut width: Option<i32> = None;
        let mut blocked = Vec::new();
        let mut start = None;
        let mut goal = None;

        for (i, line) in lines.iter().enumerate() {
            let y = height - 1 - i as i32;
            let mut x = 0;
            for ch in line.chars() {
                let pos = Point::new(x, y);
                match ch {
                    OPEN => {}
                    BLOCKED => blocked.push(pos),
                    START => place(&mut start, ch, pos)?,
                    GOAL => place(&mut goal, ch, pos)?,
                    _ => return Err(LayoutError::InvalidRune { ch, pos }),
                }
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(LayoutError::InconsistentSize { line: i as i32 });
                }
                Some(_) => {}
            }
        }
        blocked.sort_by_key(|p: &Point| (p.y, p.x));

        Ok(Self {
            width: width.unwrap_or(0),
            height,
            blocked,
            start: start.ok_or(LayoutError::MissingMarker(START))?,
            goal: goal.ok_or(LayoutError::MissingMarker(GOAL))?,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Blocked cells in row-major order.
    #[inline]
    pub fn blocked(&self) -> &[Point] {
        &self.blocked
    }

    /// A configuration running `algorithm` on this board.
    pub fn to_config(&self, algorithm: Algorithm) -> SearchConfig {
        SearchConfig {
            algorithm,
            grid_width: self.width,
            grid_height: self.height,
            blocked: self.blocked.clone(),
            start: self.start,
            goal: self.goal,
            ..SearchConfig::default()
        }
    }
}

fn place(slot: &mut Option<Point>, ch: char, pos: Point) -> Result<(), LayoutError> {
    if slot.is_some() {
        return Err(LayoutError::DuplicateMarker { ch, pos });
    }
    *slot = Some(pos);
    Ok(())
}

/// Errors that can occur when parsing a [`Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The text contains no cells.
    Empty,
    /// A line's width differs from the first line's. Lines count from 0
    /// at the top.
    InconsistentSize { line: i32 },
    /// A character other than `.`, `#`, `S` or `G`.
    InvalidRune { ch: char, pos: Point },
    /// No start or no goal marker.
    MissingMarker(char),
    /// A second start or goal marker.
    DuplicateMarker { ch: char, pos: Point },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: no cells"),
            Self::InconsistentSize { line } => {
                write!(f, "layout: line {line} differs in width from the first")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingMarker(ch) => write!(f, "layout: missing \u{201c}{ch}\u{201d} marker"),
            Self::DuplicateMarker { ch, pos } => {
                write!(f, "layout: second \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

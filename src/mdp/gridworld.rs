use std::fmt::{self, Write};

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use super::{Mdp, ValueIterationAgent};
use crate::env::{v2, Direction, Vec2D};

/// State of the [`GridWorld`].
/// Leaving an exit tile ends in the absorbing `Terminal` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridState {
    Terminal,
    At(Vec2D),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridAction {
    Move(Direction),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    Wall,
    Open,
    Start,
    /// Pays its value when leaving the grid.
    Exit(f64),
}

/// Grid world with noisy moves.
///
/// A move goes in the intended direction with probability `1 - noise` and
/// to each of the two perpendicular directions with `noise / 2`.
/// Moves into walls or off the grid stay in place.
/// Every move pays the `living_reward`.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    pub noise: f64,
    pub living_reward: f64,
}

pub const BOOK_GRID: &str = r#"
_ _ _ +1
_ # _ -1
S _ _ _"#;

pub const BRIDGE_GRID: &str = r#"
#  -100 -100 -100 -100 -100 #
1  S    _    _    _    _    10
#  -100 -100 -100 -100 -100 #"#;

pub const CLIFF_GRID: &str = r#"
_    _    _    _    _
S    _    _    _    10
-100 -100 -100 -100 -100"#;

pub const DISCOUNT_GRID: &str = r#"
_   _   _   _   _
_   #   _   _   _
_   #   1   #   10
S   _   _   _   _
-10 -10 -10 -10 -10"#;

impl GridWorld {
    pub const NAMES: [&'static str; 4] = ["book", "bridge", "cliff", "discount"];

    pub fn get(name: &str) -> Option<GridWorld> {
        match name {
            "book" => GridWorld::parse(BOOK_GRID),
            "bridge" => GridWorld::parse(BRIDGE_GRID),
            "cliff" => GridWorld::parse(CLIFF_GRID),
            "discount" => GridWorld::parse(DISCOUNT_GRID),
            _ => None,
        }
    }

    pub fn book() -> GridWorld {
        GridWorld::new(4, 3, {
            use Tile::*;
            #[rustfmt::skip]
            let rows = [
                Start, Open, Open, Open,
                Open, Wall, Open, Exit(-1.0),
                Open, Open, Open, Exit(1.0),
            ];
            rows.to_vec()
        })
    }

    /// Tiles are given row by row, starting at the bottom.
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>) -> GridWorld {
        assert_eq!(tiles.len(), width * height);
        GridWorld {
            width,
            height,
            tiles,
            noise: 0.2,
            living_reward: 0.0,
        }
    }

    /// Parses whitespace separated tiles, the first row is the top.
    ///
    /// `#` wall, `_` or `.` open, `S` start and numbers are exits.
    pub fn parse(txt: &str) -> Option<GridWorld> {
        let rows: Vec<Vec<&str>> = txt
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>())
            .filter(|r| !r.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first()?.len();
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        if width > i16::MAX as usize || height > i16::MAX as usize {
            return None;
        }

        let mut tiles = Vec::with_capacity(width * height);
        for row in rows.iter().rev() {
            for token in row {
                tiles.push(match *token {
                    "#" => Tile::Wall,
                    "_" | "." => Tile::Open,
                    "S" => Tile::Start,
                    n => Tile::Exit(n.parse().ok()?),
                });
            }
        }
        Some(GridWorld::new(width, height, tiles))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile(&self, p: Vec2D) -> Tile {
        if p.within(self.width, self.height) {
            self.tiles[p.x as usize + p.y as usize * self.width]
        } else {
            Tile::Wall
        }
    }

    pub fn start(&self) -> Option<GridState> {
        self.cells()
            .find(|&p| self.tile(p) == Tile::Start)
            .map(GridState::At)
    }

    /// All cells in column major order.
    fn cells(&self) -> impl Iterator<Item = Vec2D> + '_ {
        (0..self.width as i16).flat_map(move |x| (0..self.height as i16).map(move |y| v2(x, y)))
    }

    fn moved(&self, p: Vec2D, dir: Direction) -> Vec2D {
        let next = p.apply(dir);
        if self.tile(next) == Tile::Wall {
            p
        } else {
            next
        }
    }

    /// Colored table of the state values.
    pub fn format_values<M: Mdp<State = GridState>>(&self, agent: &ValueIterationAgent<M>) -> String {
        self.format(|p| {
            let value = agent.value(&GridState::At(p));
            let text = format!("{value:>8.3}");
            match self.tile(p) {
                Tile::Exit(_) => text.bright_yellow().to_string(),
                _ if value < 0.0 => text.red().to_string(),
                _ => text.green().to_string(),
            }
        })
    }

    /// Table of the best actions.
    pub fn format_policy<M: Mdp<State = GridState, Action = GridAction>>(
        &self,
        agent: &ValueIterationAgent<M>,
    ) -> String {
        self.format(|p| {
            let symbol = match agent.policy(&GridState::At(p)) {
                Some(GridAction::Move(Direction::Up)) => "^",
                Some(GridAction::Move(Direction::Right)) => ">",
                Some(GridAction::Move(Direction::Down)) => "v",
                Some(GridAction::Move(Direction::Left)) => "<",
                Some(GridAction::Move(Direction::Stop)) => "-",
                Some(GridAction::Exit) => "x",
                None => " ",
            };
            format!("{symbol:>8}")
        })
    }

    fn format(&self, mut cell: impl FnMut(Vec2D) -> String) -> String {
        let mut out = String::new();
        for y in (0..self.height as i16).rev() {
            for x in 0..self.width as i16 {
                let p = v2(x, y);
                if self.tile(p) == Tile::Wall {
                    let _ = write!(out, "{:>8}", "#".blue());
                } else {
                    out.push_str(&cell(p));
                }
            }
            out.push('\n');
        }
        out
    }
}

impl Mdp for GridWorld {
    type State = GridState;
    type Action = GridAction;

    fn states(&self) -> Vec<GridState> {
        let mut states = vec![GridState::Terminal];
        states.extend(
            self.cells()
                .filter(|&p| self.tile(p) != Tile::Wall)
                .map(GridState::At),
        );
        states
    }

    fn possible_actions(&self, state: &GridState) -> Vec<GridAction> {
        match *state {
            GridState::Terminal => Vec::new(),
            GridState::At(p) => match self.tile(p) {
                Tile::Wall => Vec::new(),
                Tile::Exit(_) => vec![GridAction::Exit],
                Tile::Open | Tile::Start => Direction::iter().map(GridAction::Move).collect(),
            },
        }
    }

    fn transitions(&self, state: &GridState, action: &GridAction) -> Vec<(GridState, f64)> {
        let p = match *state {
            GridState::Terminal => return Vec::new(),
            GridState::At(p) => p,
        };
        let dir = match *action {
            GridAction::Exit => return vec![(GridState::Terminal, 1.0)],
            GridAction::Move(dir) => dir,
        };

        let [a, b] = dir.perpendicular();
        let outcomes = [
            (self.moved(p, dir), 1.0 - self.noise),
            (self.moved(p, a), self.noise / 2.0),
            (self.moved(p, b), self.noise / 2.0),
        ];

        // merge outcomes that end in the same cell
        let mut result: Vec<(GridState, f64)> = Vec::with_capacity(3);
        for (next, prob) in outcomes {
            let next = GridState::At(next);
            match result.iter_mut().find(|(s, _)| *s == next) {
                Some((_, p)) => *p += prob,
                None => result.push((next, prob)),
            }
        }
        result
    }

    fn reward(&self, state: &GridState, _action: &GridAction, _next: &GridState) -> f64 {
        match *state {
            GridState::Terminal => 0.0,
            GridState::At(p) => match self.tile(p) {
                Tile::Exit(value) => value,
                _ => self.living_reward,
            },
        }
    }

    fn is_terminal(&self, state: &GridState) -> bool {
        *state == GridState::Terminal
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height as i16).rev() {
            for x in 0..self.width as i16 {
                match self.tile(v2(x, y)) {
                    Tile::Wall => write!(f, "{:>6}", "#")?,
                    Tile::Open => write!(f, "{:>6}", "_")?,
                    Tile::Start => write!(f, "{:>6}", "S")?,
                    Tile::Exit(v) => write!(f, "{v:>6}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

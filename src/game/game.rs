use std::fmt::{self, Debug};

use owo_colors::{OwoColorize, Style};

use super::{Cell, GameState, GhostState, Grid, PacmanState};
use crate::env::{Direction, Vec2D};

/// Every pacman move costs this many points.
pub const TIME_PENALTY: f64 = 1.0;
pub const FOOD_REWARD: f64 = 10.0;
pub const WIN_REWARD: f64 = 500.0;
pub const LOSE_PENALTY: f64 = 500.0;
pub const GHOST_REWARD: f64 = 200.0;
/// Number of ghost moves a capsule keeps the ghosts edible.
pub const SCARED_TIME: u16 = 40;

/// The outcome of a game.
/// If the game did not end the outcome is `None`.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Outcome {
    None,
    Win,
    Lose,
}

/// Complete pacman game state.
///
/// Agent 0 is pacman, agent `i > 0` is `ghosts[i - 1]`.
#[derive(Clone)]
pub struct Game {
    pub grid: Grid,
    pub pacman: Vec2D,
    pub ghosts: Vec<GhostState>,
    pub score: f64,
    pub outcome: Outcome,
    food: usize,
}

impl Game {
    pub fn new(grid: Grid, pacman: Vec2D, ghosts: &[Vec2D]) -> Game {
        let food = grid.count(Cell::Food);
        Game {
            grid,
            pacman,
            ghosts: ghosts.iter().map(|&p| GhostState::new(p)).collect(),
            score: 0.0,
            outcome: Outcome::None,
            food,
        }
    }

    /// Parses the textual layout format.
    ///
    /// `%` wall, `.` food, `o` capsule, `P` pacman, `G` ghost, anything else
    /// is free. Ghosts are numbered in reading order. Leading and trailing
    /// whitespace of each row is ignored.
    pub fn parse(txt: &str) -> Option<Game> {
        let rows: Vec<&str> = txt
            .trim()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if width == 0 || rows.iter().any(|r| r.chars().count() != width) {
            return None;
        }
        // positions are i16
        if width > i16::MAX as usize || height > i16::MAX as usize {
            return None;
        }

        let mut grid = Grid::new(width, height);
        let mut pacman = None;
        let mut ghosts = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let y = (height - row - 1) as i16;
            for (x, c) in line.chars().enumerate() {
                let p = Vec2D::new(x as _, y);
                grid[p] = match c {
                    '%' => Cell::Wall,
                    '.' => Cell::Food,
                    'o' => Cell::Capsule,
                    'P' => {
                        if pacman.replace(p).is_some() {
                            return None;
                        }
                        Cell::Free
                    }
                    'G' => {
                        ghosts.push(p);
                        Cell::Free
                    }
                    _ => Cell::Free,
                };
            }
        }

        Some(Game::new(grid, pacman?, &ghosts))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn pacman_actions(&self) -> Vec<Direction> {
        let mut actions: Vec<Direction> = Direction::iter()
            .filter(|&d| !self.grid.is_wall(self.pacman.apply(d)))
            .collect();
        actions.push(Direction::Stop);
        actions
    }

    /// Ghosts cannot stop and only turn around at dead ends.
    fn ghost_actions(&self, ghost: &GhostState) -> Vec<Direction> {
        let mut actions: Vec<Direction> = Direction::iter()
            .filter(|&d| !self.grid.is_wall(ghost.position.apply(d)))
            .collect();
        let reverse = ghost.direction.invert();
        if actions.len() > 1 {
            actions.retain(|&d| d != reverse);
        }
        actions
    }

    fn move_pacman(&mut self, dir: Direction) {
        let next = self.pacman.apply(dir);
        if !self.grid.is_wall(next) {
            self.pacman = next;
        }

        match self.grid[self.pacman] {
            Cell::Food => {
                self.grid[self.pacman] = Cell::Free;
                self.food -= 1;
                self.score += FOOD_REWARD;
                if self.food == 0 {
                    self.score += WIN_REWARD;
                    self.outcome = Outcome::Win;
                }
            }
            Cell::Capsule => {
                self.grid[self.pacman] = Cell::Free;
                for ghost in &mut self.ghosts {
                    ghost.scared_timer = SCARED_TIME;
                }
            }
            _ => {}
        }
        self.score -= TIME_PENALTY;

        for i in 0..self.ghosts.len() {
            self.check_collision(i);
        }
    }

    fn move_ghost(&mut self, i: usize, dir: Direction) {
        let ghost = &mut self.ghosts[i];
        let next = ghost.position.apply(dir);
        if !self.grid.is_wall(next) {
            ghost.position = next;
            ghost.direction = dir;
        }
        ghost.scared_timer = ghost.scared_timer.saturating_sub(1);
        self.check_collision(i);
    }

    fn check_collision(&mut self, i: usize) {
        let ghost = &mut self.ghosts[i];
        if ghost.position != self.pacman {
            return;
        }
        if ghost.scared() {
            self.score += GHOST_REWARD;
            *ghost = GhostState::new(ghost.start);
        } else if self.outcome != Outcome::Win {
            self.score -= LOSE_PENALTY;
            self.outcome = Outcome::Lose;
        }
    }
}

impl GameState for Game {
    type Action = Direction;

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.outcome != Outcome::None {
            return Vec::new();
        }
        match agent {
            0 => self.pacman_actions(),
            i => self
                .ghosts
                .get(i - 1)
                .map(|g| self.ghost_actions(g))
                .unwrap_or_default(),
        }
    }

    /// Finished games have no successors, they are returned unchanged.
    fn successor(&self, agent: usize, action: Direction) -> Game {
        let mut game = self.clone();
        if game.outcome == Outcome::None {
            match agent {
                0 => game.move_pacman(action),
                i if i <= game.ghosts.len() => game.move_ghost(i - 1, action),
                _ => {}
            }
        }
        game
    }

    fn num_agents(&self) -> usize {
        self.ghosts.len() + 1
    }

    fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    fn is_lose(&self) -> bool {
        self.outcome == Outcome::Lose
    }
}

impl PacmanState for Game {
    fn pacman_position(&self) -> Vec2D {
        self.pacman
    }

    fn food(&self) -> Vec<Vec2D> {
        self.grid.positions(Cell::Food).collect()
    }

    fn num_food(&self) -> usize {
        self.food
    }

    fn ghost_states(&self) -> Vec<GhostState> {
        self.ghosts.clone()
    }

    fn capsules(&self) -> Vec<Vec2D> {
        self.grid.positions(Cell::Capsule).collect()
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn ghost_style(ghost: &GhostState) -> Style {
            if ghost.scared() {
                Style::new().bright_white()
            } else {
                Style::new().red()
            }
        }

        writeln!(f, "Game {{")?;
        for y in (0..self.grid.height as i16).rev() {
            write!(f, "  ")?;
            for x in 0..self.grid.width as i16 {
                let p = Vec2D::new(x, y);
                if let Some(ghost) = self.ghosts.iter().find(|g| g.position == p) {
                    write!(f, "{}", "G".style(ghost_style(ghost)))?;
                } else if p == self.pacman {
                    write!(f, "{}", "P".yellow())?;
                } else {
                    write!(f, "{:?}", self.grid[p])?;
                }
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "  Score: {} Food: {} Outcome: {:?}",
            self.score, self.food, self.outcome
        )?;
        write!(f, "}}")
    }
}

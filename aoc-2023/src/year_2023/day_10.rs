use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid", "math"])]
pub struct Solver;

type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

fn connections(tile: u8) -> &'static [Direction] {
    use Direction::*;
    match tile {
        b'|' => &[North, South],
        b'-' => &[East, West],
        b'L' => &[North, East],
        b'J' => &[North, West],
        b'7' => &[South, West],
        b'F' => &[South, East],
        _ => &[],
    }
}

#[derive(Debug)]
pub struct Maze<'a> {
    rows: Vec<&'a [u8]>,
    start: Position,
    /// Loop tiles in walking order, starting at `S`; traced on first use
    main_loop: Option<Vec<Position>>,
}

impl Maze<'_> {
    fn tile(&self, (row, col): Position) -> Option<u8> {
        self.rows.get(row)?.get(col).copied()
    }

    fn step(&self, (row, col): Position, direction: Direction) -> Option<Position> {
        let next = match direction {
            Direction::North => (row.checked_sub(1)?, col),
            Direction::East => (row, col + 1),
            Direction::South => (row + 1, col),
            Direction::West => (row, col.checked_sub(1)?),
        };
        self.tile(next).map(|_| next)
    }

    /// Does the tile one step from `from` have a pipe leading back?
    fn links_back(&self, from: Position, direction: Direction) -> bool {
        self.step(from, direction)
            .and_then(|next| self.tile(next))
            .is_some_and(|tile| connections(tile).contains(&direction.opposite()))
    }

    fn trace_loop(&self) -> Result<Vec<Position>, SolveError> {
        let exits: Vec<_> = Direction::ALL
            .into_iter()
            .filter(|&direction| self.links_back(self.start, direction))
            .collect();
        let [mut heading, _] = exits[..] else {
            return Err(SolveError::failed(format!(
                "start tile connects to {} pipes, expected 2",
                exits.len()
            )));
        };

        let max_len: usize = self.rows.iter().map(|row| row.len()).sum();
        let mut path = vec![self.start];
        let mut position = self.start;
        loop {
            position = self
                .step(position, heading)
                .ok_or_else(|| SolveError::failed(format!("pipe at {position:?} leads off the map")))?;
            if position == self.start {
                return Ok(path);
            }
            if path.len() >= max_len {
                return Err(SolveError::failed("pipe loop never closes"));
            }

            let came_from = heading.opposite();
            let links = self.tile(position).map(connections).unwrap_or_default();
            if !links.contains(&came_from) {
                return Err(SolveError::failed(format!("pipe at {position:?} is broken")));
            }
            heading = links
                .iter()
                .copied()
                .find(|&direction| direction != came_from)
                .unwrap_or(came_from);
            path.push(position);
        }
    }

    fn main_loop(&mut self) -> Result<&[Position], SolveError> {
        if self.main_loop.is_none() {
            let main_loop = self.trace_loop()?;
            debug!(length = main_loop.len(), "traced main loop");
            self.main_loop = Some(main_loop);
        }
        Ok(self.main_loop.as_deref().unwrap_or_default())
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Maze<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rows: Vec<&[u8]> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::as_bytes)
            .collect();

        let mut starts = rows.iter().enumerate().flat_map(|(row, tiles)| {
            tiles
                .iter()
                .enumerate()
                .filter(|&(_, &tile)| tile == b'S')
                .map(move |(col, _)| (row, col))
        });
        let start = starts
            .next()
            .ok_or_else(|| ParseError::MissingData("no start tile 'S'".into()))?;
        if starts.next().is_some() {
            return Err(ParseError::Invalid("more than one start tile 'S'".into()));
        }

        Ok(Maze {
            rows,
            start,
            main_loop: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.main_loop()?.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let main_loop = shared.main_loop()?;
        Ok(enclosed_tiles(main_loop).to_string())
    }
}

/// Tiles strictly inside the loop: the shoelace formula gives the area and
/// Pick's theorem `A = i + b/2 - 1` turns it into the interior count.
fn enclosed_tiles(main_loop: &[Position]) -> u64 {
    let twice_area = main_loop
        .iter()
        .zip(main_loop.iter().cycle().skip(1))
        .map(|(&(r1, c1), &(r2, c2))| (c1 * r2) as i64 - (c2 * r1) as i64)
        .sum::<i64>()
        .unsigned_abs();
    let boundary = main_loop.len() as u64;
    (twice_area + 2).saturating_sub(boundary) / 2
}

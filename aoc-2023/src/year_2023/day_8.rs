use std::collections::HashMap;

use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["2023", "graph", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Right,
}

#[derive(Debug)]
pub struct Network<'a> {
    turns: Vec<Turn>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    /// Follow the turns from `start` until `arrived` holds, counting steps.
    ///
    /// Fails once more steps were taken than there are `(node, turn index)`
    /// states, since the walk is then stuck in a cycle.
    fn steps_until(&self, start: &'a str, arrived: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        let limit = self.turns.len() * self.nodes.len();
        let mut current = start;
        for (steps, turn) in self.turns.iter().cycle().enumerate().take(limit + 1) {
            if arrived(current) {
                return Ok(steps as u64);
            }
            let (left, right) = self
                .nodes
                .get(current)
                .ok_or_else(|| SolveError::failed(format!("node {current} is not defined")))?;
            current = match turn {
                Turn::Left => *left,
                Turn::Right => *right,
            };
        }
        Err(SolveError::failed(format!("walk from {start} never arrives")))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (turns_line, turns) = lines
            .next()
            .ok_or_else(|| ParseError::MissingData("no turn instructions".into()))?;
        let turns = turns
            .bytes()
            .map(|turn| match turn {
                b'L' => Ok(Turn::Left),
                b'R' => Ok(Turn::Right),
                other => Err(ParseError::InvalidFormat(format!(
                    "(line {turns_line}) turn must be 'L' or 'R', found {:?}",
                    char::from(other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nodes = lines
            .map(|(line_idx, line)| {
                parse_node(line).map_err(|e| ParseError::InvalidFormat(format!("(line {line_idx}) {e}")))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        if nodes.is_empty() {
            return Err(ParseError::MissingData("no nodes".into()));
        }

        Ok(Network { turns, nodes })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !shared.nodes.contains_key("AAA") {
            return Err(SolveError::failed("network has no AAA node"));
        }
        Ok(shared.steps_until("AAA", |node| node == "ZZZ")?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut starts: Vec<&str> = shared
            .nodes
            .keys()
            .copied()
            .filter(|node| node.ends_with('A'))
            .collect();
        if starts.is_empty() {
            return Err(SolveError::failed("network has no node ending in 'A'"));
        }
        starts.sort_unstable();

        // Every ghost loops back onto its first '..Z' node with the same
        // period, so all of them first agree at the LCM of the periods.
        let mut steps = 1u64;
        for start in starts {
            let period = shared.steps_until(start, |node| node.ends_with('Z'))?;
            debug!(start, period, "ghost period");
            steps = lcm(steps, period)
                .ok_or_else(|| SolveError::failed("step count overflows u64"))?;
        }
        Ok(steps.to_string())
    }
}

fn parse_node(line: &str) -> anyhow::Result<(&str, (&str, &str))> {
    let (name, targets) = line
        .split_once('=')
        .ok_or_else(|| anyhow!("expected 'NODE = (LEFT, RIGHT)'"))?;
    let (left, right) = targets
        .trim()
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .and_then(|t| t.split_once(','))
        .ok_or_else(|| anyhow!("expected '(LEFT, RIGHT)', found {:?}", targets.trim()))?;
    Ok((name.trim(), (left.trim(), right.trim())))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> Option<u64> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

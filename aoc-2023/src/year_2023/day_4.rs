use std::collections::HashSet;

use super::parse_lines;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["2023", "parsing"])]
pub struct Solver;

impl AocParser for Solver {
    /// Number of winning numbers on each card, in card order
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, count_matches)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points: u64 = shared
            .iter()
            .filter(|&&matches| matches > 0)
            .map(|&matches| 1u64 << (matches - 1))
            .sum();
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut copies = vec![1u64; shared.len()];
        for (card, &matches) in shared.iter().enumerate() {
            let won = copies[card];
            let last = (card + matches).min(shared.len() - 1);
            for count in &mut copies[card + 1..=last] {
                *count += won;
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}

fn count_matches(line: &str) -> anyhow::Result<usize> {
    let (_, numbers) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' after card id"))?;
    let (winning, have) = numbers
        .split_once('|')
        .ok_or_else(|| anyhow!("missing '|' between number lists"))?;

    let winning = winning
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<HashSet<u32>, _>>()?;
    let mut matches = 0;
    for number in have.split_whitespace() {
        if winning.contains(&number.parse()?) {
            matches += 1;
        }
    }
    Ok(matches)
}

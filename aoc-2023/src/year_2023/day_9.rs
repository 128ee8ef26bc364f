use super::parse_lines;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["2023", "math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            Ok(line
                .split_whitespace()
                .map(str::parse)
                .collect::<Result<Vec<i64>, _>>()?)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: i64 = shared
            .iter()
            .map(|history| {
                difference_rows(history)
                    .iter()
                    .filter_map(|row| row.last())
                    .sum::<i64>()
            })
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: i64 = shared
            .iter()
            .map(|history| {
                difference_rows(history)
                    .iter()
                    .rev()
                    .filter_map(|row| row.first())
                    .fold(0, |below, first| first - below)
            })
            .sum();
        Ok(sum.to_string())
    }
}

/// The history followed by each row of differences, down to the first
/// all-zero row
fn difference_rows(history: &[i64]) -> Vec<Vec<i64>> {
    let mut rows = vec![history.to_vec()];
    while let Some(row) = rows.last().filter(|row| row.iter().any(|&v| v != 0)) {
        let next = row.iter().tuple_windows().map(|(a, b)| b - a).collect();
        rows.push(next);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::solve_example;

    const EXAMPLE: &str = "0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn test_part_1_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "114");
    }

    #[test]
    fn test_part_2_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "2");
    }

    #[test]
    fn test_difference_rows() {
        assert_eq!(
            difference_rows(&[1, 3, 6, 10]),
            vec![vec![1, 3, 6, 10], vec![2, 3, 4], vec![1, 1], vec![0]]
        );
        assert_eq!(difference_rows(&[5]), vec![vec![5], vec![]]);
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(solve_example::<Solver>("-1 -3 -5\n", 1), "-7");
        assert_eq!(solve_example::<Solver>("-1 -3 -5\n", 2), "1");
    }
}

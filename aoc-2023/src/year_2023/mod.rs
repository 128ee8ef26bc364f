//! Advent of Code 2023, days 1 through 10

use aoc_solver::ParseError;

pub mod day_1;
pub mod day_10;
pub mod day_2;
pub mod day_3;
pub mod day_4;
pub mod day_5;
pub mod day_6;
pub mod day_7;
pub mod day_8;
pub mod day_9;

/// Parse every non-blank line with `parse_line`, tagging failures with their
/// 1-based line number.
fn parse_lines<'a, T>(
    input: &'a str,
    parse_line: impl Fn(&'a str) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    let parsed = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| {
            parse_line(line.trim())
                .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", line_idx + 1)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if parsed.is_empty() {
        return Err(ParseError::MissingData("input has no lines".into()));
    }
    Ok(parsed)
}

/// Parse `input` and solve `part`, panicking on any error
#[cfg(test)]
fn solve_example<S: aoc_solver::Solver>(input: &str, part: u8) -> String {
    use aoc_solver::SolverExt;

    let mut shared = S::parse(input).unwrap();
    S::solve_part_checked_range(&mut shared, part).unwrap()
}

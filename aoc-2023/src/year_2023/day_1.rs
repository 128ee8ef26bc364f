use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "strings"])]
pub struct Solver;

const SPELLED_DIGITS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<_> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".into()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, true)
    }
}

fn calibration_sum(lines: &[&str], spelled: bool) -> Result<String, SolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(line_idx, line)| {
            calibration_value(line.as_bytes(), spelled).ok_or_else(|| {
                SolveError::failed(format!("(line {}) no digit found", line_idx + 1))
            })
        })
        .sum::<Result<u32, _>>()
        .map(|sum| sum.to_string())
}

fn calibration_value(line: &[u8], spelled: bool) -> Option<u32> {
    // Spelled digits may share letters ("eightwo"), so every offset is tried
    let mut digits = (0..line.len()).filter_map(|at| digit_at(&line[at..], spelled));
    let first = digits.next()?;
    let last = digits.last().unwrap_or(first);
    Some(first * 10 + last)
}

fn digit_at(rest: &[u8], spelled: bool) -> Option<u32> {
    let head = *rest.first()?;
    if head.is_ascii_digit() {
        return Some(u32::from(head - b'0'));
    }
    if !spelled {
        return None;
    }
    SPELLED_DIGITS
        .iter()
        .zip(1..)
        .find_map(|(word, value)| rest.starts_with(word.as_bytes()).then_some(value))
}

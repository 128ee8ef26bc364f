use std::collections::HashSet;

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

/// A run of digits on one row, spanning columns `first..=last`
#[derive(Debug, Clone, Copy)]
struct PartNumber {
    value: u32,
    row: i32,
    first: i32,
    last: i32,
}

impl PartNumber {
    fn touches(&self, (row, col): (i32, i32)) -> bool {
        (row - self.row).abs() <= 1 && (self.first - 1..=self.last + 1).contains(&col)
    }
}

#[derive(Debug)]
pub struct Schematic {
    numbers: Vec<PartNumber>,
    symbols: Vec<(u8, (i32, i32))>,
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut numbers = Vec::new();
        let mut symbols = Vec::new();

        for (row, line) in (0..).zip(input.lines().map(str::trim)) {
            let mut current: Option<PartNumber> = None;
            for (col, byte) in (0..).zip(line.bytes()) {
                if let Some(digit) = byte.is_ascii_digit().then(|| u32::from(byte - b'0')) {
                    let number = current.get_or_insert(PartNumber {
                        value: 0,
                        row,
                        first: col,
                        last: col,
                    });
                    number.value = number
                        .value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or_else(|| {
                            ParseError::Invalid(format!("(line {}) number too large", row + 1))
                        })?;
                    number.last = col;
                    continue;
                }
                numbers.extend(current.take());
                if byte != b'.' {
                    symbols.push((byte, (row, col)));
                }
            }
            numbers.extend(current);
        }

        if numbers.is_empty() && symbols.is_empty() {
            return Err(ParseError::MissingData("empty schematic".into()));
        }
        Ok(Schematic { numbers, symbols })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let symbols: HashSet<(i32, i32)> = shared.symbols.iter().map(|&(_, at)| at).collect();
        let sum: u32 = shared
            .numbers
            .iter()
            .filter(|number| {
                (number.row - 1..=number.row + 1).any(|row| {
                    (number.first - 1..=number.last + 1).any(|col| symbols.contains(&(row, col)))
                })
            })
            .map(|number| number.value)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbols
            .iter()
            .filter(|&&(symbol, _)| symbol == b'*')
            .filter_map(|&(_, at)| {
                let mut adjacent = shared.numbers.iter().filter(|number| number.touches(at));
                match (adjacent.next(), adjacent.next(), adjacent.next()) {
                    (Some(a), Some(b), None) => Some(u64::from(a.value) * u64::from(b.value)),
                    _ => None,
                }
            })
            .sum();
        Ok(sum.to_string())
    }
}

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

/// Race columns, kept as digit strings so part 2 can join them
#[derive(Debug)]
pub struct Races<'a> {
    times: Vec<&'a str>,
    records: Vec<&'a str>,
}

impl AocParser for Solver {
    type SharedData<'a> = Races<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
        let times = labelled_columns(lines.next(), "Time:")?;
        let records = labelled_columns(lines.next(), "Distance:")?;

        if times.len() != records.len() {
            return Err(ParseError::Invalid(format!(
                "{} race times but {} distances",
                times.len(),
                records.len()
            )));
        }
        Ok(Races { times, records })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product = shared
            .times
            .iter()
            .zip(&shared.records)
            .map(|(time, record)| -> Result<u64, SolveError> {
                Ok(ways_to_win(parse_u64(time)?, parse_u64(record)?))
            })
            .product::<Result<u64, _>>()?;
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let time = parse_u64(&shared.times.concat())?;
        let record = parse_u64(&shared.records.concat())?;
        Ok(ways_to_win(time, record).to_string())
    }
}

fn labelled_columns<'a>(line: Option<&'a str>, label: &str) -> Result<Vec<&'a str>, ParseError> {
    let columns: Vec<_> = line
        .and_then(|line| line.strip_prefix(label))
        .ok_or_else(|| ParseError::MissingData(format!("no '{label}' line")))?
        .split_whitespace()
        .collect();

    if let Some(bad) = columns.iter().find(|c| !c.bytes().all(|b| b.is_ascii_digit())) {
        return Err(ParseError::InvalidFormat(format!("{label} {bad:?} is not a number")));
    }
    if columns.is_empty() {
        return Err(ParseError::MissingData(format!("'{label}' line has no values")));
    }
    Ok(columns)
}

fn parse_u64(digits: &str) -> Result<u64, SolveError> {
    digits.parse().map_err(SolveError::failed)
}

/// Count hold times `h` in `0..=time` with `h * (time - h) > record`.
///
/// The winners form one interval symmetric around `time / 2`, bounded by the
/// roots of `h^2 - time*h + record = 0`. The float estimate of the lower root
/// is nudged onto the exact integer bound.
fn ways_to_win(time: u64, record: u64) -> u64 {
    let beats = |hold: u64| u128::from(hold) * u128::from(time - hold) > u128::from(record);

    let half = time / 2;
    if !beats(half) {
        return 0;
    }

    let t = time as f64;
    let discriminant = (t * t - 4.0 * record as f64).max(0.0);
    let mut low = (((t - discriminant.sqrt()) / 2.0).floor() as u64).min(half);
    while low > 0 && beats(low - 1) {
        low -= 1;
    }
    while !beats(low) {
        low += 1;
    }

    time + 1 - 2 * low
}

use crate::almanac::{AlmanacError, Mapping, Pipeline, RangeSet, Stage, Value};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["2023", "ranges"])]
pub struct Solver;

#[derive(Debug)]
pub struct Almanac {
    seeds: Vec<Value>,
    pipeline: Pipeline,
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let almanac = parse_almanac(input).map_err(into_parse_error)?;
        debug!(
            seeds = almanac.seeds.len(),
            stages = almanac.pipeline.len(),
            "parsed almanac"
        );
        Ok(almanac)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seeds = RangeSet::from_seed_values(&shared.seeds).map_err(SolveError::failed)?;
        lowest_location(&shared.pipeline, seeds)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let seeds = RangeSet::from_seed_pairs(&shared.seeds).map_err(SolveError::failed)?;
        lowest_location(&shared.pipeline, seeds)
    }
}

fn lowest_location(pipeline: &Pipeline, seeds: RangeSet) -> Result<String, SolveError> {
    pipeline
        .lowest(seeds)
        .map(|location| location.to_string())
        .ok_or_else(|| SolveError::failed(AlmanacError::MissingSeeds))
}

fn into_parse_error(err: AlmanacError) -> ParseError {
    match err {
        AlmanacError::Parse { .. } => ParseError::InvalidFormat(err.to_string()),
        AlmanacError::MissingSeeds => ParseError::MissingData(err.to_string()),
        _ => ParseError::Invalid(err.to_string()),
    }
}

/// Read the `seeds:` line followed by `<name> map:` blocks of
/// `destination source length` triples. Blank lines are ignored.
fn parse_almanac(input: &str) -> Result<Almanac, AlmanacError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    let seeds = match lines.next() {
        Some((line, text)) => match text.strip_prefix("seeds:") {
            Some(values) => parse_values(line, values, "seed values")?,
            None => return Err(AlmanacError::MissingSeeds),
        },
        None => return Err(AlmanacError::MissingSeeds),
    };
    if seeds.is_empty() {
        return Err(AlmanacError::MissingSeeds);
    }

    let mut stages = Vec::new();
    while let Some((line, header)) = lines.next() {
        if !is_stage_header(header) {
            return Err(AlmanacError::Parse {
                line,
                expected: "a '<name> map:' header",
                found: header.to_owned(),
            });
        }

        let mut mappings = Vec::new();
        while let Some((line, text)) = lines.next_if(|(_, text)| !is_stage_header(text)) {
            let values = parse_values(line, text, "three integers")?;
            let [destination_start, source_start, length] = values[..] else {
                return Err(AlmanacError::Parse {
                    line,
                    expected: "three integers",
                    found: text.to_owned(),
                });
            };
            mappings.push(Mapping::new(destination_start, source_start, length));
        }

        let stage = Stage::from_mappings(mappings)?;
        debug!(header, ranges = stage.ranges().len(), "built stage");
        stages.push(stage);
    }

    Ok(Almanac {
        seeds,
        pipeline: Pipeline::new(stages),
    })
}

fn is_stage_header(line: &str) -> bool {
    line.ends_with("map:")
}

fn parse_values(line: usize, text: &str, expected: &'static str) -> Result<Vec<Value>, AlmanacError> {
    text.split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| AlmanacError::Parse {
            line,
            expected,
            found: text.trim().to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::solve_example;

    const EXAMPLE: &str = "seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn test_part_1_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "35");
    }

    #[test]
    fn test_part_2_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "46");
    }

    #[test]
    fn test_example_parses_seven_stages() {
        let almanac = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(almanac.seeds, vec![79, 14, 55, 13]);
        assert_eq!(almanac.pipeline.len(), 7);
    }

    #[test]
    fn test_seeds_without_stages_are_their_own_locations() {
        assert_eq!(solve_example::<Solver>("seeds: 7 3 90 1\n", 1), "1");
        assert_eq!(solve_example::<Solver>("seeds: 7 3 90 1\n", 2), "7");
    }

    #[test]
    fn test_missing_seeds() {
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
        assert!(matches!(Solver::parse("seeds:\n"), Err(ParseError::MissingData(_))));
        assert!(matches!(
            Solver::parse("seed-to-soil map:\n1 2 3\n"),
            Err(ParseError::MissingData(_))
        ));
    }

    #[test]
    fn test_bad_tokens_name_the_line() {
        assert_eq!(
            parse_almanac("seeds: 1 2\n\nx map:\n1 2\n").unwrap_err(),
            AlmanacError::Parse {
                line: 4,
                expected: "three integers",
                found: "1 2".into(),
            }
        );
        assert!(matches!(
            parse_almanac("seeds: 1 two\n").unwrap_err(),
            AlmanacError::Parse { line: 1, .. }
        ));
        assert!(matches!(
            parse_almanac("seeds: 1 2\n1 2 3\n").unwrap_err(),
            AlmanacError::Parse { line: 2, .. }
        ));
    }

    #[test]
    fn test_overlapping_stage_is_invalid() {
        let input = "seeds: 1 2\n\nx map:\n0 10 5\n0 12 5\n";
        assert!(matches!(
            parse_almanac(input),
            Err(AlmanacError::MalformedStage(_))
        ));
        assert!(matches!(Solver::parse(input), Err(ParseError::Invalid(_))));
    }

    #[test]
    fn test_odd_seed_count_fails_only_for_ranges() {
        let mut almanac = Solver::parse("seeds: 4 5 6\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut almanac).unwrap(), "4");
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut almanac),
            Err(SolveError::SolveFailed(_))
        ));
    }
}

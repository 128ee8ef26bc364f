use super::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023", "parsing"])]
pub struct Solver;

/// Largest number of cubes of each color shown in any draw of a game
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

#[derive(Debug)]
pub struct Game {
    id: u32,
    fewest: Cubes,
}

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_game)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u32 = shared
            .iter()
            .filter(|game| {
                game.fewest.red <= BAG.red
                    && game.fewest.green <= BAG.green
                    && game.fewest.blue <= BAG.blue
            })
            .map(|game| game.id)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let power: u64 = shared
            .iter()
            .map(|Game { fewest, .. }| {
                u64::from(fewest.red) * u64::from(fewest.green) * u64::from(fewest.blue)
            })
            .sum();
        Ok(power.to_string())
    }
}

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (header, draws) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' after game id"))?;
    let id = header
        .strip_prefix("Game ")
        .ok_or_else(|| anyhow!("expected 'Game <id>', found {header:?}"))?
        .trim()
        .parse()?;

    let mut fewest = Cubes::default();
    for cubes in draws.split([';', ',']).map(str::trim) {
        let (count, color) = cubes
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected '<count> <color>', found {cubes:?}"))?;
        let count: u32 = count.parse()?;
        let slot = match color {
            "red" => &mut fewest.red,
            "green" => &mut fewest.green,
            "blue" => &mut fewest.blue,
            other => bail!("unknown cube color {other:?}"),
        };
        *slot = (*slot).max(count);
    }

    Ok(Game { id, fewest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2023::solve_example;

    const EXAMPLE: &str = "Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

    #[test]
    fn test_part_1_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "8");
    }

    #[test]
    fn test_part_2_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "2286");
    }

    #[test]
    fn test_fewest_cubes_per_color() {
        let game = parse_game("Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green").unwrap();
        assert_eq!(game.id, 3);
        assert_eq!(
            game.fewest,
            Cubes {
                red: 20,
                green: 13,
                blue: 6
            }
        );
    }

    #[test]
    fn test_unknown_color_rejected() {
        assert!(matches!(
            Solver::parse("Game 1: 3 purple"),
            Err(ParseError::InvalidFormat(_))
        ));
    }
}

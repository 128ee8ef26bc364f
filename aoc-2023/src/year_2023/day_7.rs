use super::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023", "sorting"])]
pub struct Solver;

const CARD_ORDER: &[u8; 13] = b"23456789TJQKA";
const JOKER_ORDER: &[u8; 13] = b"J23456789TQKA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

#[derive(Debug)]
pub struct Hand {
    cards: [u8; 5],
    bid: u64,
}

impl Hand {
    /// Sort key: hand type first, then card strengths left to right
    fn strength(&self, jokers: bool) -> (HandType, [usize; 5]) {
        let order = if jokers { JOKER_ORDER } else { CARD_ORDER };
        let ranks = self
            .cards
            .map(|card| order.iter().position(|&c| c == card).unwrap_or_default());
        (self.hand_type(jokers), ranks)
    }

    fn hand_type(&self, jokers: bool) -> HandType {
        let is_joker = |card: &&u8| jokers && **card == b'J';
        let joker_count = self.cards.iter().filter(is_joker).count();
        let mut groups: Vec<usize> = self
            .cards
            .iter()
            .filter(|card| !is_joker(card))
            .counts()
            .into_values()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect();

        // Jokers always join the largest group
        match groups.first_mut() {
            Some(largest) => *largest += joker_count,
            None => groups.push(joker_count),
        }

        match groups[..] {
            [5] => HandType::FiveOfAKind,
            [4, ..] => HandType::FourOfAKind,
            [3, 2] => HandType::FullHouse,
            [3, ..] => HandType::ThreeOfAKind,
            [2, 2, ..] => HandType::TwoPair,
            [2, ..] => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, parse_hand)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, true).to_string())
    }
}

fn total_winnings(hands: &[Hand], jokers: bool) -> u64 {
    hands
        .iter()
        .map(|hand| (hand.strength(jokers), hand.bid))
        .sorted_unstable()
        .zip(1..)
        .map(|((_, bid), rank)| bid * rank)
        .sum()
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("expected '<cards> <bid>'"))?;
    let cards: [u8; 5] = cards
        .as_bytes()
        .try_into()
        .map_err(|_| anyhow!("a hand has 5 cards, found {cards:?}"))?;
    if let Some(&bad) = cards.iter().find(|card| !CARD_ORDER.contains(card)) {
        bail!("unknown card {:?}", char::from(bad));
    }

    Ok(Hand {
        cards,
        bid: bid.trim().parse()?,
    })
}

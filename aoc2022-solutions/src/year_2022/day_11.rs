//! Monkey in the Middle

use crate::utils::parse_blocks;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 11, tags = ["simulation", "modular-arithmetic"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add(u64),
    Multiply(u64),
    Square,
}

impl Operation {
    fn apply(self, old: u64) -> Option<u64> {
        match self {
            Operation::Add(v) => old.checked_add(v),
            Operation::Multiply(v) => old.checked_mul(v),
            Operation::Square => old.checked_mul(old),
        }
    }
}

/// How worry levels are kept in check after each inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relief {
    DivideByThree,
    /// Reduce modulo the product of every divisor, which keeps all tests intact
    Modulo(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monkey {
    pub items: Vec<u64>,
    pub operation: Operation,
    pub divisor: u64,
    pub if_true: usize,
    pub if_false: usize,
}

impl Monkey {
    fn target(&self, worry: u64) -> usize {
        if worry % self.divisor == 0 {
            self.if_true
        } else {
            self.if_false
        }
    }
}

fn field<'a>(line: Option<&'a str>, prefix: &str) -> anyhow::Result<&'a str> {
    line.map(str::trim)
        .and_then(|l| l.strip_prefix(prefix))
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected line starting with {prefix:?}"))
}

fn parse_monkey(block: &[&str], id: usize) -> anyhow::Result<Monkey> {
    let mut lines = block.iter().copied();
    let header = field(lines.next(), "Monkey")?;
    if header.trim_end_matches(':').parse::<usize>()? != id {
        bail!("monkeys must be listed in order, expected monkey {id}");
    }

    let items = field(lines.next(), "Starting items:")?;
    let items = if items.is_empty() {
        Vec::new()
    } else {
        items
            .split(',')
            .map(|item| item.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .context("invalid starting item")?
    };

    let operation = match field(lines.next(), "Operation: new =")?
        .split_whitespace()
        .collect_tuple()
    {
        Some(("old", "*", "old")) => Operation::Square,
        Some(("old", "*", value)) => Operation::Multiply(value.parse()?),
        Some(("old", "+", value)) => Operation::Add(value.parse()?),
        _ => bail!("unsupported operation"),
    };

    let divisor: u64 = field(lines.next(), "Test: divisible by")?.parse()?;
    if divisor == 0 {
        bail!("divisor must not be zero");
    }
    let if_true = field(lines.next(), "If true: throw to monkey")?.parse()?;
    let if_false = field(lines.next(), "If false: throw to monkey")?.parse()?;

    Ok(Monkey {
        items,
        operation,
        divisor,
        if_true,
        if_false,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Monkey>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut next_id = 0;
        let monkeys = parse_blocks(input, |block| {
            let monkey = parse_monkey(block, next_id)?;
            next_id += 1;
            Ok(monkey)
        })?;

        for (id, monkey) in monkeys.iter().enumerate() {
            for target in [monkey.if_true, monkey.if_false] {
                if target >= monkeys.len() || target == id {
                    return Err(ParseError::InvalidFormat(format!(
                        "monkey {id} throws to invalid monkey {target}"
                    )));
                }
            }
        }
        if monkeys.is_empty() {
            return Err(ParseError::MissingData("no monkeys".to_string()));
        }
        Ok(monkeys)
    }
}

/// Play `rounds` rounds and return how many items each monkey inspected
pub fn inspection_counts(
    monkeys: &[Monkey],
    rounds: usize,
    relief: Relief,
) -> Result<Vec<u64>, SolveError> {
    let mut monkeys = monkeys.to_vec();
    let mut counts = vec![0u64; monkeys.len()];

    for round in 1..=rounds {
        for id in 0..monkeys.len() {
            let items = std::mem::take(&mut monkeys[id].items);
            counts[id] += items.len() as u64;
            for worry in items {
                let worry = monkeys[id].operation.apply(worry).ok_or_else(|| {
                    SolveError::failed(format!("worry level overflow in round {round}"))
                })?;
                let worry = match relief {
                    Relief::DivideByThree => worry / 3,
                    Relief::Modulo(modulus) => worry % modulus,
                };
                let target = monkeys[id].target(worry);
                monkeys[target].items.push(worry);
            }
        }
    }
    Ok(counts)
}

/// Product of the two highest inspection counts
pub fn monkey_business(counts: &[u64]) -> u64 {
    counts.iter().sorted_unstable_by(|a, b| b.cmp(a)).take(2).product()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let counts = inspection_counts(shared, 20, Relief::DivideByThree)?;
        Ok(monkey_business(&counts).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let modulus = shared
            .iter()
            .try_fold(1u64, |acc, m| acc.checked_mul(m.divisor))
            .ok_or_else(|| SolveError::failed("divisor product overflows"))?;
        let counts = inspection_counts(shared, 10_000, Relief::Modulo(modulus))?;
        Ok(monkey_business(&counts).to_string())
    }
}

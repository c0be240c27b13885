//! Proboscidea Volcanium

use crate::utils::line_error;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use regex::Regex;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 16, tags = ["graph", "bfs", "branch-and-bound"])]
pub struct Solver;

pub const START_VALVE: &str = "AA";
pub const ALONE_MINUTES: u32 = 30;
pub const WITH_ELEPHANT_MINUTES: u32 = 26;
const MAX_USEFUL_VALVES: usize = 64;

/// Valve graph reduced to the valves worth opening
///
/// Index `i < flows.len()` is the i-th useful valve, ordered by decreasing
/// flow rate; index `flows.len()` is the start valve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub names: Vec<String>,
    pub flows: Vec<u32>,
    /// Travel time in minutes between every pair of indices
    pub distances: Vec<Vec<u32>>,
}

struct Valve<'a> {
    name: &'a str,
    flow: u32,
    tunnels: Vec<&'a str>,
}

fn parse_valves<'a>(input: &'a str) -> Result<Vec<Valve<'a>>, ParseError> {
    let pattern = Regex::new(
        r"^Valve (\w+) has flow rate=(\d+); tunnels? leads? to valves? (\w+(?:, \w+)*)$",
    )
    .map_err(|e| ParseError::Other(e.to_string()))?;

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| -> Result<Valve<'a>, ParseError> {
            let caps = pattern
                .captures(line.trim())
                .ok_or_else(|| line_error(idx, anyhow!("unrecognised valve report")))?;
            let (Some(name), Some(flow), Some(tunnels)) = (caps.get(1), caps.get(2), caps.get(3))
            else {
                return Err(line_error(idx, "incomplete valve report"));
            };
            Ok(Valve {
                name: name.as_str(),
                flow: flow.as_str().parse().map_err(|e| line_error(idx, e))?,
                tunnels: tunnels.as_str().split(", ").collect(),
            })
        })
        .collect()
}

/// Shortest hop counts from `from` to every valve
fn bfs(adjacency: &[Vec<usize>], from: usize) -> Vec<Option<u32>> {
    let mut dist = vec![None; adjacency.len()];
    dist[from] = Some(0);
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        let Some(d) = dist[current] else { continue };
        for &next in &adjacency[current] {
            if dist[next].is_none() {
                dist[next] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

impl Network {
    fn from_valves(valves: &[Valve<'_>]) -> Result<Self, ParseError> {
        let index: HashMap<&str, usize> = valves
            .iter()
            .enumerate()
            .map(|(idx, valve)| (valve.name, idx))
            .collect();
        if index.len() != valves.len() {
            return Err(ParseError::InvalidFormat("duplicate valve name".to_string()));
        }

        let adjacency = valves
            .iter()
            .map(|valve| {
                valve
                    .tunnels
                    .iter()
                    .map(|tunnel| {
                        index.get(tunnel).copied().ok_or_else(|| {
                            ParseError::InvalidFormat(format!(
                                "valve {} leads to unknown valve {tunnel}",
                                valve.name
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let start = *index
            .get(START_VALVE)
            .ok_or_else(|| ParseError::MissingData(format!("start valve {START_VALVE}")))?;

        let mut useful: Vec<usize> = (0..valves.len()).filter(|&i| valves[i].flow > 0).collect();
        if useful.len() > MAX_USEFUL_VALVES {
            return Err(ParseError::InvalidFormat(format!(
                "{} valves have a positive flow rate, at most {MAX_USEFUL_VALVES} are supported",
                useful.len()
            )));
        }
        useful.sort_by(|&a, &b| valves[b].flow.cmp(&valves[a].flow));

        let nodes: Vec<usize> = useful.iter().copied().chain([start]).collect();
        let distances = nodes
            .iter()
            .map(|&from| {
                let reach = bfs(&adjacency, from);
                // unreachable valves get a distance no schedule can afford
                nodes
                    .iter()
                    .map(|&to| reach[to].unwrap_or(u32::MAX / 2))
                    .collect()
            })
            .collect();

        let network = Self {
            names: nodes.iter().map(|&i| valves[i].name.to_string()).collect(),
            flows: useful.iter().map(|&i| valves[i].flow).collect(),
            distances,
        };
        debug!(
            valves = valves.len(),
            useful = network.flows.len(),
            "reduced valve network"
        );
        Ok(network)
    }

    fn start(&self) -> usize {
        self.flows.len()
    }

    /// Pressure still obtainable if the closed valves were opened best first,
    /// the first one minute from now and each next one two minutes later
    fn upper_bound(&self, opened: u64, minutes_left: u32) -> u32 {
        let mut remaining = minutes_left + 1;
        let mut bound = 0;
        for (idx, &flow) in self.flows.iter().enumerate() {
            if opened & (1 << idx) != 0 {
                continue;
            }
            remaining = remaining.saturating_sub(2);
            if remaining == 0 {
                break;
            }
            bound += flow * remaining;
        }
        bound
    }

    /// Call `visit(opened, pressure)` for every valve schedule reachable in time
    fn explore(
        &self,
        at: usize,
        minutes_left: u32,
        opened: u64,
        pressure: u32,
        visit: &mut impl FnMut(u64, u32, u32) -> bool,
    ) {
        if !visit(opened, pressure, minutes_left) {
            return;
        }
        for next in 0..self.flows.len() {
            if opened & (1 << next) != 0 {
                continue;
            }
            let cost = self.distances[at][next] + 1;
            if cost >= minutes_left {
                continue;
            }
            let left = minutes_left - cost;
            self.explore(
                next,
                left,
                opened | 1 << next,
                pressure + self.flows[next] * left,
                visit,
            );
        }
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Network;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Network::from_valves(&parse_valves(input)?)
    }
}

/// Most pressure a single actor can release within `minutes`
pub fn max_pressure(network: &Network, minutes: u32) -> u32 {
    let mut best = 0;
    network.explore(network.start(), minutes, 0, 0, &mut |opened, pressure, left| {
        best = best.max(pressure);
        pressure + network.upper_bound(opened, left) > best
    });
    best
}

/// Best pressure for every set of opened valves, keyed by bitmask
pub fn pressure_by_valve_set(network: &Network, minutes: u32) -> HashMap<u64, u32> {
    let mut best = HashMap::new();
    network.explore(network.start(), minutes, 0, 0, &mut |opened, pressure, _| {
        let entry = best.entry(opened).or_insert(0);
        *entry = (*entry).max(pressure);
        true
    });
    debug!(valve_sets = best.len(), "explored valve schedules");
    best
}

/// Best total of two actors working on disjoint valve sets
pub fn max_pressure_with_help(network: &Network, minutes: u32) -> u32 {
    let mut sets: Vec<(u64, u32)> = pressure_by_valve_set(network, minutes).into_iter().collect();
    sets.sort_unstable_by(|a, b| b.1.cmp(&a.1));

    let mut best = 0;
    for (i, &(mine, my_pressure)) in sets.iter().enumerate() {
        if my_pressure * 2 < best {
            break;
        }
        for &(theirs, their_pressure) in &sets[i..] {
            if my_pressure + their_pressure <= best {
                break;
            }
            if mine & theirs == 0 {
                best = my_pressure + their_pressure;
            }
        }
    }
    best
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(max_pressure(shared, ALONE_MINUTES).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(max_pressure_with_help(shared, WITH_ELEPHANT_MINUTES).to_string())
    }
}

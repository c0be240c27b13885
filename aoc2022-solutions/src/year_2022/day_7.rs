//! No Space Left On Device

use crate::utils::line_error;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 7, tags = ["tree", "parsing"])]
pub struct Solver;

pub const SMALL_DIR_LIMIT: u64 = 100_000;
pub const DISK_SIZE: u64 = 70_000_000;
pub const SPACE_NEEDED: u64 = 30_000_000;

#[derive(Debug, Default)]
struct Directory<'a> {
    children: HashMap<&'a str, usize>,
    files: HashSet<&'a str>,
    /// Total size of every file below this directory
    size: u64,
}

/// Directory tree rebuilt from a terminal history
///
/// Directories live in an arena, index 0 is the root.
#[derive(Debug)]
pub struct Filesystem<'a> {
    dirs: Vec<Directory<'a>>,
    /// Arena indices from the root down to the current directory
    cwd: Vec<usize>,
}

impl<'a> Filesystem<'a> {
    fn new() -> Self {
        Self {
            dirs: vec![Directory::default()],
            cwd: vec![0],
        }
    }

    fn current(&self) -> usize {
        self.cwd.last().copied().unwrap_or(0)
    }

    fn child(&mut self, name: &'a str) -> usize {
        let parent = self.current();
        if let Some(&idx) = self.dirs[parent].children.get(name) {
            return idx;
        }
        let idx = self.dirs.len();
        self.dirs.push(Directory::default());
        self.dirs[parent].children.insert(name, idx);
        idx
    }

    fn change_dir(&mut self, target: &'a str) {
        match target {
            "/" => self.cwd.truncate(1),
            ".." => {
                if self.cwd.len() > 1 {
                    self.cwd.pop();
                }
            }
            name => {
                let idx = self.child(name);
                self.cwd.push(idx);
            }
        }
    }

    fn add_file(&mut self, name: &'a str, size: u64) {
        // a directory listed twice must not count its files twice
        let current = self.current();
        if self.dirs[current].files.insert(name) {
            for &idx in &self.cwd {
                self.dirs[idx].size += size;
            }
        }
    }

    fn apply(&mut self, line: &'a str) -> anyhow::Result<()> {
        let mut words = line.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("$"), Some("cd"), Some(target)) => self.change_dir(target),
            (Some("$"), Some("ls"), None) => {}
            (Some("$"), Some(cmd), _) => bail!("unknown command {cmd:?}"),
            (Some("dir"), Some(name), None) => {
                self.child(name);
            }
            (Some(size), Some(name), None) => {
                let size = size
                    .parse()
                    .map_err(|_| anyhow!("invalid listing entry {line:?}"))?;
                self.add_file(name, size);
            }
            _ => bail!("unrecognised line {line:?}"),
        }
        Ok(())
    }

    pub fn total_size(&self) -> u64 {
        self.dirs[0].size
    }

    /// Sizes of every directory, root included
    pub fn dir_sizes(&self) -> impl Iterator<Item = u64> + '_ {
        self.dirs.iter().map(|dir| dir.size)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Filesystem<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty());

        match lines.next() {
            Some((_, "$ cd /")) => {}
            Some((idx, _)) => return Err(line_error(idx, "history must start with `$ cd /`")),
            None => return Err(ParseError::MissingData("empty terminal history".to_string())),
        }

        let mut fs = Filesystem::new();
        for (idx, line) in lines {
            fs.apply(line).map_err(|e| line_error(idx, e))?;
        }
        Ok(fs)
    }
}

/// Sum of the sizes of directories smaller than [`SMALL_DIR_LIMIT`]
pub fn small_dirs_total(fs: &Filesystem) -> u64 {
    fs.dir_sizes().filter(|&size| size < SMALL_DIR_LIMIT).sum()
}

/// Size of the smallest directory whose removal frees enough space
pub fn dir_to_delete(fs: &Filesystem) -> Option<u64> {
    let free = DISK_SIZE.saturating_sub(fs.total_size());
    let missing = SPACE_NEEDED.saturating_sub(free);
    fs.dir_sizes().filter(|&size| size >= missing).min()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(small_dirs_total(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        dir_to_delete(shared)
            .map(|size| size.to_string())
            .ok_or_else(|| SolveError::failed("no directory frees enough space"))
    }
}

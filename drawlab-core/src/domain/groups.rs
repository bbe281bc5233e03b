//! Board groups — sector, dozen and column partitions of the alphabet.
//!
//! Sectors are six disjoint groups covering every symbol including the
//! zeros; the scorer's coverage signal is defined over them. Dozens and
//! columns cover only 1..=36 and exist for board-level analysis.

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;

/// One of six disjoint sectors covering the full alphabet.
///
/// A: 0, 00, 1–6 · B: 7–12 · C: 13–18 · D: 19–24 · E: 25–30 · F: 31–36.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sector {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Sector {
    pub const ALL: [Sector; 6] = [
        Sector::A,
        Sector::B,
        Sector::C,
        Sector::D,
        Sector::E,
        Sector::F,
    ];

    /// The sector containing `outcome`. Total over the alphabet.
    pub fn of(outcome: Outcome) -> Sector {
        match outcome.value() {
            None | Some(1..=6) => Sector::A,
            Some(7..=12) => Sector::B,
            Some(13..=18) => Sector::C,
            Some(19..=24) => Sector::D,
            Some(25..=30) => Sector::E,
            Some(_) => Sector::F,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sector::A => "sector_a",
            Sector::B => "sector_b",
            Sector::C => "sector_c",
            Sector::D => "sector_d",
            Sector::E => "sector_e",
            Sector::F => "sector_f",
        }
    }

    pub fn contains(self, outcome: Outcome) -> bool {
        Sector::of(outcome) == self
    }
}

/// Dozen partition over 1..=36; the zero variants belong to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dozen {
    First,
    Second,
    Third,
}

impl Dozen {
    pub const ALL: [Dozen; 3] = [Dozen::First, Dozen::Second, Dozen::Third];

    pub fn of(outcome: Outcome) -> Option<Dozen> {
        match outcome.value()? {
            1..=12 => Some(Dozen::First),
            13..=24 => Some(Dozen::Second),
            _ => Some(Dozen::Third),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dozen::First => "dozen_1",
            Dozen::Second => "dozen_2",
            Dozen::Third => "dozen_3",
        }
    }
}

/// Column partition over 1..=36; the zero variants belong to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    First,
    Second,
    Third,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::First, Column::Second, Column::Third];

    pub fn of(outcome: Outcome) -> Option<Column> {
        match outcome.value()? % 3 {
            1 => Some(Column::First),
            2 => Some(Column::Second),
            _ => Some(Column::Third),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::First => "column_1",
            Column::Second => "column_2",
            Column::Third => "column_3",
        }
    }
}

/// Coverage of a group over a recent window of draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub label: String,
    /// Draws inspected.
    pub window: usize,
    /// Draws in the window that landed in the group.
    pub hits: usize,
    /// `hits / window` (0 for an empty window).
    pub share: f64,
}

fn stats_for(label: &str, recent: &[Outcome], contains: impl Fn(Outcome) -> bool) -> GroupStats {
    let hits = recent.iter().copied().filter(|&o| contains(o)).count();
    let share = if recent.is_empty() {
        0.0
    } else {
        hits as f64 / recent.len() as f64
    };
    GroupStats {
        label: label.to_string(),
        window: recent.len(),
        hits,
        share,
    }
}

/// Fraction of `recent` draws landing in each sector, indexed like `Sector::ALL`.
pub fn sector_shares(recent: &[Outcome]) -> [f64; 6] {
    let mut hits = [0usize; 6];
    for &o in recent {
        hits[Sector::of(o) as usize] += 1;
    }
    let mut shares = [0.0; 6];
    if !recent.is_empty() {
        for (share, &h) in shares.iter_mut().zip(hits.iter()) {
            *share = h as f64 / recent.len() as f64;
        }
    }
    shares
}

/// Per-sector coverage stats over the recent window.
pub fn sector_stats(recent: &[Outcome]) -> Vec<GroupStats> {
    Sector::ALL
        .iter()
        .map(|&s| stats_for(s.label(), recent, |o| s.contains(o)))
        .collect()
}

/// Per-dozen coverage stats over the recent window.
pub fn dozen_stats(recent: &[Outcome]) -> Vec<GroupStats> {
    Dozen::ALL
        .iter()
        .map(|&d| stats_for(d.label(), recent, |o| Dozen::of(o) == Some(d)))
        .collect()
}

/// Per-column coverage stats over the recent window.
pub fn column_stats(recent: &[Outcome]) -> Vec<GroupStats> {
    Column::ALL
        .iter()
        .map(|&c| stats_for(c.label(), recent, |o| Column::of(o) == Some(c)))
        .collect()
}

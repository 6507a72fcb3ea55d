use crate::util::{approx_cmp, approx_eq, quantize_ticks};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single note hit on one column (lane) of the chart.
///
/// Two runes are the same rune when their times agree to 4 decimal digits and they sit on the same column.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Rune {
    pub time: f64,
    pub column: u8,
}

impl Rune {
    pub fn new(time: f64, column: u8) -> Self {
        Self { time, column }
    }

    pub fn equals_with_tolerance(&self, other: &Rune) -> bool {
        approx_eq(self.time, other.time) && self.column == other.column
    }

    /// Orders by quantized time first, then by column.
    pub fn compare_by_time(&self, other: &Rune) -> Ordering {
        approx_cmp(self.time, other.time).then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialEq for Rune {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with_tolerance(other)
    }
}

impl Eq for Rune {}

impl PartialOrd for Rune {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rune {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_by_time(other)
    }
}

impl Hash for Rune {
    fn hash<H: Hasher>(&self, state: &mut H) {
        quantize_ticks(self.time).hash(state);
        self.column.hash(state);
    }
}

impl fmt::Display for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rune(time={}, column={})", self.time, self.column)
    }
}

/// A tempo that takes effect from `start_time` onwards.
/// The global tempo of a chart is a change with `start_time = 0`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct BpmChange {
    pub start_time: f64,
    pub bpm: f64,
}

impl BpmChange {
    pub fn new(start_time: f64, bpm: f64) -> Self {
        Self { start_time, bpm }
    }

    pub fn global(bpm: f64) -> Self {
        Self::new(0.0, bpm)
    }

    pub fn equals_with_tolerance(&self, other: &BpmChange) -> bool {
        approx_eq(self.start_time, other.start_time) && approx_eq(self.bpm, other.bpm)
    }

    /// Orders by quantized start time only.
    pub fn compare_by_time(&self, other: &BpmChange) -> Ordering {
        approx_cmp(self.start_time, other.start_time)
    }
}

impl PartialEq for BpmChange {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with_tolerance(other)
    }
}

impl Eq for BpmChange {}

impl PartialOrd for BpmChange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Ties on start time fall back to bpm so the set ordering stays consistent with equality.
impl Ord for BpmChange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_by_time(other)
            .then_with(|| approx_cmp(self.bpm, other.bpm))
    }
}

impl Hash for BpmChange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        quantize_ticks(self.start_time).hash(state);
        quantize_ticks(self.bpm).hash(state);
    }
}

impl fmt::Display for BpmChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BpmChange(start_time={}, bpm={})", self.start_time, self.bpm)
    }
}

/// Contents of a version 1 rune string: every rune and bpm change of a chart,
/// deduplicated and kept in time order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RuneStringData {
    #[serde(default)]
    pub runes: BTreeSet<Rune>,
    #[serde(default)]
    pub bpm_changes: BTreeSet<BpmChange>,
}

impl RuneStringData {
    pub fn new(
        runes: impl IntoIterator<Item = Rune>,
        bpm_changes: impl IntoIterator<Item = BpmChange>,
    ) -> Self {
        Self {
            runes: runes.into_iter().collect(),
            bpm_changes: bpm_changes.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty() && self.bpm_changes.is_empty()
    }
}

impl fmt::Display for RuneStringData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuneStringData(runes=[{}], bpm_changes=[{}])",
            self.runes.len(),
            self.bpm_changes.len()
        )
    }
}

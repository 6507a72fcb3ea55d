use crate::model::chart::Rune;
use crate::util::quantize_ticks;
use log::trace;
use std::collections::BTreeMap;

/// All runes sharing one quantized time, columns ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct RuneGroup {
    pub time: f64,
    pub columns: Vec<u8>,
}

impl RuneGroup {
    pub fn new(time: f64, columns: Vec<u8>) -> Self {
        Self { time, columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn runes(&self) -> impl Iterator<Item = Rune> + '_ {
        self.columns.iter().map(|&column| Rune::new(self.time, column))
    }
}

/// Runes split by how many of them land on the same time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRunes {
    pub singles: Vec<Rune>,
    pub doubles: Vec<RuneGroup>,
    pub multis: Vec<RuneGroup>,
}

/// Partitions runes by quantized time. Groups come out in ascending time order.
///
/// A group keeps the raw time of the first rune seen for it. Duplicate columns within a group are dropped.
pub fn group_by_simultaneity<'a>(runes: impl IntoIterator<Item = &'a Rune>) -> Vec<RuneGroup> {
    let mut groups: BTreeMap<i64, RuneGroup> = BTreeMap::new();

    for rune in runes {
        groups
            .entry(quantize_ticks(rune.time))
            .or_insert_with(|| RuneGroup::new(rune.time, Vec::new()))
            .columns
            .push(rune.column);
    }

    groups
        .into_values()
        .map(|mut group| {
            group.columns.sort_unstable();
            group.columns.dedup();
            group
        })
        .collect()
}

/// Buckets groups by size: 1 rune, 2 runes, and everything larger.
pub fn bucket_by_size(groups: Vec<RuneGroup>) -> GroupedRunes {
    let mut grouped = GroupedRunes::default();

    for group in groups {
        match group.len() {
            0 => continue,
            1 => grouped.singles.extend(group.runes()),
            2 => grouped.doubles.push(group),
            n => {
                trace!("Multi rune of {} at time {}..!", n, group.time);
                grouped.multis.push(group);
            }
        }
    }

    grouped
}

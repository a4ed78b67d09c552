//! Transform layers registered on an [`IndexMapper`](super::IndexMapper).
//!
//! Boolean layers (trimming, hiding) hold one flag per physical index.
//! Ordering layers hold a permutation over the positions of the sequence
//! produced by the ordering layers registered before them; the first one
//! permutes raw physical order.

use serde::{Deserialize, Serialize};

/// What a layer does to the index spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    /// `true` removes the physical index from visual space.
    Trimming,
    /// `true` removes the index from renderable space; it stays addressable visually.
    Hiding,
    /// Reorders indexes (sort, move).
    Ordering,
}

impl LayerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Trimming => "trimming",
            LayerKind::Hiding => "hiding",
            LayerKind::Ordering => "ordering",
        }
    }
}

/// Explicit layer contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerValues {
    /// One flag per physical index (trimming, hiding).
    Flags(Vec<bool>),
    /// Output position → input position (ordering).
    Sequence(Vec<usize>),
}

impl LayerValues {
    pub fn len(&self) -> usize {
        match self {
            LayerValues::Flags(flags) => flags.len(),
            LayerValues::Sequence(sequence) => sequence.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn fits(&self, kind: LayerKind) -> bool {
        matches!(
            (self, kind),
            (LayerValues::Flags(_), LayerKind::Trimming | LayerKind::Hiding)
                | (LayerValues::Sequence(_), LayerKind::Ordering)
        )
    }
}

/// A named layer together with the default used for new indexes.
#[derive(Debug, Clone)]
pub(crate) struct IndexLayer {
    pub(crate) name: String,
    pub(crate) kind: LayerKind,
    pub(crate) default_flag: bool,
    pub(crate) values: LayerValues,
}

impl IndexLayer {
    pub(crate) fn new(name: String, kind: LayerKind, default_flag: bool, len: usize) -> Self {
        Self {
            name,
            kind,
            default_flag,
            values: default_values(kind, default_flag, len),
        }
    }

    pub(crate) fn reset(&mut self, len: usize) {
        self.values = default_values(self.kind, self.default_flag, len);
    }

    /// Inserts `amount` new entries where incoming position `at` starts.
    ///
    /// Returns the output position of the first inserted entry, which is the
    /// incoming position for the next ordering layer.
    pub(crate) fn insert(&mut self, at: usize, amount: usize) -> usize {
        match &mut self.values {
            LayerValues::Flags(flags) => {
                let at = at.min(flags.len());
                let fill = std::iter::repeat(self.default_flag).take(amount);
                flags.splice(at..at, fill);
                at
            }
            LayerValues::Sequence(sequence) => insert_into_sequence(sequence, at, amount),
        }
    }

    /// Removes the entries at the sorted incoming positions in `removed`.
    ///
    /// Returns the sorted output positions that disappeared.
    pub(crate) fn remove(&mut self, removed: &[usize]) -> Vec<usize> {
        match &mut self.values {
            LayerValues::Flags(flags) => {
                let mut index = 0;
                flags.retain(|_| {
                    let keep = removed.binary_search(&index).is_err();
                    index += 1;
                    keep
                });
                removed.to_vec()
            }
            LayerValues::Sequence(sequence) => remove_from_sequence(sequence, removed),
        }
    }
}

fn default_values(kind: LayerKind, default_flag: bool, len: usize) -> LayerValues {
    match kind {
        LayerKind::Trimming | LayerKind::Hiding => LayerValues::Flags(vec![default_flag; len]),
        LayerKind::Ordering => LayerValues::Sequence((0..len).collect()),
    }
}

/// Inserts positions `at..at + amount` into a permutation.
///
/// The new entries are placed where incoming position `at` used to appear
/// (or appended when `at` is past the end), and every existing position at
/// or above `at` is shifted up.
pub(crate) fn insert_into_sequence(sequence: &mut Vec<usize>, at: usize, amount: usize) -> usize {
    let output = sequence
        .iter()
        .position(|&position| position == at)
        .unwrap_or(sequence.len());

    for position in sequence.iter_mut() {
        if *position >= at {
            *position += amount;
        }
    }
    sequence.splice(output..output, at..at + amount);

    output
}

/// Drops the sorted incoming positions in `removed` from a permutation and
/// renumbers the rest densely.
pub(crate) fn remove_from_sequence(sequence: &mut Vec<usize>, removed: &[usize]) -> Vec<usize> {
    let mut vanished = Vec::with_capacity(removed.len());
    let mut kept = Vec::with_capacity(sequence.len().saturating_sub(removed.len()));

    for (output, &position) in sequence.iter().enumerate() {
        if removed.binary_search(&position).is_ok() {
            vanished.push(output);
        } else {
            let shift = removed.partition_point(|&r| r < position);
            kept.push(position - shift);
        }
    }
    *sequence = kept;

    vanished
}

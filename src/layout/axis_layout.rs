//! Pre-computed positions for one axis.
//!
//! Sizes are summed once into a prefix array so that position lookups are
//! O(1) and offset → index lookups are a binary search.

use crate::index_mapper::IndexMapper;

/// Cumulative positions of the renderable indexes of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    /// `positions[i]` is the leading edge of renderable index `i`; the last
    /// entry is the trailing edge of the final index.
    positions: Vec<f32>,
    /// Leading indexes that never scroll
    frozen: usize,
}

impl AxisLayout {
    /// Build from a size function over renderable indexes.
    ///
    /// Negative sizes are treated as zero.
    pub fn from_sizes(count: usize, frozen: usize, size_of: impl Fn(usize) -> f32) -> Self {
        let mut positions = Vec::with_capacity(count + 1);
        let mut edge: f32 = 0.0;
        for index in 0..count {
            positions.push(edge);
            edge += size_of(index).max(0.0);
        }
        positions.push(edge); // Final edge

        Self {
            positions,
            frozen: frozen.min(count),
        }
    }

    /// Every index the same size.
    pub fn uniform(count: usize, size: f32, frozen: usize) -> Self {
        Self::from_sizes(count, frozen, |_| size)
    }

    /// Build over the renderable indexes of `mapper`, sizing each through its
    /// visual index.
    pub fn from_index_mapper(
        mapper: &IndexMapper,
        frozen: usize,
        size_of_visual: impl Fn(usize) -> f32,
    ) -> Self {
        Self::from_sizes(mapper.count_renderable(), frozen, |renderable| {
            mapper
                .renderable_to_visual(renderable)
                .map_or(0.0, &size_of_visual)
        })
    }

    /// Number of renderable indexes
    pub fn count(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen
    }

    /// Leading edge of `index`; indexes past the end report the total size.
    pub fn position(&self, index: usize) -> f32 {
        self.positions
            .get(index)
            .copied()
            .unwrap_or_else(|| self.total_size())
    }

    /// Trailing edge of `index`.
    pub fn end(&self, index: usize) -> f32 {
        self.position(index.saturating_add(1))
    }

    pub fn size(&self, index: usize) -> f32 {
        if index >= self.count() {
            return 0.0;
        }
        self.end(index) - self.position(index)
    }

    pub fn total_size(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Total size of the frozen leading indexes (0 when nothing is frozen)
    pub fn frozen_size(&self) -> f32 {
        if self.frozen == 0 {
            return 0.0;
        }
        self.position(self.frozen)
    }

    /// Find the index covering `offset` (binary search).
    ///
    /// Returns `None` for offsets before the first index or at/after the end.
    pub fn index_at_offset(&self, offset: f32) -> Option<usize> {
        if offset < 0.0 || offset >= self.total_size() {
            return None;
        }
        // Number of leading edges at or before `offset`.
        let covering = self.leading_edges().partition_point(|&p| p <= offset);
        covering.checked_sub(1)
    }

    /// First index whose trailing edge lies after `offset`.
    pub(crate) fn first_ending_after(&self, offset: f32) -> usize {
        self.trailing_edges().partition_point(|&e| e <= offset)
    }

    /// Number of indexes whose leading edge lies before `offset`, which is
    /// also the first index starting at or after it.
    pub(crate) fn count_starting_before(&self, offset: f32) -> usize {
        self.leading_edges().partition_point(|&p| p < offset)
    }

    /// Number of indexes whose trailing edge lies at or before `offset`.
    pub(crate) fn count_ending_at_or_before(&self, offset: f32) -> usize {
        self.trailing_edges().partition_point(|&e| e <= offset)
    }

    fn leading_edges(&self) -> &[f32] {
        self.positions
            .split_last()
            .map_or(&[][..], |(_, leading)| leading)
    }

    fn trailing_edges(&self) -> &[f32] {
        self.positions
            .split_first()
            .map_or(&[][..], |(_, trailing)| trailing)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use crate::index_mapper::LayerKind;
    use crate::types::Axis;

    #[test]
    fn test_basic_layout() {
        let layout = AxisLayout::uniform(10, 20.0, 0);
        assert_eq!(layout.count(), 10);
        assert_eq!(layout.total_size(), 200.0);
        assert_eq!(layout.position(3), 60.0);
        assert_eq!(layout.end(3), 80.0);
        assert_eq!(layout.size(3), 20.0);
        assert_eq!(layout.size(10), 0.0);
    }

    #[test]
    fn test_variable_sizes() {
        let layout = AxisLayout::from_sizes(4, 0, |i| if i == 1 { 50.0 } else { 10.0 });
        assert_eq!(layout.position(2), 60.0);
        assert_eq!(layout.total_size(), 80.0);
    }

    #[test]
    fn test_index_at_offset() {
        let layout = AxisLayout::uniform(5, 20.0, 0);
        assert_eq!(layout.index_at_offset(0.0), Some(0));
        assert_eq!(layout.index_at_offset(10.0), Some(0));
        assert_eq!(layout.index_at_offset(20.0), Some(1));
        assert_eq!(layout.index_at_offset(99.9), Some(4));
        assert_eq!(layout.index_at_offset(100.0), None);
        assert_eq!(layout.index_at_offset(-1.0), None);
    }

    #[test]
    fn test_frozen_size() {
        let layout = AxisLayout::uniform(10, 25.0, 2);
        assert_eq!(layout.frozen_size(), 50.0);
        assert_eq!(AxisLayout::uniform(10, 25.0, 0).frozen_size(), 0.0);
        assert_eq!(AxisLayout::uniform(3, 25.0, 9).frozen_count(), 3);
    }

    #[test]
    fn test_from_index_mapper_skips_hidden() {
        let mut mapper = IndexMapper::new(Axis::Column, 4);
        mapper.register_layer("hidden", LayerKind::Hiding, false).unwrap();
        mapper.set_layer_value_at("hidden", 1, true).unwrap();

        let layout = AxisLayout::from_index_mapper(&mapper, 0, |visual| (visual as f32 + 1.0) * 10.0);
        assert_eq!(layout.count(), 3);
        // Visual 0, 2, 3 → 10 + 30 + 40
        assert_eq!(layout.total_size(), 80.0);
        assert_eq!(layout.position(1), 10.0);
    }
}

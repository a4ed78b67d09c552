//! Index mapping between physical, visual and renderable coordinate spaces.
//!
//! One [`IndexMapper`] exists per axis. It owns every transform layer for that
//! axis and composes them into dense lookup tables:
//!
//! - physical: position in the caller-supplied data
//! - visual: physical order after ordering layers, minus trimmed indexes
//! - renderable: visual order minus hidden indexes, numbered `0..M`
//!
//! Mutations only mark the axis dirty. The tables are rebuilt in one O(N)
//! pass on the next query and memoised until the next mutation, so a batch
//! of mutations costs a single recomputation.

mod cache;
mod layer;

use std::cell::{Cell, RefCell};
use std::fmt;

use tracing::{debug, error};

use crate::error::{GridError, Result};
use crate::types::Axis;
use cache::IndexCache;
use layer::IndexLayer;

pub use layer::{LayerKind, LayerValues};

/// Direction used when searching for the nearest not-hidden index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Fired once per recomputation of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMapperChange {
    pub axis: Axis,
    pub old_renderable: usize,
    pub new_renderable: usize,
}

type ChangeListener = Box<dyn FnMut(&IndexMapperChange)>;

enum CacheState {
    Settled(IndexCache),
    /// Last recomputation failed; lookups behave as an empty axis.
    Failed,
}

/// Per-axis index mapper.
pub struct IndexMapper {
    axis: Axis,
    length: usize,
    layers: Vec<IndexLayer>,
    /// Built-in ordering applied after every registered ordering layer.
    moves: IndexLayer,
    cache: RefCell<Option<CacheState>>,
    last_renderable: Cell<usize>,
    listeners: RefCell<Vec<ChangeListener>>,
}

impl fmt::Debug for IndexMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexMapper")
            .field("axis", &self.axis)
            .field("length", &self.length)
            .field(
                "layers",
                &self.layers.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

const MOVES_LAYER: &str = "moves";

impl IndexMapper {
    /// Create a mapper for `length` physical indexes with no layers.
    pub fn new(axis: Axis, length: usize) -> Self {
        Self {
            axis,
            length,
            layers: Vec::new(),
            moves: IndexLayer::new(MOVES_LAYER.to_string(), LayerKind::Ordering, false, length),
            cache: RefCell::new(None),
            last_renderable: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Reset to `length` physical indexes. Every layer returns to its default.
    pub fn init_to_length(&mut self, length: usize) {
        self.length = length;
        for layer in &mut self.layers {
            layer.reset(length);
        }
        self.moves.reset(length);
        self.invalidate();
    }

    // ------------------------------------------------------------------
    // Layer registration
    // ------------------------------------------------------------------

    /// Register a layer whose boolean entries all start as `initial`.
    /// Ordering layers ignore `initial` and start as identity.
    pub fn register_layer(
        &mut self,
        name: impl Into<String>,
        kind: LayerKind,
        initial: bool,
    ) -> Result<()> {
        let name = name.into();
        self.ensure_unregistered(&name)?;
        self.layers
            .push(IndexLayer::new(name, kind, initial, self.length));
        self.invalidate();
        Ok(())
    }

    /// Register a layer with explicit contents.
    pub fn register_layer_with(
        &mut self,
        name: impl Into<String>,
        kind: LayerKind,
        values: LayerValues,
    ) -> Result<()> {
        let name = name.into();
        self.ensure_unregistered(&name)?;
        self.check_values(&name, kind, &values)?;
        let mut layer = IndexLayer::new(name, kind, false, 0);
        layer.values = values;
        self.layers.push(layer);
        self.invalidate();
        Ok(())
    }

    pub fn unregister_layer(&mut self, name: &str) -> Result<()> {
        let position = self.layer_position(name)?;
        self.layers.remove(position);
        self.invalidate();
        Ok(())
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name == name)
    }

    /// Names of registered layers in composition order.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.name.as_str())
    }

    /// Replace the contents of a layer.
    pub fn set_layer_values(&mut self, name: &str, values: LayerValues) -> Result<()> {
        let position = self.layer_position(name)?;
        let kind = self
            .layers
            .get(position)
            .map(|l| l.kind)
            .ok_or_else(|| self.unknown_layer(name))?;
        self.check_values(name, kind, &values)?;
        if let Some(layer) = self.layers.get_mut(position) {
            layer.values = values;
        }
        self.invalidate();
        Ok(())
    }

    /// Set one flag of a trimming or hiding layer, addressed by physical index.
    pub fn set_layer_value_at(&mut self, name: &str, physical: usize, flag: bool) -> Result<()> {
        let axis = self.axis;
        let length = self.length;
        let position = self.layer_position(name)?;
        let layer = self
            .layers
            .get_mut(position)
            .ok_or_else(|| GridError::UnknownLayer {
                axis,
                name: name.to_string(),
            })?;

        let LayerValues::Flags(flags) = &mut layer.values else {
            return Err(GridError::LayerKind {
                axis,
                name: name.to_string(),
                kind: layer.kind.as_str(),
            });
        };
        let slot = flags
            .get_mut(physical)
            .ok_or(GridError::IndexOutOfBounds {
                axis,
                index: physical,
                len: length,
            })?;
        *slot = flag;
        self.invalidate();
        Ok(())
    }

    /// Set one flag addressed by the visual index it has right now.
    ///
    /// The flag is stored against the physical index, so it follows the
    /// index through later reordering.
    pub fn hide_visual(&mut self, name: &str, visual: usize, flag: bool) -> Result<()> {
        let physical = self
            .visual_to_physical(visual)
            .ok_or(GridError::IndexOutOfBounds {
                axis: self.axis,
                index: visual,
                len: self.count_visual(),
            })?;
        self.set_layer_value_at(name, physical, flag)
    }

    // ------------------------------------------------------------------
    // Structural mutations
    // ------------------------------------------------------------------

    /// Insert `amount` physical indexes starting at `first_physical`.
    ///
    /// Existing indexes at or after the insertion point are renumbered. New
    /// indexes take each layer's default and appear in the ordering where
    /// `first_physical` used to be.
    pub fn insert_indexes(&mut self, first_physical: usize, amount: usize) {
        if amount == 0 {
            return;
        }
        let at = first_physical.min(self.length);
        let mut position = at;
        for layer in self.layers.iter_mut().chain(std::iter::once(&mut self.moves)) {
            match layer.kind {
                LayerKind::Ordering => position = layer.insert(position, amount),
                LayerKind::Trimming | LayerKind::Hiding => {
                    layer.insert(at, amount);
                }
            }
        }
        self.length += amount;
        debug!(axis = %self.axis, at, amount, length = self.length, "inserted indexes");
        self.invalidate();
    }

    /// Remove the given physical indexes. Out-of-range indexes are ignored.
    pub fn remove_indexes(&mut self, physical: &[usize]) {
        let mut removed: Vec<usize> = physical
            .iter()
            .copied()
            .filter(|&p| p < self.length)
            .collect();
        removed.sort_unstable();
        removed.dedup();
        if removed.is_empty() {
            return;
        }

        let mut positions = removed.clone();
        for layer in self.layers.iter_mut().chain(std::iter::once(&mut self.moves)) {
            match layer.kind {
                LayerKind::Ordering => positions = layer.remove(&positions),
                LayerKind::Trimming | LayerKind::Hiding => {
                    layer.remove(&removed);
                }
            }
        }
        self.length -= removed.len();
        debug!(axis = %self.axis, removed = removed.len(), length = self.length, "removed indexes");
        self.invalidate();
    }

    /// Move the given visual indexes so that the first lands on `final_index`.
    ///
    /// Trimmed indexes keep their slots in the underlying sequence.
    pub fn move_indexes(&mut self, visual: &[usize], final_index: usize) -> Result<()> {
        let mut moved_physical = Vec::with_capacity(visual.len());
        for &index in visual {
            let physical = self
                .visual_to_physical(index)
                .ok_or(GridError::IndexOutOfBounds {
                    axis: self.axis,
                    index,
                    len: self.count_visual(),
                })?;
            if !moved_physical.contains(&physical) {
                moved_physical.push(physical);
            }
        }
        if moved_physical.is_empty() {
            return Ok(());
        }

        let before_moves = self.ordered_sequence(false)?;
        let full = apply_ordering(&before_moves, &self.moves, self.axis)?;
        let trimmed = self.combined_flags(LayerKind::Trimming)?;
        let is_trimmed = |p: usize| trimmed.get(p).copied().unwrap_or(false);

        let not_moved: Vec<usize> = full
            .iter()
            .copied()
            .filter(|p| !moved_physical.contains(p))
            .collect();
        let not_trimmed_not_moved: Vec<usize> = not_moved
            .iter()
            .copied()
            .filter(|&p| !is_trimmed(p))
            .collect();

        let position_of = |target: usize| not_moved.iter().position(|&p| p == target);
        let mut insertion = not_trimmed_not_moved
            .last()
            .and_then(|&last| position_of(last))
            .map_or(0, |p| p + 1);
        if final_index + moved_physical.len() < self.count_visual() {
            if let Some(p) = not_trimmed_not_moved
                .get(final_index)
                .and_then(|&target| position_of(target))
            {
                insertion = p;
            }
        }

        let mut target = not_moved;
        target.splice(insertion..insertion, moved_physical.iter().copied());

        // Express the new full order as positions within the pre-moves sequence.
        let mut inverse = vec![0; self.length];
        for (position, &physical) in before_moves.iter().enumerate() {
            if let Some(slot) = inverse.get_mut(physical) {
                *slot = position;
            }
        }
        let moves: Vec<usize> = target
            .iter()
            .map(|&physical| inverse.get(physical).copied().unwrap_or(physical))
            .collect();
        self.moves.values = LayerValues::Sequence(moves);
        self.invalidate();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Visual index of a physical index; `None` when trimmed or out of range.
    pub fn physical_to_visual(&self, physical: usize) -> Option<usize> {
        self.with_cache(|c| c.physical_to_visual.get(physical).copied().flatten())
    }

    pub fn visual_to_physical(&self, visual: usize) -> Option<usize> {
        self.with_cache(|c| c.visual_to_physical.get(visual).copied())
    }

    /// Renderable index of a visual index; `None` when hidden or out of range.
    pub fn visual_to_renderable(&self, visual: usize) -> Option<usize> {
        self.with_cache(|c| c.visual_to_renderable.get(visual).copied().flatten())
    }

    pub fn renderable_to_visual(&self, renderable: usize) -> Option<usize> {
        self.with_cache(|c| c.renderable_to_visual.get(renderable).copied())
    }

    pub fn renderable_to_physical(&self, renderable: usize) -> Option<usize> {
        self.with_cache(|c| c.renderable_to_physical.get(renderable).copied())
    }

    pub fn physical_to_renderable(&self, physical: usize) -> Option<usize> {
        self.physical_to_visual(physical)
            .and_then(|visual| self.visual_to_renderable(visual))
    }

    pub fn count_physical(&self) -> usize {
        self.length
    }

    pub fn count_visual(&self) -> usize {
        self.with_cache(IndexCache::count_visual)
    }

    pub fn count_renderable(&self) -> usize {
        self.with_cache(IndexCache::count_renderable)
    }

    pub fn is_trimmed(&self, physical: usize) -> bool {
        self.with_cache(|c| c.trimmed.get(physical).copied().unwrap_or(false))
    }

    pub fn is_hidden(&self, physical: usize) -> bool {
        self.with_cache(|c| c.hidden.get(physical).copied().unwrap_or(false))
    }

    /// Physical indexes in visual order.
    pub fn not_trimmed_indexes(&self) -> Vec<usize> {
        self.with_cache(|c| c.visual_to_physical.clone())
    }

    /// Physical indexes in renderable order.
    pub fn renderable_indexes(&self) -> Vec<usize> {
        self.with_cache(|c| c.renderable_to_physical.clone())
    }

    /// Nearest visual index at or after/before `visual` that is not hidden.
    pub fn nearest_not_hidden_index(
        &self,
        visual: usize,
        direction: SearchDirection,
        search_other_way: bool,
    ) -> Option<usize> {
        self.with_cache(|c| {
            let count = c.count_visual();
            if visual >= count {
                return None;
            }
            let visible = |v: &usize| c.is_visual_hidden(*v) == Some(false);
            let forward = || (visual..count).find(visible);
            let backward = || (0..=visual).rev().find(visible);

            match direction {
                SearchDirection::Forward => {
                    forward().or_else(|| if search_other_way { backward() } else { None })
                }
                SearchDirection::Backward => {
                    backward().or_else(|| if search_other_way { forward() } else { None })
                }
            }
        })
    }

    /// Force recomputation and report a failed one.
    pub fn settle(&self) -> Result<()> {
        self.ensure_settled();
        let failed = matches!(*self.cache.borrow(), Some(CacheState::Failed));
        if failed {
            // Layer state is unchanged since the failure, so rebuilding
            // reproduces the same error.
            self.build().map(|_| ())
        } else {
            Ok(())
        }
    }

    /// Register a listener fired once per recomputation.
    pub fn on_change(&mut self, listener: impl FnMut(&IndexMapperChange) + 'static) {
        self.listeners.get_mut().push(Box::new(listener));
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn invalidate(&mut self) {
        *self.cache.get_mut() = None;
    }

    fn with_cache<R>(&self, f: impl FnOnce(&IndexCache) -> R) -> R {
        self.ensure_settled();
        let cache = self.cache.borrow();
        match &*cache {
            Some(CacheState::Settled(settled)) => f(settled),
            _ => f(&IndexCache::default()),
        }
    }

    fn ensure_settled(&self) {
        if self.cache.borrow().is_some() {
            return;
        }

        let (state, renderable) = match self.build() {
            Ok(settled) => {
                let renderable = settled.count_renderable();
                debug!(
                    axis = %self.axis,
                    physical = self.length,
                    visual = settled.count_visual(),
                    renderable,
                    "index map recomputed"
                );
                (CacheState::Settled(settled), renderable)
            }
            Err(e) => {
                error!(axis = %self.axis, error = %e, "index map recomputation failed");
                (CacheState::Failed, 0)
            }
        };
        *self.cache.borrow_mut() = Some(state);

        let change = IndexMapperChange {
            axis: self.axis,
            old_renderable: self.last_renderable.replace(renderable),
            new_renderable: renderable,
        };
        if let Ok(mut listeners) = self.listeners.try_borrow_mut() {
            for listener in listeners.iter_mut() {
                listener(&change);
            }
        }
    }

    fn build(&self) -> Result<IndexCache> {
        let sequence = self.ordered_sequence(true)?;
        let trimmed = self.combined_flags(LayerKind::Trimming)?;
        let hidden = self.combined_flags(LayerKind::Hiding)?;
        Ok(IndexCache::build(&sequence, trimmed, hidden))
    }

    /// Physical indexes after every ordering layer (and optionally the moves).
    fn ordered_sequence(&self, include_moves: bool) -> Result<Vec<usize>> {
        let mut sequence: Vec<usize> = (0..self.length).collect();
        let moves = include_moves.then_some(&self.moves);
        for layer in self
            .layers
            .iter()
            .filter(|l| l.kind == LayerKind::Ordering)
            .chain(moves)
        {
            sequence = apply_ordering(&sequence, layer, self.axis)?;
        }
        Ok(sequence)
    }

    fn combined_flags(&self, kind: LayerKind) -> Result<Vec<bool>> {
        let mut combined = vec![false; self.length];
        for layer in self.layers.iter().filter(|l| l.kind == kind) {
            let LayerValues::Flags(flags) = &layer.values else {
                continue;
            };
            if flags.len() != self.length {
                return Err(GridError::LayerLength {
                    axis: self.axis,
                    name: layer.name.clone(),
                    expected: self.length,
                    actual: flags.len(),
                });
            }
            for (slot, &flag) in combined.iter_mut().zip(flags) {
                *slot |= flag;
            }
        }
        Ok(combined)
    }

    fn layer_position(&self, name: &str) -> Result<usize> {
        self.layers
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| self.unknown_layer(name))
    }

    fn unknown_layer(&self, name: &str) -> GridError {
        GridError::UnknownLayer {
            axis: self.axis,
            name: name.to_string(),
        }
    }

    fn ensure_unregistered(&self, name: &str) -> Result<()> {
        if self.has_layer(name) || name == MOVES_LAYER {
            return Err(GridError::LayerExists {
                axis: self.axis,
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn check_values(&self, name: &str, kind: LayerKind, values: &LayerValues) -> Result<()> {
        if !values.fits(kind) {
            return Err(GridError::LayerKind {
                axis: self.axis,
                name: name.to_string(),
                kind: kind.as_str(),
            });
        }
        if values.len() != self.length {
            return Err(GridError::LayerLength {
                axis: self.axis,
                name: name.to_string(),
                expected: self.length,
                actual: values.len(),
            });
        }
        Ok(())
    }
}

/// Permute `sequence` by an ordering layer, bounds-checking every position.
fn apply_ordering(sequence: &[usize], layer: &IndexLayer, axis: Axis) -> Result<Vec<usize>> {
    let LayerValues::Sequence(positions) = &layer.values else {
        return Ok(sequence.to_vec());
    };
    if positions.len() != sequence.len() {
        return Err(GridError::LayerLength {
            axis,
            name: layer.name.clone(),
            expected: sequence.len(),
            actual: positions.len(),
        });
    }
    positions
        .iter()
        .map(|&position| {
            sequence
                .get(position)
                .copied()
                .ok_or_else(|| GridError::LayerOutOfBounds {
                    axis,
                    name: layer.name.clone(),
                    position,
                    len: sequence.len(),
                })
        })
        .collect()
}

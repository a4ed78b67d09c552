//! Grid state: both axis mappers, the settings, the current selection and
//! the hooks fired around selection movement.
//!
//! `Grid` is the collaborator the selection transformer reads from (it
//! implements [`TransformationOptions`]) and the owner that acts on what the
//! transformer reports: it fulfils growth requests and stores the result.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::focus::{most_bottom_end_position, most_top_start_position};
use crate::index_mapper::IndexMapper;
use crate::layout::AxisLayout;
use crate::selection::{
    most_bottom_in_column, most_end_in_row, most_start_in_row, most_top_in_column,
    ClampDirection, GrowthRequest, Transformation, TransformationOptions, Transformed,
};
use crate::types::{to_signed, Axis, CellCoords, GridSettings, GridSize, SelectionRange};
use crate::viewer::{JumpTarget, NavAction};

/// Notification fired by [`Grid`] while the selection moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GridEvent {
    #[serde(rename_all = "camelCase")]
    BeforeTransformStart { delta: CellCoords },
    #[serde(rename_all = "camelCase")]
    AfterTransformStart {
        coords: CellCoords,
        row_dir: ClampDirection,
        col_dir: ClampDirection,
    },
    #[serde(rename_all = "camelCase")]
    BeforeTransformEnd { delta: CellCoords },
    #[serde(rename_all = "camelCase")]
    AfterTransformEnd {
        coords: CellCoords,
        row_dir: ClampDirection,
        col_dir: ClampDirection,
    },
    /// A row was appended at renderable index `at` to let the move continue
    InsertRowRequire { at: usize },
    /// A column was appended at renderable index `at` to let the move continue
    InsertColRequire { at: usize },
    /// Column overflow met the row-wrap rule
    RowWrap {
        enabled: bool,
        flipped: bool,
        coords: CellCoords,
    },
}

type Hook = Box<dyn FnMut(&GridEvent)>;

/// Listeners local to one grid, run in registration order.
#[derive(Default)]
pub struct LocalHooks {
    hooks: Vec<Hook>,
}

impl fmt::Debug for LocalHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalHooks")
            .field("count", &self.hooks.len())
            .finish()
    }
}

impl LocalHooks {
    pub fn add(&mut self, hook: impl FnMut(&GridEvent) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn run(&mut self, event: &GridEvent) {
        for hook in &mut self.hooks {
            hook(event);
        }
    }

    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

/// A grid of `rows` × `cols` physical cells with its selection.
#[derive(Debug)]
pub struct Grid {
    settings: GridSettings,
    rows: IndexMapper,
    columns: IndexMapper,
    selection: Option<SelectionRange>,
    hooks: LocalHooks,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, settings: GridSettings) -> Self {
        Self {
            settings,
            rows: IndexMapper::new(Axis::Row, rows),
            columns: IndexMapper::new(Axis::Column, cols),
            selection: None,
            hooks: LocalHooks::default(),
        }
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: GridSettings) {
        self.settings = settings;
    }

    pub fn row_mapper(&self) -> &IndexMapper {
        &self.rows
    }

    pub fn row_mapper_mut(&mut self) -> &mut IndexMapper {
        &mut self.rows
    }

    pub fn column_mapper(&self) -> &IndexMapper {
        &self.columns
    }

    pub fn column_mapper_mut(&mut self) -> &mut IndexMapper {
        &mut self.columns
    }

    pub fn hooks_mut(&mut self) -> &mut LocalHooks {
        &mut self.hooks
    }

    /// Shorthand for `hooks_mut().add(..)`.
    pub fn add_hook(&mut self, hook: impl FnMut(&GridEvent) + 'static) {
        self.hooks.add(hook);
    }

    /// Visual extent plus configured header counts.
    pub fn size(&self) -> GridSize {
        GridSize {
            count_rows: self.rows.count_visual(),
            count_cols: self.columns.count_visual(),
            count_row_headers: self.settings.row_headers,
            count_col_headers: self.settings.col_headers,
        }
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Insert `amount` physical rows before `physical` (append with `count_physical()`).
    pub fn insert_rows(&mut self, physical: usize, amount: usize) {
        self.rows.insert_indexes(physical, amount);
    }

    pub fn insert_columns(&mut self, physical: usize, amount: usize) {
        self.columns.insert_indexes(physical, amount);
    }

    /// Prefix-sum layout over the renderable rows, with the top fixed rows frozen.
    pub fn row_layout(&self) -> AxisLayout {
        let height = self.settings.default_row_height;
        AxisLayout::from_index_mapper(&self.rows, self.settings.fixed_rows_top, |_| height)
    }

    /// Prefix-sum layout over the renderable columns, with the start fixed columns frozen.
    pub fn column_layout(&self) -> AxisLayout {
        let width = self.settings.default_col_width;
        AxisLayout::from_index_mapper(&self.columns, self.settings.fixed_columns_start, |_| width)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_range(&self) -> Option<SelectionRange> {
        self.selection
    }

    pub fn is_selected(&self) -> bool {
        self.selection.is_some()
    }

    /// Select a single cell or header. Returns `false` (selection unchanged)
    /// when the coordinates are outside the grid.
    ///
    /// Headers are only selectable while they are navigable; otherwise a
    /// header axis lands on the first renderable data row/column.
    pub fn select_cell(&mut self, coords: CellCoords) -> bool {
        let Some(coords) = self.selectable(coords) else {
            return false;
        };
        self.selection = Some(SelectionRange::single(coords));
        true
    }

    /// Select `from`..`to` with the highlight on `from`.
    pub fn select_range(&mut self, from: CellCoords, to: CellCoords) -> bool {
        let (Some(from), Some(to)) = (self.selectable(from), self.selectable(to)) else {
            return false;
        };
        self.selection = Some(SelectionRange::spanning(from, to));
        true
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Move the highlight, collapsing the range onto it.
    ///
    /// Growth requests are fulfilled by appending one index to the axis and
    /// replaying the move; each axis grows at most once per call. Returns
    /// `None` when nothing is selected.
    pub fn transform_start(
        &mut self,
        row_delta: isize,
        col_delta: isize,
        create_missing: bool,
    ) -> Option<Transformed> {
        let range = self.selection?;
        self.hooks.run(&GridEvent::BeforeTransformStart {
            delta: CellCoords::new(row_delta, col_delta),
        });

        let mut result = Transformation::new(&range, &*self).transform_start(row_delta, col_delta, create_missing);
        let mut fulfilled: Option<GrowthRequest> = None;
        let (mut grown_rows, mut grown_cols) = (false, false);
        while let Some(growth) = result.growth {
            let grown = match growth {
                GrowthRequest::Rows { .. } => &mut grown_rows,
                GrowthRequest::Columns { .. } => &mut grown_cols,
            };
            if *grown {
                break;
            }
            *grown = true;
            self.grow(growth);
            fulfilled = fulfilled.or(Some(growth));
            result = Transformation::new(&range, &*self).transform_start(row_delta, col_delta, create_missing);
        }
        result.growth = fulfilled;

        if let Some(wrap) = result.row_wrap {
            self.hooks.run(&GridEvent::RowWrap {
                enabled: wrap.enabled,
                flipped: wrap.flipped,
                coords: result.coords,
            });
        }
        self.selection = Some(SelectionRange::single(result.coords));
        self.hooks.run(&GridEvent::AfterTransformStart {
            coords: result.coords,
            row_dir: result.row_dir,
            col_dir: result.col_dir,
        });
        Some(result)
    }

    /// Move the range end, keeping `from`.
    pub fn transform_end(&mut self, row_delta: isize, col_delta: isize) -> Option<Transformed> {
        let mut range = self.selection?;
        self.hooks.run(&GridEvent::BeforeTransformEnd {
            delta: CellCoords::new(row_delta, col_delta),
        });

        let result = Transformation::new(&range, &*self).transform_end(row_delta, col_delta);
        range.set_to(result.coords);
        self.selection = Some(range);
        self.hooks.run(&GridEvent::AfterTransformEnd {
            coords: result.coords,
            row_dir: result.row_dir,
            col_dir: result.col_dir,
        });
        Some(result)
    }

    /// Run a navigation action against the current selection.
    pub fn apply(&mut self, action: NavAction) -> Option<Transformed> {
        match action {
            NavAction::Move {
                rows,
                cols,
                create_missing,
            } => self.transform_start(rows, cols, create_missing),
            NavAction::Extend { rows, cols } => self.transform_end(rows, cols),
            NavAction::Jump { target, extend } => self.jump(target, extend),
        }
    }

    fn jump(&mut self, target: JumpTarget, extend: bool) -> Option<Transformed> {
        let mut range = self.selection?;
        let base = if extend { range.to } else { range.highlight };
        let coords = match target {
            JumpTarget::RowStart => most_start_in_row(&*self, base),
            JumpTarget::RowEnd => most_end_in_row(&*self, base),
            JumpTarget::ColumnTop => most_top_in_column(&*self, base),
            JumpTarget::ColumnBottom => most_bottom_in_column(&*self, base),
            JumpTarget::TableStart => most_top_start_position(&*self).unwrap_or(base),
            JumpTarget::TableEnd => most_bottom_end_position(&*self).unwrap_or(base),
        };
        trace!(?target, extend, ?coords, "jump");

        if extend {
            range.set_to(coords);
        } else {
            range = SelectionRange::single(coords);
        }
        self.selection = Some(range);
        Some(Transformed::unchanged(coords))
    }

    fn selectable(&self, coords: CellCoords) -> Option<CellCoords> {
        if !coords.is_valid(&self.size()) {
            return None;
        }
        if self.settings.navigable_headers {
            return Some(coords);
        }
        let row = if coords.row < 0 {
            self.renderable_to_visual_row(0)?
        } else {
            coords.row
        };
        let col = if coords.col < 0 {
            self.renderable_to_visual_column(0)?
        } else {
            coords.col
        };
        Some(CellCoords::new(row, col))
    }

    fn grow(&mut self, growth: GrowthRequest) {
        match growth {
            GrowthRequest::Rows { at } => {
                let physical = self.rows.count_physical();
                self.rows.insert_indexes(physical, 1);
                debug!(at, physical, "appended row for selection growth");
                self.hooks.run(&GridEvent::InsertRowRequire { at });
            }
            GrowthRequest::Columns { at } => {
                let physical = self.columns.count_physical();
                self.columns.insert_indexes(physical, 1);
                debug!(at, physical, "appended column for selection growth");
                self.hooks.run(&GridEvent::InsertColRequire { at });
            }
        }
    }
}

/// Negative (header) indexes pass through; data indexes go through `convert`.
fn map_index(index: isize, convert: impl FnOnce(usize) -> Option<usize>) -> Option<isize> {
    if index < 0 {
        return Some(index);
    }
    usize::try_from(index).ok().and_then(convert).map(to_signed)
}

impl TransformationOptions for Grid {
    fn count_renderable_rows(&self) -> usize {
        self.rows.count_renderable()
    }

    fn count_renderable_columns(&self) -> usize {
        self.columns.count_renderable()
    }

    fn count_row_headers(&self) -> usize {
        self.settings.row_headers
    }

    fn count_col_headers(&self) -> usize {
        self.settings.col_headers
    }

    fn navigable_headers(&self) -> bool {
        self.settings.navigable_headers
    }

    fn auto_wrap_row(&self) -> bool {
        self.settings.auto_wrap_row
    }

    fn auto_wrap_col(&self) -> bool {
        self.settings.auto_wrap_col
    }

    fn fixed_rows_bottom(&self) -> usize {
        self.settings.fixed_rows_bottom
    }

    fn min_spare_rows(&self) -> usize {
        self.settings.min_spare_rows
    }

    fn min_spare_cols(&self) -> usize {
        self.settings.min_spare_cols
    }

    fn visual_to_renderable_row(&self, row: isize) -> Option<isize> {
        map_index(row, |visual| self.rows.visual_to_renderable(visual))
    }

    fn visual_to_renderable_column(&self, col: isize) -> Option<isize> {
        map_index(col, |visual| self.columns.visual_to_renderable(visual))
    }

    fn renderable_to_visual_row(&self, row: isize) -> Option<isize> {
        map_index(row, |renderable| self.rows.renderable_to_visual(renderable))
    }

    fn renderable_to_visual_column(&self, col: isize) -> Option<isize> {
        map_index(col, |renderable| self.columns.renderable_to_visual(renderable))
    }
}

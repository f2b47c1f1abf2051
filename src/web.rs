//! Browser surface: `WasmGrid` exported to JavaScript.
//!
//! Cell content and swap notifications go through JS functions. Swap
//! completions are driven by `window.setTimeout`, one animation length after
//! submission, and JS callbacks always run after the shared state borrow is
//! released so they may call back into the grid.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::grid::{GridView, PointerPhase, PointerResponse, VisibleCell};
use crate::host::GridHost;
use crate::reorder::MoveOutcome;
use crate::types::{CellRole, GridConfig, GridCoordinate, Point, Size, StorageCoordinate};

/// Host backed by JS callbacks.
///
/// `cell_provider(role, row, column)` returns the content descriptor of one
/// cell; `row` or `column` is `-1` where the role has none.
struct JsHost {
    config: GridConfig,
    rows: u32,
    columns: u32,
    cell_provider: Option<Function>,
    /// Committed swaps waiting to be reported to JS
    committed: Vec<(u32, u32)>,
}

impl JsHost {
    fn fetch(&self, role: CellRole, row: Option<u32>, column: Option<u32>) -> Option<JsValue> {
        let provider = self.cell_provider.as_ref()?;
        let index = |i: Option<u32>| i.map_or(JsValue::from(-1), JsValue::from);
        let role = serde_wasm_bindgen::to_value(&role).ok()?;
        let value = provider
            .call3(&JsValue::NULL, &role, &index(row), &index(column))
            .ok()?;
        if value.is_undefined() || value.is_null() {
            None
        } else {
            Some(value)
        }
    }
}

impl GridHost for JsHost {
    type Cell = JsValue;

    fn number_of_rows(&self) -> u32 {
        self.rows
    }

    fn number_of_columns(&self) -> u32 {
        self.columns
    }

    fn includes_header_row(&self) -> bool {
        self.config.includes_header_row
    }

    fn includes_header_column(&self) -> bool {
        self.config.includes_header_column
    }

    fn size_for_cell(&self, _coordinate: GridCoordinate) -> Size {
        self.config.item_size
    }

    fn row_header_width(&self) -> f32 {
        self.config.row_header_width
    }

    fn column_header_height(&self) -> f32 {
        self.config.column_header_height
    }

    fn corner_cell(&self) -> Option<JsValue> {
        self.fetch(CellRole::Corner, None, None)
    }

    fn row_header_cell(&self, row: u32) -> Option<JsValue> {
        self.fetch(CellRole::RowHeader, Some(row), None)
    }

    fn column_header_cell(&self, column: u32) -> Option<JsValue> {
        self.fetch(CellRole::ColumnHeader, None, Some(column))
    }

    fn cell(&self, coordinate: GridCoordinate) -> Option<JsValue> {
        self.fetch(
            CellRole::Regular,
            Some(coordinate.row),
            Some(coordinate.column),
        )
    }

    fn on_columns_swapped(&mut self, source: u32, destination: u32) {
        self.committed.push((source, destination));
    }
}

struct SharedGrid {
    grid: GridView<JsHost>,
    swap_callback: Option<Function>,
    render_callback: Option<Function>,
    swap_timer: Option<i32>,
    swap_closure: Option<Closure<dyn FnMut()>>,
}

/// Grid exported to JavaScript
#[wasm_bindgen]
pub struct WasmGrid {
    state: Rc<RefCell<SharedGrid>>,
}

#[wasm_bindgen]
impl WasmGrid {
    /// Create a grid of `rows` x `columns` content cells.
    ///
    /// # Errors
    /// Returns an error if `config_json` is not a valid grid config.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, rows: u32, columns: u32) -> Result<WasmGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config = if config_json.trim().is_empty() {
            GridConfig::default()
        } else {
            GridConfig::from_json(config_json)?
        };
        let host = JsHost {
            config: config.clone(),
            rows,
            columns,
            cell_provider: None,
            committed: Vec::new(),
        };
        let mut grid = GridView::with_config(host, config);
        grid.reload();

        Ok(WasmGrid {
            state: Rc::new(RefCell::new(SharedGrid {
                grid,
                swap_callback: None,
                render_callback: None,
                swap_timer: None,
                swap_closure: None,
            })),
        })
    }

    /// `(role, row, column) => descriptor`, called for every cell on demand
    pub fn set_cell_provider(&mut self, provider: Option<Function>) {
        self.state.borrow_mut().grid.host_mut().cell_provider = provider;
    }

    /// `(source, destination) => void`, called once per committed column swap
    pub fn set_swap_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().swap_callback = callback;
    }

    /// `() => void`, called whenever visible geometry or content changed
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Change the content dimensions and rebuild the layout.
    pub fn set_dimensions(&mut self, rows: u32, columns: u32) {
        let callback = {
            let mut s = self.state.borrow_mut();
            let host = s.grid.host_mut();
            host.rows = rows;
            host.columns = columns;
            s.grid.reload();
            s.render_callback.clone()
        };
        invoke(callback.as_ref(), &[]);
    }

    pub fn reload(&mut self) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.grid.reload();
            s.render_callback.clone()
        };
        invoke(callback.as_ref(), &[]);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.grid.resize(width, height);
            s.render_callback.clone()
        };
        invoke(callback.as_ref(), &[]);
    }

    pub fn set_content_offset(&mut self, x: f32, y: f32) {
        let callback = {
            let mut s = self.state.borrow_mut();
            s.grid.set_content_offset(Point::new(x, y));
            s.render_callback.clone()
        };
        invoke(callback.as_ref(), &[]);
    }

    pub fn content_width(&self) -> f32 {
        self.state.borrow().grid.content_size().width
    }

    pub fn content_height(&self) -> f32 {
        self.state.borrow().grid.content_size().height
    }

    /// Long press began at viewport coordinates `(x, y)`. Returns whether a drag started.
    pub fn pointer_began(&mut self, x: f32, y: f32) -> bool {
        Self::pointer(&self.state, PointerPhase::Began, x, y) == PointerResponse::DragStarted
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        Self::pointer(&self.state, PointerPhase::Changed, x, y);
    }

    pub fn pointer_ended(&mut self, x: f32, y: f32) {
        Self::pointer(&self.state, PointerPhase::Ended, x, y);
    }

    pub fn pointer_cancelled(&mut self) {
        Self::pointer(&self.state, PointerPhase::Cancelled, 0.0, 0.0);
    }

    /// Cells intersecting the viewport, row-major.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn visible_cells(&self) -> Result<JsValue, JsValue> {
        let cells: Vec<VisibleCell> = self.state.borrow().grid.visible_cells();
        serde_wasm_bindgen::to_value(&cells)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Content descriptor for a storage cell, as currently displayed
    pub fn cell_content(&self, row: u32, column: u32) -> JsValue {
        self.state
            .borrow()
            .grid
            .cell_content(StorageCoordinate::new(row, column))
            .unwrap_or(JsValue::UNDEFINED)
    }

    /// Drag ghost frame and opacity, or `undefined` when idle.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn ghost(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        let Some(ghost) = s.grid.ghost() else {
            return Ok(JsValue::UNDEFINED);
        };
        serde_wasm_bindgen::to_value(&(ghost.frame, ghost.alpha))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }
}

impl WasmGrid {
    fn pointer(
        state: &Rc<RefCell<SharedGrid>>,
        phase: PointerPhase,
        x: f32,
        y: f32,
    ) -> PointerResponse {
        let (response, callback) = {
            let mut s = state.borrow_mut();
            let point = s.grid.viewport().to_content(x, y);
            let response = s.grid.handle_pointer(phase, point);
            let callback = match response {
                PointerResponse::Ignored => None,
                _ => s.render_callback.clone(),
            };
            (response, callback)
        };
        if let PointerResponse::Moved(MoveOutcome::Submitted(_)) = response {
            Self::schedule_swap_completion(state);
        }
        invoke(callback.as_ref(), &[]);
        response
    }

    fn schedule_swap_completion(state: &Rc<RefCell<SharedGrid>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if s.swap_timer.is_some() {
            // The running timer reschedules itself while swaps are pending
            return;
        }
        if s.swap_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    WasmGrid::handle_swap_timeout(&state);
                }
            }) as Box<dyn FnMut()>);
            s.swap_closure = Some(closure);
        }
        let delay = i32::try_from(s.grid.config().swap_animation_ms).unwrap_or(i32::MAX);
        let Some(callback) = s.swap_closure.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(id) => s.swap_timer = Some(id),
            Err(_) => s.swap_timer = None,
        }
    }

    fn handle_swap_timeout(state: &Rc<RefCell<SharedGrid>>) {
        let (committed, swap_callback, render_callback, more) = {
            let mut s = state.borrow_mut();
            s.swap_timer = None;
            s.grid.complete_next_swap();
            let committed = std::mem::take(&mut s.grid.host_mut().committed);
            (
                committed,
                s.swap_callback.clone(),
                s.render_callback.clone(),
                s.grid.pending_swaps() > 0,
            )
        };
        for (source, destination) in committed {
            invoke(
                swap_callback.as_ref(),
                &[JsValue::from(source), JsValue::from(destination)],
            );
        }
        if more {
            Self::schedule_swap_completion(state);
        }
        invoke(render_callback.as_ref(), &[]);
    }
}

fn invoke(callback: Option<&Function>, args: &[JsValue]) {
    let Some(callback) = callback else {
        return;
    };
    let result = match args {
        [] => callback.call0(&JsValue::NULL),
        [a] => callback.call1(&JsValue::NULL, a),
        [a, b, ..] => callback.call2(&JsValue::NULL, a, b),
    };
    if let Err(e) = result {
        tracing::warn!(error = ?e, "web.callback_failed");
    }
}

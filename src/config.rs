//! Grid options that change how rows render.

/// Row selection mode for click-to-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowSelection {
    /// Clicking a row never changes selection.
    #[default]
    None,
    Single,
    Multiple,
}

/// Options shared by every row controller in a grid.
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Position rows with `top` instead of a `translateY` transform.
    pub suppress_row_transform: bool,
    /// Print layout: everything renders into the center segment, rows are
    /// laid out by normal flow and work is never deferred.
    pub print_layout: bool,
    /// Run deferred row work synchronously instead of batching per frame.
    pub suppress_animation_frame: bool,
    /// Keep cell elements in column order after every structural change.
    pub ensure_dom_order: bool,
    /// Render full-width rows inside the pinned and center containers
    /// instead of the dedicated full-width container.
    pub embed_full_width_rows: bool,
    /// Render group rows with a single full-width renderer.
    pub group_use_entire_row: bool,
    pub master_detail: bool,
    /// Size detail rows to their rendered content.
    pub detail_row_auto_height: bool,
    /// Park detail renderers when their row is destroyed so re-expanding
    /// restores them.
    pub keep_detail_rows: bool,
    pub keep_detail_rows_count: usize,
    pub row_selection: RowSelection,
    pub suppress_row_click_selection: bool,
    /// Allow ctrl/meta-click to deselect a selected row.
    pub row_deselection: bool,
    /// Header rows counted before the first data row in `aria-rowindex`.
    pub header_row_count: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            suppress_row_transform: false,
            print_layout: false,
            suppress_animation_frame: false,
            ensure_dom_order: false,
            embed_full_width_rows: false,
            group_use_entire_row: false,
            master_detail: false,
            detail_row_auto_height: false,
            keep_detail_rows: false,
            keep_detail_rows_count: 10,
            row_selection: RowSelection::None,
            suppress_row_click_selection: false,
            row_deselection: false,
            header_row_count: 1,
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suppress_row_transform(mut self, on: bool) -> Self {
        self.suppress_row_transform = on;
        self
    }

    pub fn with_print_layout(mut self, on: bool) -> Self {
        self.print_layout = on;
        self
    }

    pub fn with_suppress_animation_frame(mut self, on: bool) -> Self {
        self.suppress_animation_frame = on;
        self
    }

    pub fn with_ensure_dom_order(mut self, on: bool) -> Self {
        self.ensure_dom_order = on;
        self
    }

    pub fn with_embed_full_width_rows(mut self, on: bool) -> Self {
        self.embed_full_width_rows = on;
        self
    }

    pub fn with_group_use_entire_row(mut self, on: bool) -> Self {
        self.group_use_entire_row = on;
        self
    }

    pub fn with_master_detail(mut self, on: bool) -> Self {
        self.master_detail = on;
        self
    }

    pub fn with_detail_row_auto_height(mut self, on: bool) -> Self {
        self.detail_row_auto_height = on;
        self
    }

    /// Keep up to `count` detail renderers across collapse/expand.
    pub fn with_keep_detail_rows(mut self, count: usize) -> Self {
        self.keep_detail_rows = true;
        self.keep_detail_rows_count = count;
        self
    }

    pub fn with_row_selection(mut self, mode: RowSelection) -> Self {
        self.row_selection = mode;
        self
    }

    pub fn with_suppress_row_click_selection(mut self, on: bool) -> Self {
        self.suppress_row_click_selection = on;
        self
    }

    pub fn with_row_deselection(mut self, on: bool) -> Self {
        self.row_deselection = on;
        self
    }

    pub fn with_header_row_count(mut self, count: usize) -> Self {
        self.header_row_count = count;
        self
    }

    /// Whether row work should go through the frame queue at all.
    pub fn defers_row_work(&self) -> bool {
        !self.print_layout && !self.suppress_animation_frame
    }
}

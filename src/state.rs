use std::collections::BTreeSet;

use bubblescope::chart::ChartSpec;
use bubblescope::color::ColorMap;
use bubblescope::config::ChartConfig;
use bubblescope::data::filter::{category_options, FilterSelection, PriceRange};
use bubblescope::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until user opens a file).
    pub table: Option<Table>,

    pub config: ChartConfig,

    /// Current widget values, passed explicitly to the pipeline.
    pub selection: FilterSelection,

    /// Categories offered by the multi-select.
    pub category_options: Vec<String>,

    /// Slider limits for the price range.
    pub price_limits: Option<PriceRange>,

    /// Category swatches for the side panel.
    pub color_map: ColorMap,

    /// Chart for the current table and selection (cached).
    pub chart: Option<ChartSpec>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            table: None,
            config,
            selection: FilterSelection::default(),
            category_options: Vec::new(),
            price_limits: None,
            color_map: ColorMap::default(),
            chart: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded table, initialise filters and chart.
    pub fn set_table(&mut self, table: Table) {
        self.category_options = category_options(table.main_rows());
        self.color_map = ColorMap::new(&self.category_options);
        self.selection = FilterSelection::defaults(&table);
        self.price_limits = self.selection.price;

        self.table = Some(table);
        self.status_message = None;
        self.rebuild();
    }

    /// Recompute the chart after a filter change.
    pub fn rebuild(&mut self) {
        if let Some(table) = &self.table {
            self.chart = Some(bubblescope::render(table, &self.selection, &self.config));
        }
    }

    pub fn visible_count(&self) -> usize {
        self.chart.as_ref().map_or(0, |c| c.bubble_count())
    }

    pub fn is_category_selected(&self, category: &str) -> bool {
        self.selection
            .categories
            .as_ref()
            .is_some_and(|set| set.contains(category))
    }

    /// Toggle a single category in the multi-select.
    pub fn toggle_category(&mut self, category: &str) {
        let selected = self.selection.categories.get_or_insert_with(BTreeSet::new);
        if !selected.remove(category) {
            selected.insert(category.to_string());
        }
        self.on_categories_changed();
    }

    /// Select all categories.
    pub fn select_all(&mut self) {
        self.selection.categories = Some(self.category_options.iter().cloned().collect());
        self.on_categories_changed();
    }

    /// Deselect all categories (the category filter is then inactive).
    pub fn select_none(&mut self) {
        self.selection.categories = Some(BTreeSet::new());
        self.on_categories_changed();
    }

    /// Set the price interval from the slider pair, keeping `min <= max`.
    pub fn set_price(&mut self, min: f64, max: f64) {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.selection.price = Some(PriceRange::new(min, max));
        self.rebuild();
    }

    /// The slider span follows the category choice and resets to its full width.
    fn on_categories_changed(&mut self) {
        if let Some(table) = &self.table {
            self.price_limits = self.selection.price_bounds(table);
            self.selection.price = self.price_limits;
        }
        self.rebuild();
    }
}

use log::info;

use crate::analysis::{analyze, AnalysisResult};
use crate::data::filter::{
    filtered_indices, predicate_indices, FilterError, FilterMode, FilterState,
};
use crate::data::model::{DataPoint, Dimension, GeoDataset};
use crate::query::{parse, Predicate};

// ---------------------------------------------------------------------------
// Explorer state
// ---------------------------------------------------------------------------

/// Caller-visible record of the last submitted free-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTrace {
    pub text: String,
    pub result_count: usize,
}

/// The full explorer state, independent of rendering.
///
/// The UI layer owns one of these and calls a mutator per interaction; every
/// mutator recomputes the cached visible set. Checkbox selections and
/// free-text queries are mutually exclusive working sets — whichever path
/// was used last ([`FilterMode`]) owns `visible_indices`.
pub struct ExplorerState {
    /// Loaded dataset (None until the caller supplies one).
    pub dataset: Option<GeoDataset>,

    /// Structured (checkbox/slider) selections.
    pub filters: FilterState,

    /// Which filter path produced the current visible set.
    pub mode: FilterMode,

    /// Predicate from the last query; Identity until a query runs.
    pub predicate: Predicate,

    /// Indices of points passing the active filter path (cached).
    pub visible_indices: Vec<usize>,

    /// Last query text and how many points it matched.
    pub last_query: Option<QueryTrace>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            mode: FilterMode::Structured,
            predicate: Predicate::Identity,
            visible_indices: Vec::new(),
            last_query: None,
            status_message: None,
        }
    }
}

impl ExplorerState {
    /// Ingest a dataset, resetting filters and showing everything.
    pub fn set_dataset(&mut self, dataset: GeoDataset) {
        self.filters = FilterState::default();
        self.mode = FilterMode::Structured;
        self.predicate = Predicate::Identity;
        self.visible_indices = (0..dataset.len()).collect();
        self.last_query = None;
        self.status_message = None;
        self.dataset = Some(dataset);
    }

    /// Recompute `visible_indices` for the active filter path.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            self.visible_indices.clear();
            return;
        };
        self.visible_indices = match self.mode {
            FilterMode::Structured => filtered_indices(&ds.points, &self.filters),
            FilterMode::TextQuery => predicate_indices(&ds.points, &self.predicate),
        };
    }

    /// Toggle a checkbox value on one categorical axis.
    pub fn toggle_selection(&mut self, dimension: Dimension, value: &str) {
        let selected = self.filters.selection_mut(dimension);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.use_structured();
    }

    /// Update the free-text search term (structured path).
    pub fn set_search_term(&mut self, term: &str) {
        self.filters.search_term = term.to_string();
        self.use_structured();
    }

    /// Update the inclusive value range; an inverted pair is rejected and
    /// surfaced via `status_message`.
    pub fn set_value_range(&mut self, min: f64, max: f64) -> Result<(), FilterError> {
        match self.filters.set_value_range(min, max) {
            Ok(()) => {
                self.use_structured();
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Reset every structured selection.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.use_structured();
    }

    /// Interpret a free-text query and make its predicate the working set.
    ///
    /// Fail-open: a query no rule understands becomes Identity and shows
    /// the full dataset. Records a [`QueryTrace`] for display.
    pub fn run_query(&mut self, text: &str) {
        let known = self
            .dataset
            .as_ref()
            .map(|ds| ds.known_countries_lowercase())
            .unwrap_or_default();

        self.predicate = parse(text, &known);
        self.mode = FilterMode::TextQuery;
        self.refilter();

        let trace = QueryTrace {
            text: text.to_string(),
            result_count: self.visible_indices.len(),
        };
        info!("query {:?} matched {} points", trace.text, trace.result_count);
        self.last_query = Some(trace);
    }

    /// Drop the query predicate and return to the structured path.
    pub fn clear_query(&mut self) {
        self.predicate = Predicate::Identity;
        self.last_query = None;
        self.use_structured();
    }

    /// Points passing the active filter path, in dataset order.
    pub fn visible_points(&self) -> impl Iterator<Item = &DataPoint> {
        let points = self.dataset.as_ref().map(|ds| ds.points.as_slice()).unwrap_or(&[]);
        self.visible_indices.iter().map(move |&i| &points[i])
    }

    /// Summary statistics over the visible points.
    pub fn analysis(&self) -> AnalysisResult {
        analyze(self.visible_points())
    }

    fn use_structured(&mut self) {
        self.mode = FilterMode::Structured;
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sample::sample_points;

    fn loaded() -> ExplorerState {
        let mut state = ExplorerState::default();
        state.set_dataset(GeoDataset::from_points(sample_points()));
        state
    }

    #[test]
    fn fresh_dataset_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices.len(), 15);
        assert_eq!(state.mode, FilterMode::Structured);
    }

    #[test]
    fn query_replaces_the_structured_working_set() {
        let mut state = loaded();
        state.toggle_selection(Dimension::Climate, "Tropical");
        assert_eq!(state.visible_indices.len(), 4);

        state.run_query("Find all data in Europe");
        assert_eq!(state.mode, FilterMode::TextQuery);
        // The climate checkbox no longer constrains the working set.
        assert_eq!(state.visible_indices.len(), 5);
    }

    #[test]
    fn checkbox_replaces_the_query_working_set() {
        let mut state = loaded();
        state.run_query("greater than 80");
        assert_eq!(state.visible_indices.len(), 5);

        state.toggle_selection(Dimension::Continent, "Africa");
        assert_eq!(state.mode, FilterMode::Structured);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn query_trace_records_text_and_count() {
        let mut state = loaded();
        state.run_query("show me points greater than 80");
        assert_eq!(
            state.last_query,
            Some(QueryTrace {
                text: "show me points greater than 80".to_string(),
                result_count: 5,
            })
        );
    }

    #[test]
    fn invalid_range_sets_the_status_message() {
        let mut state = loaded();
        assert!(state.set_value_range(90.0, 10.0).is_err());
        assert!(state.status_message.is_some());
        // Working set untouched by the rejected range.
        assert_eq!(state.visible_indices.len(), 15);
    }

    #[test]
    fn clear_query_returns_to_the_structured_path() {
        let mut state = loaded();
        state.toggle_selection(Dimension::Climate, "Arid");
        state.run_query("compare");
        assert_eq!(state.visible_indices.len(), 15);

        state.clear_query();
        assert_eq!(state.mode, FilterMode::Structured);
        // The Arid checkbox selection is still in force.
        assert_eq!(state.visible_indices.len(), 2);
    }

    #[test]
    fn analysis_follows_the_visible_set() {
        let mut state = loaded();
        state.run_query("tropical climates only");
        let analysis = state.analysis();
        assert_eq!(analysis.climate_distribution["Tropical"], 4);
        assert_eq!(analysis.climate_distribution.len(), 1);
    }

    #[test]
    fn no_dataset_means_nothing_visible() {
        let mut state = ExplorerState::default();
        state.run_query("show all");
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.analysis(), AnalysisResult::default());
    }
}

use crate::color::SpeciesColors;
use crate::controls::{ControlChange, ControlState};
use crate::data::model::PenguinDataset;
use crate::reactive::ReactiveGraph;
use crate::views::table::{Column, SortSpec};
use crate::views::{self, ViewId, ViewOutput};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Prepared dataset, fixed for the session.
    pub dataset: PenguinDataset,

    /// Current sidebar values.
    pub controls: ControlState,

    /// Cached view outputs and their dependencies.
    pub graph: ReactiveGraph<ViewOutput>,

    pub colors: SpeciesColors,

    /// Data table sort and page; local to the table card, not a control.
    pub table_sort: Option<SortSpec>,
    pub table_page: usize,
    pub page_size: usize,

    /// Card currently expanded to fill the main area.
    pub fullscreen: Option<ViewId>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Register every view with its declared controls and render them once.
    pub fn new(dataset: PenguinDataset, page_size: usize) -> Self {
        let mut graph = ReactiveGraph::default();
        for view in ViewId::ALL {
            graph.register(view, view.dependencies().iter().copied());
        }
        let mut state = Self {
            dataset,
            controls: ControlState::default(),
            graph,
            colors: SpeciesColors::default(),
            table_sort: None,
            table_page: 0,
            page_size: page_size.max(1),
            fullscreen: None,
            status_message: None,
        };
        state.refresh();
        state
    }

    /// Apply one widget edit, then bring every stale view up to date
    /// before returning.
    pub fn apply(&mut self, change: ControlChange) {
        let control = change.control;
        match self.controls.apply(change) {
            Ok(true) => {
                log::debug!("{control} = {:?}", self.controls.get(control));
                self.graph.invalidate(control);
                self.refresh();
            }
            Ok(false) => {}
            Err(e) => {
                log::error!("rejected control change: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Recompute stale views; returns the views that ran.
    pub fn refresh(&mut self) -> Vec<ViewId> {
        let dataset = &self.dataset;
        let controls = &self.controls;
        self.graph.refresh(|view| {
            let out = views::render(view, dataset, controls);
            match &out {
                Ok(_) => log::debug!("rendered {view:?}"),
                Err(e) => log::error!("{view:?} failed: {e}"),
            }
            out
        })
    }

    pub fn output(&self, view: ViewId) -> Option<&ViewOutput> {
        self.graph.output(view)
    }

    /// Header click on the data table.
    pub fn sort_table(&mut self, column: Column) {
        self.table_sort = SortSpec::cycle(self.table_sort, column);
        self.table_page = 0;
    }

    pub fn set_table_page(&mut self, page: usize) {
        let last = match self.output(ViewId::Table) {
            Some(Ok(views::ViewArtifact::Table(t))) => t.page_count(self.page_size) - 1,
            _ => 0,
        };
        self.table_page = page.min(last);
    }

    pub fn toggle_fullscreen(&mut self, view: ViewId) {
        self.fullscreen = if self.fullscreen == Some(view) {
            None
        } else {
            Some(view)
        };
    }
}

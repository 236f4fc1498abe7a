//! Plot-kind workspace
//!
//! Owns one view per plot kind plus the active kind. Gestures reach the
//! active view only; refreshed data reaches every view without touching
//! its transform or selection. Switching kinds resets the interaction
//! state of the view being activated, matching a fresh mount of that
//! plot.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use rv_core::{GestureEvent, LoadState};
use rv_data::{CohortFilter, PatientRecord, TrackedVariant};

use crate::plot_view::{PlotView, SelectedEntity};
use crate::plots::{BoxPlotView, PlotKind, ScatterPlotView, ViolinPlotView};
use crate::scene::PlotScene;
use crate::stats_panel::{self, StatRow, StatsScope};

/// One view per plot kind, with one of them active.
pub struct PlotWorkspace {
    active: PlotKind,
    views: IndexMap<PlotKind, Box<dyn PlotView>>,
    records: LoadState<Arc<Vec<PatientRecord>>>,
    filter: CohortFilter,
}

impl PlotWorkspace {
    pub fn new() -> Self {
        let mut views: IndexMap<PlotKind, Box<dyn PlotView>> = IndexMap::new();
        for kind in PlotKind::ALL {
            let title = kind.display_name().to_string();
            let view: Box<dyn PlotView> = match kind {
                PlotKind::Box => Box::new(BoxPlotView::new(Uuid::new_v4(), title)),
                PlotKind::Violin => Box::new(ViolinPlotView::new(Uuid::new_v4(), title)),
                PlotKind::Scatter => Box::new(ScatterPlotView::new(Uuid::new_v4(), title)),
            };
            views.insert(kind, view);
        }
        Self {
            active: PlotKind::default(),
            views,
            records: LoadState::Idle,
            filter: CohortFilter::default(),
        }
    }

    pub fn active(&self) -> PlotKind {
        self.active
    }

    /// Switch the active plot kind. The activated view starts from a
    /// clean transform and selection; staying on the current kind is a
    /// no-op.
    pub fn set_active(&mut self, kind: PlotKind) {
        if kind == self.active {
            return;
        }
        self.active = kind;
        if let Some(view) = self.views.get_mut(&kind) {
            view.reset_interaction();
        }
        debug!("switched to {} plot", kind.key());
    }

    /// Take a loader snapshot. Ready records are distributed to every
    /// view; transforms and selections stay as they are.
    pub fn apply_load_state(&mut self, state: LoadState<Arc<Vec<PatientRecord>>>) {
        if let LoadState::Ready(records) = &state {
            debug!("distributing {} records to plot views", records.len());
            for view in self.views.values_mut() {
                view.set_records(Arc::clone(records));
            }
        }
        self.records = state;
    }

    pub fn set_tracked(&mut self, tracked: Arc<Vec<TrackedVariant>>) {
        for view in self.views.values_mut() {
            view.set_tracked(Arc::clone(&tracked));
        }
    }

    pub fn set_filter(&mut self, filter: CohortFilter) {
        self.filter = filter;
        for view in self.views.values_mut() {
            view.set_filter(filter);
        }
    }

    pub fn handle_gesture(&mut self, event: &GestureEvent) {
        if let Some(view) = self.views.get_mut(&self.active) {
            view.handle_gesture(event);
        }
    }

    /// Scene for the active view, or a load-status placeholder while no
    /// records are available.
    pub fn scene(&self, width: f32, height: f32) -> PlotScene {
        match &self.records {
            LoadState::Idle | LoadState::Loading => {
                PlotScene::message(width, height, "Loading data...")
            }
            LoadState::Failed(message) => {
                PlotScene::message(width, height, &format!("Error loading data: {message}"))
            }
            LoadState::Ready(_) => match self.views.get(&self.active) {
                Some(view) => view.scene(width, height),
                None => PlotScene::message(width, height, "No data available"),
            },
        }
    }

    pub fn selected_entity(&self) -> Option<SelectedEntity> {
        self.views.get(&self.active)?.selected_entity()
    }

    /// What the sidebar should summarize, from the active view's config.
    /// Selection is visual emphasis only and does not narrow the scope.
    pub fn stats_scope(&self) -> StatsScope {
        match self.active {
            PlotKind::Scatter => match self.view_as::<ScatterPlotView>(PlotKind::Scatter) {
                Some(view) => StatsScope::Pairing {
                    x: view.config.x_field,
                    y: view.config.y_field,
                },
                None => StatsScope::Distribution(None),
            },
            PlotKind::Box => StatsScope::Distribution(
                self.view_as::<BoxPlotView>(PlotKind::Box)
                    .and_then(|view| view.config.category),
            ),
            PlotKind::Violin => StatsScope::Distribution(
                self.view_as::<ViolinPlotView>(PlotKind::Violin)
                    .and_then(|view| view.config.category),
            ),
        }
    }

    /// Sidebar rows for the current scope over the loaded cohort.
    pub fn stat_rows(&self) -> Vec<StatRow> {
        let Some(records) = self.records.ready() else {
            return Vec::new();
        };
        stats_panel::stat_rows(records, &self.filter, self.stats_scope())
    }

    pub fn scatter_mut(&mut self) -> Option<&mut ScatterPlotView> {
        self.view_as_mut(PlotKind::Scatter)
    }

    pub fn box_plot_mut(&mut self) -> Option<&mut BoxPlotView> {
        self.view_as_mut(PlotKind::Box)
    }

    pub fn violin_mut(&mut self) -> Option<&mut ViolinPlotView> {
        self.view_as_mut(PlotKind::Violin)
    }

    fn view_as<V: 'static>(&self, kind: PlotKind) -> Option<&V> {
        self.views.get(&kind)?.as_any().downcast_ref::<V>()
    }

    fn view_as_mut<V: 'static>(&mut self, kind: PlotKind) -> Option<&mut V> {
        self.views.get_mut(&kind)?.as_any_mut().downcast_mut::<V>()
    }

    pub fn save_config(&self) -> Value {
        let mut config = json!({
            "active": self.active.key(),
        });
        for (kind, view) in &self.views {
            config[kind.key()] = view.save_config();
        }
        config
    }

    pub fn load_config(&mut self, config: Value) {
        if let Some(kind) = config
            .get("active")
            .and_then(|v| v.as_str())
            .and_then(PlotKind::from_key)
        {
            self.active = kind;
        }
        for (kind, view) in self.views.iter_mut() {
            if let Some(section) = config.get(kind.key()) {
                view.load_config(section.clone());
            }
        }
    }
}

impl Default for PlotWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::{BTreeMap, BTreeSet};

use crate::controls::ControlId;
use crate::views::ViewId;

// ---------------------------------------------------------------------------
// Explicit-dependency scheduler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Output matches the current control values.
    Fresh,
    /// A declared dependency changed since the output was computed.
    Stale,
}

#[derive(Debug)]
struct ViewSlot<T> {
    deps: BTreeSet<ControlId>,
    freshness: Freshness,
    output: Option<T>,
    runs: usize,
}

/// Tracks which controls each view reads and caches the last output.
///
/// Views are recomputed only after [`ReactiveGraph::invalidate`] marks them
/// stale, and only when [`ReactiveGraph::refresh`] runs.
#[derive(Debug)]
pub struct ReactiveGraph<T> {
    slots: BTreeMap<ViewId, ViewSlot<T>>,
}

impl<T> Default for ReactiveGraph<T> {
    fn default() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }
}

impl<T> ReactiveGraph<T> {
    /// Register a view with the controls it reads. A new view starts stale.
    /// Re-registering replaces the dependency list and drops the cache.
    pub fn register(&mut self, view: ViewId, deps: impl IntoIterator<Item = ControlId>) {
        self.slots.insert(
            view,
            ViewSlot {
                deps: deps.into_iter().collect(),
                freshness: Freshness::Stale,
                output: None,
                runs: 0,
            },
        );
    }

    /// Mark every view that declared `control` as stale and return them.
    pub fn invalidate(&mut self, control: ControlId) -> Vec<ViewId> {
        let mut hit = Vec::new();
        for (view, slot) in &mut self.slots {
            if slot.deps.contains(&control) {
                slot.freshness = Freshness::Stale;
                hit.push(*view);
            }
        }
        log::debug!("{control} changed, stale views: {hit:?}");
        hit
    }

    /// Recompute every stale view, in registration-key order, and return
    /// the views that ran.
    pub fn refresh(&mut self, mut compute: impl FnMut(ViewId) -> T) -> Vec<ViewId> {
        let mut ran = Vec::new();
        for (view, slot) in &mut self.slots {
            if slot.freshness == Freshness::Fresh {
                continue;
            }
            slot.output = Some(compute(*view));
            slot.freshness = Freshness::Fresh;
            slot.runs += 1;
            ran.push(*view);
        }
        ran
    }

    pub fn freshness(&self, view: ViewId) -> Option<Freshness> {
        self.slots.get(&view).map(|s| s.freshness)
    }

    /// Last computed output, which may be stale until the next refresh.
    pub fn output(&self, view: ViewId) -> Option<&T> {
        self.slots.get(&view).and_then(|s| s.output.as_ref())
    }

    pub fn dependencies(&self, view: ViewId) -> Option<&BTreeSet<ControlId>> {
        self.slots.get(&view).map(|s| &s.deps)
    }

    /// How many times a view has been computed.
    pub fn runs(&self, view: ViewId) -> usize {
        self.slots.get(&view).map_or(0, |s| s.runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> ReactiveGraph<usize> {
        let mut g = ReactiveGraph::default();
        g.register(ViewId::Table, []);
        g.register(ViewId::MassHistogram, [ControlId::SeabornBinCount]);
        g.register(
            ViewId::Scatter,
            [ControlId::SeabornBinCount, ControlId::SelectedSpecies],
        );
        g
    }

    #[test]
    fn registered_views_start_stale() {
        let g = graph();
        assert_eq!(g.freshness(ViewId::Table), Some(Freshness::Stale));
        assert_eq!(g.freshness(ViewId::Grid), None);
        assert!(g.output(ViewId::Table).is_none());
    }

    #[test]
    fn refresh_computes_each_stale_view_once() {
        let mut g = graph();
        let ran = g.refresh(|_| 1);
        assert_eq!(ran.len(), 3);
        assert!(g.refresh(|_| 2).is_empty());
        assert_eq!(g.output(ViewId::Table), Some(&1));
        assert_eq!(g.freshness(ViewId::Table), Some(Freshness::Fresh));
    }

    #[test]
    fn invalidate_touches_only_dependents() {
        let mut g = graph();
        g.refresh(|_| 0);

        let stale = g.invalidate(ControlId::SelectedSpecies);
        assert_eq!(stale, vec![ViewId::Scatter]);
        assert_eq!(g.freshness(ViewId::MassHistogram), Some(Freshness::Fresh));

        let ran = g.refresh(|_| 7);
        assert_eq!(ran, vec![ViewId::Scatter]);
        assert_eq!(g.runs(ViewId::Scatter), 2);
        assert_eq!(g.runs(ViewId::Table), 1);
        assert_eq!(g.output(ViewId::MassHistogram), Some(&0));
    }

    #[test]
    fn control_without_dependents_recomputes_nothing() {
        let mut g = graph();
        g.refresh(|_| 0);
        assert!(g.invalidate(ControlId::PlotlyBinCount).is_empty());
        assert!(g.refresh(|_| 1).is_empty());
    }

    #[test]
    fn stale_output_stays_readable_until_refresh() {
        let mut g = graph();
        g.refresh(|_| 3);
        g.invalidate(ControlId::SeabornBinCount);
        assert_eq!(g.output(ViewId::MassHistogram), Some(&3));
        assert_eq!(g.freshness(ViewId::MassHistogram), Some(Freshness::Stale));
    }
}

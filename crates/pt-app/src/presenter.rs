//! The only writer to the rendering surface.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;

use tracing::debug;

use pt_core::{ChartDescription, ViewKind, placeholder_for};

use crate::views::{VisibilityChange, VisibilityObserver};

/// A charting backend that draws into named view regions.
pub trait RenderSurface {
    /// Replace whatever `view` shows with `chart`.
    fn draw(&mut self, view: ViewKind, chart: &ChartDescription);

    /// Recompute the size of `view` after it became visible.
    fn relayout(&mut self, view: ViewKind);
}

/// Pushes charts to the surface unchanged and remembers what each view shows.
pub struct ChartPresenter<S> {
    surface: RefCell<S>,
    on_screen: RefCell<BTreeMap<ViewKind, ChartDescription>>,
}

impl<S: RenderSurface> ChartPresenter<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface: RefCell::new(surface),
            on_screen: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn present(&self, view: ViewKind, chart: &ChartDescription) {
        debug!(%view, traces = chart.trace_count(), "presenting chart");
        self.surface.borrow_mut().draw(view, chart);
        self.on_screen.borrow_mut().insert(view, chart.clone());
    }

    pub fn present_placeholder(&self, view: ViewKind) {
        self.present(view, &placeholder_for(view));
    }

    /// Chart currently drawn in `view`.
    pub fn on_screen(&self, view: ViewKind) -> Option<ChartDescription> {
        self.on_screen.borrow().get(&view).cloned()
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn into_surface(self) -> S {
        self.surface.into_inner()
    }
}

impl<S: RenderSurface> VisibilityObserver for ChartPresenter<S> {
    fn visibility_changed(&self, change: &VisibilityChange) {
        if self.on_screen.borrow().contains_key(&change.shown) {
            debug!(view = %change.shown, "relayout after visibility change");
            self.surface.borrow_mut().relayout(change.shown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_core::ChartKind;

    #[derive(Default)]
    struct Recorder {
        draws: Vec<(ViewKind, ChartDescription)>,
        relayouts: Vec<ViewKind>,
    }

    impl RenderSurface for Recorder {
        fn draw(&mut self, view: ViewKind, chart: &ChartDescription) {
            self.draws.push((view, chart.clone()));
        }

        fn relayout(&mut self, view: ViewKind) {
            self.relayouts.push(view);
        }
    }

    #[test]
    fn placeholder_goes_to_the_named_view() {
        let presenter = ChartPresenter::new(Recorder::default());
        presenter.present_placeholder(ViewKind::Comparison);

        let shown = presenter.on_screen(ViewKind::Comparison).unwrap();
        assert_eq!(shown.kind(), ChartKind::Placeholder);
        assert!(presenter.on_screen(ViewKind::Primary).is_none());
        assert_eq!(presenter.surface().draws.len(), 1);
    }

    #[test]
    fn empty_view_is_not_relaid_out() {
        let presenter = ChartPresenter::new(Recorder::default());
        presenter.visibility_changed(&VisibilityChange {
            hidden: Some(ViewKind::Primary),
            shown: ViewKind::Comparison,
        });
        assert!(presenter.surface().relayouts.is_empty());

        presenter.present_placeholder(ViewKind::Comparison);
        presenter.visibility_changed(&VisibilityChange {
            hidden: Some(ViewKind::Primary),
            shown: ViewKind::Comparison,
        });
        assert_eq!(presenter.surface().relayouts, vec![ViewKind::Comparison]);
    }
}

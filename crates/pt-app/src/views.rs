//! Which of the two views is visible.

use tracing::debug;

use pt_core::ViewKind;

/// The control that triggered a view switch, passed in explicitly by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabControl {
    pub id: String,
    pub view: ViewKind,
}

impl TabControl {
    pub fn new(id: impl Into<String>, view: ViewKind) -> Self {
        Self {
            id: id.into(),
            view,
        }
    }

    pub fn for_view(view: ViewKind) -> Self {
        Self::new(format!("{view}-tab"), view)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    /// View that was visible before, if it differs from `shown`
    pub hidden: Option<ViewKind>,
    pub shown: ViewKind,
}

/// Told synchronously, after the switch, which view became visible.
pub trait VisibilityObserver {
    fn visibility_changed(&self, change: &VisibilityChange);
}

#[derive(Debug, Clone)]
pub struct ViewSwitcher {
    active: ViewKind,
    active_control: Option<String>,
}

impl Default for ViewSwitcher {
    fn default() -> Self {
        Self {
            active: ViewKind::ALL[0],
            active_control: None,
        }
    }
}

impl ViewSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ViewKind {
        self.active
    }

    pub fn is_active(&self, view: ViewKind) -> bool {
        self.active == view
    }

    /// Every view currently marked active. Always exactly one.
    pub fn active_views(&self) -> Vec<ViewKind> {
        ViewKind::ALL
            .into_iter()
            .filter(|v| self.is_active(*v))
            .collect()
    }

    pub fn active_control(&self) -> Option<&str> {
        self.active_control.as_deref()
    }

    /// Make `control.view` the only active view, then notify `observer`.
    pub fn switch_to(
        &mut self,
        control: &TabControl,
        observer: &impl VisibilityObserver,
    ) -> VisibilityChange {
        let previous = self.active;
        self.active = control.view;
        self.active_control = Some(control.id.clone());

        let change = VisibilityChange {
            hidden: (previous != control.view).then_some(previous),
            shown: control.view,
        };
        debug!(control = %control.id, view = %change.shown, "view switched");
        observer.visibility_changed(&change);
        change
    }
}

//! UI component contract and teardown bookkeeping
//!
//! The host application brings the widget toolkit; the widget only describes
//! what to build (button and panel specs) and reacts to events the host
//! forwards. Everything created while the panel is open is recorded in a
//! [`Disposers`] list and released in one sweep on close, so no stale
//! callbacks outlive the panel.

use crate::Result;

/// Host-assigned handle for a created UI element
pub type ComponentId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipPlacement {
    North,
    East,
    South,
    West,
}

impl Default for TooltipPlacement {
    fn default() -> Self {
        TooltipPlacement::East
    }
}

/// Description of the toolbar button the host builds for the widget
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    /// CSS utility classes
    pub class: String,
    /// Icon reference, e.g. a sprite id
    pub icon: String,
    pub tooltip: String,
    pub tooltip_placement: TooltipPlacement,
}

/// Where a created element gets attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachTarget {
    /// A specific element id
    Element(String),
    /// The document body, used as a last resort
    Body,
}

/// The toolkit surface the host exposes to the widget
pub trait UiHost: Send {
    /// Builds a button and returns its handle
    fn create_button(&mut self, spec: &ButtonSpec) -> ComponentId;

    /// Builds the coordinate panel described by `view`
    fn create_panel(&mut self, view: &crate::ui::panel::PanelView) -> ComponentId;

    /// Attaches a created element to a target
    fn mount(&mut self, component: ComponentId, target: &AttachTarget);

    /// Detaches an element and drops its event listeners
    fn unmount(&mut self, component: ComponentId);

    /// Shows or hides the DMS input section of a panel
    fn set_dms_visible(&mut self, panel: ComponentId, visible: bool);

    /// Element id of the host's navigation area, when it has one
    fn navigation_target(&self) -> Option<String>;

    /// Whether an element with this id exists
    fn has_element(&self, id: &str) -> bool;
}

/// Lifecycle contract a host-embedded component implements
pub trait Component {
    fn name(&self) -> &str;

    /// Called once before the component is added to the host
    fn on_init(&mut self) -> Result<()>;

    /// Called when the host adds the component
    fn on_add(&mut self, ui: &mut dyn UiHost) -> Result<()>;

    /// Builds and attaches the component's visible elements
    fn render(&mut self, ui: &mut dyn UiHost) -> Result<()>;
}

type DisposeFn = Box<dyn FnOnce(&mut dyn UiHost) + Send>;

/// Teardown actions collected while UI elements are alive.
///
/// Acquire-on-open, release-on-close: every mount or listener registration
/// pushes its undo action here, and `dispose` drains them in order.
#[derive(Default)]
pub struct Disposers {
    actions: Vec<DisposeFn>,
}

impl Disposers {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, action: impl FnOnce(&mut dyn UiHost) + Send + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Runs every recorded teardown action
    pub fn dispose(&mut self, ui: &mut dyn UiHost) {
        for action in self.actions.drain(..) {
            action(ui);
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::panel::PanelView;

    #[derive(Default)]
    struct RecordingUi {
        unmounted: Vec<ComponentId>,
    }

    impl UiHost for RecordingUi {
        fn create_button(&mut self, _spec: &ButtonSpec) -> ComponentId {
            1
        }

        fn create_panel(&mut self, _view: &PanelView) -> ComponentId {
            2
        }

        fn mount(&mut self, _component: ComponentId, _target: &AttachTarget) {}

        fn unmount(&mut self, component: ComponentId) {
            self.unmounted.push(component);
        }

        fn set_dms_visible(&mut self, _panel: ComponentId, _visible: bool) {}

        fn navigation_target(&self) -> Option<String> {
            None
        }

        fn has_element(&self, _id: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_disposers_run_in_order_and_drain() {
        let mut ui = RecordingUi::default();
        let mut disposers = Disposers::new();
        disposers.push(|ui| ui.unmount(10));
        disposers.push(|ui| ui.unmount(11));
        assert_eq!(disposers.len(), 2);

        disposers.dispose(&mut ui);
        assert_eq!(ui.unmounted, vec![10, 11]);
        assert!(disposers.is_empty());

        // a second sweep is a no-op
        disposers.dispose(&mut ui);
        assert_eq!(ui.unmounted, vec![10, 11]);
    }
}

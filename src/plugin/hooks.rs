use crate::element::ViewState;

/// Lifecycle hooks a status-screen host dispatches to its plugins. Every
/// hook is a synchronous entry point: the plugin does its work and returns
/// before the host continues.
///
/// Precondition: the host dispatches hooks from a single context (UI
/// refresh, periodic tick, domain events) and never invokes two hooks
/// concurrently. Plugin state is single-owner and unguarded on the strength
/// of that assumption.
///
/// Hooks that touch elements receive the live element collection as a
/// parameter; plugins must not stash references to it.
pub trait HostHooks {
    fn name(&self) -> &str {
        "plugin"
    }

    /// Plugin code has been loaded into the host.
    fn on_loaded(&mut self) {}

    /// The host finished its own startup and is operational.
    fn on_ready(&mut self) {}

    /// The view has been populated; read config and apply display modes.
    fn on_ui_setup(&mut self, _view: &mut ViewState) {}

    /// Periodic UI refresh.
    fn on_ui_update(&mut self, _view: &mut ViewState) {}

    /// One host work cycle completed.
    fn on_epoch(&mut self, _view: &mut ViewState) {}

    fn on_peer_detected(&mut self, _view: &mut ViewState) {}

    fn on_handshake(&mut self, _view: &mut ViewState) {}

    /// The host emitted a log entry. High-frequency.
    fn on_log(&mut self, _view: &mut ViewState) {}

    /// Fresh scan results arrived. High-frequency.
    fn on_wifi_update(&mut self, _view: &mut ViewState) {}

    /// The plugin is being unloaded while the view is still alive; undo any
    /// display-mode changes here.
    fn on_unload(&mut self, _view: &mut ViewState) {}

    /// Final notification after the view is gone.
    fn on_unloaded(&mut self) {}
}

//! Input action port.
//!
//! The windowing collaborator translates platform key events into [`Action`]s
//! and dispatches them through an [`ActionRegistry`]; the engine never sees
//! platform key types.
//!
//! Extending:
//! - add a variant to `Action`
//! - map the platform event to it in the windowing layer
//! - register a handler for it at scene setup

/// Scene-level input actions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    /// Flip the camera orbit animation between Running and Paused.
    ToggleAnimation,
}

/// Handler registration and dispatch for [`Action`]s.
///
/// `Ctx` is whatever mutable scene state the handlers operate on; handlers
/// run in registration order. Dispatch from an unhandled action is not an
/// error; it returns a zero run count so callers can log it if they care.
pub struct ActionRegistry<Ctx> {
    handlers: Vec<(Action, Box<dyn FnMut(&mut Ctx)>)>,
}

impl<Ctx> ActionRegistry<Ctx> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Registers a handler for `action`.
    pub fn register(&mut self, action: Action, handler: impl FnMut(&mut Ctx) + 'static) {
        self.handlers.push((action, Box::new(handler)));
    }

    /// Runs every handler registered for `action`; returns how many ran.
    pub fn dispatch(&mut self, action: Action, ctx: &mut Ctx) -> usize {
        let mut ran = 0;
        for (registered, handler) in &mut self.handlers {
            if *registered == action {
                handler(ctx);
                ran += 1;
            }
        }
        ran
    }
}

impl<Ctx> Default for ActionRegistry<Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_runs_registered_handler() {
        let mut registry: ActionRegistry<u32> = ActionRegistry::new();
        registry.register(Action::ToggleAnimation, |count| *count += 1);

        let mut count = 0;
        assert_eq!(registry.dispatch(Action::ToggleAnimation, &mut count), 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let mut registry: ActionRegistry<Vec<u8>> = ActionRegistry::new();
        registry.register(Action::ToggleAnimation, |log| log.push(1));
        registry.register(Action::ToggleAnimation, |log| log.push(2));

        let mut log = Vec::new();
        assert_eq!(registry.dispatch(Action::ToggleAnimation, &mut log), 2);
        assert_eq!(log, vec![1, 2]);
    }

    #[test]
    fn unhandled_action_runs_nothing() {
        let mut registry: ActionRegistry<u32> = ActionRegistry::new();
        let mut count = 0;
        assert_eq!(registry.dispatch(Action::ToggleAnimation, &mut count), 0);
        assert_eq!(count, 0);
    }
}

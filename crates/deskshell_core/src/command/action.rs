//! Action closures and the context they run against.

use crate::host::Advisory;
use crate::overlay::registry::OverlayRegistry;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Shell-level side effect requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEffect {
    ToggleSidePanel,
    /// Scroll/route to a named page section.
    NavigateTo(String),
    /// Start a fresh note draft in the notes panel.
    NewNoteDraft,
    Advise(Advisory),
}

/// Mutable view handed to an action while it runs.
pub struct ActionContext<'a> {
    overlays: &'a mut OverlayRegistry,
    effects: Vec<ShellEffect>,
}

impl<'a> ActionContext<'a> {
    pub fn new(overlays: &'a mut OverlayRegistry) -> Self {
        Self {
            overlays,
            effects: Vec::new(),
        }
    }

    pub fn overlays(&mut self) -> &mut OverlayRegistry {
        self.overlays
    }

    pub fn emit(&mut self, effect: ShellEffect) {
        self.effects.push(effect);
    }

    /// Effects in emission order.
    pub fn into_effects(self) -> Vec<ShellEffect> {
        self.effects
    }
}

/// Shared action closure.
#[derive(Clone)]
pub struct CommandAction(Rc<dyn Fn(&mut ActionContext<'_>)>);

impl CommandAction {
    pub fn new(action: impl Fn(&mut ActionContext<'_>) + 'static) -> Self {
        Self(Rc::new(action))
    }

    pub fn invoke(&self, ctx: &mut ActionContext<'_>) {
        (self.0)(ctx);
    }
}

impl Debug for CommandAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CommandAction(..)")
    }
}

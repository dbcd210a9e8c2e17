//! App capability interface and lifecycle context
//!
//! An app is identity (name + single-glyph icon) plus five capability
//! slots. Every slot has a default no-op body, which is the Rust shape of
//! the optional function pointers the interface describes: an app
//! implements only what it needs.
//!
//! Apps never hold a reference to the registry. Switching is requested
//! through the [`Navigator`] in the dispatch context and applied by the
//! shell as soon as the app call returns, still inside the same dispatch
//! step, so the destroy-then-init pairing stays observable in order.

pub mod registry;

pub use registry::{AppRegistry, MAX_APPS};

use soroban_display::{DisplayError, Draw};

use crate::keys::KeySet;
use crate::time::Instant;

/// Name and icon of a registered app, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppEntry {
    pub name: &'static str,
    /// Single glyph drawn on the launcher tile
    pub icon: &'static str,
}

/// One installable app
///
/// Each concrete app type owns its state exclusively; the registry never
/// inspects it. `init` runs on every activation (including re-activation
/// of the already-active app), `destroy` on every deactivation.
pub trait App {
    /// Unique name, used for [`Navigator::launch`] lookups
    fn name(&self) -> &'static str;

    /// Single glyph for the launcher tile
    fn icon(&self) -> &'static str;

    fn init(&mut self) {}

    fn update(&mut self, _ctx: &mut AppContext<'_>) {}

    fn render(&mut self, _display: &mut dyn Draw, _ctx: &AppContext<'_>) -> Result<(), DisplayError> {
        Ok(())
    }

    fn on_key(&mut self, _code: u8, _ctx: &mut AppContext<'_>) {}

    fn destroy(&mut self) {}
}

/// Per-dispatch view handed to the active app
pub struct AppContext<'c> {
    /// Timestamp of the current loop iteration
    pub now: Instant,
    /// Debounced key state, for chord checks alongside discrete events
    pub held: KeySet,
    /// All registered apps in registration order (index 0 is home)
    pub apps: &'c [AppEntry],
    /// Switch requests, applied right after this app call returns
    pub nav: &'c mut Navigator,
}

/// A pending app-switch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavRequest {
    SwitchTo(usize),
    Launch(&'static str),
    Home,
}

/// Deferred switching handle given to apps
///
/// Only the most recent request within one dispatch survives, matching
/// a direct switch call's last-writer-wins behavior.
#[derive(Debug, Default)]
pub struct Navigator {
    pending: Option<NavRequest>,
}

impl Navigator {
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Request activation of the app at `index` (no-op later if out of range)
    pub fn switch_to(&mut self, index: usize) {
        self.pending = Some(NavRequest::SwitchTo(index));
    }

    /// Request activation by exact name (no-op later if absent)
    pub fn launch(&mut self, name: &'static str) {
        self.pending = Some(NavRequest::Launch(name));
    }

    /// Request return to the home app (index 0)
    pub fn home(&mut self) {
        self.pending = Some(NavRequest::Home);
    }

    /// Take the pending request, leaving none
    pub fn take(&mut self) -> Option<NavRequest> {
        self.pending.take()
    }
}

//! App registry and single-active-app scheduling
//!
//! Owns the ordered set of installed apps and mediates the one invariant
//! that matters: at most one app is active, and every activation pairs the
//! outgoing app's `destroy` with the incoming app's `init`, in that order.
//!
//! Capacity overflow and bad indices/names are silent no-ops; nothing in
//! here can fail in a way that should halt the device.

use heapless::Vec;
use soroban_display::{DisplayError, Draw};

use super::{App, AppContext, AppEntry, Navigator};
use crate::keys::KeySet;
use crate::time::Instant;

/// Maximum number of installable apps
pub const MAX_APPS: usize = 10;

/// Ordered app table with one active slot
///
/// Registration order is significant: index 0 is the home/launcher app by
/// convention, the boot activation target and the universal fallback.
pub struct AppRegistry<'a> {
    apps: Vec<&'a mut dyn App, MAX_APPS>,
    /// Parallel (name, icon) table, shareable while an app is borrowed
    catalog: Vec<AppEntry, MAX_APPS>,
    active: Option<usize>,
}

impl<'a> AppRegistry<'a> {
    pub fn new() -> Self {
        Self {
            apps: Vec::new(),
            catalog: Vec::new(),
            active: None,
        }
    }

    /// Append an app; silent no-op when the table is full
    pub fn register(&mut self, app: &'a mut dyn App) {
        if self.apps.is_full() {
            return;
        }
        let entry = AppEntry {
            name: app.name(),
            icon: app.icon(),
        };
        let _ = self.catalog.push(entry);
        let _ = self.apps.push(app);
    }

    /// Activate the app at `index`; no-op when out of range
    ///
    /// The current app (if any) is destroyed first - even when `index` is
    /// the active index: re-selecting the current app tears it down and
    /// re-inits it, which apps rely on to reset their user-visible state.
    pub fn switch_to(&mut self, index: usize) {
        if index >= self.apps.len() {
            return;
        }
        if let Some(active) = self.active {
            if let Some(app) = self.apps.get_mut(active) {
                app.destroy();
            }
        }
        self.active = Some(index);
        if let Some(app) = self.apps.get_mut(index) {
            app.init();
        }
    }

    /// Activate the first app whose name matches exactly; no-op if absent
    pub fn launch_by_name(&mut self, name: &str) {
        if let Some(index) = self.catalog.iter().position(|e| e.name == name) {
            self.switch_to(index);
        }
    }

    /// Back to the home app at index 0
    pub fn return_home(&mut self) {
        self.switch_to(0);
    }

    pub fn count(&self) -> usize {
        self.apps.len()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Name/icon of the app at `index`
    pub fn entry(&self, index: usize) -> Option<AppEntry> {
        self.catalog.get(index).copied()
    }

    /// All registered entries in registration order
    pub fn entries(&self) -> &[AppEntry] {
        &self.catalog
    }

    /// Forward a pressed key to the active app, if any
    pub fn dispatch_key(&mut self, code: u8, now: Instant, held: KeySet, nav: &mut Navigator) {
        let Some(index) = self.active else { return };
        let Some(app) = self.apps.get_mut(index) else {
            return;
        };
        let mut ctx = AppContext {
            now,
            held,
            apps: &self.catalog,
            nav,
        };
        app.on_key(code, &mut ctx);
    }

    /// Run the active app's update step, if any
    pub fn update_active(&mut self, now: Instant, held: KeySet, nav: &mut Navigator) {
        let Some(index) = self.active else { return };
        let Some(app) = self.apps.get_mut(index) else {
            return;
        };
        let mut ctx = AppContext {
            now,
            held,
            apps: &self.catalog,
            nav,
        };
        app.update(&mut ctx);
    }

    /// Render the active app, if any
    pub fn render_active(
        &mut self,
        display: &mut dyn Draw,
        now: Instant,
        held: KeySet,
        nav: &mut Navigator,
    ) -> Result<(), DisplayError> {
        let Some(index) = self.active else {
            return Ok(());
        };
        let Some(app) = self.apps.get_mut(index) else {
            return Ok(());
        };
        let ctx = AppContext {
            now,
            held,
            apps: &self.catalog,
            nav,
        };
        app.render(display, &ctx)
    }
}

impl Default for AppRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

//! Scoped keyboard listener registration.

use super::Dashboard;
use crate::host::Clock;
use crate::storage::KeyValueStore;
use std::ops::{Deref, DerefMut};

/// Mounted dashboard; the palette shortcut listener lives as long as this guard.
pub struct MountedDashboard<'a, S: KeyValueStore, C: Clock> {
    shell: &'a mut Dashboard<S, C>,
}

impl<'a, S: KeyValueStore, C: Clock> MountedDashboard<'a, S, C> {
    pub(super) fn new(shell: &'a mut Dashboard<S, C>) -> Self {
        shell.attach_listener();
        Self { shell }
    }
}

impl<S: KeyValueStore, C: Clock> Deref for MountedDashboard<'_, S, C> {
    type Target = Dashboard<S, C>;

    fn deref(&self) -> &Self::Target {
        self.shell
    }
}

impl<S: KeyValueStore, C: Clock> DerefMut for MountedDashboard<'_, S, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.shell
    }
}

impl<S: KeyValueStore, C: Clock> Drop for MountedDashboard<'_, S, C> {
    fn drop(&mut self) {
        self.shell.detach_listener();
    }
}

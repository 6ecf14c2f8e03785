//! Deferred scroll-into-view after page changes.

use std::sync::Arc;
use std::sync::Weak;
use std::time::Duration;

use crate::timer::Deferred;

/// Delay before scrolling, so the new page is rendered first.
pub const SCROLL_DELAY: Duration = Duration::from_millis(50);

/// The view container a grid scrolls into view after paging.
pub trait ScrollTarget: Send + Sync {
    /// Bring the top of the grid into view.
    fn scroll_into_view(&self);
}

/// Schedules best-effort scrolls for a grid.
///
/// The target is held weakly; if the owning view has gone away by the time
/// the timer fires, nothing happens.
#[derive(Default)]
pub(crate) struct Scroller {
    target: Option<Weak<dyn ScrollTarget>>,
    deferred: Deferred,
}

impl Scroller {
    pub fn set_target(&mut self, target: &Arc<dyn ScrollTarget>) {
        self.target = Some(Arc::downgrade(target));
    }

    pub fn clear_target(&mut self) {
        self.target = None;
        self.deferred.cancel();
    }

    /// Schedules a scroll, replacing one that is still pending.
    pub fn schedule(&mut self) {
        let Some(target) = self.target.clone() else {
            return;
        };
        self.deferred.schedule(SCROLL_DELAY, move || {
            if let Some(target) = target.upgrade() {
                target.scroll_into_view();
            }
        });
    }
}

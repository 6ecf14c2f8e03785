//! Circular progress indicator model.
//!
//! Holds the clamped inputs of a ring-shaped gauge and derives its geometry.
//! Renderers decide how to draw it; the terminal dashboard uses a bar.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::timer::Deferred;

/// Smallest allowed radius.
pub const MIN_RADIUS: f64 = 50.0;

/// Default stroke color.
pub const DEFAULT_COLOR: &str = "#007bff";

/// Delay between reaching 100% and the completion notification.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(300);

type CompleteCallback = Arc<dyn Fn() + Send + Sync>;

/// A circular progress indicator.
///
/// # Example
///
/// ```
/// use staffgrid::progress::ProgressIndicator;
///
/// let mut ring = ProgressIndicator::new();
/// ring.set_radius(30.0);
/// ring.set_progress(150.0);
/// assert_eq!(ring.radius(), 50.0);
/// assert_eq!(ring.progress(), 100.0);
/// assert_eq!(ring.svg_size(), 120.0);
/// ```
pub struct ProgressIndicator {
    radius: f64,
    progress: f64,
    color: String,
    on_complete: Option<CompleteCallback>,
    completion: Deferred,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self {
            radius: MIN_RADIUS,
            progress: 0.0,
            color: DEFAULT_COLOR.to_string(),
            on_complete: None,
            completion: Deferred::new(),
        }
    }

    /// Set the completion callback.
    ///
    /// Called once, [`COMPLETION_DELAY`] after progress crosses from below
    /// 100 to 100.
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Arc::new(callback));
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Set the radius. Values below [`MIN_RADIUS`] (and NaN) are raised to it.
    pub fn set_radius(&mut self, radius: f64) {
        self.radius = if radius.is_nan() {
            MIN_RADIUS
        } else {
            radius.max(MIN_RADIUS)
        };
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Set the progress percentage, clamped to `[0, 100]`.
    ///
    /// Crossing into 100 schedules the completion notification, replacing a
    /// pending one. Staying at 100 or dropping below it does not.
    pub fn set_progress(&mut self, progress: f64) {
        let previous = self.progress;
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 100.0)
        };

        if previous < 100.0 && self.progress >= 100.0 {
            self.schedule_completion();
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Length of the ring left undrawn.
    pub fn stroke_dashoffset(&self) -> f64 {
        let circumference = self.circumference();
        circumference - (self.progress / 100.0) * circumference
    }

    /// Side of the square canvas, with room for the stroke.
    pub fn svg_size(&self) -> f64 {
        self.diameter() + 20.0
    }

    pub fn center_position(&self) -> f64 {
        self.svg_size() / 2.0
    }

    pub fn stroke_width(&self) -> f64 {
        (self.radius * 0.1).max(2.0)
    }

    /// Progress as a fraction between 0 and 1.
    pub fn fraction(&self) -> f64 {
        self.progress / 100.0
    }

    /// Returns `true` while a completion notification is pending.
    pub fn completion_pending(&self) -> bool {
        self.completion.is_pending()
    }

    /// Cancels a pending completion notification.
    pub fn teardown(&mut self) {
        self.completion.cancel();
    }

    fn schedule_completion(&mut self) {
        let Some(callback) = self.on_complete.clone() else {
            return;
        };
        self.completion.schedule(COMPLETION_DELAY, move || callback());
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProgressIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressIndicator")
            .field("radius", &self.radius)
            .field("progress", &self.progress)
            .field("color", &self.color)
            .finish()
    }
}

/// Formats a percentage the way the indicator label shows it (`33.7%`).
pub fn format_percentage(progress: f64) -> String {
    format!("{}%", progress)
}

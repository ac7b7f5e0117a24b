//! Screen-share tracking and content fitting.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Scale shared content to fit a container, preserving aspect ratio and
/// never upscaling. Results are floored to whole pixels.
pub fn fit_within(content: Dimensions, container: Dimensions) -> Dimensions {
    if content.width == 0 || content.height == 0 {
        return Dimensions::default();
    }
    let ratio = (container.width as f64 / content.width as f64)
        .min(container.height as f64 / content.height as f64)
        .min(1.0);
    Dimensions {
        width: (content.width as f64 * ratio).floor() as u32,
        height: (content.height as f64 * ratio).floor() as u32,
    }
}

/// Whether either side of the session is sharing, plus the source
/// dimensions of the shared content.
#[derive(Debug, Default)]
pub struct ShareTracker {
    local_active: bool,
    remote_active: bool,
    content: Dimensions,
}

impl ShareTracker {
    pub fn on_local_started(&mut self, content: Dimensions) {
        self.local_active = true;
        self.content = content;
    }

    pub fn on_local_stopped(&mut self) {
        self.local_active = false;
    }

    pub fn on_remote_started(&mut self, content: Dimensions) {
        self.remote_active = true;
        self.content = content;
    }

    pub fn on_remote_stopped(&mut self) {
        self.remote_active = false;
    }

    pub fn is_sharing(&self) -> bool {
        self.local_active || self.remote_active
    }

    pub fn local_active(&self) -> bool {
        self.local_active
    }

    pub fn remote_active(&self) -> bool {
        self.remote_active
    }

    /// The shared content scaled into the container.
    pub fn fitted(&self, container: Dimensions) -> Dimensions {
        fit_within(self.content, container)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downscales_preserving_aspect_ratio() {
        let fitted = fit_within(
            Dimensions { width: 800, height: 600 },
            Dimensions { width: 400, height: 400 },
        );
        assert_eq!(fitted, Dimensions { width: 400, height: 300 });
    }

    #[test]
    fn never_upscales() {
        let content = Dimensions { width: 320, height: 180 };
        let fitted = fit_within(content, Dimensions { width: 1920, height: 1080 });
        assert_eq!(fitted, content);
    }

    #[test]
    fn zero_sized_content_fits_to_nothing() {
        let fitted = fit_within(Dimensions::default(), Dimensions { width: 640, height: 360 });
        assert_eq!(fitted, Dimensions::default());
    }

    #[test]
    fn tracker_reports_sharing_from_either_side() {
        let mut tracker = ShareTracker::default();
        assert!(!tracker.is_sharing());

        tracker.on_remote_started(Dimensions { width: 1280, height: 720 });
        assert!(tracker.is_sharing());
        assert!(tracker.remote_active());
        assert!(!tracker.local_active());

        tracker.on_remote_stopped();
        assert!(!tracker.is_sharing());

        tracker.on_local_started(Dimensions { width: 1280, height: 720 });
        assert!(tracker.is_sharing());
        let fitted = tracker.fitted(Dimensions { width: 640, height: 720 });
        assert_eq!(fitted, Dimensions { width: 640, height: 360 });
    }
}

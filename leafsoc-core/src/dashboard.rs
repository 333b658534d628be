//! Dashboard context
//!
//! One value owning everything the display cycle mutates: the cached
//! telemetry, the page controller and the input trackers. Built once at
//! startup and driven by the firmware loop.

use embedded_can::Frame;
use leafsoc_hal::ByteStorage;
use leafsoc_protocol::{DecodeOutcome, TelemetrySample};

use crate::composer::{compose, DisplayFrame};
use crate::config::DashboardConfig;
use crate::estimator::{estimate, ChargeEstimate};
use crate::input::{ButtonTracker, PanelGesture, PanelSnapshot};
use crate::pages::{PageController, Transition, PAGE_COUNT};
use crate::state::{Mode, PageEvent};

/// Display state for one power-on session
pub struct Dashboard<S> {
    config: DashboardConfig,
    sample: TelemetrySample,
    pages: PageController<S>,
    button: ButtonTracker,
    panel: PanelGesture,
}

impl<S: ByteStorage> Dashboard<S> {
    /// Restore the saved page from `storage` and start with no telemetry
    pub async fn new(config: DashboardConfig, storage: S) -> Self {
        Self {
            pages: PageController::load(storage, config.storage.page_address, PAGE_COUNT).await,
            button: ButtonTracker::new(&config.input),
            panel: PanelGesture::new(&config.panel),
            sample: TelemetrySample::new(),
            config,
        }
    }

    /// Fold one received bus frame into the cached sample
    pub fn ingest<F: Frame>(&mut self, frame: &F) -> DecodeOutcome {
        self.sample.apply(frame)
    }

    /// Feed the page button level sampled at `now_ms`
    pub async fn sample_button(&mut self, pressed: bool, now_ms: u32) -> Transition {
        match self.button.update(pressed, now_ms) {
            Some(event) => self.handle_event(event.into()).await,
            None => Transition::Unchanged,
        }
    }

    /// Feed the latest climate-control snapshot
    pub async fn sample_panel(&mut self, snapshot: PanelSnapshot) -> Transition {
        match self.panel.update(snapshot) {
            Some(event) => self.handle_event(event).await,
            None => Transition::Unchanged,
        }
    }

    /// Apply a page event from any source
    pub async fn handle_event(&mut self, event: PageEvent) -> Transition {
        self.pages.handle(event).await
    }

    /// Charge estimate from the cached sample
    pub fn estimate(&self) -> Option<ChargeEstimate> {
        estimate(
            &self.sample,
            &self.config.calibration,
            &self.config.estimator,
        )
    }

    /// Frame for the current state
    pub fn frame(&self) -> DisplayFrame {
        let estimate = self.estimate();
        compose(
            &self.sample,
            estimate.as_ref(),
            self.pages.current(),
            &self.config,
        )
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn sample(&self) -> &TelemetrySample {
        &self.sample
    }

    pub fn pages(&self) -> &PageController<S> {
        &self.pages
    }

    pub fn current_page(&self) -> u8 {
        self.pages.current()
    }

    /// Check if a restart has been requested
    pub fn restart_pending(&self) -> bool {
        self.pages.mode() == Mode::ResetPending
    }

    /// Tear down, returning the storage
    pub fn into_storage(self) -> S {
        self.pages.into_storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::Primary;
    use embassy_futures::block_on;
    use leafsoc_hal::RamStorage;
    use leafsoc_protocol::{BusFrame, DecodeError, Signal};

    fn gids_frame(gids: u16) -> BusFrame {
        BusFrame::standard(0x5BC, &[(gids >> 2) as u8, ((gids & 0x3) << 6) as u8, 0, 0]).unwrap()
    }

    fn dashboard() -> Dashboard<RamStorage<16>> {
        block_on(Dashboard::new(DashboardConfig::DEFAULT, RamStorage::new()))
    }

    #[test]
    fn test_frame_follows_telemetry() {
        let mut dash = dashboard();
        assert_eq!(dash.frame().primary, Primary::NoData);

        assert_eq!(
            dash.ingest(&gids_frame(111)),
            DecodeOutcome::Updated(Signal::Gids)
        );
        let frame = dash.frame();
        assert_eq!(frame.primary, Primary::Soc(50));
        assert_eq!(frame.row(0), "111 Gids");
    }

    #[test]
    fn test_bad_frame_keeps_last_value() {
        let mut dash = dashboard();
        dash.ingest(&gids_frame(150));

        let truncated = BusFrame::standard(0x5BC, &[0x25]).unwrap();
        assert!(matches!(
            dash.ingest(&truncated),
            DecodeOutcome::Dropped(DecodeError::Truncated { .. })
        ));
        assert_eq!(
            dash.ingest(&gids_frame(0x3FF)),
            DecodeOutcome::Dropped(DecodeError::NotReady(Signal::Gids))
        );
        assert_eq!(dash.frame().row(0), "150 Gids");
    }

    #[test]
    fn test_button_pages_and_page_survives_power_cycle() {
        let mut dash = dashboard();
        block_on(dash.sample_button(true, 0));
        assert_eq!(
            block_on(dash.sample_button(false, 120)),
            Transition::PageChanged { from: 0, to: 1 }
        );
        block_on(dash.sample_button(true, 500));
        block_on(dash.sample_button(false, 700));
        assert_eq!(dash.current_page(), 2);

        let storage = dash.into_storage();
        let restored = block_on(Dashboard::new(DashboardConfig::DEFAULT, storage));
        assert_eq!(restored.current_page(), 2);
        assert_eq!(restored.frame().page, 2);
    }

    #[test]
    fn test_long_press_requests_restart() {
        let mut dash = dashboard();
        block_on(dash.handle_event(PageEvent::Advance));
        block_on(dash.sample_button(true, 0));
        assert_eq!(block_on(dash.sample_button(true, 2000)), Transition::RestartRequested);
        assert!(dash.restart_pending());

        let restored = block_on(Dashboard::new(DashboardConfig::DEFAULT, dash.into_storage()));
        assert_eq!(restored.current_page(), 0);
        assert!(!restored.restart_pending());
    }

    #[test]
    fn test_panel_gesture_pages() {
        let mut dash = dashboard();
        let mut snapshot = PanelSnapshot {
            gear_neutral: true,
            ac_on: true,
            recirculation: true,
            fan_speed: 1,
        };
        assert_eq!(block_on(dash.sample_panel(snapshot)), Transition::Unchanged);
        snapshot.fan_speed = 2;
        assert_eq!(
            block_on(dash.sample_panel(snapshot)),
            Transition::PageChanged { from: 0, to: 1 }
        );
        snapshot.fan_speed = 7;
        assert_eq!(block_on(dash.sample_panel(snapshot)), Transition::RestartRequested);
    }

    #[test]
    fn test_low_charge_inverts_on_any_page() {
        let mut dash = dashboard();
        block_on(dash.handle_event(PageEvent::Advance));
        block_on(dash.handle_event(PageEvent::Advance));
        dash.ingest(&gids_frame(20));

        let frame = dash.frame();
        assert!(frame.is_inverted());
        assert_eq!(frame.page, 2);
        assert_eq!(dash.current_page(), 2);
    }
}

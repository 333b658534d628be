//! Display cycle
//!
//! One loop does everything, once per tick:
//! 1. drain pending bus frames into the dashboard
//! 2. sample the page button and apply any page event
//! 3. compose, render and flush a frame

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};
use leafsoc_core::{Dashboard, Transition};
use leafsoc_display::{render_frame, DisplayBackend};
use leafsoc_hal::{ActiveLowButton, BusReceiver, ByteStorage, InputPin, StorageError};
use leafsoc_protocol::DecodeOutcome;

/// Upper bound on frames taken per tick so a busy bus cannot starve the
/// display
const MAX_FRAMES_PER_CYCLE: usize = 64;

pub async fn run<B, D, S, P>(
    mut dashboard: Dashboard<S>,
    mut bus: B,
    mut display: D,
    button: ActiveLowButton<P>,
    period: Duration,
) -> !
where
    B: BusReceiver,
    D: DisplayBackend,
    S: ByteStorage,
    P: InputPin,
{
    info!("Display cycle started ({} ms)", period.as_millis());

    let mut ticker = Ticker::every(period);
    let mut bus_faulted = false;
    let mut storage_error: Option<StorageError> = None;

    loop {
        drain_bus(&mut dashboard, &mut bus, &mut bus_faulted);

        let now_ms = Instant::now().as_millis() as u32;
        match dashboard.sample_button(button.is_pressed(), now_ms).await {
            Transition::Unchanged => {}
            Transition::PageChanged { from, to } => {
                info!("Page {} -> {}", from, to);
            }
            Transition::RestartRequested => {
                info!("Reset requested, restarting");
                cortex_m::peripheral::SCB::sys_reset();
            }
        }

        let last = dashboard.pages().last_storage_error();
        if last != storage_error {
            match last {
                Some(e) => warn!("Page not saved: {}", e),
                None => info!("Page storage recovered"),
            }
            storage_error = last;
        }

        let frame = dashboard.frame();
        if let Err(e) = render_frame(&mut display, &frame) {
            warn!("Render failed: {}", e);
        }
        if let Err(e) = display.flush().await {
            warn!("Display flush failed: {}", e);
        }

        ticker.next().await;
    }
}

fn drain_bus<B: BusReceiver, S: ByteStorage>(
    dashboard: &mut Dashboard<S>,
    bus: &mut B,
    faulted: &mut bool,
) {
    for _ in 0..MAX_FRAMES_PER_CYCLE {
        match bus.try_receive() {
            Ok(Some(frame)) => {
                *faulted = false;
                match dashboard.ingest(&frame) {
                    DecodeOutcome::Updated(signal) => trace!("Updated {}", signal),
                    DecodeOutcome::Ignored => {}
                    DecodeOutcome::Dropped(e) => debug!("Dropped frame: {}", e),
                }
            }
            Ok(None) => return,
            Err(e) => {
                if !*faulted {
                    warn!("Bus error: {}", e);
                }
                *faulted = true;
                return;
            }
        }
    }
    trace!("Frame budget used up, rest waits for the next tick");
}

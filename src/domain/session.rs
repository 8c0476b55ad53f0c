// Session domain model: laps per driver and fastest-lap selection
use std::cmp::Ordering;

use crate::domain::telemetry::TelemetryTrace;

/// One completed lap with its telemetry trace.
#[derive(Debug, Clone)]
pub struct Lap {
    pub driver: String,
    pub number: u32,
    pub lap_time_s: f64,
    pub trace: TelemetryTrace,
}

/// All laps the timing provider returned for one session.
#[derive(Debug, Clone)]
pub struct SessionData {
    laps: Vec<Lap>,
}

impl SessionData {
    pub fn new(laps: Vec<Lap>) -> Self {
        Self { laps }
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    /// The driver's fastest lap by lap time, or `None` when the driver set
    /// no lap in this session.
    pub fn fastest_lap(&self, driver: &str) -> Option<&Lap> {
        self.laps
            .iter()
            .filter(|lap| lap.driver == driver)
            .min_by(|a, b| {
                a.lap_time_s
                    .partial_cmp(&b.lap_time_s)
                    .unwrap_or(Ordering::Equal)
            })
    }
}

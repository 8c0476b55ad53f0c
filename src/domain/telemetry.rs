// Raw telemetry domain model: time-indexed samples and per-lap traces
use crate::domain::errors::AnalysisError;

/// One raw sensor reading. Units are normalized by ingestion before the
/// sample reaches the core: seconds since lap start, metres from the start
/// line, km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub time_s: f64,
    pub distance_m: f64,
    pub speed_kmh: f64,
}

/// Ordered telemetry for one driver's single lap.
///
/// Construction collapses repeated-distance samples (sensor stalls emit
/// them at near-zero speed, first reading wins) and then requires strictly
/// increasing distance, so a distance-to-time mapping is well defined.
#[derive(Debug, Clone)]
pub struct TelemetryTrace {
    driver: String,
    samples: Vec<TelemetrySample>,
}

impl TelemetryTrace {
    pub fn new(
        driver: impl Into<String>,
        samples: Vec<TelemetrySample>,
    ) -> Result<Self, AnalysisError> {
        let driver = driver.into();

        let mut deduped: Vec<TelemetrySample> = Vec::with_capacity(samples.len());
        for sample in samples {
            let stalled = deduped
                .last()
                .is_some_and(|last| sample.distance_m == last.distance_m);
            if !stalled {
                deduped.push(sample);
            }
        }

        if deduped.len() < 2 {
            return Err(AnalysisError::InvalidTrace {
                driver,
                reason: format!(
                    "need at least 2 samples at distinct distances, got {}",
                    deduped.len()
                ),
            });
        }
        // NaN compares false everywhere, so the monotonicity scan below
        // would wave it through; reject non-finite readings up front.
        if let Some(i) = deduped.iter().position(|s| {
            !(s.time_s.is_finite() && s.distance_m.is_finite() && s.speed_kmh.is_finite())
        }) {
            return Err(AnalysisError::InvalidTrace {
                driver,
                reason: format!("non-finite reading at sample {i}"),
            });
        }
        if let Some(i) = deduped
            .windows(2)
            .position(|w| w[1].distance_m <= w[0].distance_m)
        {
            return Err(AnalysisError::InvalidTrace {
                driver,
                reason: format!("distance not strictly increasing at sample {}", i + 1),
            });
        }

        Ok(Self {
            driver,
            samples: deduped,
        })
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    /// Furthest distance this lap's telemetry reaches.
    pub fn max_distance_m(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.distance_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time_s: f64, distance_m: f64, speed_kmh: f64) -> TelemetrySample {
        TelemetrySample {
            time_s,
            distance_m,
            speed_kmh,
        }
    }

    #[test]
    fn test_collapses_repeated_distances_keeping_first() {
        let trace = TelemetryTrace::new(
            "VER",
            vec![
                sample(0.0, 0.0, 0.0),
                sample(0.5, 10.0, 120.0),
                sample(0.6, 10.0, 121.0),
                sample(1.0, 20.0, 140.0),
            ],
        )
        .unwrap();

        assert_eq!(trace.samples().len(), 3);
        assert_eq!(trace.samples()[1].speed_kmh, 120.0);
    }

    #[test]
    fn test_rejects_trace_with_fewer_than_two_distinct_samples() {
        let result = TelemetryTrace::new(
            "VER",
            vec![sample(0.0, 5.0, 100.0), sample(0.1, 5.0, 100.0)],
        );
        assert!(matches!(result, Err(AnalysisError::InvalidTrace { .. })));
    }

    #[test]
    fn test_rejects_decreasing_distance() {
        let result = TelemetryTrace::new(
            "SAI",
            vec![
                sample(0.0, 0.0, 0.0),
                sample(0.5, 10.0, 100.0),
                sample(1.0, 8.0, 100.0),
            ],
        );
        assert!(matches!(result, Err(AnalysisError::InvalidTrace { .. })));
    }

    #[test]
    fn test_rejects_non_finite_readings() {
        let result = TelemetryTrace::new(
            "VER",
            vec![
                sample(0.0, 0.0, 100.0),
                sample(0.5, f64::NAN, 110.0),
                sample(1.0, 20.0, 120.0),
            ],
        );
        assert!(matches!(result, Err(AnalysisError::InvalidTrace { .. })));
    }

    #[test]
    fn test_max_distance_is_last_sample() {
        let trace = TelemetryTrace::new(
            "VER",
            vec![sample(0.0, 0.0, 0.0), sample(1.0, 57.3, 180.0)],
        )
        .unwrap();
        assert_eq!(trace.max_distance_m(), 57.3);
    }
}

//! Summary figures for the sensor dashboard.

use crate::SensorReading;

/// Concentration at which the gauge is full and the server starts alerting.
pub const AMMONIA_THRESHOLD_PPM: f64 = 15.0;
pub const MEDIUM_LEVEL_PPM: f64 = 4.0;
pub const HIGH_LEVEL_PPM: f64 = 6.0;
pub const RECENT_READINGS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Low,
    Medium,
    High,
}

impl AlertLevel {
    pub fn from_ppm(ppm: f64) -> Self {
        if ppm > HIGH_LEVEL_PPM {
            AlertLevel::High
        } else if ppm > MEDIUM_LEVEL_PPM {
            AlertLevel::Medium
        } else {
            AlertLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertLevel::Low => "LOW",
            AlertLevel::Medium => "MEDIUM",
            AlertLevel::High => "HIGH",
        }
    }

    /// Band name used by the distribution chart.
    pub fn band(&self) -> &'static str {
        match self {
            AlertLevel::Low => "Safe",
            AlertLevel::Medium => "Warning",
            AlertLevel::High => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingStats {
    pub latest: SensorReading,
    pub count: usize,
    pub average_ppm: f64,
    pub max_ppm: f64,
    pub alert_level: AlertLevel,
    /// Latest concentration as a share of the threshold, capped at 100.
    pub gauge_percent: f64,
    /// Number of readings per band: `[safe, warning, critical]`.
    pub distribution: [usize; 3],
}

impl ReadingStats {
    /// `None` for an empty series. Readings are expected oldest first.
    pub fn from_readings(readings: &[SensorReading]) -> Option<Self> {
        let latest = readings.last()?.clone();
        let count = readings.len();

        let total: f64 = readings.iter().map(|r| r.ammonia_ppm).sum();
        let max_ppm = readings
            .iter()
            .map(|r| r.ammonia_ppm)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut distribution = [0usize; 3];
        for reading in readings {
            let slot = match AlertLevel::from_ppm(reading.ammonia_ppm) {
                AlertLevel::Low => 0,
                AlertLevel::Medium => 1,
                AlertLevel::High => 2,
            };
            distribution[slot] += 1;
        }

        Some(Self {
            alert_level: AlertLevel::from_ppm(latest.ammonia_ppm),
            gauge_percent: (latest.ammonia_ppm / AMMONIA_THRESHOLD_PPM * 100.0).clamp(0.0, 100.0),
            average_ppm: total / count as f64,
            max_ppm,
            count,
            distribution,
            latest,
        })
    }
}

/// The last `n` readings, newest first.
pub fn recent(readings: &[SensorReading], n: usize) -> Vec<SensorReading> {
    readings.iter().rev().take(n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ppm: f64, ts: &str) -> SensorReading {
        SensorReading {
            ammonia_ppm: ppm,
            temperature: 28.5,
            humidity: 61.0,
            timestamp: ts.into(),
        }
    }

    #[test]
    fn test_alert_bands() {
        assert_eq!(AlertLevel::from_ppm(4.0), AlertLevel::Low);
        assert_eq!(AlertLevel::from_ppm(4.1), AlertLevel::Medium);
        assert_eq!(AlertLevel::from_ppm(6.0), AlertLevel::Medium);
        assert_eq!(AlertLevel::from_ppm(6.5), AlertLevel::High);
    }

    #[test]
    fn test_stats_over_series() {
        let series = vec![reading(2.0, "a"), reading(8.0, "b"), reading(5.0, "c")];
        let stats = ReadingStats::from_readings(&series).unwrap();

        assert_eq!(stats.latest.timestamp, "c");
        assert_eq!(stats.count, 3);
        assert_eq!(stats.average_ppm, 5.0);
        assert_eq!(stats.max_ppm, 8.0);
        assert_eq!(stats.alert_level, AlertLevel::Medium);
        assert!((stats.gauge_percent - 33.333).abs() < 0.01);
        assert_eq!(stats.distribution, [1, 1, 1]);
    }

    #[test]
    fn test_gauge_is_capped() {
        let stats = ReadingStats::from_readings(&[reading(40.0, "x")]).unwrap();
        assert_eq!(stats.gauge_percent, 100.0);
        assert_eq!(stats.alert_level, AlertLevel::High);
    }

    #[test]
    fn test_empty_series() {
        assert!(ReadingStats::from_readings(&[]).is_none());
    }

    #[test]
    fn test_recent_newest_first() {
        let series: Vec<_> = (0..15).map(|i| reading(i as f64, &i.to_string())).collect();
        let last = recent(&series, RECENT_READINGS);
        assert_eq!(last.len(), 10);
        assert_eq!(last[0].timestamp, "14");
        assert_eq!(last[9].timestamp, "5");
    }
}

//! Busy-time buckets keyed by (café, weekday, hour).

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Busy level assigned to a bucket created by its first visit.
pub const DEFAULT_BUSY_LEVEL: u8 = 50;

/// Occupancy estimate for one café at one hour of one weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusyTime {
    pub id: String,
    pub cafe_id: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    /// 0..=23
    pub hour: u8,
    /// Heuristic 0..=100
    pub busy_level: u8,
    pub sample_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl BusyTime {
    /// Deterministic bucket id, so upserts find the existing row by key.
    pub fn bucket_id(cafe_id: &str, day_of_week: u8, hour: u8) -> String {
        format!("busy-{}-{}-{}", cafe_id, day_of_week, hour)
    }

    /// (weekday from Sunday, hour) of a UTC timestamp.
    pub fn slot_of(time: DateTime<Utc>) -> (u8, u8) {
        (
            time.weekday().num_days_from_sunday() as u8,
            time.hour() as u8,
        )
    }

    pub fn first_sample(cafe_id: &str, day_of_week: u8, hour: u8, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::bucket_id(cafe_id, day_of_week, hour),
            cafe_id: cafe_id.to_string(),
            day_of_week,
            hour,
            busy_level: DEFAULT_BUSY_LEVEL,
            sample_count: 1,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slot_of_uses_sunday_zero() {
        // 2024-10-27 was a Sunday
        let sunday = Utc.with_ymd_and_hms(2024, 10, 27, 9, 30, 0).unwrap();
        assert_eq!(BusyTime::slot_of(sunday), (0, 9));
        let saturday = Utc.with_ymd_and_hms(2024, 11, 2, 23, 59, 59).unwrap();
        assert_eq!(BusyTime::slot_of(saturday), (6, 23));
    }

    #[test]
    fn test_bucket_id_format() {
        assert_eq!(BusyTime::bucket_id("cafe-1", 3, 14), "busy-cafe-1-3-14");
    }
}

//! Business hours configuration
//!
//! Per-weekday opening windows, stored as part of the app settings row.
//! Times are `"HH:MM"` strings; a closed day keeps its last-known window.

use serde::{Deserialize, Serialize};

/// Opening window for one weekday
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayHours {
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHours {
    pub fn new(open: &str, close: &str) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
            closed: false,
        }
    }
}

/// Weekly schedule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusinessHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            monday: DayHours::new("09:00", "22:00"),
            tuesday: DayHours::new("09:00", "22:00"),
            wednesday: DayHours::new("09:00", "22:00"),
            thursday: DayHours::new("09:00", "22:00"),
            friday: DayHours::new("09:00", "23:00"),
            saturday: DayHours::new("10:00", "23:00"),
            sunday: DayHours::new("10:00", "22:00"),
        }
    }
}

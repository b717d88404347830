use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Granularity of the daily grid. Slot boundaries must land on it.
const GRID_STEP_MINUTES: u32 = 5;

/// Error produced when constructing or parsing a [`TimeSlot`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeSlotError {
    #[error("Time slot must look like HH:MM-HH:MM, got '{0}'")]
    Malformed(String),
    #[error("Time slot start {start} must be before end {end}")]
    EmptyOrReversed { start: NaiveTime, end: NaiveTime },
    #[error("Time slot boundary {0} is not on the {GRID_STEP_MINUTES}-minute grid")]
    OffGrid(NaiveTime),
}

/// Half-open interval `[start, end)` within a single day.
///
/// Boundaries are validated onto a fixed 5-minute grid and the canonical
/// string form is `HH:MM-HH:MM` (e.g. `08:00-09:40`). Two assignments occupy
/// the same slot only when their intervals are exactly equal; the conflict
/// rules do not treat overlapping-but-unequal slots as colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Build a slot from validated boundaries.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TimeSlotError> {
        for boundary in [start, end] {
            let on_grid = chrono::Timelike::minute(&boundary) % GRID_STEP_MINUTES == 0
                && chrono::Timelike::second(&boundary) == 0
                && chrono::Timelike::nanosecond(&boundary) == 0;
            if !on_grid {
                return Err(TimeSlotError::OffGrid(boundary));
            }
        }
        if start >= end {
            return Err(TimeSlotError::EmptyOrReversed { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl FromStr for TimeSlot {
    type Err = TimeSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start_str, end_str) = s
            .split_once('-')
            .ok_or_else(|| TimeSlotError::Malformed(s.to_string()))?;
        let start = NaiveTime::parse_from_str(start_str.trim(), "%H:%M")
            .map_err(|_| TimeSlotError::Malformed(s.to_string()))?;
        let end = NaiveTime::parse_from_str(end_str.trim(), "%H:%M")
            .map_err(|_| TimeSlotError::Malformed(s.to_string()))?;
        TimeSlot::new(start, end)
    }
}

// Serialized as the canonical string so the wire format matches what the
// original data set stored in its time_slot column.
impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeSlot, TimeSlotError};
    use chrono::NaiveTime;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_parse_canonical_form() {
        let slot: TimeSlot = "08:00-09:40".parse().unwrap();
        assert_eq!(slot.start(), t(8, 0));
        assert_eq!(slot.end(), t(9, 40));
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let slot: TimeSlot = "10:00 - 11:40".parse().unwrap();
        assert_eq!(slot.start(), t(10, 0));
    }

    #[test]
    fn test_display_round_trips() {
        let slot: TimeSlot = "13:00-14:40".parse().unwrap();
        assert_eq!(slot.to_string(), "13:00-14:40");
        assert_eq!(slot.to_string().parse::<TimeSlot>().unwrap(), slot);
    }

    #[test]
    fn test_rejects_missing_separator() {
        assert!(matches!(
            "0800 1000".parse::<TimeSlot>(),
            Err(TimeSlotError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_reversed_interval() {
        assert!(matches!(
            "10:00-08:00".parse::<TimeSlot>(),
            Err(TimeSlotError::EmptyOrReversed { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_interval() {
        assert!("08:00-08:00".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_rejects_off_grid_boundary() {
        assert!(matches!(
            "08:01-09:40".parse::<TimeSlot>(),
            Err(TimeSlotError::OffGrid(_))
        ));
    }

    #[test]
    fn test_equality_is_exact_not_overlap() {
        let a: TimeSlot = "08:00-10:00".parse().unwrap();
        let b: TimeSlot = "09:00-11:00".parse().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_as_string() {
        let slot: TimeSlot = "15:00-16:40".parse().unwrap();
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"15:00-16:40\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<TimeSlot>("\"late-morning\"").is_err());
    }
}

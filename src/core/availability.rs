use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AvailabilitySlot, DayOfWeek};

/// Weekly overlap in minutes treated as a full availability score
const IDEAL_OVERLAP_MINUTES: f64 = 180.0;

/// Minimum overlap before a window is worth suggesting
const MIN_SUGGESTION_OVERLAP_MINUTES: u32 = 60;

/// Allowed duration range for a recurring slot
const MIN_SLOT_MINUTES: u32 = 15;
const MAX_SLOT_MINUTES: u32 = 360;

/// How many weeks ahead to look for suggested windows
const SUGGESTION_WEEKS: i64 = 2;

const MAX_SUGGESTIONS: usize = 3;

/// Validation failures for a single availability slot
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("Invalid time format: {0} (expected HH:MM)")]
    InvalidTimeFormat(String),
    #[error("Slot ends on or before its start")]
    EndBeforeStart,
    #[error("Slot duration of {0} minutes is outside the allowed 15-360 minute range")]
    DurationOutOfRange(u32),
}

/// Concrete playdate window proposed from two children's weekly slots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: DayOfWeek,
}

/// Strict HH:MM check: two-digit 00-23 hour, colon, 00-59 minute
pub fn is_valid_time_format(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if ![bytes[0], bytes[1], bytes[3], bytes[4]]
        .iter()
        .all(|b| b.is_ascii_digit())
    {
        return false;
    }

    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour <= 23 && minute <= 59
}

/// Lenient split of "H:MM"-ish strings into hour and minute
fn parse_hour_minute(time: &str) -> Option<(u32, u32)> {
    let (hour, minute) = time.split_once(':')?;
    Some((hour.parse().ok()?, minute.parse().ok()?))
}

fn time_to_minutes(time: &str) -> Option<u32> {
    let (hour, minute) = parse_hour_minute(time)?;
    hour.checked_mul(60)?.checked_add(minute)
}

/// Overlap in minutes between two same-day time windows
///
/// Accepts the looser single-digit-hour form ("9:30"). A boundary that does
/// not parse at all, or whose hour overflows the minute scale, contributes
/// no overlap.
pub fn time_overlap_minutes(start1: &str, end1: &str, start2: &str, end2: &str) -> u32 {
    let (Some(s1), Some(e1), Some(s2), Some(e2)) = (
        time_to_minutes(start1),
        time_to_minutes(end1),
        time_to_minutes(start2),
        time_to_minutes(end2),
    ) else {
        return 0;
    };

    e1.min(e2).saturating_sub(s1.max(s2))
}

/// Total weekly overlap in minutes across two children's recurring slots
///
/// Every same-day pair of slots contributes. Slots that overlap each other on
/// the same side accumulate rather than merge, so self-overlapping schedules
/// inflate the total.
pub fn recurring_overlap_minutes(slots_a: &[AvailabilitySlot], slots_b: &[AvailabilitySlot]) -> u32 {
    let mut total = 0;

    for slot_a in slots_a {
        let AvailabilitySlot::Recurring {
            day_of_week: day_a,
            start_time: start_a,
            end_time: end_a,
        } = slot_a
        else {
            continue;
        };

        for slot_b in slots_b {
            let AvailabilitySlot::Recurring {
                day_of_week: day_b,
                start_time: start_b,
                end_time: end_b,
            } = slot_b
            else {
                continue;
            };

            if day_a == day_b {
                total += time_overlap_minutes(start_a, end_a, start_b, end_b);
            }
        }
    }

    total
}

/// Convert weekly overlap minutes into a 0-100 score, full marks at 3 hours
#[inline]
pub fn overlap_to_score(overlap_minutes: u32) -> f64 {
    (f64::from(overlap_minutes) / IDEAL_OVERLAP_MINUTES * 100.0).min(100.0)
}

/// Validate a single slot before it is accepted into a schedule
///
/// The overlap calculators never fail on bad data; this is the gate that
/// keeps bad data out in the first place.
pub fn validate_slot(slot: &AvailabilitySlot) -> Result<(), SlotError> {
    match slot {
        AvailabilitySlot::Recurring {
            start_time,
            end_time,
            ..
        } => {
            for time in [start_time, end_time] {
                if !is_valid_time_format(time) {
                    return Err(SlotError::InvalidTimeFormat(time.clone()));
                }
            }

            let duration = time_overlap_minutes(start_time, end_time, start_time, end_time);
            if duration == 0 {
                return Err(SlotError::EndBeforeStart);
            }
            if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&duration) {
                return Err(SlotError::DurationOutOfRange(duration));
            }
            Ok(())
        }
        AvailabilitySlot::AdHoc {
            start_date_time,
            end_date_time,
        } => {
            if end_date_time <= start_date_time {
                return Err(SlotError::EndBeforeStart);
            }
            Ok(())
        }
    }
}

/// Propose up to three concrete future windows where both children are free
///
/// Looks at the reference week (Monday start) and the week after. Only
/// same-day recurring pairs overlapping by at least an hour qualify, the
/// window is dated from the first child's own slot times, and anything at or
/// before the reference instant is dropped.
pub fn suggested_slots(
    slots_a: &[AvailabilitySlot],
    slots_b: &[AvailabilitySlot],
    reference: DateTime<Utc>,
) -> Vec<SuggestedSlot> {
    let mut suggestions = Vec::new();
    let week_start = reference.date_naive()
        - Duration::days(i64::from(reference.weekday().num_days_from_monday()));

    for week in 0..SUGGESTION_WEEKS {
        for slot_a in slots_a {
            let AvailabilitySlot::Recurring {
                day_of_week,
                start_time,
                end_time,
            } = slot_a
            else {
                continue;
            };

            for slot_b in slots_b {
                let AvailabilitySlot::Recurring {
                    day_of_week: day_b,
                    start_time: start_b,
                    end_time: end_b,
                } = slot_b
                else {
                    continue;
                };

                if day_of_week != day_b {
                    continue;
                }
                if time_overlap_minutes(start_time, end_time, start_b, end_b)
                    < MIN_SUGGESTION_OVERLAP_MINUTES
                {
                    continue;
                }

                let slot_date =
                    week_start + Duration::days(day_of_week.offset_from_monday() + week * 7);
                let (Some(start), Some(end)) = (
                    slot_datetime(slot_date, start_time),
                    slot_datetime(slot_date, end_time),
                ) else {
                    continue;
                };
                if start <= reference {
                    continue;
                }

                suggestions.push(SuggestedSlot {
                    start,
                    end,
                    label: format!(
                        "{} {}",
                        day_of_week.label(),
                        format_time_range(start_time, end_time)
                    ),
                    day_of_week: *day_of_week,
                });
            }
        }
    }

    suggestions.sort_by_key(|s| s.start);
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn slot_datetime(date: NaiveDate, time: &str) -> Option<DateTime<Utc>> {
    let minutes = time_to_minutes(time)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(minutes * 60, 0)?;
    Some(date.and_time(time).and_utc())
}

/// Check whether two ad-hoc slots touch, with closed interval endpoints
pub fn ad_hoc_overlap(a: &AvailabilitySlot, b: &AvailabilitySlot) -> bool {
    let (
        AvailabilitySlot::AdHoc {
            start_date_time: start_a,
            end_date_time: end_a,
        },
        AvailabilitySlot::AdHoc {
            start_date_time: start_b,
            end_date_time: end_b,
        },
    ) = (a, b)
    else {
        return false;
    };

    let within =
        |t: &DateTime<Utc>, lo: &DateTime<Utc>, hi: &DateTime<Utc>| lo <= t && t <= hi;

    within(start_b, start_a, end_a)
        || within(end_b, start_a, end_a)
        || within(start_a, start_b, end_b)
}

/// Render a 24-hour window as a 12-hour display range, "9:00AM - 12:00PM"
pub fn format_time_range(start: &str, end: &str) -> String {
    format!("{} - {}", format_time_12h(start), format_time_12h(end))
}

fn format_time_12h(time: &str) -> String {
    let Some((hour, minute)) = parse_hour_minute(time) else {
        return time.to_string();
    };

    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02}{}", display_hour, minute, period)
}

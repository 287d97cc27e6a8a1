//! # Pregnancy Timeline
//!
//! Derives the week / day / month / countdown figures shown on the home
//! dashboard.
//!
//! Three inputs are supported:
//! - a whole pregnancy week from the user profile ([`PregnancyTimeline::from_week`])
//! - the countdown the service computes ([`PregnancyTimeline::from_countdown`])
//! - a due date and today's date ([`PregnancyTimeline::from_due_date`])
//!
//! Months use the approximation `floor(weeks / 4.3) + 1`. It drifts against
//! calendar months near boundaries and is kept as is.

use chrono::NaiveDate;
use shared::CountdownResponse;

/// Length of a full-term pregnancy in days
pub const FULL_TERM_DAYS: i64 = 280;
const DAYS_PER_WEEK: u32 = 7;
/// Minimum number of digits in the countdown display
pub const COUNTDOWN_DIGITS: usize = 3;

/// Displayable position in the pregnancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PregnancyTimeline {
    pub weeks: u32,
    /// Always in `0..7`
    pub days: u32,
    pub months: u32,
    /// Days until the due date, never negative
    pub days_left: u32,
}

impl PregnancyTimeline {
    /// Timeline from a whole number of weeks. Days are always zero on this
    /// path since the input carries no day component.
    pub fn from_week(pregnancy_week: u32) -> Self {
        let total_days = pregnancy_week.saturating_mul(DAYS_PER_WEEK);
        Self {
            weeks: pregnancy_week,
            days: total_days % DAYS_PER_WEEK,
            months: months_for_weeks(pregnancy_week),
            days_left: 0,
        }
    }

    /// Timeline from the service's countdown. Negative values read as zero,
    /// surplus days carry into weeks, and a missing month count is derived
    /// from the weeks.
    pub fn from_countdown(countdown: &CountdownResponse) -> Self {
        let raw_days = clamp_to_u32(countdown.days);
        let weeks = clamp_to_u32(countdown.weeks).saturating_add(raw_days / DAYS_PER_WEEK);
        let months = match countdown.months {
            Some(months) if months > 0 => clamp_to_u32(months),
            _ => months_for_weeks(weeks),
        };
        Self {
            weeks,
            days: raw_days % DAYS_PER_WEEK,
            months,
            days_left: clamp_to_u32(countdown.days_left),
        }
    }

    /// Timeline from the due date, counting back a full 280-day term
    pub fn from_due_date(due_date: NaiveDate, today: NaiveDate) -> Self {
        let days_left = (due_date - today).num_days().max(0);
        let elapsed = clamp_to_u32((FULL_TERM_DAYS - days_left).max(0));
        let weeks = elapsed / DAYS_PER_WEEK;
        Self {
            weeks,
            days: elapsed % DAYS_PER_WEEK,
            months: months_for_weeks(weeks),
            days_left: clamp_to_u32(days_left),
        }
    }

    /// Attach a countdown to a timeline built from weeks only
    pub fn with_days_left(mut self, days_left: u32) -> Self {
        self.days_left = days_left;
        self
    }

    /// Total days into the pregnancy
    pub fn total_days(&self) -> u32 {
        self.weeks
            .saturating_mul(DAYS_PER_WEEK)
            .saturating_add(self.days)
    }

    /// Digits for the countdown boxes, see [`countdown_digits`]
    pub fn countdown_digits(&self) -> Vec<u8> {
        countdown_digits(self.days_left)
    }

    /// "Bạn đang ở tháng thứ N của thai kỳ"
    pub fn month_summary(&self) -> String {
        format!("Bạn đang ở tháng thứ {} của thai kỳ", self.months)
    }

    /// "W tuần D ngày (T ngày)"
    pub fn week_summary(&self) -> String {
        format!("{} tuần {} ngày ({} ngày)", self.weeks, self.days, self.total_days())
    }
}

/// `floor(weeks / 4.3) + 1`, computed exactly as `weeks * 10 / 43 + 1`
pub fn months_for_weeks(weeks: u32) -> u32 {
    let tenths = u64::from(weeks) * 10;
    u32::try_from(tenths / 43 + 1).unwrap_or(u32::MAX)
}

/// Decimal digits of `days_left`, left-padded with zeros to three entries.
/// Larger values keep all their digits.
pub fn countdown_digits(days_left: u32) -> Vec<u8> {
    let mut digits: Vec<u8> = days_left
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    while digits.len() < COUNTDOWN_DIGITS {
        digits.insert(0, 0);
    }
    digits
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Position of today inside [`week_strip`]
pub const TODAY_INDEX: usize = 3;

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Day-of-month numbers from three days before `today` to three days after,
/// with today in the middle
pub fn week_strip(today: NaiveDate) -> [u32; 7] {
    let mut days = [0u32; 7];
    for (slot, offset) in days.iter_mut().zip(-3i64..=3) {
        *slot = (today + Duration::days(offset)).day();
    }
    days
}

/// Format for the date input fields (e.g., "2025-06-13")
pub fn format_form_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format for display in Vietnamese day-first order (e.g., "13/06/2025")
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a service timestamp for display, leaving unparseable input untouched
pub fn format_service_timestamp(value: &str) -> String {
    shared::parse_service_date(value)
        .map(format_display_date)
        .unwrap_or_else(|| value.to_string())
}

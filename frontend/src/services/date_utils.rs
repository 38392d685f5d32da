use chrono::NaiveDate;

/// Build a date from JavaScript-style parts (0-based month)
pub fn date_from_js_parts(year: u32, month0: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month0 + 1, day)
}

/// Today's date in the browser's local timezone
pub fn today_local() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    date_from_js_parts(now.get_full_year(), now.get_month(), now.get_date()).unwrap_or_default()
}

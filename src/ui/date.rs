//! Footer date stamp

pub const DATE_ELEMENT_ID: &str = "current-date";

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// en-US long date, e.g. "October 18, 2026". `month` is 0-based like JS `Date`.
pub fn format_long_date(year: i32, month: u32, day: u32) -> Option<String> {
    let name = MONTHS.get(month as usize)?;
    if !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{} {}, {}", name, day, year))
}

/// Write today's date into `#current-date`, if the page has one
#[cfg(target_arch = "wasm32")]
pub fn stamp_current_date(document: &web_sys::Document) {
    let Some(element) = document.get_element_by_id(DATE_ELEMENT_ID) else {
        return;
    };
    let now = js_sys::Date::new_0();
    if let Some(text) = format_long_date(now.get_full_year() as i32, now.get_month(), now.get_date()) {
        element.set_text_content(Some(&text));
    }
}

//! Display formatting for minor-unit amounts (sen → "RM" figures).

/// `15000` → `"150.00"`.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Like [`format_price`] but drops `.00` on whole amounts: `15000` → `"150"`.
pub fn format_price_whole(cents: i64) -> String {
    if cents % 100 == 0 {
        (cents / 100).to_string()
    } else {
        format_price(cents)
    }
}

/// Unit the model's output is expressed in: ten-thousands of views.
pub const VIEW_UNIT: &str = "万";

/// Render a view count with thousands separators and two fraction digits,
/// e.g. `1234567.891` becomes `"1,234,567.89"`.
///
/// Non-finite values are rendered with their plain `Display` form.
#[must_use]
pub fn format_views(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    if value.is_sign_negative() && value != 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push('.');
    grouped.push_str(frac_part);
    grouped
}

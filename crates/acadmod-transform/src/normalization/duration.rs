//! ISO 8601 exam durations.
//!
//! Exam schedules publish durations as free text (`"2 hrs"`, `"1.5h"`,
//! `"2 hours 30 mins"`, `"90 min"`). They are converted to the time part of an
//! ISO 8601 duration: `PT2H`, `PT1H30M`.

/// Format an exam duration as ISO 8601.
///
/// Returns `None` when the value is empty or cannot be read as a duration.
///
/// # Supported input formats:
/// - Already ISO 8601 (e.g., "PT2H", "PT1H30M")
/// - Hours and/or minutes with a unit (e.g., "2 hrs", "1.5h", "2 hours 30 mins")
pub fn format_iso8601_duration(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_iso8601_duration(trimmed) {
        return Some(trimmed.to_ascii_uppercase());
    }

    let minutes = parse_text_minutes(trimmed)?;
    Some(format_minutes(minutes))
}

/// Check whether a string is already an ISO 8601 time duration.
fn is_iso8601_duration(value: &str) -> bool {
    let upper = value.to_ascii_uppercase();
    let Some(rest) = upper.strip_prefix("PT") else {
        return false;
    };
    !rest.is_empty()
        && rest.chars().any(|c| "HMS".contains(c))
        && rest
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || "HMS".contains(c))
}

/// Sum `<number><unit>` tokens into whole minutes.
fn parse_text_minutes(value: &str) -> Option<u32> {
    let lower = value.to_ascii_lowercase();
    let mut chars = lower.chars().peekable();
    let mut total = 0.0_f64;
    let mut seen = false;

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let number: String = std::iter::from_fn(|| chars.next_if(|c| c.is_ascii_digit() || *c == '.')).collect();
        let amount: f64 = number.parse().ok()?;
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let unit: String = std::iter::from_fn(|| chars.next_if(char::is_ascii_alphabetic)).collect();
        // Allow "2 hrs." and "2 hrs, 30 mins".
        while chars.next_if(|c| *c == '.' || *c == ',').is_some() {}

        let factor = match unit.as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" => 60.0,
            "m" | "min" | "mins" | "minute" | "minutes" => 1.0,
            _ => return None,
        };
        total += amount * factor;
        seen = true;
    }

    if !seen || total <= 0.0 {
        return None;
    }
    Some(total.round() as u32)
}

fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let minutes = minutes % 60;
    match (hours, minutes) {
        (0, m) => format!("PT{m}M"),
        (h, 0) => format!("PT{h}H"),
        (h, m) => format!("PT{h}H{m}M"),
    }
}

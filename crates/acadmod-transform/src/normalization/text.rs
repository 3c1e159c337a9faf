//! Text cleaning and casing.

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn clean(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Like [`clean`], but an empty result becomes `None`.
pub fn clean_opt(value: Option<&str>) -> Option<String> {
    value.map(clean).filter(|cleaned| !cleaned.is_empty())
}

/// Lower-cases the text and upper-cases the first character of each word.
///
/// Words start at the beginning of the text and after whitespace or `-`.
pub fn titleize(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = ch.is_whitespace() || ch == '-';
    }
    out
}

/// Title-cases text written entirely in upper case; leaves mixed case alone.
pub fn titleize_if_upper(value: &str) -> String {
    let has_letters = value.chars().any(char::is_alphabetic);
    let has_lower = value.chars().any(char::is_lowercase);
    if has_letters && !has_lower {
        titleize(value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_whitespace() {
        assert_eq!(clean("  Programming \n  Methodology\t"), "Programming Methodology");
        assert_eq!(clean_opt(Some("   ")), None);
        assert_eq!(clean_opt(None), None);
    }

    #[test]
    fn titleize_handles_hyphens() {
        assert_eq!(titleize("MONDAY"), "Monday");
        assert_eq!(titleize("SECTIONAL TEACHING"), "Sectional Teaching");
        assert_eq!(titleize("co-LECTURER"), "Co-Lecturer");
        assert_eq!(titleize("EVERY WEEK"), "Every Week");
    }

    #[test]
    fn only_all_caps_text_is_recased() {
        assert_eq!(titleize_if_upper("COMPUTER SCIENCE"), "Computer Science");
        assert_eq!(titleize_if_upper("Introduction to NUS"), "Introduction to NUS");
        assert_eq!(titleize_if_upper("1234"), "1234");
    }
}

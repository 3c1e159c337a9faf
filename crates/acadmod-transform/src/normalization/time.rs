/// Normalizes a lesson time to four digits.
///
/// Non-digits are dropped, short values are left-padded with zeros and long
/// values keep their last four digits, so `"800"` becomes `"0800"`.
pub fn normalize_time(value: &str) -> String {
    let padded: String = format!(
        "0000{}",
        value.chars().filter(char::is_ascii_digit).collect::<String>()
    );
    padded[padded.len() - 4..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pads_and_truncates() {
        assert_eq!(normalize_time("800"), "0800");
        assert_eq!(normalize_time("1430"), "1430");
        assert_eq!(normalize_time(""), "0000");
        assert_eq!(normalize_time("08:00"), "0800");
        assert_eq!(normalize_time("012345"), "2345");
    }

    proptest! {
        #[test]
        fn always_four_ascii_digits(input in ".*") {
            let time = normalize_time(&input);
            prop_assert_eq!(time.len(), 4);
            prop_assert!(time.chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn four_digit_times_are_fixed_points(hour in 0u32..24, minute in 0u32..60) {
            let time = format!("{hour:02}{minute:02}");
            prop_assert_eq!(normalize_time(&time), time);
        }
    }
}

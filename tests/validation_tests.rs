#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use sober_streak_bot::utils::validation::*;

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        let cases = [
            ("2025-08-12", (2025, 8, 12)),
            ("2024-02-29", (2024, 2, 29)),
            ("1999-12-31", (1999, 12, 31)),
            ("2030-01-01", (2030, 1, 1)),
        ];

        for (input, (y, m, d)) in cases {
            assert_eq!(
                parse_drink_date(input),
                DateInput::Valid(NaiveDate::from_ymd_opt(y, m, d).unwrap()),
                "Should accept date: {}",
                input
            );
        }
    }

    #[test]
    fn test_date_shaped_but_impossible() {
        let invalid = ["2025-13-40", "2025-02-30", "2023-02-29", "2025-00-10", "2025-04-31"];

        for input in invalid {
            assert!(is_date_shaped(input), "Should look like a date: {}", input);
            assert_eq!(parse_drink_date(input), DateInput::Invalid, "Should reject: {}", input);
        }
    }

    #[test]
    fn test_not_a_date_is_ignored() {
        let ignored = [
            "",
            "hello",
            "/start",
            "2025-8-12",
            "25-08-12",
            "2025/08/12",
            "2025-08-12 ",
            " 2025-08-12",
            "2025-08-123",
            "12-08-2025",
            "2025-08-12T00:00:00",
            "２０２５-０８-１２",
        ];

        for input in ignored {
            assert!(!is_date_shaped(input), "Should not look like a date: {:?}", input);
            assert_eq!(parse_drink_date(input), DateInput::NotADate);
        }
    }
}

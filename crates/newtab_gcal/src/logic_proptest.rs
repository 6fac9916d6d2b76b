#[cfg(test)]
mod tests {
    use crate::logic::day_bounds;
    use chrono::{DateTime, Duration, Utc};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_window_contains_now(
            secs in 0i64..4_000_000_000i64,
            offset_minutes in -720i32..=840i32,
        ) {
            let now = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
            let (start, end) = day_bounds(now, offset_minutes).unwrap();

            prop_assert!(start <= now);
            prop_assert!(now <= end);
        }

        #[test]
        fn test_window_spans_one_day_minus_a_millisecond(
            secs in 0i64..4_000_000_000i64,
            offset_minutes in -720i32..=840i32,
        ) {
            let now = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
            let (start, end) = day_bounds(now, offset_minutes).unwrap();

            prop_assert_eq!(end - start, Duration::days(1) - Duration::milliseconds(1));
            prop_assert_eq!(start.offset().local_minus_utc(), offset_minutes * 60);
        }
    }
}

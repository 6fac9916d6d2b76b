#[cfg(test)]
mod tests {
    use crate::timeline::{day_percent, layout, MIN_WIDTH_PERCENT};
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use newtab_common::{CalendarEvent, EventDateTime};
    use proptest::prelude::*;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn instant(secs: i64) -> DateTime<FixedOffset> {
        offset().timestamp_opt(secs, 0).unwrap()
    }

    fn event(id: usize, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            summary: format!("event {}", id),
            start: EventDateTime {
                date_time: Some(start),
                date: None,
            },
            end: EventDateTime {
                date_time: Some(end),
                date: None,
            },
        }
    }

    proptest! {
        #[test]
        fn test_day_percent_in_range(secs in 0i64..4_000_000_000i64) {
            let p = day_percent(&instant(secs));
            prop_assert!((0.0..100.0).contains(&p));
        }

        #[test]
        fn test_day_percent_monotonic_within_a_day(
            day in 0i64..40_000i64,
            a in 0i64..86_400i64,
            b in 0i64..86_400i64,
        ) {
            let midnight = offset()
                .from_local_datetime(&instant(day * 86_400).date_naive().and_hms_opt(0, 0, 0).unwrap())
                .unwrap();
            let (early, late) = if a <= b { (a, b) } else { (b, a) };

            prop_assert!(
                day_percent(&(midnight + Duration::seconds(early)))
                    <= day_percent(&(midnight + Duration::seconds(late)))
            );
        }

        #[test]
        fn test_bars_have_floor_width_and_exact_left(
            starts in prop::collection::vec(0i64..2_000_000_000i64, 0..20),
            lengths in prop::collection::vec(0i64..20_000i64, 20),
            now_secs in 0i64..2_000_000_000i64,
        ) {
            let events: Vec<_> = starts
                .iter()
                .zip(&lengths)
                .enumerate()
                .map(|(i, (start, len))| event(i, instant(*start), instant(start + len)))
                .collect();

            let layout = layout(&events, &instant(now_secs));

            prop_assert_eq!(layout.bars.len(), events.len());
            for (bar, event) in layout.bars.iter().zip(&events) {
                prop_assert!(bar.width >= MIN_WIDTH_PERCENT);
                prop_assert_eq!(bar.left, day_percent(&event.start.date_time.unwrap()));
            }
        }

        #[test]
        fn test_only_timed_events_are_rendered(flags in prop::collection::vec(any::<bool>(), 0..30)) {
            let base = instant(1_700_000_000);
            let events: Vec<_> = flags
                .iter()
                .enumerate()
                .map(|(i, timed)| {
                    let mut e = event(i, base, base + Duration::minutes(30));
                    if !*timed {
                        e.start = EventDateTime { date_time: None, date: Some(base.date_naive()) };
                        e.end = EventDateTime { date_time: None, date: base.date_naive().succ_opt() };
                    }
                    e
                })
                .collect();

            let expected = flags.iter().filter(|t| **t).count();
            prop_assert_eq!(layout(&events, &base).bars.len(), expected);
        }
    }
}

//! Property tests for moon phase estimation, filtering and day grouping

mod helpers;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use helpers::*;
use astroclub::calendar::{
    events_for_day, filter_events, group_by_day, moon_phase, FilterCriteria, MoonPhase,
};
use astroclub::models::{CalendarEvent, EventType};

fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(1.0 - d)
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    // 1800-01-01 to roughly 2200
    (0i64..146_000).prop_map(|offset| date(1800, 1, 1) + Duration::days(offset))
}

fn any_event() -> impl Strategy<Value = CalendarEvent> {
    (
        1i64..1000,
        0usize..EventType::ALL.len(),
        0i64..(60 * 24 * 60),
        prop::option::of(0i64..(60 * 24 * 5)),
        prop::collection::vec(prop::sample::select(vec!["dob-8", "refractor-102", "sct-11"]), 0..3),
        prop::collection::vec(prop::sample::select(vec!["amina", "yacine", "lina"]), 0..3),
        prop::collection::vec(prop::sample::select(vec!["moon", "saturn", "m31"]), 0..3),
    )
        .prop_map(|(id, kind, start_offset, duration, telescopes, members, objects)| {
            let start = at(2024, 7, 1, 0, 0) + Duration::minutes(start_offset);
            let mut builder = EventBuilder::new(id, "generated", start).kind(EventType::ALL[kind]);
            if let Some(minutes) = duration {
                builder = builder.until(start + Duration::minutes(minutes));
            }
            for t in telescopes {
                builder = builder.telescope(t, t);
            }
            for m in members {
                builder = builder.member(m, m);
            }
            for o in objects {
                builder = builder.object(o, o);
            }
            builder.build()
        })
}

fn any_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop::collection::vec(prop::sample::select(EventType::ALL.to_vec()), 0..3),
        prop::collection::vec(prop::sample::select(vec!["dob-8", "refractor-102"]), 0..2),
        prop::collection::vec(prop::sample::select(vec!["amina", "lina"]), 0..2),
        prop::collection::vec(prop::sample::select(vec!["saturn", "m31"]), 0..2),
    )
        .prop_map(|(event_types, telescopes, members, objects)| FilterCriteria {
            event_types,
            telescopes: telescopes.into_iter().map(String::from).collect(),
            team_members: members.into_iter().map(String::from).collect(),
            celestial_objects: objects.into_iter().map(String::from).collect(),
        })
}

proptest! {
    #[test]
    fn phase_is_in_unit_interval(day in any_date()) {
        let phase = moon_phase(day);
        prop_assert!((0.0..1.0).contains(&phase), "phase {} out of range", phase);
    }

    #[test]
    fn phase_repeats_after_a_synodic_month(day in any_date()) {
        let phase = moon_phase(day);
        // whole-day steps bracket the 29.53 day period
        prop_assert!(circular_distance(phase, moon_phase(day + Duration::days(29))) < 0.02);
        prop_assert!(circular_distance(phase, moon_phase(day + Duration::days(30))) < 0.02);
    }

    #[test]
    fn empty_criteria_is_identity(events in prop::collection::vec(any_event(), 0..20)) {
        prop_assert_eq!(filter_events(&events, &FilterCriteria::default()), events);
    }

    #[test]
    fn filtering_is_idempotent(
        events in prop::collection::vec(any_event(), 0..20),
        criteria in any_criteria(),
    ) {
        let once = filter_events(&events, &criteria);
        let twice = filter_events(&once, &criteria);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn match_requires_every_restricted_category(event in any_event(), criteria in any_criteria()) {
        let by_type = FilterCriteria { event_types: criteria.event_types.clone(), ..Default::default() };
        let by_telescope = FilterCriteria { telescopes: criteria.telescopes.clone(), ..Default::default() };
        let by_member = FilterCriteria { team_members: criteria.team_members.clone(), ..Default::default() };
        let by_object = FilterCriteria { celestial_objects: criteria.celestial_objects.clone(), ..Default::default() };

        let expected = by_type.matches(&event)
            && by_telescope.matches(&event)
            && by_member.matches(&event)
            && by_object.matches(&event);
        prop_assert_eq!(criteria.matches(&event), expected);
    }

    #[test]
    fn grouping_agrees_with_day_lookup(events in prop::collection::vec(any_event(), 0..20)) {
        let from = date(2024, 7, 1);
        let to = date(2024, 9, 10);
        let buckets = group_by_day(&events, from, to);

        for day in from.iter_days().take_while(|d| *d <= to) {
            let expected: Vec<i64> = events_for_day(&events, day).iter().map(|e| e.id).collect();
            let grouped: Vec<i64> = buckets
                .get(&day)
                .map(|bucket| bucket.iter().map(|e| e.id).collect())
                .unwrap_or_default();
            prop_assert_eq!(grouped, expected);
        }
    }
}

#[test]
fn reference_new_moon_is_near_zero() {
    let phase = moon_phase(date(2000, 1, 6));
    assert!(circular_distance(phase, 0.0) <= 0.03);
}

#[test]
fn full_moon_is_half_a_cycle_after_new_moon() {
    // 2000-01-06 + 15 days, closest whole day to 14.77
    let phase = moon_phase(date(2000, 1, 21));
    assert!((phase - 0.5).abs() <= 0.03);
    assert_eq!(MoonPhase::from_phase(phase), MoonPhase::Full);
}

#[test]
fn overnight_event_spans_its_days_only() {
    let events = vec![EventBuilder::new(1, "e1", at(2024, 8, 1, 22, 0))
        .until(at(2024, 8, 2, 2, 0))
        .build()];

    assert_eq!(events_for_day(&events, date(2024, 8, 1)).len(), 1);
    assert!(events_for_day(&events, date(2024, 8, 3)).is_empty());
}

#[test]
fn multi_day_event_appears_in_every_bucket() {
    let events = vec![EventBuilder::new(1, "Star party", at(2024, 8, 5, 0, 0))
        .until(at(2024, 8, 8, 23, 0))
        .all_day()
        .build()];
    let buckets = group_by_day(&events, date(2024, 8, 1), date(2024, 8, 31));

    let days: Vec<NaiveDate> = buckets.keys().copied().collect();
    assert_eq!(days, vec![date(2024, 8, 5), date(2024, 8, 6), date(2024, 8, 7), date(2024, 8, 8)]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(filter_events(&[], &FilterCriteria::default()).is_empty());
    assert!(group_by_day(&[], date(2024, 8, 1), date(2024, 8, 31)).is_empty());
}

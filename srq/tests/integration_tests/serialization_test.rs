// tests/integration_tests/serialization_test.rs
use super::common::date;
use srq::core::cards::{CardAnchorSupplier as _, InlineCardAnchors, align};
use srq::models::{Schedule, ScheduleEncoding};
use srq::{SerializeError, extract, reschedule, serialize};

#[test]
fn test_updating_middle_card_leaves_neighbours_untouched() {
    let text = "first::1 <!--SR:!2024-01-14,1,230-->\nsecond::2 <!--SR:!19738,4,250-->\nthird::3 <!--SR:!01-03-2024,40,270-->\n";
    let extraction = extract(text);
    assert_eq!(extraction.entries.len(), 3);

    let out = reschedule(text, &extraction, 1, Schedule::new(date(2024, 1, 24), 8, 270)).unwrap();
    assert_eq!(
        out,
        "first::1 <!--SR:!2024-01-14,1,230-->\nsecond::2 <!--SR:!2024-01-24,8,270-->\nthird::3 <!--SR:!01-03-2024,40,270-->\n"
    );
}

#[test]
fn test_legacy_update_keeps_legacy_form() {
    let text = "intro\nq::a <!--SR:15-01-2024,3,250-->\noutro\n";
    let out = reschedule(text, &extract(text), 0, Schedule::new(date(2024, 1, 18), 3, 250)).unwrap();
    assert_eq!(out, "intro\nq::a <!--SR:2024-01-18,3,250-->\noutro\n");
    assert_eq!(extract(&out).encoding(), Some(ScheduleEncoding::Legacy));
}

#[test]
fn test_new_note_gets_header_block() {
    let text = "---\r\ntags: [review]\r\n---\r\nBody\r\n";
    let out = reschedule(text, &extract(text), 0, Schedule::new(date(2024, 1, 16), 1, 250)).unwrap();
    assert_eq!(
        out,
        "---\r\ntags: [review]\r\nsr-due: 2024-01-16\r\nsr-interval: 1\r\nsr-ease: 250\r\n---\r\nBody\r\n"
    );

    let extraction = extract(&out);
    assert_eq!(extraction.encoding(), Some(ScheduleEncoding::HeaderBlock));
    assert_eq!(extraction.entries[0].schedule.due, date(2024, 1, 16));
}

#[test]
fn test_stale_spans_are_refused() {
    let text = "q::a <!--SR:!2024-01-15,3,250-->\n";
    let mut entries = extract(text).entries;
    entries[0].schedule.interval = 6;

    let edited = format!("new first line\n{text}");
    assert!(matches!(
        serialize(&edited, &entries),
        Err(SerializeError::SpanConflict { .. })
    ));
}

#[test]
fn test_header_cannot_be_mixed_with_inline_entries() {
    let text = "---\nsr-due: 2024-01-15\nsr-interval: 3\nsr-ease: 250\n---\nq::a <!--SR:!2024-02-01,5,270-->\n";
    let header = extract(text).entries;
    let inline = extract("q::a <!--SR:!2024-02-01,5,270-->\n").entries;
    let mixed = [header, inline].concat();
    assert_eq!(
        serialize(text, &mixed),
        Err(SerializeError::HeaderNotAlone(2))
    );
}

#[test]
fn test_aligned_cards_update_by_anchor() {
    let text = "---\ntags: [review]\n---\nFirst card::1 <!--SR:!2024-01-14,1,230-->\nSecond card ^b2::2 <!--SR:!2024-01-16,4,250-->\n#math Third card::3 <!--SR:!2024-03-01,40,270-->\n";
    let anchors = InlineCardAnchors::default().anchors(text);
    let extraction = extract(text);
    let cards = align(&anchors, &extraction);

    let identities: Vec<&str> = cards.iter().map(|c| c.anchor.identity.as_str()).collect();
    assert_eq!(identities, vec!["Firstcard", "Secondcard", "Thirdcard"]);
    let dues: Vec<_> = cards
        .iter()
        .map(|c| c.entry.map(|e| e.schedule.due))
        .collect();
    assert_eq!(
        dues,
        vec![
            Some(date(2024, 1, 14)),
            Some(date(2024, 1, 16)),
            Some(date(2024, 3, 1)),
        ]
    );

    let second = cards
        .iter()
        .position(|c| c.anchor.identity == "Secondcard")
        .unwrap();
    let mut entries = extraction.entries.clone();
    entries[second].schedule = Schedule::new(date(2024, 1, 24), 8, 270);
    assert_eq!(
        serialize(text, &entries).unwrap(),
        "---\ntags: [review]\n---\nFirst card::1 <!--SR:!2024-01-14,1,230-->\nSecond card ^b2::2 <!--SR:!2024-01-24,8,270-->\n#math Third card::3 <!--SR:!2024-03-01,40,270-->\n"
    );
}

#[test]
fn test_bad_marker_never_shifts_a_review_onto_the_next_card() {
    let text = "a::1 <!--SR:!2024-01-15,x,250-->\nb::2 <!--SR:!2024-01-16,4,260-->\n";
    let extraction = extract(text);
    assert!(extraction.is_new());
    assert_eq!(extraction.malformed, vec![ScheduleEncoding::MultiCardInline]);

    let out = reschedule(text, &extraction, 0, Schedule::new(date(2024, 2, 1), 9, 270)).unwrap();
    assert!(out.ends_with(text), "inline markers were rewritten: {out:?}");
    assert_eq!(extract(&out).encoding(), Some(ScheduleEncoding::HeaderBlock));
}

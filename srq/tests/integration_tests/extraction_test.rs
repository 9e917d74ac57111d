// tests/integration_tests/extraction_test.rs
use super::common::date;
use srq::models::ScheduleEncoding;
use srq::{extract, serialize};

#[test]
fn test_round_trip_every_encoding() {
    let notes = [
        "---\ntitle: Header\nsr-due: 2024-01-15\nsr-interval: 3\nsr-ease: 250\n---\nbody\n",
        "a::1 <!--SR:!2024-01-15,3,250!2024-01-20,5,270-->\nb::2 <!--SR:!2024-01-16,1,230-->\n",
        "q::a <!--SR:15-01-2024,3,250-->\n",
    ];
    for text in notes {
        let extraction = extract(text);
        assert!(!extraction.is_new(), "no schedule found in {text:?}");
        assert_eq!(serialize(text, &extraction.entries).unwrap(), text);
    }
}

#[test]
fn test_priority_is_header_then_multi_then_legacy() {
    let all_three = "---\nsr-due: 2024-01-15\nsr-interval: 3\nsr-ease: 250\n---\na::1 <!--SR:!2024-02-01,5,270-->\nb::2 <!--SR:2024-03-01,9,290-->\n";
    let extraction = extract(all_three);
    assert_eq!(extraction.encoding(), Some(ScheduleEncoding::HeaderBlock));
    assert_eq!(
        extraction.shadowed,
        vec![ScheduleEncoding::MultiCardInline, ScheduleEncoding::Legacy]
    );

    let inline_only = "a::1 <!--SR:!2024-02-01,5,270-->\nb::2 <!--SR:2024-03-01,9,290-->\n";
    let extraction = extract(inline_only);
    assert_eq!(extraction.encoding(), Some(ScheduleEncoding::MultiCardInline));
    assert_eq!(extraction.entries[0].schedule.due, date(2024, 2, 1));
}

#[test]
fn test_crlf_and_lf_read_the_same() {
    let lf = "---\nsr-due: 2024-01-15\nsr-interval: 3\nsr-ease: 250\n---\nbody\n";
    let crlf = lf.replace('\n', "\r\n");

    let from_lf = extract(lf);
    let from_crlf = extract(&crlf);
    assert_eq!(from_lf.entries[0].schedule, from_crlf.entries[0].schedule);
    assert_eq!(serialize(&crlf, &from_crlf.entries).unwrap(), crlf);
}

#[test]
fn test_malformed_markers_make_a_new_note() {
    let extraction = extract("q::a <!--SR:2024-13-45,3,250-->\n");
    assert!(extraction.is_new());
    assert_eq!(extraction.malformed, vec![ScheduleEncoding::Legacy]);
}

#[test]
fn test_day_index_overflow_is_malformed() {
    let extraction = extract("q::a <!--SR:!99999999999,3,250-->\n");
    assert!(extraction.is_new());
    assert_eq!(extraction.malformed, vec![ScheduleEncoding::MultiCardInline]);
}

use chrono::{Local, TimeZone, Utc};
use micro_logger::clock::Clock;
use micro_logger::LogParameters;

#[test]
fn test_default_timestamp_matches_local_date() {
    let clock = Clock::new(&LogParameters::default());
    let before = Local::now().format("[%D").to_string();
    let mut out = String::new();
    let written = clock.render_timestamp(&mut out);

    assert_eq!(written, "[03/09/24 07:05:03.042]".len());
    assert_eq!(&out[..9], before, "Date part should use local time");
    assert!(out.ends_with(']'));
    assert_eq!(out.as_bytes()[18], b'.');
}

#[test]
fn test_custom_millis_pattern() {
    let params = LogParameters::default()
        .with_time_format("%H:%M:%S")
        .with_milliseconds_format(Some(",{ms} "));
    let clock = Clock::new(&params);
    let instant = Utc.timestamp_millis_opt(1_700_000_000_007).unwrap();

    let mut out = String::new();
    clock.render_at(&instant, &mut out);
    assert_eq!(out, "22:13:20,007 ");
}

#[test]
fn test_literal_millis_suffix() {
    let params = LogParameters::default()
        .with_time_format("%Y")
        .with_milliseconds_format(Some(" | "));
    let clock = Clock::new(&params);
    let instant = Utc.timestamp_millis_opt(1_700_000_000_999).unwrap();

    let mut out = String::new();
    assert_eq!(clock.render_at(&instant, &mut out), 7);
    assert_eq!(out, "2023 | ");
}

use super::*;

#[track_caller]
fn roundtrip(input: &str) {
    let (amount, result) = Datetime::munch(input.as_bytes()).unwrap();
    assert_eq!(amount, input.len(), "consumed wrong amount for {input:?}");
    assert_eq!(input, result.to_string(), "roundtrip mismatch for {input:?}");
}

#[track_caller]
fn roundtrip_lossy(input: &str, expected: &str) {
    let result = Datetime::parse(input.as_bytes()).unwrap();
    assert_eq!(expected, result.to_string(), "normalized mismatch for {input:?}");
}

#[track_caller]
fn expect_err(input: &str) {
    let result = Datetime::parse(input.as_bytes());
    assert!(result.is_none(), "expected error for {input:?}, got {result:?}");
}

#[test]
fn roundtrips() {
    let exact = &[
        "2021-11-03T18:05:09Z",
        "2021-11-03T18:05:09+00:00",
        "1999-08-21T06:44:13-11:30",
        "2004-03-09T22:10:00.25+09:00",
        "1985-10-26T01:21:00.000042-08:00",
        "2019-07-04T09:15:30",
        "2010-02-14T20:00:00.987654321",
        "2031-09-30T04:50:59.7Z",
        "2012-12-21",
        "0000-01-01",
        "9999-12-31",
        "18:05:09",
        "03:14:15.9",
        "23:59:60",
        "11:11:11.000001",
        "2022-05-05T05:05:05.50",
    ];
    for input in exact {
        roundtrip(input);
    }

    let lossy: &[(&str, &str)] = &[
        ("2021-11-03 18:05:09Z", "2021-11-03T18:05:09Z"),
        ("1995-05-23 08:00:00", "1995-05-23T08:00:00"),
        ("2021-11-03T18:05Z", "2021-11-03T18:05:00Z"),
        ("2028-02-29 06:30-03:45", "2028-02-29T06:30:00-03:45"),
        ("21:45", "21:45:00"),
        ("2011-06-01t13:37:00z", "2011-06-01T13:37:00Z"),
        (
            "2022-05-05T05:05:05.9876543210123",
            "2022-05-05T05:05:05.987654321",
        ),
    ];
    for (input, expected) in lossy {
        roundtrip_lossy(input, expected);
    }
}

#[test]
fn calendar_is_not_checked() {
    // Only field ranges are validated.
    for input in ["2023-02-30", "2023-04-31", "2023-02-29", "1900-02-29"] {
        roundtrip(input);
    }
}

#[test]
fn rejects_invalid() {
    let cases: &[&str] = &[
        "",
        "1",
        "12:",
        "1979",
        "hello",
        "2023-00-01",
        "2023-13-01",
        "2023-01-00",
        "2023-01-32",
        "2023/01/01",
        "20230101",
        "202-01-01",
        "2023-1-01",
        "24:00:00",
        "00:60:00",
        "00:00:61",
        "07:32:00Z",
        "07:32+01:00",
        "12:30:45.",
        "2023-06-15T",
        "2023-06-15T12",
        "2023-06-15T12:3",
        "2023-06-15T12:30+05",
        "2023-06-15T12:30+24:00",
        "2023-06-15T12:30+00:60",
        "2023-06-15hello",
        "12:30:45 ",
    ];
    for input in cases {
        expect_err(input);
    }
}

#[test]
fn munch_stops_at_trailing_data() {
    let cases: &[(&str, usize)] = &[
        ("2012-12-21later", 10),
        ("06:07:08rest", 8),
        ("2019-07-04T09:15:30.75abc", 22),
        ("2019-07-04T09:15Zxyz", 17),
        ("2019-07-04T09:15:30-02:00]", 25),
        ("2012-12-21 # note", 10),
    ];
    for (input, expected) in cases {
        let (consumed, _) = Datetime::munch(input.as_bytes()).unwrap();
        assert_eq!(consumed, *expected, "wrong consumed for {input:?}");
    }
}

#[test]
fn fields() {
    let dt = Datetime::parse(b"2023-06-15T12:30:45.25-01:15").unwrap();
    assert_eq!(
        dt.date,
        Some(Date {
            year: 2023,
            month: 6,
            day: 15
        })
    );
    let time = dt.time.unwrap();
    assert_eq!((time.hour, time.minute, time.second), (12, 30, 45));
    assert_eq!(time.nanosecond, 250_000_000);
    assert_eq!(time.subsecond_precision(), 2);
    assert!(time.has_seconds());
    assert_eq!(dt.offset, Some(TimeOffset::Custom { minutes: -75 }));

    let dt = Datetime::parse(b"06:07").unwrap();
    assert!(dt.date.is_none());
    assert!(!dt.time.unwrap().has_seconds());
    assert!(dt.offset.is_none());

    let dt = Datetime::parse(b"2012-12-21").unwrap();
    assert!(dt.time.is_none());
}

#[test]
fn from_str() {
    let dt: Datetime = "2021-11-03T18:05:09Z".parse().unwrap();
    assert_eq!(dt.offset, Some(TimeOffset::Z));

    let err = "2021-11-03Y".parse::<Datetime>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidDatetime));
    assert_eq!(err.span, Span::new(0, 11));
}

#[test]
fn randomized_roundtrip() {
    let mut rng = oorandom::Rand32::new(7);
    for _ in 0..5000 {
        let year = rng.rand_range(0..10000);
        let month = rng.rand_range(1..13);
        let day = rng.rand_range(1..32);
        let hour = rng.rand_range(0..24);
        let minute = rng.rand_range(0..60);
        let second = rng.rand_range(0..61);
        let mut text = match rng.rand_range(0..3) {
            0 => format!("{year:04}-{month:02}-{day:02}"),
            1 => format!("{hour:02}:{minute:02}:{second:02}"),
            _ => format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}"),
        };
        if text.contains(':') {
            let digits = rng.rand_range(0..10);
            if digits > 0 {
                let frac = rng.rand_range(0..10u32.pow(digits));
                text.push_str(&format!(".{frac:0>width$}", width = digits as usize));
            }
        }
        if text.contains('T') {
            match rng.rand_range(0..3) {
                0 => text.push('Z'),
                1 => {
                    let h = rng.rand_range(0..24);
                    let m = rng.rand_range(0..60);
                    // `-00:00` normalizes to `+00:00`
                    let negative = (h, m) != (0, 0) && rng.rand_range(0..2) == 0;
                    let sign = if negative { '-' } else { '+' };
                    text.push_str(&format!("{sign}{h:02}:{m:02}"));
                }
                _ => {}
            }
        }
        roundtrip(&text);
    }
}

use cel_mapper::{from_record, unmarshal_event, Error, Event, FieldError};
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Payload {
    #[serde(rename = "json_field")]
    pub field: i32,
}

#[derive(Debug, Default, Event)]
pub struct Sample {
    #[cel("0")]
    unexported_is_ignored: String,
    pub no_cel_tag_is_ignored: String,

    #[cel("2")]
    pub time: DateTime<Utc>,
    #[cel("3")]
    pub kind: String,
    #[cel("0,json")]
    pub number: i64,
    #[cel("1,json")]
    pub json: Payload,
}

#[derive(Debug, Default, Event)]
pub struct BadTag {
    #[cel("b")]
    pub a: String,
}

#[derive(Debug, Default, Event)]
pub struct Unsupported {
    #[cel("0")]
    pub b: Vec<String>,
}

#[derive(Debug, Default, Event)]
pub struct Extra {
    #[cel("0")]
    pub kind: String,
    #[cel("1,json")]
    pub strict: Option<serde_json::Value>,
    #[cel("1,json,noerror")]
    pub lenient: Option<serde_json::Value>,
}

#[derive(Debug, Default, Event)]
pub struct LenientOnly {
    #[cel("0")]
    pub kind: String,
    #[cel("1,json,noerror")]
    pub lenient: Option<serde_json::Value>,
}

#[derive(Debug, Default, Event)]
pub struct Empty;

fn expected_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 7, 5, 12, 45, 0).unwrap() + chrono::Duration::microseconds(987654)
}

#[test]
fn test_unmarshal_event_errors() {
    let record = ["doesn't matter"];

    let cases: Vec<(Result<(), Error>, &str)> = vec![
        (unmarshal_event(&record, ()), "cel: UnmarshalEvent(nil)"),
        (
            unmarshal_event(&record, None::<&mut Empty>),
            "cel: UnmarshalEvent(nil *Empty)",
        ),
        (
            unmarshal_event(&record, 42i32),
            "cel: UnmarshalEvent(non-pointer i32)",
        ),
        (
            unmarshal_event(&record, &mut 42i32),
            "cel: UnmarshalEvent(pointer to non-struct *i32)",
        ),
        (
            unmarshal_event(&record, &mut String::new()),
            "cel: UnmarshalEvent(pointer to non-struct *String)",
        ),
        (
            unmarshal_event(&record, Empty),
            "cel: UnmarshalEvent(non-pointer Empty)",
        ),
        (
            unmarshal_event(&record, &mut BadTag::default()),
            r#"failed to map field a: bad tag value "b": invalid digit found in string"#,
        ),
    ];

    for (result, expected) in cases {
        assert_eq!(result.unwrap_err().to_string(), expected);
    }

    let err = unmarshal_event(&record, &mut Unsupported::default()).unwrap_err();
    assert_eq!(err.field(), Some("b"));
    assert!(matches!(
        err.field_error(),
        Some(FieldError::Unsupported(_))
    ));
    assert_eq!(
        err.to_string(),
        format!(
            "failed to map field b: type {} not implemented",
            std::any::type_name::<Vec<String>>()
        )
    );
}

#[test]
fn test_unmarshal_event() {
    let mut v = Sample::default();
    unmarshal_event(
        &["1234", r#"{"json_field": 42}"#, "1530794700.987654", "CHAN_START"],
        &mut v,
    )
    .unwrap();

    assert_eq!(v.unexported_is_ignored, "");
    assert_eq!(v.no_cel_tag_is_ignored, "");
    assert_eq!(v.time, expected_time());
    assert_eq!(v.kind, "CHAN_START");
    assert_eq!(v.number, 1234);
    assert_eq!(v.json.field, 42);
}

#[test]
fn test_field_table() {
    let mut v = Sample::default();
    let fields = v.fields();

    let names = fields.iter().map(|f| f.name()).collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            "unexported_is_ignored",
            "no_cel_tag_is_ignored",
            "time",
            "kind",
            "number",
            "json"
        ]
    );

    assert_eq!(fields[0].tag(), "0");
    assert!(!fields[0].is_settable());
    assert_eq!(fields[1].tag(), "");
    assert!(fields[2].is_settable());
    assert_eq!(fields[5].tag(), "1,json");
    assert_eq!(<Sample as Event>::NAME, "Sample");
}

#[test]
fn test_from_record() {
    let record = vec![
        "1234".to_string(),
        r#"{"json_field": 7}"#.into(),
        "1530794700.987654".into(),
        "HANGUP".into(),
    ];

    let v: Sample = from_record(&record).unwrap();
    assert_eq!(v.kind, "HANGUP");
    assert_eq!(v.time, expected_time());
    assert_eq!(v.number, 1234);
    assert_eq!(v.json, Payload { field: 7 });

    let err = from_record::<Sample, _>(&record[..2]).unwrap_err();
    assert_eq!(err.field(), Some("time"));
    assert_eq!(
        err.to_string(),
        "failed to map field time: record index 2 out of range (2 fields)"
    );
}

#[test]
fn test_noerror() {
    let record = ["CHAN_END", "{broken"];

    // The first json field fails, after `kind` has already been set.
    let mut v = Extra::default();
    let err = unmarshal_event(&record, &mut v).unwrap_err();
    assert_eq!(err.field(), Some("strict"));
    assert!(matches!(err.field_error(), Some(FieldError::Decode(_))));
    assert_eq!(v.kind, "CHAN_END");
    assert!(v.strict.is_none());

    let mut v = LenientOnly::default();
    unmarshal_event(&record, &mut v).unwrap();
    assert_eq!(v.kind, "CHAN_END");
    assert!(v.lenient.is_none());

    let v: LenientOnly = from_record(&["CHAN_END", r#"{"hangupcause": 16}"#]).unwrap();
    assert_eq!(v.lenient.unwrap()["hangupcause"], 16);
}

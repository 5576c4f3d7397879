use anyhow::{Context, Result};
use cel_mapper::{unmarshal_event, Event};
use chrono::{DateTime, Utc};
use clap::{Arg, ArgAction, Command};

/// A CEL event, in the column order of Asterisk's sample `cel_custom.conf`.
#[derive(Debug, Default, Event)]
pub struct ChannelEvent {
    #[cel("0")]
    pub event_type: String,
    #[cel("1")]
    pub event_time: DateTime<Utc>,
    #[cel("2")]
    pub cid_name: String,
    #[cel("3")]
    pub cid_num: String,
    #[cel("4")]
    pub cid_ani: String,
    #[cel("5")]
    pub cid_rdnis: String,
    #[cel("6")]
    pub cid_dnid: String,
    #[cel("7")]
    pub exten: String,
    #[cel("8")]
    pub context: String,
    #[cel("9")]
    pub channel: String,
    #[cel("10")]
    pub app_name: String,
    #[cel("11")]
    pub app_data: String,
    #[cel("12")]
    pub ama_flags: String,
    #[cel("13")]
    pub account_code: String,
    #[cel("14")]
    pub unique_id: String,
    #[cel("15")]
    pub linked_id: String,
    #[cel("16")]
    pub peer: String,
    #[cel("17")]
    pub user_field: String,
    #[cel("18")]
    pub user_def_type: String,
    #[cel("19,json,noerror")]
    pub extra: Option<serde_json::Value>,
}

fn app() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("input")
                .help("the CEL CSV log to dump")
                .index(1)
                .required(true),
        )
        .arg(
            Arg::new("keep-going")
                .help("log unmappable records and continue, instead of failing")
                .short('k')
                .long("keep-going")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    env_logger::init();
    let matches = app().get_matches();

    // Unwrap safety: clap enforces that "input" is present.
    #[allow(clippy::unwrap_used)]
    let input = matches.get_one::<String>("input").unwrap();
    let keep_going = matches.get_flag("keep-going");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("couldn't open {}", input))?;

    for (idx, record) in reader.records().enumerate() {
        let lineno = idx + 1;
        let record = record?;
        let fields = record.iter().collect::<Vec<_>>();

        let mut event = ChannelEvent::default();
        match unmarshal_event(&fields, &mut event) {
            Ok(()) => println!("{:#?}", event),
            Err(e) if keep_going => log::warn!("line {}: {}", lineno, e),
            Err(e) => return Err(e).with_context(|| format!("line {}", lineno)),
        }
    }

    Ok(())
}

//! Implementation of the `certfill render` command.

use std::path::PathBuf;

use certfill::config::{load_fee_schedule, load_jurisdictions, load_record, load_template};
use certfill::fees::EventType;
use certfill::{
    compile, FieldMap, JurisdictionTable, Locale, Record, RenderedBody, TransformEngine,
    DEFAULT_HOME_COUNTRY,
};
use miette::{miette, IntoDiagnostic, Result};
use tracing::info;

use super::{now_ms, EventArg};
use crate::output::load_report;
use crate::output::table::format_fields_table;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template definition (JSON)
    #[arg(long)]
    pub template: PathBuf,

    /// Record to fill the template from (JSON)
    #[arg(long)]
    pub record: PathBuf,

    /// Output language (e.g., en, bn, fr)
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Jurisdiction table (JSON list of locations)
    #[arg(long)]
    pub jurisdictions: Option<PathBuf>,

    /// Country code of the registering country
    #[arg(long, default_value = DEFAULT_HOME_COUNTRY)]
    pub home_country: String,

    /// Fee schedule; adds the fee and tier message fields
    #[arg(long, requires_all = ["event", "event_date_path"])]
    pub fees: Option<PathBuf>,

    /// Event type for the fee
    #[arg(long, value_enum)]
    pub event: Option<EventArg>,

    /// Record path of the event date (e.g., child.birthDate)
    #[arg(long)]
    pub event_date_path: Option<String>,

    /// Assessment time in epoch milliseconds (defaults to now)
    #[arg(long)]
    pub now_ms: Option<i64>,

    /// Field receiving the formatted fee
    #[arg(long, default_value = "amount")]
    pub amount_field: String,

    /// Field receiving the tier message key
    #[arg(long, default_value = "tierMessage")]
    pub message_field: String,

    /// Print the field map instead of the compiled template
    #[arg(long)]
    pub fields: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<i32> {
    let definition = load_template(&args.template).map_err(|e| load_report(&e))?;
    let record = load_record(&args.record).map_err(|e| load_report(&e))?;
    let jurisdictions = match &args.jurisdictions {
        Some(path) => load_jurisdictions(path).map_err(|e| load_report(&e))?,
        None => JurisdictionTable::new(),
    };

    let engine = TransformEngine::builder()
        .jurisdictions(jurisdictions)
        .home_country(args.home_country.as_str())
        .build();
    let locale = Locale::with_language(args.lang.as_str());

    let fields = engine
        .run(&record, &definition.rules, &locale)
        .map_err(|e| miette!("certificate template misconfigured: {e}"))?
        .merged(fee_fields(&args, &record)?);
    info!(fields = fields.len(), "fields computed");

    if args.fields {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&fields).into_diagnostic()?);
        } else {
            println!("{}", format_fields_table(&fields));
        }
        return Ok(exitcode::OK);
    }

    let rendered = compile(&definition, &fields).map_err(|e| miette!("{e}"))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&rendered).into_diagnostic()?);
    } else {
        match &rendered.body {
            RenderedBody::Markup(text) => println!("{text}"),
            RenderedBody::Document(tree) => {
                println!("{}", serde_json::to_string_pretty(tree).into_diagnostic()?);
            }
        }
    }

    Ok(exitcode::OK)
}

/// Fee fields for the record's event, or nothing when no schedule was given.
fn fee_fields(args: &RenderArgs, record: &Record) -> Result<FieldMap> {
    let (Some(path), Some(event), Some(date_path)) =
        (&args.fees, args.event, args.event_date_path.as_deref())
    else {
        return Ok(FieldMap::new());
    };
    let schedule = load_fee_schedule(path).map_err(|e| load_report(&e))?;
    let event_date = record
        .text(date_path)
        .ok_or_else(|| miette!("record has no event date at '{date_path}'"))?;
    let result = schedule
        .assess(EventType::from(event), &event_date, now_ms(args.now_ms))
        .map_err(|e| miette!("{e}"))?;
    Ok(result.to_fields(&args.amount_field, &args.message_field))
}

//! Table formatting utilities for CLI output.

use certfill::fees::{EventType, FeeSchedule, FeeTierResult};
use certfill::{format_fee, FieldMap};
use comfy_table::{presets, ContentArrangement, Table};

/// Format a field map as a two-column table.
pub fn format_fields_table(fields: &FieldMap) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);

    for (name, value) in fields {
        table.add_row(vec![name.clone(), value.clone()]);
    }

    table
}

/// Format the price table of one event.
pub fn format_tier_table(schedule: &FeeSchedule, event: EventType) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Event", "Days", "Fee"]);

    for range in schedule.ranges(event) {
        let days = match range.end {
            Some(end) => format!("{}-{end}", range.start),
            None => format!("{}+", range.start),
        };
        table.add_row(vec![event.to_string(), days, format_fee(range.value)]);
    }

    table
}

/// Format an assessed fee.
pub fn format_assessment_table(days: i64, result: &FeeTierResult) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["Days elapsed", "Fee", "Message"]);
    table.add_row(vec![
        days.to_string(),
        format_fee(result.amount),
        result.tier_message_key.to_string(),
    ]);
    table
}

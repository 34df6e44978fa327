use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::commands::Listing;
use crate::error::CliError;

pub fn render(listing: &Listing, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_listing(&mut out, listing, format, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_listing<W: Write>(
    out: &mut W,
    listing: &Listing,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(listing)?
            } else {
                serde_json::to_string(listing)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => write_table(out, listing)?,
    }

    Ok(())
}

fn write_table<W: Write>(out: &mut W, listing: &Listing) -> Result<(), CliError> {
    writeln!(out, "screen: {}", listing.screen)?;
    writeln!(out, "count : {}", listing.count)?;

    let index_width = listing.count.saturating_sub(1).to_string().len().max(1);
    let label_width = listing
        .items
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("LABEL".len());

    if !listing.items.is_empty() {
        writeln!(out, "{:>index_width$}  {:<label_width$}  DETAIL", "#", "LABEL")?;
        for (index, row) in listing.items.iter().enumerate() {
            // `{:<width$}` pads by chars, matching the width computed above.
            writeln!(out, "{index:>index_width$}  {:<label_width$}  {}", row.label, row.detail)?;
        }
    }

    if let Some(selected) = &listing.selected {
        writeln!(out, "selected:")?;
        for line in serde_json::to_string_pretty(selected)?.lines() {
            writeln!(out, "  {line}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use listkit_core::{Contact, DomainRecord};

    use super::*;
    use crate::commands::ItemRow;

    fn listing() -> Listing {
        Listing {
            screen: "contacts",
            count: 2,
            items: vec![
                ItemRow {
                    label: String::from("Grace Hopper"),
                    detail: String::from("555-0100"),
                },
                ItemRow {
                    label: String::from("Ada"),
                    detail: String::from("555-0101"),
                },
            ],
            selected: Some(DomainRecord::Contact(
                Contact::new("c-1", "Grace Hopper", "555-0100").expect("valid contact"),
            )),
        }
    }

    fn rendered(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_listing(&mut buffer, &listing(), format, false).expect("render");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn json_output_includes_rows_and_selection() {
        let value: serde_json::Value =
            serde_json::from_str(&rendered(OutputFormat::Json)).expect("valid json");

        assert_eq!(value["screen"], "contacts");
        assert_eq!(value["items"][1]["label"], "Ada");
        assert_eq!(value["selected"]["kind"], "contact");
        assert_eq!(value["selected"]["id"], "c-1");
    }

    #[test]
    fn table_output_aligns_labels() {
        let table = rendered(OutputFormat::Table);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "screen: contacts");
        assert_eq!(lines[2], "#  LABEL         DETAIL");
        assert_eq!(lines[3], "0  Grace Hopper  555-0100");
        assert_eq!(lines[4], "1  Ada           555-0101");
        assert_eq!(lines[5], "selected:");
    }
}

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::pipeline::Valuation;

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    date: &'a str,
    strike_offset: f64,
    underlying: f64,
    rate: f64,
    strike: f64,
    call: f64,
    put: f64,
}

/// One CSV row per scenario and history date.
pub fn write_csv(valuation: &Valuation, writer: impl Write) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for scenario in &valuation.scenarios {
        for (idx, date) in valuation.dates.iter().enumerate() {
            csv_writer.serialize(ReportRow {
                date,
                strike_offset: scenario.strike_offset,
                underlying: valuation.underlying[idx],
                rate: valuation.rates[idx],
                strike: scenario.strikes[idx],
                call: scenario.calls[idx],
                put: scenario.puts[idx],
            })?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}

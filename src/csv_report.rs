use csv::{ReaderBuilder, Writer};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{parse_value, Error, Result};
use crate::estimate::ConfidencePoint;
use crate::scenario::ScenarioBatch;
use crate::summary::CapacitySummary;

#[derive(Serialize)]
struct CurveRow {
    #[serde(rename = "Cumulative confidence (%)")]
    confidence: u8,
    #[serde(rename = "Expected development size (MWe)")]
    capacity: f64,
}

#[derive(Serialize)]
struct SummaryCsvRow<'a> {
    quantity: &'a str,
    unit: &'a str,
    #[serde(rename = "P90")]
    p90: f64,
    #[serde(rename = "P50")]
    p50: f64,
    #[serde(rename = "P10")]
    p10: f64,
    mean: f64,
    log_mean: f64,
    log_std_dev: f64,
}

// One cell of the wide batch table
#[derive(Serialize)]
#[serde(untagged)]
enum BatchCell {
    Confidence(u8),
    Capacity(f64),
}

#[derive(Deserialize)]
struct ScenarioRecord {
    area_p90: String,
    area_p10: String,
    pd_p90: String,
    pd_p10: String,
}

/// Batch inputs read from a scenario file, one sequence per column
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioInputs {
    pub area_p90s: Vec<f64>,
    pub area_p10s: Vec<f64>,
    pub power_density_p90s: Vec<f64>,
    pub power_density_p10s: Vec<f64>,
}

struct CsvReportWriter<W: Write> {
    writer: Writer<W>,
}
impl<W: Write> CsvReportWriter<W> {
    fn write_curve(&mut self, points: &[ConfidencePoint]) -> Result<()> {
        for point in points {
            self.writer.serialize(CurveRow {
                confidence: point.confidence,
                capacity: point.capacity,
            })?;
        }
        Ok(())
    }

    fn write_batch(&mut self, batch: &ScenarioBatch) -> Result<()> {
        self.writer.write_record(batch.headers())?;

        let rows = batch.iter().map(|s| s.curve.len()).max().unwrap_or(0);
        for i in 0..rows {
            let mut record = Vec::with_capacity(2 * batch.len());
            for scenario in batch {
                let point = &scenario.curve[i];
                record.push(BatchCell::Confidence(point.confidence));
                record.push(BatchCell::Capacity(point.capacity));
            }
            self.writer.serialize(record)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &CapacitySummary) -> Result<()> {
        for row in summary.rows().iter() {
            self.writer.serialize(SummaryCsvRow {
                quantity: row.quantity.label(),
                unit: row.quantity.unit(),
                p90: row.p90,
                p50: row.p50,
                p10: row.p10,
                mean: row.mean,
                log_mean: row.log_mean,
                log_std_dev: row.log_std_dev,
            })?;
        }
        Ok(())
    }

    fn flush(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|inner| Error::CsvError(inner.into()))
    }
}

fn report_writer<W: Write>(writer: W) -> CsvReportWriter<W> {
    CsvReportWriter {
        writer: Writer::from_writer(writer),
    }
}

/// Writes a two-column confidence curve, or a selection of its points
pub fn write_curve<W: Write>(writer: W, points: &[ConfidencePoint]) -> Result<()> {
    let mut writer = report_writer(writer);
    writer.write_curve(points)?;
    writer.flush()
}

/// Writes the combined table of a batch, a confidence and a capacity column per scenario
pub fn write_batch<W: Write>(writer: W, batch: &ScenarioBatch) -> Result<()> {
    let mut writer = report_writer(writer);
    writer.write_batch(batch)?;
    writer.flush()
}

/// Writes the P90/P50/P10 overview
pub fn write_summary<W: Write>(writer: W, summary: &CapacitySummary) -> Result<()> {
    let mut writer = report_writer(writer);
    writer.write_summary(summary)?;
    writer.flush()
}

/// Reads batch inputs with the headers `area_p90,area_p10,pd_p90,pd_p10`
///
/// Values that are not numbers fail with `InvalidInput::NotANumber`; their sanity is checked
/// later, when the batch is estimated.
pub fn read_scenarios<R: Read>(reader: R) -> Result<ScenarioInputs> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut inputs = ScenarioInputs::default();

    for record in reader.deserialize() {
        let record: ScenarioRecord = record?;

        inputs.area_p90s.push(parse_value(&record.area_p90)?);
        inputs.area_p10s.push(parse_value(&record.area_p10)?);
        inputs.power_density_p90s.push(parse_value(&record.pd_p90)?);
        inputs.power_density_p10s.push(parse_value(&record.pd_p10)?);
    }

    Ok(inputs)
}

/// Opens `path` for reading
pub fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|inner| Error::AccessError {
        path: path.to_owned(),
        inner,
    })
}

/// Creates (or truncates) `path` for writing
pub fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|inner| Error::AccessError {
        path: path.to_owned(),
        inner,
    })
}

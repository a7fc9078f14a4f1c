use std::fmt;

use crate::estimate::ConfidencePoint;
use crate::scenario::ScenarioBatch;
use crate::summary::CapacitySummary;

/// Formats a value with at most six characters, trading decimals for magnitude
pub fn short(n: f64) -> String {
    if n < 10.0 {
        format!("{:.4}", n)
    } else if n < 100.0 {
        format!("{:.3}", n)
    } else if n < 1000.0 {
        format!("{:.2}", n)
    } else if n < 10000.0 {
        format!("{:.1}", n)
    } else {
        format!("{:.0}", n)
    }
}

/// Formats a fraction as a whole percentage
pub fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 1e2)
}

/// Formats a capacity in megawatts
pub fn capacity(mwe: f64) -> String {
    format!("{:>8} MWe", short(mwe))
}

/// The P90/P50/P10 overview as an aligned text table, with the log-space parameters of each row
pub struct SummaryTable<'a>(pub &'a CapacitySummary);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<26} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
            "", "P90", "P50", "P10", "mean", "log mean", "log sd"
        )?;
        for row in self.0.rows().iter() {
            writeln!(
                f,
                "{:<26} {:>8} {:>8} {:>8} {:>8} {:>8} {:>8}",
                row.quantity.to_string(),
                short(row.p90),
                short(row.p50),
                short(row.p10),
                short(row.mean),
                short(row.log_mean),
                short(row.log_std_dev)
            )?;
        }
        Ok(())
    }
}

/// Confidence curve points, one per line
pub struct CurveTable<'a>(pub &'a [ConfidencePoint]);

impl fmt::Display for CurveTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for point in self.0 {
            writeln!(f, "{:>4}% {}", point.confidence, capacity(point.capacity))?;
        }
        Ok(())
    }
}

/// The P90/P50/P10 capacity of every scenario
pub struct BatchTable<'a>(pub &'a ScenarioBatch);

impl fmt::Display for BatchTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .0
            .keys()
            .map(|k| k.as_str().len())
            .max()
            .unwrap_or(0)
            .max("scenario".len());

        writeln!(
            f,
            "{:<width$} {:>8} {:>8} {:>8}",
            "scenario",
            "P90",
            "P50",
            "P10",
            width = width
        )?;
        for scenario in self.0 {
            let at = |c| scenario.curve.at_confidence(c).map(short).unwrap_or_default();
            writeln!(
                f,
                "{:<width$} {:>8} {:>8} {:>8}",
                scenario.key,
                at(90),
                at(50),
                at(10),
                width = width
            )?;
        }
        Ok(())
    }
}

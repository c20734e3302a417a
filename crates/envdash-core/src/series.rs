//! History-to-chart transformation.
//!
//! Turns the device's raw history window into typed entries plus four
//! index-aligned point series, one per metric.

use core::fmt;

use serde::Serialize;

use envdash_types::{EnvironmentReading, HistoryEntry, ParseResult, RawHistoryEntry, SeriesPoint};

/// A charted sensor metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temp,
    Pressure,
    Humidity,
    Gas,
}

impl Metric {
    /// All metrics in chart order.
    pub const ALL: [Metric; 4] = [Self::Temp, Self::Pressure, Self::Humidity, Self::Gas];

    /// Axis label with unit.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temp => "Temperature [°C]",
            Self::Pressure => "Pressure [mbar]",
            Self::Humidity => "Humidity [%]",
            Self::Gas => "Air quality",
        }
    }

    /// Short column name.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Temp => "temp",
            Self::Pressure => "pressure",
            Self::Humidity => "humidity",
            Self::Gas => "gas",
        }
    }

    /// A value with its unit, at the precision the sensor is good for.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match self {
            Self::Temp => format!("{:.1} °C", value),
            Self::Pressure => format!("{:.2} mbar", value),
            Self::Humidity => format!("{:.1} %", value),
            Self::Gas => format!("{:.0}", value),
        }
    }

    /// Suggested y-axis range; data outside it widens the axis.
    #[must_use]
    pub fn suggested_range(&self) -> (f64, f64) {
        match self {
            Self::Temp => (-10.0, 40.0),
            Self::Pressure => (950.0, 1200.0),
            Self::Humidity => (0.0, 100.0),
            Self::Gas => (0.0, 500.0),
        }
    }

    /// The metric's value in a history entry.
    #[must_use]
    pub fn value(&self, entry: &HistoryEntry) -> f64 {
        match self {
            Self::Temp => entry.temp,
            Self::Pressure => entry.pressure,
            Self::Humidity => entry.humidity,
            Self::Gas => entry.gas,
        }
    }

    /// The metric's value in a live reading.
    #[must_use]
    pub fn reading_value(&self, reading: &EnvironmentReading) -> f64 {
        match self {
            Self::Temp => reading.temp,
            Self::Pressure => reading.pressure,
            Self::Humidity => reading.humidity,
            Self::Gas => reading.gas,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four index-aligned point series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub temp: Vec<SeriesPoint>,
    pub pressure: Vec<SeriesPoint>,
    pub humidity: Vec<SeriesPoint>,
    pub gas: Vec<SeriesPoint>,
}

impl ChartSeries {
    /// The series for `metric`.
    #[must_use]
    pub fn get(&self, metric: Metric) -> &[SeriesPoint] {
        match metric {
            Metric::Temp => &self.temp,
            Metric::Pressure => &self.pressure,
            Metric::Humidity => &self.humidity,
            Metric::Gas => &self.gas,
        }
    }

    /// Number of points in each series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.temp.len()
    }

    /// Whether the series are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temp.is_empty()
    }

    /// Y-axis bounds for `metric`: the suggested range widened to fit the data.
    #[must_use]
    pub fn bounds(&self, metric: Metric) -> (f64, f64) {
        let (lo, hi) = metric.suggested_range();
        self.get(metric)
            .iter()
            .map(|p| p.y)
            .filter(|y| y.is_finite())
            .fold((lo, hi), |(lo, hi), y| (lo.min(y), hi.max(y)))
    }
}

/// Converted history plus its chart series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryView {
    /// Entries in device order.
    pub entries: Vec<HistoryEntry>,
    /// Chart series derived from `entries`.
    pub series: ChartSeries,
}

/// Convert a raw history window.
///
/// Order and length are preserved; each timestamp is converted once and
/// shared between the entry and its four points.
///
/// # Errors
///
/// Fails as a whole if any timestamp cannot be converted.
pub fn transform(raw: &[RawHistoryEntry]) -> ParseResult<HistoryView> {
    let entries = raw
        .iter()
        .map(|r| HistoryEntry::try_from(*r))
        .collect::<ParseResult<Vec<_>>>()?;

    let mut series = ChartSeries {
        temp: Vec::with_capacity(entries.len()),
        pressure: Vec::with_capacity(entries.len()),
        humidity: Vec::with_capacity(entries.len()),
        gas: Vec::with_capacity(entries.len()),
    };
    for entry in &entries {
        let x = entry.time;
        series.temp.push(SeriesPoint { x, y: entry.temp });
        series.pressure.push(SeriesPoint { x, y: entry.pressure });
        series.humidity.push(SeriesPoint { x, y: entry.humidity });
        series.gas.push(SeriesPoint { x, y: entry.gas });
    }

    Ok(HistoryView { entries, series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(time: f64, temp: f64) -> RawHistoryEntry {
        RawHistoryEntry {
            time,
            temp,
            pressure: 1000.0 + temp,
            humidity: 40.0,
            gas: 100.0,
        }
    }

    #[test]
    fn test_metric_format_value() {
        assert_eq!(Metric::Temp.format_value(21.26), "21.3 °C");
        assert_eq!(Metric::Pressure.format_value(1009.5), "1009.50 mbar");
        assert_eq!(Metric::Humidity.format_value(45.0), "45.0 %");
        assert_eq!(Metric::Gas.format_value(93.4), "93");
    }

    #[test]
    fn test_metric_short_names_are_wire_fields() {
        let names: Vec<&str> = Metric::ALL.iter().map(|m| m.short_name()).collect();
        assert_eq!(names, ["temp", "pressure", "humidity", "gas"]);
    }

    #[test]
    fn test_transform_two_entries() {
        let view = transform(&[raw(1000.0, 20.0), raw(2000.0, 21.0)]).unwrap();

        assert_eq!(view.entries.len(), 2);
        assert_eq!(view.series.temp.len(), 2);
        assert_eq!(view.series.temp[0].x.unix_timestamp(), 1000);
        assert_eq!(view.series.temp[0].y, 20.0);
        assert_eq!(view.series.temp[1].x.unix_timestamp(), 2000);
        assert_eq!(view.series.temp[1].y, 21.0);
        assert_eq!(view.series.pressure[1].y, 1021.0);
    }

    #[test]
    fn test_transform_empty() {
        let view = transform(&[]).unwrap();
        assert!(view.entries.is_empty());
        assert!(view.series.is_empty());
        for metric in Metric::ALL {
            assert!(view.series.get(metric).is_empty());
        }
    }

    #[test]
    fn test_transform_preserves_device_order() {
        // Out-of-order input stays out of order
        let view = transform(&[raw(3000.0, 1.0), raw(1000.0, 2.0), raw(2000.0, 3.0)]).unwrap();
        let times: Vec<i64> = view.entries.iter().map(|e| e.time.unix_timestamp()).collect();
        assert_eq!(times, vec![3000, 1000, 2000]);
    }

    #[test]
    fn test_transform_fails_whole_on_bad_timestamp() {
        let result = transform(&[raw(1000.0, 20.0), raw(f64::NAN, 21.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_bounds_widen_to_data() {
        let view = transform(&[raw(1.0, -20.0), raw(2.0, 25.0)]).unwrap();
        assert_eq!(view.series.bounds(Metric::Temp), (-20.0, 40.0));
        assert_eq!(view.series.bounds(Metric::Humidity), (0.0, 100.0));
    }

    #[test]
    fn test_metric_labels() {
        assert_eq!(Metric::Temp.label(), "Temperature [°C]");
        assert_eq!(Metric::Pressure.suggested_range(), (950.0, 1200.0));
        assert_eq!(Metric::Gas.suggested_range(), (0.0, 500.0));
    }

    proptest! {
        #[test]
        fn transform_preserves_length_and_alignment(
            samples in prop::collection::vec((0u32..4_000_000_000u32, -40.0f64..85.0), 0..64)
        ) {
            let input: Vec<RawHistoryEntry> =
                samples.iter().map(|(t, v)| raw(f64::from(*t), *v)).collect();
            let view = transform(&input).unwrap();

            prop_assert_eq!(view.entries.len(), input.len());
            for metric in Metric::ALL {
                prop_assert_eq!(view.series.get(metric).len(), input.len());
            }
            for (i, entry) in view.entries.iter().enumerate() {
                prop_assert_eq!(view.series.temp[i].x, entry.time);
                prop_assert_eq!(view.series.gas[i].x, entry.time);
                prop_assert_eq!(view.series.temp[i].y, input[i].temp);
            }
        }
    }
}

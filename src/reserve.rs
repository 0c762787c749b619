//! Reserve estimate before and after block-model optimisation.
//!
//! The figures are published results, not derived from the loaded datasets.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Before,
    After,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Before, Scenario::After];

    /// Tab title.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Before => "Sebelum Optimasi",
            Scenario::After => "Sesudah Optimasi",
        }
    }

    /// Series name in the comparison chart.
    pub fn status(self) -> &'static str {
        match self {
            Scenario::Before => "Sebelum",
            Scenario::After => "Sesudah",
        }
    }

    pub fn estimate(self) -> ReserveEstimate {
        match self {
            Scenario::Before => ReserveEstimate::BEFORE,
            Scenario::After => ReserveEstimate::AFTER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReserveEstimate {
    /// Total ore volume in m³.
    pub volume_m3: u64,
    /// Total ore tonnage in t.
    pub tonnage_t: f64,
    /// Average Au grade of the ore in g/t.
    pub avg_grade_gpt: f64,
}

/// One line of a summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub parameter: &'static str,
    pub value: f64,
    pub display: String,
}

/// One bar of the grouped comparison chart (long format).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonBar {
    pub parameter: &'static str,
    pub scenario: Scenario,
    pub value: f64,
}

/// Chart parameters in x-axis order.
pub const COMPARISON_PARAMETERS: [&str; 3] = ["Volume", "Tonase", "Kadar Rata-rata"];

impl ReserveEstimate {
    pub const BEFORE: ReserveEstimate = ReserveEstimate {
        volume_m3: 192_031_250,
        tonnage_t: 460_875_000.0,
        avg_grade_gpt: 0.8770,
    };

    pub const AFTER: ReserveEstimate = ReserveEstimate {
        volume_m3: 201_218_750,
        tonnage_t: 482_925_000.0,
        avg_grade_gpt: 0.8946,
    };

    fn values(&self) -> [f64; 3] {
        [self.volume_m3 as f64, self.tonnage_t, self.avg_grade_gpt]
    }

    /// The three labelled rows shown in a scenario tab.
    pub fn summary_rows(&self) -> [SummaryRow; 3] {
        [
            SummaryRow {
                parameter: "Volume total ore (m³)",
                value: self.volume_m3 as f64,
                display: self.volume_m3.to_string(),
            },
            SummaryRow {
                parameter: "Tonase total ore (t)",
                value: self.tonnage_t,
                display: format!("{:.1}", self.tonnage_t),
            },
            SummaryRow {
                parameter: "Rata-rata kadar Au ore (g/t)",
                value: self.avg_grade_gpt,
                display: format!("{:.4}", self.avg_grade_gpt),
            },
        ]
    }
}

/// All six bars: every parameter for every scenario, scenario by scenario.
pub fn comparison() -> Vec<ComparisonBar> {
    let mut bars = Vec::with_capacity(COMPARISON_PARAMETERS.len() * Scenario::ALL.len());
    for scenario in Scenario::ALL {
        let values = scenario.estimate().values();
        for (parameter, value) in COMPARISON_PARAMETERS.into_iter().zip(values) {
            bars.push(ComparisonBar {
                parameter,
                scenario,
                value,
            });
        }
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_before_summary() {
        let rows = Scenario::Before.estimate().summary_rows();
        assert_eq!(rows[0].parameter, "Volume total ore (m³)");
        assert_eq!(rows[0].value, 192031250.0);
        assert_eq!(rows[0].display, "192031250");
        assert_eq!(rows[1].value, 460875000.0);
        assert_eq!(rows[1].display, "460875000.0");
        assert_eq!(rows[2].value, 0.8770);
        assert_eq!(rows[2].display, "0.8770");
    }

    #[test]
    fn test_after_summary() {
        let rows = Scenario::After.estimate().summary_rows();
        assert_eq!(rows[0].display, "201218750");
        assert_eq!(rows[1].display, "482925000.0");
        assert_eq!(rows[2].display, "0.8946");
    }

    #[test]
    fn test_comparison_has_six_grouped_values() {
        let bars = comparison();
        assert_eq!(bars.len(), 6);

        let value = |parameter: &str, scenario: Scenario| {
            bars.iter()
                .find(|b| b.parameter == parameter && b.scenario == scenario)
                .map(|b| b.value)
        };
        assert_eq!(value("Volume", Scenario::Before), Some(192031250.0));
        assert_eq!(value("Tonase", Scenario::Before), Some(460875000.0));
        assert_eq!(value("Kadar Rata-rata", Scenario::Before), Some(0.8770));
        assert_eq!(value("Volume", Scenario::After), Some(201218750.0));
        assert_eq!(value("Tonase", Scenario::After), Some(482925000.0));
        assert_eq!(value("Kadar Rata-rata", Scenario::After), Some(0.8946));

        let statuses: Vec<&str> = bars.iter().map(|b| b.scenario.status()).collect();
        assert_eq!(statuses.iter().filter(|s| **s == "Sebelum").count(), 3);
        assert_eq!(statuses.iter().filter(|s| **s == "Sesudah").count(), 3);
    }
}

use super::error::Result;
use super::model::Table;

// ---------------------------------------------------------------------------
// Column schema for a located grade dataset
// ---------------------------------------------------------------------------

/// Which header names hold the coordinates and the grade attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointColumns {
    pub x: &'static str,
    pub y: &'static str,
    pub z: &'static str,
    pub grade: &'static str,
}

impl PointColumns {
    /// Composited samples after preprocessing.
    pub const PREPROCESSED: PointColumns = PointColumns {
        x: "X_sample",
        y: "Y_sample",
        z: "Z_sample",
        grade: "Au_composite",
    };

    /// Kriging block estimates.
    pub const KRIGING: PointColumns = PointColumns {
        x: "X",
        y: "Y",
        z: "Z",
        grade: "Au",
    };
}

// ---------------------------------------------------------------------------
// GradePoints – typed columns ready for plotting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradePoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub grade: Vec<f64>,
    /// Source rows dropped because a coordinate or the grade was not numeric.
    pub skipped: usize,
}

impl GradePoints {
    /// Extract typed point columns from a loaded table.
    pub fn from_table(table: &Table, cols: PointColumns) -> Result<Self> {
        let xs = table.numeric_column(cols.x)?;
        let ys = table.numeric_column(cols.y)?;
        let zs = table.numeric_column(cols.z)?;
        let gs = table.numeric_column(cols.grade)?;

        let mut points = GradePoints::default();
        for i in 0..table.len() {
            match (xs[i], ys[i], zs[i], gs[i]) {
                (Some(x), Some(y), Some(z), Some(g)) => {
                    points.x.push(x);
                    points.y.push(y);
                    points.z.push(z);
                    points.grade.push(g);
                }
                _ => points.skipped += 1,
            }
        }

        if points.skipped > 0 {
            log::warn!(
                "{}: skipped {} rows with non-numeric {}/{}/{}/{}",
                table.name,
                points.skipped,
                cols.x,
                cols.y,
                cols.z,
                cols.grade
            );
        }
        Ok(points)
    }

    pub fn len(&self) -> usize {
        self.grade.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grade.is_empty()
    }

    /// A new point set holding only the given rows, in the given order.
    pub fn select(&self, indices: &[usize]) -> Self {
        GradePoints {
            x: indices.iter().map(|&i| self.x[i]).collect(),
            y: indices.iter().map(|&i| self.y[i]).collect(),
            z: indices.iter().map(|&i| self.z[i]).collect(),
            grade: indices.iter().map(|&i| self.grade[i]).collect(),
            skipped: 0,
        }
    }

    /// Minimum and maximum grade, `None` when empty.
    pub fn grade_range(&self) -> Option<(f64, f64)> {
        min_max(&self.grade)
    }

    /// Per-axis `(min, max)` for x, y and z.
    pub fn bounds(&self) -> Option<[(f64, f64); 3]> {
        Some([min_max(&self.x)?, min_max(&self.y)?, min_max(&self.z)?])
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_xlsxwriter::{Workbook, Worksheet};

/// Centre and size of the synthetic ore body.
const ORE_CENTER: [f64; 3] = [500_400.0, 9_100_400.0, 40.0];
const ORE_RADIUS: [f64; 3] = [220.0, 160.0, 60.0];
const PEAK_GRADE: f64 = 2.4;
const BACKGROUND_GRADE: f64 = 0.05;

const HOLE_SPACING: f64 = 80.0;
const HOLES_PER_SIDE: usize = 10;
const HOLE_DEPTH: f64 = 150.0;
const COLLAR_RL: f64 = 120.0;

const BLOCK_SIZE: [f64; 3] = [20.0, 20.0, 10.0];
const BLOCKS: [usize; 3] = [40, 40, 15];

/// Anisotropic gaussian grade field.
fn grade_at(x: f64, y: f64, z: f64) -> f64 {
    let d2: f64 = [x, y, z]
        .iter()
        .zip(ORE_CENTER.iter().zip(ORE_RADIUS.iter()))
        .map(|(&p, (&c, &r))| ((p - c) / r).powi(2))
        .sum();
    BACKGROUND_GRADE + PEAK_GRADE * (-d2 / 2.0).exp()
}

struct Hole {
    id: String,
    east: f64,
    north: f64,
    azimuth: f64,
    dip: f64,
}

impl Hole {
    /// Position along a straight hole at downhole depth `d`.
    fn point_at(&self, d: f64) -> [f64; 3] {
        let az = self.azimuth.to_radians();
        let dip = self.dip.to_radians();
        let horizontal = d * dip.cos();
        [
            self.east + horizontal * az.sin(),
            self.north + horizontal * az.cos(),
            COLLAR_RL + d * dip.sin(),
        ]
    }
}

fn header(sheet: &mut Worksheet, names: &[&str]) -> Result<()> {
    for (col, name) in names.iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    Ok(())
}

fn save(workbook: &mut Workbook, dir: &Path, name: &str, rows: u32) -> Result<()> {
    let path = dir.join(name);
    workbook
        .save(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {rows} rows to {}", path.display());
    Ok(())
}

fn drill_holes(rng: &mut StdRng) -> Vec<Hole> {
    let origin_e = ORE_CENTER[0] - HOLE_SPACING * (HOLES_PER_SIDE as f64 - 1.0) / 2.0;
    let origin_n = ORE_CENTER[1] - HOLE_SPACING * (HOLES_PER_SIDE as f64 - 1.0) / 2.0;
    let mut holes = Vec::with_capacity(HOLES_PER_SIDE * HOLES_PER_SIDE);
    for i in 0..HOLES_PER_SIDE {
        for j in 0..HOLES_PER_SIDE {
            holes.push(Hole {
                id: format!("DH-{:03}", holes.len() + 1),
                east: origin_e + i as f64 * HOLE_SPACING + rng.gen_range(-8.0..8.0),
                north: origin_n + j as f64 * HOLE_SPACING + rng.gen_range(-8.0..8.0),
                azimuth: rng.gen_range(0.0..360.0_f64).round(),
                dip: rng.gen_range(-90.0..-60.0_f64).round(),
            });
        }
    }
    holes
}

fn write_collar(dir: &Path, holes: &[Hole]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    header(sheet, &["HOLEID", "EAST", "NORTH", "RL", "MAX_DEPTH"])?;
    for (i, hole) in holes.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &hole.id)?;
        sheet.write_number(row, 1, hole.east)?;
        sheet.write_number(row, 2, hole.north)?;
        sheet.write_number(row, 3, COLLAR_RL)?;
        sheet.write_number(row, 4, HOLE_DEPTH)?;
    }
    save(&mut workbook, dir, "collar_common.xlsx", holes.len() as u32)
}

fn write_survey(dir: &Path, holes: &[Hole]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    header(sheet, &["HOLEID", "DEPTH", "AZIMUTH", "DIP"])?;
    let mut row = 0u32;
    for hole in holes {
        let mut depth = 0.0;
        while depth <= HOLE_DEPTH {
            row += 1;
            sheet.write_string(row, 0, &hole.id)?;
            sheet.write_number(row, 1, depth)?;
            sheet.write_number(row, 2, hole.azimuth)?;
            sheet.write_number(row, 3, hole.dip)?;
            depth += 50.0;
        }
    }
    save(&mut workbook, dir, "survey_common.xlsx", row)
}

/// One-metre assays, then two-metre composites of them.
fn write_samples(dir: &Path, holes: &[Hole], rng: &mut StdRng) -> Result<()> {
    let mut assays = Workbook::new();
    let assay_sheet = assays.add_worksheet();
    header(assay_sheet, &["HOLEID", "FROM", "TO", "AU"])?;

    let mut composites = Workbook::new();
    let comp_sheet = composites.add_worksheet();
    header(comp_sheet, &["HOLEID", "X_sample", "Y_sample", "Z_sample", "Au_composite"])?;

    let (mut assay_row, mut comp_row) = (0u32, 0u32);
    for hole in holes {
        let mut pending = Vec::with_capacity(2);
        for m in 0..HOLE_DEPTH as usize {
            let from = m as f64;
            let [x, y, z] = hole.point_at(from + 0.5);
            let au = (grade_at(x, y, z) * rng.gen_range(0.6..1.4)).max(0.0);
            let au = (au * 1000.0).round() / 1000.0;

            assay_row += 1;
            assay_sheet.write_string(assay_row, 0, &hole.id)?;
            assay_sheet.write_number(assay_row, 1, from)?;
            assay_sheet.write_number(assay_row, 2, from + 1.0)?;
            assay_sheet.write_number(assay_row, 3, au)?;

            pending.push(au);
            if pending.len() == 2 {
                let [cx, cy, cz] = hole.point_at(from);
                comp_row += 1;
                comp_sheet.write_string(comp_row, 0, &hole.id)?;
                comp_sheet.write_number(comp_row, 1, cx)?;
                comp_sheet.write_number(comp_row, 2, cy)?;
                comp_sheet.write_number(comp_row, 3, cz)?;
                comp_sheet.write_number(comp_row, 4, pending.iter().sum::<f64>() / 2.0)?;
                pending.clear();
            }
        }
    }

    save(&mut assays, dir, "sample_common.xlsx", assay_row)?;
    save(&mut composites, dir, "fix_data.xlsx", comp_row)
}

/// Regular block grid; the optimised run smooths less and lifts grades slightly.
fn write_kriging(dir: &Path, name: &str, uplift: f64, rng: &mut StdRng) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    header(sheet, &["X", "Y", "Z", "Au"])?;

    let origin = [
        ORE_CENTER[0] - BLOCK_SIZE[0] * BLOCKS[0] as f64 / 2.0,
        ORE_CENTER[1] - BLOCK_SIZE[1] * BLOCKS[1] as f64 / 2.0,
        COLLAR_RL - BLOCK_SIZE[2] * BLOCKS[2] as f64,
    ];

    let mut row = 0u32;
    for i in 0..BLOCKS[0] {
        for j in 0..BLOCKS[1] {
            for k in 0..BLOCKS[2] {
                let x = origin[0] + (i as f64 + 0.5) * BLOCK_SIZE[0];
                let y = origin[1] + (j as f64 + 0.5) * BLOCK_SIZE[1];
                let z = origin[2] + (k as f64 + 0.5) * BLOCK_SIZE[2];
                let au = grade_at(x, y, z) * uplift * rng.gen_range(0.95..1.05);

                row += 1;
                sheet.write_number(row, 0, x)?;
                sheet.write_number(row, 1, y)?;
                sheet.write_number(row, 2, z)?;
                sheet.write_number(row, 3, (au * 10_000.0).round() / 10_000.0)?;
            }
        }
    }
    save(&mut workbook, dir, name, row)
}

fn main() -> Result<()> {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = StdRng::seed_from_u64(42);
    let holes = drill_holes(&mut rng);

    write_collar(&dir, &holes)?;
    write_survey(&dir, &holes)?;
    write_samples(&dir, &holes, &mut rng)?;
    write_kriging(&dir, "data_kriging.xlsx", 1.0, &mut rng)?;
    write_kriging(&dir, "data_kriging_optimasi.xlsx", 1.02, &mut rng)?;
    Ok(())
}

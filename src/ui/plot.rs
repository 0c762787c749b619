use eframe::egui::{self, pos2, vec2, Align2, FontId, Rect, RichText, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::{generate_palette, GradeScale};
use crate::data::points::{GradePoints, PointColumns};
use crate::reserve::{ComparisonBar, Scenario, COMPARISON_PARAMETERS};
use crate::ui::orbit::{cube_edges, CubeFit, OrbitCamera};

const PLOT_HEIGHT: f32 = 420.0;
const COLORBAR_WIDTH: f32 = 90.0;
/// Points are batched into this many colour buckets, one plot item each.
const COLOR_BINS: usize = 24;
const BAR_WIDTH: f64 = 0.35;

// ---------------------------------------------------------------------------
// Colour batching
// ---------------------------------------------------------------------------

/// Group screen positions by the colour bucket of their grade.
/// Input order is kept inside each bucket.
pub fn bin_by_grade(
    positions: impl IntoIterator<Item = [f64; 2]>,
    grades: impl IntoIterator<Item = f64>,
    scale: &GradeScale,
    bins: usize,
) -> Vec<Vec<[f64; 2]>> {
    let mut out = vec![Vec::new(); bins.max(1)];
    for (pos, grade) in positions.into_iter().zip(grades) {
        out[scale.bin_for(grade, bins)].push(pos);
    }
    out
}

fn draw_bins(plot_ui: &mut egui_plot::PlotUi, bins: Vec<Vec<[f64; 2]>>, radius: f32) {
    let n = bins.len();
    for (bin, positions) in bins.into_iter().enumerate() {
        if positions.is_empty() {
            continue;
        }
        plot_ui.points(
            Points::new(PlotPoints::from(positions))
                .color(GradeScale::bin_color(bin, n))
                .radius(radius)
                .filled(true),
        );
    }
}

// ---------------------------------------------------------------------------
// 2D scatter
// ---------------------------------------------------------------------------

/// Plan-view scatter of X against Y, coloured by grade.
pub fn scatter_2d(
    ui: &mut Ui,
    id: &str,
    title: &str,
    columns: PointColumns,
    points: &GradePoints,
    scale: &GradeScale,
) {
    ui.label(RichText::new(title).strong());
    ui.horizontal(|ui: &mut Ui| {
        let width = (ui.available_width() - COLORBAR_WIDTH).max(200.0);
        let positions = points.x.iter().zip(&points.y).map(|(&x, &y)| [x, y]);
        let bins = bin_by_grade(positions, points.grade.iter().copied(), scale, COLOR_BINS);

        Plot::new(id)
            .width(width)
            .height(PLOT_HEIGHT)
            .x_axis_label(columns.x)
            .y_axis_label(columns.y)
            .data_aspect(1.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| draw_bins(plot_ui, bins, 2.0));

        color_bar(ui, columns.grade, scale);
    });
}

// ---------------------------------------------------------------------------
// 3D scatter
// ---------------------------------------------------------------------------

/// Orbiting 3D scatter of the normalised X/Y/Z cube. Drag to rotate.
pub fn scatter_3d(
    ui: &mut Ui,
    id: &str,
    title: &str,
    columns: PointColumns,
    points: &GradePoints,
    scale: &GradeScale,
    camera: &mut OrbitCamera,
) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(title).strong());
        ui.label(RichText::new("(drag to rotate)").weak());
        if ui.small_button("Reset view").clicked() {
            *camera = OrbitCamera::default();
        }
    });

    let fit = CubeFit::new(points);
    let mut projected: Vec<([f64; 2], f64, f64)> = (0..points.len())
        .map(|i| {
            let p = camera.project(fit.apply([points.x[i], points.y[i], points.z[i]]));
            (p.screen, p.depth, points.grade[i])
        })
        .collect();
    // Far points first so near ones are drawn over them within a bucket.
    projected.sort_by(|a, b| b.1.total_cmp(&a.1));
    let bins = bin_by_grade(
        projected.iter().map(|p| p.0),
        projected.iter().map(|p| p.2),
        scale,
        COLOR_BINS,
    );

    let frame_color = ui.visuals().weak_text_color().gamma_multiply(0.6);
    let cam = *camera;

    ui.horizontal(|ui: &mut Ui| {
        let width = (ui.available_width() - COLORBAR_WIDTH).max(200.0);
        let response = Plot::new(id)
            .width(width)
            .height(PLOT_HEIGHT)
            .show_axes(false)
            .show_grid(false)
            .data_aspect(1.0)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.8)
            .include_x(1.8)
            .include_y(-1.8)
            .include_y(1.8)
            .show(ui, |plot_ui| {
                for (a, b) in cube_edges() {
                    let a = cam.project(a).screen;
                    let b = cam.project(b).screen;
                    plot_ui.line(Line::new(PlotPoints::from(vec![a, b])).color(frame_color).width(1.0));
                }
                for (axis, name) in [columns.x, columns.y, columns.z].into_iter().enumerate() {
                    let mut tip = [-1.0, -1.0, -1.0];
                    tip[axis] = 1.25;
                    let at = cam.project(tip).screen;
                    let (lo, hi) = fit.axis_extent(axis);
                    plot_ui.text(Text::new(
                        PlotPoint::new(at[0], at[1]),
                        format!("{name} [{lo:.0}, {hi:.0}]"),
                    ));
                }
                draw_bins(plot_ui, bins, 1.8);
            })
            .response;

        if response.dragged() {
            let delta = response.drag_delta();
            camera.drag(delta.x, delta.y);
        }

        color_bar(ui, columns.grade, scale);
    });
}

// ---------------------------------------------------------------------------
// Colour bar legend
// ---------------------------------------------------------------------------

fn color_bar(ui: &mut Ui, label: &str, scale: &GradeScale) {
    const SLICES: usize = 64;

    let (rect, _) = ui.allocate_exact_size(vec2(COLORBAR_WIDTH, PLOT_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    let font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();

    painter.text(
        rect.left_top() + vec2(6.0, 4.0),
        Align2::LEFT_TOP,
        label,
        font.clone(),
        text_color,
    );

    let strip = Rect::from_min_size(
        rect.left_top() + vec2(6.0, 28.0),
        vec2(16.0, rect.height() - 48.0),
    );
    let slice_h = strip.height() / SLICES as f32;
    for i in 0..SLICES {
        let t = 1.0 - (i as f64 + 0.5) / SLICES as f64;
        let slice = Rect::from_min_size(
            strip.left_top() + vec2(0.0, i as f32 * slice_h),
            vec2(strip.width(), slice_h + 0.5),
        );
        painter.rect_filled(slice, 0.0, GradeScale::color_at(t));
    }

    let mid = (scale.min + scale.max) / 2.0;
    for (t, value) in [(0.0_f32, scale.min), (0.5, mid), (1.0, scale.max)] {
        let y = strip.bottom() - t * strip.height();
        painter.text(
            pos2(strip.right() + 6.0, y),
            Align2::LEFT_CENTER,
            format!("{value:.3}"),
            font.clone(),
            text_color,
        );
    }
}

// ---------------------------------------------------------------------------
// Grouped bar chart
// ---------------------------------------------------------------------------

/// X position of a bar: parameters sit at 0, 1, 2 and scenarios straddle them.
pub fn bar_x(parameter: &str, scenario: Scenario) -> Option<f64> {
    let slot = COMPARISON_PARAMETERS.iter().position(|p| *p == parameter)?;
    let group = Scenario::ALL.iter().position(|s| *s == scenario)?;
    let offset = (group as f64 - (Scenario::ALL.len() as f64 - 1.0) / 2.0) * BAR_WIDTH;
    Some(slot as f64 + offset)
}

/// Bars of the same parameter side by side, one colour per scenario.
pub fn grouped_bar_chart(ui: &mut Ui, id: &str, title: &str, bars: &[ComparisonBar]) {
    ui.label(RichText::new(title).strong());

    let colors = generate_palette(Scenario::ALL.len());
    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Nilai")
        .x_axis_label("Parameter")
        .x_axis_formatter(|mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() < 1e-6
                && slot >= 0.0
                && (slot as usize) < COMPARISON_PARAMETERS.len()
            {
                COMPARISON_PARAMETERS[slot as usize].to_string()
            } else {
                String::new()
            }
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (scenario, color) in Scenario::ALL.into_iter().zip(colors) {
                let series: Vec<Bar> = bars
                    .iter()
                    .filter(|b| b.scenario == scenario)
                    .filter_map(|b| {
                        let x = bar_x(b.parameter, scenario)?;
                        Some(Bar::new(x, b.value).width(BAR_WIDTH).name(b.parameter))
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(series)
                        .name(scenario.status())
                        .color(color),
                );
            }
        });
}

/// Spacing plus a rule between page sections.
pub fn section_gap(ui: &mut Ui) {
    ui.add_space(12.0);
    ui.add(egui::Separator::default().spacing(4.0));
}

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{HLine, Legend, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text, VLine};

use crate::analysis::classify::Quadrant;
use crate::state::{AppState, SampleView};

// ---------------------------------------------------------------------------
// Quadrant scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Relative annotation anchors within the 0‥max frame, one per quadrant.
/// The reference sample's label sits at `fy`, the comparison sample's one
/// step below.
const ANNOTATION_ANCHORS: [(Quadrant, f64, f64); 4] = [
    (Quadrant::Q1, 0.12, 0.92),
    (Quadrant::Q2, 0.88, 0.92),
    (Quadrant::Q3, 0.12, 0.16),
    (Quadrant::Q4, 0.88, 0.16),
];

/// Render the quadrant scatter in the central panel.
pub fn quadrant_plot(ui: &mut Ui, state: &AppState) {
    let Some(analysis) = &state.analysis else {
        ui.centered_and_justified(|ui: &mut Ui| {
            if state.table.is_none() {
                ui.heading("Open a measurement table to begin  (File → Open…)");
            } else {
                ui.heading("Pick two samples in the side panel to plot them");
            }
        });
        return;
    };

    let thresholds = state.config.thresholds;
    let max_value = analysis.max_value;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(format!(
            "EdU vs P21 nuclear intensity — {} vs {}",
            analysis.first.name, analysis.second.name
        ));
    });

    Plot::new("quadrant_plot")
        .legend(Legend::default())
        .x_axis_label("EdU staining nuclear intensity")
        .y_axis_label("P21 staining nuclear intensity")
        .include_x(0.0)
        .include_x(max_value)
        .include_y(0.0)
        .include_y(max_value)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for view in [&analysis.first, &analysis.second] {
                let color = state.sample_colors.color_for(&view.name);

                let points: PlotPoints = view
                    .records
                    .iter()
                    .filter_map(|r| Some([r.x?, r.y?]))
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&view.name)
                        .color(color)
                        .radius(2.5),
                );
            }

            // Dashed reference lines at the two thresholds.
            plot_ui.vline(
                VLine::new(thresholds.x)
                    .color(Color32::GRAY)
                    .style(LineStyle::dashed_loose())
                    .name(format!("EdU threshold ({})", thresholds.x)),
            );
            plot_ui.hline(
                HLine::new(thresholds.y)
                    .color(Color32::GRAY)
                    .style(LineStyle::dashed_loose())
                    .name(format!("P21 threshold ({})", thresholds.y)),
            );

            // Eight percentage annotations: four quadrants × two samples,
            // at fixed relative positions within the 0‥max frame.
            for (quadrant, fx, fy) in ANNOTATION_ANCHORS {
                annotate(plot_ui, state, &analysis.first, quadrant, fx, fy, max_value);
                annotate(
                    plot_ui,
                    state,
                    &analysis.second,
                    quadrant,
                    fx,
                    fy - 0.06,
                    max_value,
                );
            }
        });
}

fn annotate(
    plot_ui: &mut egui_plot::PlotUi,
    state: &AppState,
    view: &SampleView,
    quadrant: Quadrant,
    fx: f64,
    fy: f64,
    max_value: f64,
) {
    let color = state.sample_colors.color_for(&view.name);
    let label = format!("{quadrant}: {:.2}%", view.summary.percentage(quadrant));
    plot_ui.text(
        Text::new(
            PlotPoint::new(fx * max_value, fy * max_value),
            RichText::new(label).size(11.0),
        )
        .color(color),
    );
}

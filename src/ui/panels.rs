use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::classify::Quadrant;
use crate::data::export::export_quadrants;
use crate::state::{AppState, SampleView};

// ---------------------------------------------------------------------------
// Left side panel – selection, thresholds, summaries, export
// ---------------------------------------------------------------------------

/// Render the left analysis panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    let logo = egui::include_image!("../../assets/logo.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(ui.available_width() * 0.8)
                .max_height(120.0)
                .rounding(4.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Analysis");
    ui.separator();

    if state.table.is_none() {
        ui.label("No table loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the widgets.
    let column_names = state
        .table
        .as_ref()
        .map(|t| t.column_names.clone())
        .unwrap_or_default();
    let samples = state.available_samples();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Column mapping ----
            ui.strong("Columns");
            let mut columns_changed = false;
            columns_changed |= column_combo(
                ui,
                "sample_column",
                "Sample",
                &column_names,
                &mut state.config.columns.sample,
            );
            columns_changed |= column_combo(
                ui,
                "x_column",
                "EdU (x)",
                &column_names,
                &mut state.config.columns.x,
            );
            columns_changed |= column_combo(
                ui,
                "y_column",
                "P21 (y)",
                &column_names,
                &mut state.config.columns.y,
            );
            if columns_changed {
                // A new sample column invalidates the old picks.
                state.config.first_sample = None;
                state.config.second_sample = None;
                state.recompute();
            }
            ui.separator();

            // ---- Sample selection ----
            ui.strong("Samples");
            let current_first = state.config.first_sample.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("first_sample")
                .selected_text(&current_first)
                .show_ui(ui, |ui: &mut Ui| {
                    for name in &samples {
                        if ui
                            .selectable_label(current_first == *name, name)
                            .clicked()
                        {
                            state.set_first_sample(name.clone());
                        }
                    }
                });
            ui.small("reference: plotted and exported");

            let current_second = state.config.second_sample.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("second_sample")
                .selected_text(&current_second)
                .show_ui(ui, |ui: &mut Ui| {
                    for name in &samples {
                        if ui
                            .selectable_label(current_second == *name, name)
                            .clicked()
                        {
                            state.set_second_sample(name.clone());
                        }
                    }
                });
            ui.small("comparison: plotted only");
            ui.separator();

            // ---- Thresholds ----
            ui.strong("Thresholds");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("EdU (x)");
                let changed_x = ui
                    .add(DragValue::new(&mut state.config.thresholds.x).speed(1.0))
                    .changed();
                ui.label("P21 (y)");
                let changed_y = ui
                    .add(DragValue::new(&mut state.config.thresholds.y).speed(1.0))
                    .changed();
                if changed_x || changed_y {
                    state.recompute();
                }
            });
            ui.separator();

            // ---- Quadrant summaries ----
            let views: Vec<SampleView> = state
                .analysis
                .as_ref()
                .map(|a| vec![a.first.clone(), a.second.clone()])
                .unwrap_or_default();
            if views.is_empty() {
                ui.label("Pick two samples to see quadrant statistics.");
            }
            for view in &views {
                let color = state.sample_colors.color_for(&view.name);
                ui.colored_label(color, RichText::new(&view.name).strong());
                summary_table(ui, view);
                if view.summary.is_degenerate() {
                    ui.colored_label(Color32::YELLOW, "no classifiable cells");
                }
                match view.high_y_median {
                    Some(m) => ui.small(format!("P21⁺ median intensity: {m:.1}")),
                    None => ui.small("P21⁺ median intensity: –"),
                };
                ui.add_space(6.0);
            }
            ui.separator();

            // ---- Export ----
            ui.strong("Export");
            if ui.button("Output folder…").clicked() {
                if let Some(dir) = rfd::FileDialog::new()
                    .set_title("Choose output directory")
                    .pick_folder()
                {
                    state.config.output_dir = Some(dir);
                }
            }
            if let Some(dir) = &state.config.output_dir {
                ui.small(dir.display().to_string());
            }

            let exportable = state.analysis.is_some() && state.config.output_dir.is_some();
            if ui
                .add_enabled(exportable, egui::Button::new("Export quadrant data"))
                .clicked()
            {
                run_export(state);
            }
        });
}

/// ComboBox over the table's columns writing into `target`; true on change.
fn column_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    column_names: &[String],
    target: &mut String,
) -> bool {
    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(target.clone())
            .show_ui(ui, |ui: &mut Ui| {
                for col in column_names {
                    let selected = *target == *col;
                    if ui.selectable_label(selected, col).clicked() && !selected {
                        *target = col.clone();
                        changed = true;
                    }
                }
            });
    });
    changed
}

/// Per-quadrant counts and percentages for one sample.
fn summary_table(ui: &mut Ui, view: &SampleView) {
    ui.push_id(&view.name, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(50.0))
            .column(Column::remainder())
            .header(18.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Quadrant");
                });
                header.col(|ui| {
                    ui.strong("Cells");
                });
                header.col(|ui| {
                    ui.strong("%");
                });
            })
            .body(|mut body| {
                for quadrant in Quadrant::ALL {
                    body.row(16.0, |mut row| {
                        row.col(|ui| {
                            ui.label(format!("{quadrant} ({})", quadrant.label()));
                        });
                        row.col(|ui| {
                            ui.label(view.summary.count(quadrant).to_string());
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", view.summary.percentage(quadrant)));
                        });
                    });
                }
            });
    });
}

/// Run the quadrant export for the reference sample.
fn run_export(state: &mut AppState) {
    let Some(analysis) = &state.analysis else {
        return;
    };
    let Some(dir) = state.config.output_dir.clone() else {
        return;
    };
    let second = analysis.second.name.clone();

    match export_quadrants(
        &dir,
        &analysis.first.records,
        state.config.thresholds,
        &state.config.columns,
        &analysis.first.name,
        &second,
    ) {
        Ok(paths) => {
            state.status_message = Some(format!(
                "Exported {} quadrant files to {}",
                paths.len(),
                dir.display()
            ));
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let classifiable = state.records.iter().filter(|r| r.is_classifiable()).count();
            ui.label(format!(
                "{} cells loaded, {} classifiable",
                table.len(),
                classifiable
            ));
        }

        ui.separator();

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::LIGHT_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open measurement table")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} cells with columns {:?}",
                    table.len(),
                    table.column_names
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

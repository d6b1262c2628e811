use super::{ExcelJoiner, Notice};
use crate::upload::Slot;
use crate::utils::file_size::format_size;
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(230, 82, 80);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);

impl ExcelJoiner {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 30.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("🔗 Excel Joiner Pro");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Smart auto-matching with fuzzy joins, super fast!")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    for slot in Slot::ALL {
                        self.render_slot(ui, slot);
                        ui.add_space(10.0);
                    }

                    ui.add_space(10.0);
                    ui.vertical_centered(|ui| {
                        let label = if self.state.loading {
                            "Processing..."
                        } else {
                            "🚀 Join and Download"
                        };
                        let button = egui::Button::new(RichText::new(label).size(16.0))
                            .min_size(egui::vec2(220.0, 40.0));

                        if ui.add_enabled(self.state.can_submit(), button).clicked() {
                            self.submit();
                        }
                        if self.state.loading {
                            ui.add_space(6.0);
                            ui.spinner();
                        }
                    });

                    ui.add_space(15.0);
                    self.render_notice(ui);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Built with ❤️ by Data Nerds · © 2025 Excel Joiner Pro")
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.6)),
                );
            });
        });
    }

    fn render_slot(&mut self, ui: &mut egui::Ui, slot: Slot) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(slot.title()).strong());
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui.button("📁 Choose .xlsx").clicked() {
                    // Cancelling the dialog keeps whatever was selected before.
                    if let Some(path) = FileDialog::new()
                        .add_filter("Excel workbook", &["xlsx"])
                        .pick_file()
                    {
                        self.select_file(slot, path);
                    }
                }

                match self.state.file(slot) {
                    Some(file) => {
                        let text = match file.size {
                            Some(size) => format!("📄 {} ({})", file.name, format_size(size)),
                            None => format!("📄 {}", file.name),
                        };
                        ui.label(text).on_hover_text(file.path.display().to_string());
                    }
                    None => {
                        ui.label(
                            RichText::new("No file selected")
                                .color(ui.visuals().text_color().gamma_multiply(0.5)),
                        );
                    }
                }
            });
        });
    }

    fn render_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.state.notice.clone() else {
            return;
        };

        ui.vertical_centered(|ui| {
            let color = if notice.is_error() { ERROR } else { SUCCESS };
            ui.colored_label(color, notice.message());

            if let Notice::Saved(path) = &notice {
                ui.label(
                    RichText::new(path.display().to_string())
                        .monospace()
                        .color(ACCENT),
                );
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    if ui.button("📂 Open file").clicked() {
                        if let Err(e) = open::that(path) {
                            tracing::warn!("Failed to open {}: {}", path.display(), e);
                        }
                    }
                    if ui.button("Show folder").clicked() {
                        let folder = path.parent().unwrap_or(self.output_dir().as_path());
                        if let Err(e) = open::that(folder) {
                            tracing::warn!("Failed to open {}: {}", folder.display(), e);
                        }
                    }
                });
            }
        });
    }
}

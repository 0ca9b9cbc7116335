use super::{Banner, DropTarget, FileImporter};
use super::{ACTIVE_TARGET_TITLE, EMPTY_TARGET_HINT, EMPTY_TARGET_TITLE};
use chrono::Datelike;
use eframe::egui::{self, Align, Color32, RichText, Sense, Stroke};

const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
const MUTED: Color32 = Color32::from_rgb(107, 114, 128);
const INTRO: &str = "Securely upload your files to our S3 storage. \
    Drag and drop your documents, images, or archives below.";

impl FileImporter {
    pub fn render(&mut self, ctx: &egui::Context) {
        let view = self.view();

        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading(RichText::new("File Import Service").strong().color(ACCENT));
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(INTRO)
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);

                    let border = if matches!(view.target, DropTarget::DragActive) {
                        ACCENT
                    } else {
                        Color32::from_gray(170)
                    };
                    let target = ui
                        .add_enabled_ui(view.target_enabled, |ui| {
                            egui::Frame::none()
                                .inner_margin(egui::Margin::same(30.0))
                                .rounding(12.0)
                                .stroke(Stroke::new(2.0, border))
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    ui.vertical_centered(|ui| self.render_target(ui, &view.target));
                                })
                                .response
                        })
                        .inner;

                    let clicked = ui
                        .interact(target.rect, ui.id().with("drop_target"), Sense::click())
                        .clicked();
                    if clicked && view.target_enabled {
                        self.browse_for_file();
                    }

                    if let Some(notice) = &view.notice {
                        ui.add_space(8.0);
                        ui.vertical_centered(|ui| {
                            ui.colored_label(Color32::from_rgb(220, 50, 50), notice);
                        });
                    }

                    if let Some(button) = &view.button {
                        ui.add_space(20.0);
                        ui.vertical_centered(|ui| {
                            ui.add_enabled_ui(button.enabled, |ui| {
                                ui.horizontal(|ui| {
                                    if button.busy {
                                        ui.spinner();
                                    }
                                    let action = egui::Button::new(&button.label)
                                        .min_size(egui::vec2(200.0, 40.0));
                                    if ui.add(action).clicked() {
                                        self.start_upload();
                                    }
                                });
                            });
                        });
                    }

                    if let Some(banner) = view.banner {
                        ui.add_space(20.0);
                        render_banner(ui, banner);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                ui.label(
                    RichText::new(format!(
                        "© {} File Import Service",
                        chrono::Local::now().year()
                    ))
                    .small()
                    .color(MUTED),
                );
            });
        });
    }

    fn render_target(&self, ui: &mut egui::Ui, target: &DropTarget) {
        match target {
            DropTarget::Empty => {
                ui.label(RichText::new("☁").size(32.0).color(MUTED));
                ui.add_space(8.0);
                ui.label(RichText::new(EMPTY_TARGET_TITLE).size(16.0));
                ui.label(RichText::new(EMPTY_TARGET_HINT).small().color(MUTED));
            }
            DropTarget::DragActive => {
                ui.label(RichText::new("☁").size(32.0).color(ACCENT));
                ui.add_space(8.0);
                ui.label(RichText::new(ACTIVE_TARGET_TITLE).size(16.0).color(ACCENT));
            }
            DropTarget::Staged { name, size } => {
                ui.label(RichText::new("🗋").size(32.0).color(ACCENT));
                ui.add_space(8.0);
                ui.label(RichText::new(name).size(16.0).strong());
                ui.label(RichText::new(size).small().color(MUTED));
            }
        }
    }
}

fn render_banner(ui: &mut egui::Ui, banner: Banner) {
    let (icon, fill, text) = match banner {
        Banner::Success => (
            "✔",
            Color32::from_rgb(240, 253, 244),
            Color32::from_rgb(21, 128, 61),
        ),
        Banner::Error => (
            "✖",
            Color32::from_rgb(254, 242, 242),
            Color32::from_rgb(185, 28, 28),
        ),
    };

    egui::Frame::none()
        .fill(fill)
        .rounding(8.0)
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                let label = RichText::new(format!("{} {}", icon, banner.text())).strong();
                ui.colored_label(text, label);
            });
        });
}

use eframe::egui;
use shared::{catalog, domain::StyleCategory};

/// Category tabs above a row of styles for the active category. Returns true
/// when the selection changed.
pub fn show_style_picker(
    ui: &mut egui::Ui,
    active_category: &mut StyleCategory,
    selected_style_id: &mut &'static str,
) -> bool {
    let before = *selected_style_id;

    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new("EXPLORE").small().weak());
        ui.separator();
        for category in StyleCategory::ALL {
            ui.selectable_value(active_category, category, category.label());
        }
    });

    egui::ScrollArea::horizontal()
        .id_salt("style-row")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                for style in catalog::in_category(*active_category) {
                    let label = format!("{} {}", style.icon, style.name);
                    ui.selectable_value(selected_style_id, style.id, label)
                        .on_hover_text(style.description);
                }
            });
        });

    before != *selected_style_id
}

use crate::record::VersionRecord;
use egui::Ui;

pub struct VersionSelector;

impl VersionSelector {
    pub fn show(ui: &mut Ui, label: &str, versions: &[VersionRecord], selected: &mut Option<u32>) {
        ui.horizontal(|ui| {
            ui.label(label);
            let selected_text = match selected {
                Some(v) => format!("v{}", v),
                None => "Select".to_string(),
            };
            egui::ComboBox::from_id_salt(label)
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for record in versions {
                        ui.selectable_value(
                            selected,
                            Some(record.version),
                            format!("v{}", record.version),
                        );
                    }
                });
        });
    }
}

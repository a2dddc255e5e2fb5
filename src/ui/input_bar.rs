use egui::{Align, Key, Layout, Ui};

pub enum InputBarAction {
    Fetch,
}

pub struct InputBar;

impl InputBar {
    /// Hostname and accession fields with the fetch button.
    ///
    /// Pressing Enter in either field fetches as well.
    pub fn show(
        ui: &mut Ui,
        hostname: &mut String,
        sequence_id: &mut String,
        loading: bool,
    ) -> Option<InputBarAction> {
        let mut action = None;

        ui.horizontal_wrapped(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                ui.label("Server");
                let host = ui.add(
                    egui::TextEdit::singleline(hostname)
                        .hint_text("pathoplexus.org")
                        .desired_width(200.0),
                );

                ui.add_space(8.0);
                ui.label("Accession");
                let id = ui.add(
                    egui::TextEdit::singleline(sequence_id)
                        .hint_text("PP_00003PJ")
                        .desired_width(160.0),
                );

                let submitted = (host.lost_focus() || id.lost_focus())
                    && ui.input(|i| i.key_pressed(Key::Enter));

                ui.add_space(8.0);
                let button = ui
                    .add_enabled(!loading, egui::Button::new("Fetch versions"))
                    .on_disabled_hover_text("Fetch in progress");
                if (button.clicked() || submitted) && !loading {
                    action = Some(InputBarAction::Fetch);
                }
            });
        });

        action
    }
}

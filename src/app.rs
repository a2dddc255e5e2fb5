use crate::config::{ArchiveSettings, LaunchParams};
use crate::diff::{SequenceComparison, compute_metadata_diff};
use crate::messages::{DigestSlot, ResponseMessage, WorkerCommand};
use crate::state::{ComparatorState, Tab};
use crate::style::{ERROR_BG, ERROR_TEXT_COLOR, configure_style};
use crate::ui::input_bar::{InputBar, InputBarAction};
use crate::ui::metadata_view::MetadataView;
use crate::ui::sequence_view::{SequencePanelLabels, SequenceView};
use crate::ui::version_selector::VersionSelector;
use crate::worker::spawn_worker;
use egui::{RichText, ScrollArea};
use std::sync::mpsc::{Receiver, Sender};

pub struct ComparatorApp {
    state: ComparatorState,
    worker_sender: Sender<WorkerCommand>,
    worker_receiver: Receiver<ResponseMessage>,
}

impl ComparatorApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: ArchiveSettings,
        launch: LaunchParams,
    ) -> Self {
        configure_style(&cc.egui_ctx);

        let (hostname, sequence_id) = launch.resolve(&settings);
        let state = ComparatorState::new(hostname, sequence_id, settings.max_versions);
        let (worker_sender, worker_receiver) = spawn_worker(settings);

        Self {
            state,
            worker_sender,
            worker_receiver,
        }
    }

    fn send(&self, command: WorkerCommand) {
        if let Err(e) = self.worker_sender.send(command) {
            tracing::error!("Failed to send worker command: {}", e);
        }
    }

    fn handle_responses(&mut self) {
        while let Ok(response) = self.worker_receiver.try_recv() {
            match response {
                ResponseMessage::VersionsFetched { generation, result } => {
                    self.state.apply_fetch(generation, result);
                }
                ResponseMessage::DigestComputed {
                    slot,
                    request,
                    digest,
                } => {
                    self.state.apply_digest(slot, request, digest);
                }
            }
        }

        for command in self.state.digest_requests() {
            self.send(command);
        }
    }

    fn show_comparison(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;

        ui.horizontal(|ui| {
            let (versions, version1, version2) = state.selection_mut();
            VersionSelector::show(ui, "Version A", versions, version1);
            ui.add_space(16.0);
            VersionSelector::show(ui, "Version B", versions, version2);
        });
        ui.separator();

        ui.horizontal(|ui| {
            ui.selectable_value(&mut state.active_tab, Tab::Sequence, "Sequence");
            ui.selectable_value(&mut state.active_tab, Tab::Metadata, "Metadata");
        });
        ui.add_space(8.0);

        let Some((old, new)) = state.selected_pair() else {
            ui.label("Select two versions to compare.");
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match state.active_tab {
                Tab::Sequence => {
                    let comparison =
                        SequenceComparison::compare(Some(old.sequence.as_str()), Some(new.sequence.as_str()));
                    SequenceView::show(
                        ui,
                        &comparison,
                        SequencePanelLabels {
                            version1: old.version,
                            version2: new.version,
                            digest1: state.digest(DigestSlot::Old),
                            digest2: state.digest(DigestSlot::New),
                        },
                    );
                }
                Tab::Metadata => {
                    let fields = compute_metadata_diff(Some(&old.metadata), Some(&new.metadata));
                    MetadataView::show(ui, &fields, old.version, new.version);
                }
            });
    }
}

impl eframe::App for ComparatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_responses();
        if self.state.is_waiting() {
            // keep polling the worker while a fetch or digest is in flight
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("input_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Sequence Version Comparator");
            let action = InputBar::show(
                ui,
                &mut self.state.hostname,
                &mut self.state.sequence_id,
                self.state.loading,
            );
            if let Some(InputBarAction::Fetch) = action {
                let command = self.state.begin_fetch();
                self.send(command);
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Fetching versions…");
                });
            }

            if let Some(error) = &self.state.error {
                egui::Frame::default()
                    .fill(ERROR_BG)
                    .inner_margin(8.0)
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.label(RichText::new(error).color(ERROR_TEXT_COLOR));
                    });
            }

            if self.state.loading {
                return;
            }

            if self.state.versions().is_empty() {
                if self.state.error.is_none() {
                    let hint = match self.state.fetched_at {
                        Some(_) => "No versions found for this accession.".to_string(),
                        None => format!(
                            "Enter a sequence ID and click Fetch versions to load versions 1–{} from the server.",
                            self.state.max_versions
                        ),
                    };
                    ui.label(RichText::new(hint).weak());
                }
                return;
            }

            if let Some(fetched_at) = self.state.fetched_at {
                ui.label(
                    RichText::new(format!(
                        "{} versions fetched at {}",
                        self.state.versions().len(),
                        fetched_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
                    ))
                    .small()
                    .weak(),
                );
            }

            self.show_comparison(ui);
        });
    }
}

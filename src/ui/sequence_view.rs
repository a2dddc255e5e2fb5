use crate::diff::{PositionedSpan, SegmentKind, SequenceComparison};
use crate::style::{
    ADDED_RUN_BG, ADDED_TEXT_COLOR, MONO_SIZE, MUTED_BG, NOTICE_BG, NOTICE_TEXT_COLOR,
    REMOVED_RUN_BG, REMOVED_TEXT_COLOR,
};
use egui::{Color32, RichText, ScrollArea, Ui};

pub struct SequencePanelLabels<'a> {
    pub version1: u32,
    pub version2: u32,
    pub digest1: &'a str,
    pub digest2: &'a str,
}

pub struct SequenceView;

impl SequenceView {
    pub fn show(ui: &mut Ui, comparison: &SequenceComparison, labels: SequencePanelLabels<'_>) {
        ui.horizontal(|ui| {
            digest_badge(ui, labels.version1, labels.digest1);
            digest_badge(ui, labels.version2, labels.digest2);

            if let SequenceComparison::Differs { stats, .. } = comparison {
                ui.add_space(12.0);
                ui.label(RichText::new(format!("+{}", stats.added)).color(ADDED_TEXT_COLOR));
                ui.label(RichText::new(format!("-{}", stats.removed)).color(REMOVED_TEXT_COLOR));
            }
        });

        ui.add_space(8.0);

        if let SequenceComparison::Identical { sequence } = comparison {
            egui::Frame::default()
                .fill(NOTICE_BG)
                .inner_margin(8.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        RichText::new(format!(
                            "Sequences are identical ({} characters).",
                            sequence.chars().count()
                        ))
                        .color(NOTICE_TEXT_COLOR),
                    );
                });
            ui.add_space(8.0);
        }

        let (old_legend, new_legend) = if comparison.is_identical() {
            (
                format!("Same sequence as v{}.", labels.version2),
                format!("Same sequence as v{}.", labels.version1),
            )
        } else {
            (
                format!("Red: deletions and mismatches in v{}.", labels.version1),
                format!("Green: additions in v{}.", labels.version2),
            )
        };

        let (old, new) = comparison.panels();
        ui.columns(2, |columns| {
            sequence_panel(
                &mut columns[0],
                "old_sequence_panel",
                &format!("Version {}", labels.version1),
                &old,
                &old_legend,
            );
            sequence_panel(
                &mut columns[1],
                "new_sequence_panel",
                &format!("Version {}", labels.version2),
                &new,
                &new_legend,
            );
        });
    }
}

fn digest_badge(ui: &mut Ui, version: u32, digest: &str) {
    egui::Frame::default()
        .fill(MUTED_BG)
        .inner_margin(6.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(format!("v{} hash", version)).small().weak());
                ui.label(RichText::new(digest).monospace());
            });
        });
}

fn sequence_panel(ui: &mut Ui, id: &str, title: &str, spans: &[PositionedSpan], legend: &str) {
    egui::Frame::default()
        .stroke(egui::Stroke::new(1.0, Color32::from_gray(226)))
        .inner_margin(8.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).strong());
            ScrollArea::vertical()
                .id_salt(id)
                .max_height(ui.ctx().content_rect().height() * 0.4)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(0.0, 2.0);
                        for span in spans {
                            ui.label(span_text(span))
                                .on_hover_text(format!("pos {}-{}", span.start, span.end));
                        }
                    });
                });
            ui.label(RichText::new(legend).small().weak());
        });
}

fn span_text(span: &PositionedSpan) -> RichText {
    let text = RichText::new(span.text.as_str()).monospace().size(MONO_SIZE);
    match span.kind {
        SegmentKind::Equal => text,
        SegmentKind::Added => text.color(ADDED_TEXT_COLOR).background_color(ADDED_RUN_BG),
        SegmentKind::Removed => text
            .color(REMOVED_TEXT_COLOR)
            .background_color(REMOVED_RUN_BG),
    }
}

use crate::diff::{
    DiffSegment, Emphasis, FieldDiffRecord, FieldLayout, Granularity, Highlight, RowKind, RowPair,
    SegmentKind, Side, changed_field_count, diff, reconcile_lines, render_row, row_stats,
};
use crate::style::{
    ADDED_LINE_BG, ADDED_RUN_BG, ADDED_TEXT_COLOR, MONO_SIZE, MUTED_BG, MUTED_TEXT_COLOR,
    REMOVED_LINE_BG, REMOVED_RUN_BG, REMOVED_TEXT_COLOR,
};
use egui::{Color32, FontId, RichText, TextFormat, Ui, Vec2, text::LayoutJob};

const LINE_HEIGHT: f32 = 20.0;

pub struct MetadataView;

impl MetadataView {
    pub fn show(ui: &mut Ui, fields: &[FieldDiffRecord], version1: u32, version2: u32) {
        if fields.is_empty() {
            ui.label("No metadata available to compare.");
            return;
        }

        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Old v{}", version1))
                    .color(REMOVED_TEXT_COLOR)
                    .background_color(REMOVED_RUN_BG),
            );
            ui.label(
                RichText::new(format!("New v{}", version2))
                    .color(ADDED_TEXT_COLOR)
                    .background_color(ADDED_RUN_BG),
            );
            ui.add_space(12.0);
            ui.label(
                RichText::new(format!(
                    "{} of {} fields changed",
                    changed_field_count(fields),
                    fields.len()
                ))
                .weak(),
            );
        });
        ui.add_space(8.0);

        for (field_idx, field) in fields.iter().enumerate() {
            ui.push_id(field_idx, |ui| {
                ui.label(RichText::new(&field.key).strong());
                match field.layout() {
                    FieldLayout::Unchanged => {
                        egui::Frame::default()
                            .fill(MUTED_BG)
                            .inner_margin(6.0)
                            .corner_radius(4.0)
                            .show(ui, |ui| {
                                ui.set_min_width(ui.available_width());
                                ui.label(RichText::new("No change").weak());
                            });
                    }
                    FieldLayout::Inline { old, new } => {
                        render_inline_diff(ui, &diff(old.as_str(), new.as_str(), Granularity::Word));
                    }
                    FieldLayout::MultiLine { old, new } => {
                        let rows = reconcile_lines(&old, &new);
                        let stats = row_stats(&rows);
                        ui.label(
                            RichText::new(format!("+{} -{}", stats.added, stats.removed))
                                .small()
                                .weak(),
                        );
                        render_rows(ui, &rows);
                    }
                }
                ui.add_space(12.0);
            });
        }
    }
}

fn text_format(color: Color32, background: Color32) -> TextFormat {
    TextFormat {
        font_id: FontId::monospace(MONO_SIZE),
        color,
        background,
        line_height: Some(LINE_HEIGHT),
        ..Default::default()
    }
}

/// Word-level diff of a short value, one column per side
fn render_inline_diff(ui: &mut Ui, segments: &[DiffSegment]) {
    let base_text_color = ui.visuals().text_color();

    ui.columns(2, |columns| {
        for (column, side) in columns.iter_mut().zip([Side::Old, Side::New]) {
            let mut job = LayoutJob::default();
            for segment in segments.iter().filter(|s| s.visible_on(side)) {
                let format = match segment.kind {
                    SegmentKind::Equal => text_format(base_text_color, Color32::TRANSPARENT),
                    SegmentKind::Added => text_format(ADDED_TEXT_COLOR, ADDED_RUN_BG),
                    SegmentKind::Removed => text_format(REMOVED_TEXT_COLOR, REMOVED_RUN_BG),
                };
                job.append(&segment.value, 0.0, format);
            }

            egui::Frame::default()
                .stroke(egui::Stroke::new(1.0, Color32::from_gray(226)))
                .inner_margin(6.0)
                .corner_radius(4.0)
                .show(column, |ui| {
                    ui.set_min_width(ui.available_width());
                    job.wrap.max_width = ui.available_width();
                    ui.add(egui::Label::new(job).wrap());
                });
        }
    });
}

/// Reconciled rows of a multi-line value, old and new side by side
fn render_rows(ui: &mut Ui, rows: &[RowPair]) {
    ui.style_mut().spacing.item_spacing.y = 1.0;

    // Leave room for the grid spacing so the second column does not jitter
    let col_w = (ui.available_width() / 2.0 - 8.0).max(100.0);

    egui::Grid::new("metadata_rows_grid")
        .num_columns(2)
        .min_col_width(0.0)
        .spacing(Vec2::new(4.0, 1.0))
        .show(ui, |ui| {
            for row in rows {
                render_cell(ui, row, Side::Old, col_w);
                render_cell(ui, row, Side::New, col_w);
                ui.end_row();
            }
        });
}

fn row_background(kind: RowKind, side: Side) -> Color32 {
    match (kind, side) {
        (RowKind::Equal, _) => Color32::TRANSPARENT,
        (RowKind::Added, Side::New) | (RowKind::Changed, Side::New) => ADDED_LINE_BG,
        (RowKind::Removed, Side::Old) | (RowKind::Changed, Side::Old) => REMOVED_LINE_BG,
        (RowKind::Added, Side::Old) | (RowKind::Removed, Side::New) => MUTED_BG,
    }
}

fn render_cell(ui: &mut Ui, row: &RowPair, side: Side, width: f32) {
    let base_text_color = ui.visuals().text_color();
    let highlights: Vec<Highlight> = render_row(row, side);

    egui::Frame::default()
        .fill(row_background(row.kind, side))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.set_min_width(width - 12.0);

            let mut job = LayoutJob::default();
            for highlight in &highlights {
                let format = match highlight.emphasis {
                    Emphasis::Plain => text_format(base_text_color, Color32::TRANSPARENT),
                    Emphasis::Removed if row.kind == RowKind::Changed => {
                        text_format(REMOVED_TEXT_COLOR, REMOVED_RUN_BG)
                    }
                    Emphasis::Added if row.kind == RowKind::Changed => {
                        text_format(ADDED_TEXT_COLOR, ADDED_RUN_BG)
                    }
                    // Whole-line additions and removals are marked by the row background
                    Emphasis::Removed | Emphasis::Added => {
                        text_format(base_text_color, Color32::TRANSPARENT)
                    }
                    Emphasis::Blank => text_format(MUTED_TEXT_COLOR, Color32::TRANSPARENT),
                };
                // keep empty lines one row tall
                let text = if highlight.text.is_empty() { " " } else { highlight.text.as_str() };
                job.append(text, 0.0, format);
            }

            job.wrap.max_width = width - 12.0;
            ui.add(egui::Label::new(job).wrap());
        });
}

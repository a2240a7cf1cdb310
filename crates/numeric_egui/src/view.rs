//! An egui widget showing one numeric field from a [`NumericFieldStore`].

use egui::{
    Align2, Color32, EventFilter, FontId, Pos2, Rect, Response, Sense, Stroke, StrokeKind, Ui,
    Vec2,
};
use numeric_input::{FieldId, NumericFieldStore, ValueSink, clamp_to_char_boundary};

use crate::route::{RouteOutcome, route_events};

const PAD_X: f32 = 4.0;

/// Widget options. The field itself lives in the store.
#[derive(Clone, Debug)]
pub struct NumericFieldView {
    pub width: f32,
    pub font_px: f32,
}

impl Default for NumericFieldView {
    fn default() -> Self {
        Self {
            width: 160.0,
            font_px: 14.0,
        }
    }
}

impl NumericFieldView {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Show field `id`, routing this frame's input to it while it holds focus.
    ///
    /// A primary press inside the widget focuses the field; a press anywhere
    /// else blurs it, which commits.
    pub fn show<S: ValueSink>(
        &self,
        ui: &mut Ui,
        store: &mut NumericFieldStore<S>,
        id: FieldId,
    ) -> (Response, RouteOutcome) {
        let height = self.font_px + 2.0 * PAD_X;
        let (rect, mut resp) = ui.allocate_exact_size(Vec2::new(self.width, height), Sense::click());
        let egui_id = ui.make_persistent_id(("numeric-field", id));

        let press = ui.input(|i| {
            if i.pointer.primary_pressed() {
                i.pointer.interact_pos()
            } else {
                None
            }
        });
        if let Some(pos) = press {
            if rect.contains(pos) {
                store.focus(id);
            } else if store.is_focused(id) {
                store.blur(id);
                ui.memory_mut(|mem| mem.surrender_focus(egui_id));
            }
        }

        let mut outcome = RouteOutcome::default();
        if store.is_focused(id) {
            // Keep arrows and tab inside the field.
            ui.memory_mut(|mem| {
                mem.request_focus(egui_id);
                mem.set_focus_lock_filter(
                    egui_id,
                    EventFilter {
                        tab: true,
                        horizontal_arrows: true,
                        vertical_arrows: false,
                        escape: true,
                    },
                );
            });
            let events = ui.input(|i| i.events.clone());
            outcome = route_events(store, id, &events);
        }

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect, store, id);
        }
        if outcome.text_changed {
            resp.mark_changed();
        }
        (resp, outcome)
    }

    fn paint<S: ValueSink>(&self, ui: &Ui, rect: Rect, store: &NumericFieldStore<S>, id: FieldId) {
        let painter = ui.painter_at(rect);
        let visuals = ui.visuals();
        let focused = store.is_focused(id);
        let text = store.text(id).unwrap_or_default();
        let font_id = FontId::monospace(self.font_px);
        let color = visuals.text_color();

        let stroke = if focused {
            visuals.selection.stroke
        } else {
            Stroke::new(1.0, visuals.weak_text_color())
        };
        painter.rect_filled(rect, 2.0, visuals.extreme_bg_color);
        painter.rect_stroke(rect, 2.0, stroke, StrokeKind::Inside);

        // Right-aligned like a spreadsheet cell.
        let galley = painter.layout_no_wrap(text.to_owned(), font_id.clone(), color);
        let text_w = galley.size().x;
        let text_x = rect.max.x - PAD_X - text_w;
        let text_y = rect.center().y;
        painter.text(
            Pos2::new(text_x, text_y),
            Align2::LEFT_CENTER,
            text,
            font_id.clone(),
            color,
        );

        if !focused {
            return;
        }
        let Some(field) = store.get(id) else {
            return;
        };
        let selection = field.selection();
        let x_at = |offset: usize| {
            let offset = clamp_to_char_boundary(text, offset);
            let prefix = painter.layout_no_wrap(text[..offset].to_owned(), font_id.clone(), color);
            text_x + prefix.size().x
        };

        let half_h = self.font_px * 0.5;
        if !selection.is_caret() {
            let sel_rect = Rect::from_min_max(
                Pos2::new(x_at(selection.start), text_y - half_h),
                Pos2::new(x_at(selection.end), text_y + half_h),
            );
            painter.rect_filled(sel_rect, 0.0, visuals.selection.bg_fill.gamma_multiply(0.6));
        }
        let caret_x = x_at(field.caret()).round();
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(caret_x, text_y - half_h), Vec2::new(1.0, self.font_px)),
            0.0,
            Color32::from_gray(if visuals.dark_mode { 230 } else { 20 }),
        );
    }
}

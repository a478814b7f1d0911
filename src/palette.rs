//! The palette tool's controller: owns the canvas, its history and the
//! current selection, and applies whatever the input state machine asks for.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use image::Rgb;

use crate::canvas::Canvas;
use crate::command::{ActionId, SnapshotHistory};
use crate::config::PaletteConfig;
use crate::effect::Effect;
use crate::error::{ConfigError, ExportError};
use crate::file_handler::{ImageSink, artwork_file_name};
use crate::input::{InputAction, InputEvent, InputStateMachine};
use crate::layout::Layout;
use crate::state::{SelectionPrefs, SelectionState};
use crate::util::time;

/// Seconds a status message stays on screen
pub const STATUS_DURATION: f64 = 1.0;

/// Transient on-screen message, e.g. save confirmation
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub shown_at: f64,
}

impl StatusMessage {
    /// True once the message has been visible for longer than [`STATUS_DURATION`]
    pub fn is_expired(&self, now: f64) -> bool {
        now - self.shown_at > STATUS_DURATION
    }
}

/// What the shell should do after an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub redraw: bool,
    pub quit: bool,
}

pub struct PaletteController {
    config: PaletteConfig,
    canvas: Canvas,
    history: SnapshotHistory,
    selection: SelectionState,
    layout: Layout,
    input: InputStateMachine,
    sink: Box<dyn ImageSink>,
    status: Option<StatusMessage>,
    /// Bumped whenever the canvas pixels change
    revision: u64,
}

impl PaletteController {
    /// Build the canvas, history and layout described by `config`
    pub fn new(config: PaletteConfig, sink: Box<dyn ImageSink>) -> Result<Self, ConfigError> {
        config.validate()?;

        let canvas = Canvas::new(config.canvas_width, config.canvas_height, config.background_color())?;
        let history = SnapshotHistory::new(canvas.snapshot(), config.history_capacity);
        let selection = SelectionState::new(
            config.colors[0].color(),
            config.default_brush_index,
            config.brush_sizes[config.default_brush_index],
        );
        let layout = Layout::standard(&config);
        let input = InputStateMachine::new(config.chrome_height, [config.canvas_width, config.canvas_height]);

        log::info!(
            "Palette ready: {}x{} canvas, {} colors, history of {}",
            config.canvas_width,
            config.canvas_height,
            config.colors.len(),
            config.history_capacity
        );

        Ok(Self {
            config,
            canvas,
            history,
            selection,
            layout,
            input,
            sink,
            status: None,
            revision: 0,
        })
    }

    /// Run one input event through the state machine and apply the result
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        let color = self.selection.stroke_color(self.canvas.background());
        let thickness = self.selection.brush_width;

        let Some(action) = self.input.handle(event, &self.layout, color, thickness) else {
            return EventOutcome::default();
        };

        match action {
            InputAction::StampDot { at, color, thickness } => {
                self.canvas.stamp_dot(at, color, thickness);
                self.touch();
            }
            InputAction::DrawSegment {
                from,
                to,
                color,
                thickness,
            } => {
                self.canvas.draw_segment(from, to, color, thickness);
                self.touch();
            }
            InputAction::CommitStroke { points } => {
                log::debug!("Stroke finished with {} points", points);
                self.commit();
            }
            InputAction::Dispatch(action) => self.dispatch(action),
            InputAction::Quit => {
                log::info!("Quit requested");
                return EventOutcome {
                    redraw: false,
                    quit: true,
                };
            }
        }

        EventOutcome {
            redraw: true,
            quit: false,
        }
    }

    /// Perform a chrome or keyboard action
    pub fn dispatch(&mut self, action: ActionId) {
        log::info!("Action: {:?}", action);
        match action {
            ActionId::SelectColor(index) => {
                if let Some(entry) = self.config.colors.get(index) {
                    self.selection.color = entry.color();
                    self.selection.eraser = false;
                }
            }
            ActionId::SelectCustomColor => {
                self.selection.color = self.selection.custom_color;
                self.selection.eraser = false;
            }
            ActionId::SelectBrush(index) => self.select_brush(index),
            ActionId::SelectBrushTool => self.selection.eraser = false,
            ActionId::SelectEraser => self.selection.eraser = true,
            ActionId::Clear => self.clear(),
            ActionId::Save => {
                if let Err(err) = self.save() {
                    log::debug!("Save action left canvas untouched: {}", err);
                }
            }
            ActionId::ApplyEffect(effect) => self.apply_effect(effect),
            ActionId::Undo => self.undo(),
            ActionId::Redo => self.redo(),
        }

        if action.swaps_canvas() && self.config.abort_stroke_on_canvas_swap {
            self.input.cancel_stroke();
        }
    }

    fn select_brush(&mut self, index: usize) {
        if let Some(width) = self.config.brush_sizes.get(index) {
            self.selection.brush_index = index;
            self.selection.brush_width = *width;
        }
    }

    /// Slider callback: update the custom swatch and draw with it
    pub fn set_custom_color(&mut self, color: Rgb<u8>) {
        self.selection.custom_color = color;
        self.selection.color = color;
    }

    /// Fill the canvas with the background and commit
    pub fn clear(&mut self) {
        self.canvas.clear(self.canvas.background());
        self.commit();
    }

    /// Select `effect` and, unless it is the identity, transform and commit the canvas
    pub fn apply_effect(&mut self, effect: Effect) {
        self.selection.effect = effect;
        if effect.mutates_canvas() {
            self.canvas.apply_effect(effect);
            self.commit();
        }
    }

    /// Step back one snapshot; no-op at the oldest
    pub fn undo(&mut self) {
        match self.history.undo() {
            Some(snapshot) => {
                self.canvas.restore(&snapshot);
                self.touch();
            }
            None => log::debug!("Nothing to undo"),
        }
    }

    /// Step forward one snapshot; no-op at the newest
    pub fn redo(&mut self) {
        match self.history.redo() {
            Some(snapshot) => {
                self.canvas.restore(&snapshot);
                self.touch();
            }
            None => log::debug!("Nothing to redo"),
        }
    }

    /// Export with the current wall-clock timestamp and post a status message
    pub fn save(&mut self) -> Result<PathBuf, ExportError> {
        self.save_at(Local::now())
    }

    /// Export named after `at` and post a status message
    pub fn save_at(&mut self, at: DateTime<Local>) -> Result<PathBuf, ExportError> {
        let file_name = artwork_file_name(&at, &self.config.export_extension);
        let result = self.sink.write(&file_name, self.canvas.pixels());
        match &result {
            Ok(path) => self.post_status(format!("Saved as {}", path.display()), false),
            Err(err) => {
                log::warn!("Export failed: {}", err);
                self.post_status(format!("Save failed: {}", err), true);
            }
        }
        result
    }

    fn commit(&mut self) {
        self.history.commit(self.canvas.snapshot());
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn post_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage {
            text,
            is_error,
            shown_at: time::current_time_secs(),
        });
    }

    /// Current status message, dropped once it has been shown long enough
    pub fn status(&mut self, now: f64) -> Option<&StatusMessage> {
        if self.status.as_ref().is_some_and(|s| s.is_expired(now)) {
            self.status = None;
        }
        self.status.as_ref()
    }

    /// Restore persisted brush and custom color choices
    pub fn apply_prefs(&mut self, prefs: SelectionPrefs) {
        self.select_brush(prefs.brush_index);
        self.selection.custom_color = Rgb(prefs.custom_color);
    }

    /// The live canvas
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Snapshot history of committed canvas states
    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    /// Current color, brush and tool selection
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Chrome regions used for hit testing and painting
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Configuration the controller was built from
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Pointer state machine
    pub fn input(&self) -> &InputStateMachine {
        &self.input
    }

    /// Actions to outline in the chrome
    pub fn highlighted(&self) -> HashSet<ActionId> {
        self.layout.highlight_state(&self.selection)
    }

    /// Counter bumped on every pixel change, for texture uploads
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use egui::{PointerButton, pos2};

    use super::*;
    use crate::file_handler::MemorySink;
    use crate::input::KeyCommand;

    fn controller() -> PaletteController {
        PaletteController::new(PaletteConfig::default(), Box::new(MemorySink::default())).unwrap()
    }

    fn click(ctl: &mut PaletteController, x: f32, y: f32) {
        ctl.handle_event(InputEvent::PointerDown {
            pos: pos2(x, y),
            button: PointerButton::Primary,
        });
        ctl.handle_event(InputEvent::PointerUp {
            pos: pos2(x, y),
            button: PointerButton::Primary,
        });
    }

    #[test]
    fn test_selection_changes_do_not_commit() {
        let mut ctl = controller();
        ctl.dispatch(ActionId::SelectColor(3));
        ctl.dispatch(ActionId::SelectBrush(4));
        ctl.dispatch(ActionId::SelectEraser);
        ctl.dispatch(ActionId::SelectBrushTool);
        ctl.set_custom_color(Rgb([1, 2, 3]));
        ctl.dispatch(ActionId::ApplyEffect(Effect::Normal));
        assert_eq!(ctl.history().len(), 1);
        assert_eq!(ctl.selection().brush_width, 20);
        assert_eq!(ctl.selection().color, Rgb([1, 2, 3]));
    }

    #[test]
    fn test_canvas_mutations_commit_once() {
        let mut ctl = controller();
        ctl.dispatch(ActionId::Clear);
        assert_eq!(ctl.history().len(), 2);
        ctl.dispatch(ActionId::ApplyEffect(Effect::Blur));
        assert_eq!(ctl.history().len(), 3);
        assert_eq!(ctl.selection().effect, Effect::Blur);
    }

    #[test]
    fn test_color_click_leaves_eraser_mode() {
        let mut ctl = controller();
        ctl.dispatch(ActionId::SelectEraser);
        click(&mut ctl, 105.0, 30.0);
        assert!(!ctl.selection().eraser);
        assert_eq!(ctl.selection().color, Rgb([255, 0, 0]));
    }

    #[test]
    fn test_custom_swatch_click() {
        let mut ctl = controller();
        ctl.set_custom_color(Rgb([9, 8, 7]));
        ctl.dispatch(ActionId::SelectColor(0));
        click(&mut ctl, 540.0, 30.0);
        assert_eq!(ctl.selection().color, Rgb([9, 8, 7]));
    }

    #[test]
    fn test_quit_key() {
        let mut ctl = controller();
        let outcome = ctl.handle_event(InputEvent::Key(KeyCommand::Quit));
        assert!(outcome.quit);
    }

    #[test]
    fn test_save_posts_status() {
        let mut ctl = controller();
        let at = Local.with_ymd_and_hms(1999, 12, 31, 18, 0, 0).unwrap();
        let path = ctl.save_at(at).unwrap();
        assert_eq!(path, PathBuf::from("artwork_19991231_180000.png"));
        let now = time::current_time_secs();
        let status = ctl.status(now).unwrap();
        assert!(!status.is_error);
        assert!(status.text.contains("artwork_19991231_180000.png"));
        assert!(ctl.status(now + STATUS_DURATION + 1.0).is_none());
    }

    #[test]
    fn test_prefs_restore() {
        let mut ctl = controller();
        ctl.apply_prefs(SelectionPrefs {
            brush_index: 5,
            custom_color: [4, 5, 6],
        });
        assert_eq!(ctl.selection().brush_width, 30);
        assert_eq!(ctl.selection().custom_color, Rgb([4, 5, 6]));

        ctl.apply_prefs(SelectionPrefs {
            brush_index: 99,
            custom_color: [0, 0, 0],
        });
        assert_eq!(ctl.selection().brush_index, 5);
    }
}

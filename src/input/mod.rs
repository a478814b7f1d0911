use egui::{Context, Key, PointerButton, Pos2, Rect};

use crate::command::ActionId;

mod state;
pub use state::{InputAction, InputStateMachine, StrokeState};

/// Keyboard shortcuts understood regardless of pointer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Undo,
    Redo,
    Clear,
    Save,
    SelectBrush,
    SelectEraser,
    Quit,
}

impl KeyCommand {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Z => Some(Self::Undo),
            Key::Y => Some(Self::Redo),
            Key::C => Some(Self::Clear),
            Key::S => Some(Self::Save),
            Key::B => Some(Self::SelectBrush),
            Key::E => Some(Self::SelectEraser),
            Key::Escape => Some(Self::Quit),
            _ => None,
        }
    }

    /// Controller action behind the shortcut. `Quit` has none.
    pub fn action(&self) -> Option<ActionId> {
        match self {
            Self::Undo => Some(ActionId::Undo),
            Self::Redo => Some(ActionId::Redo),
            Self::Clear => Some(ActionId::Clear),
            Self::Save => Some(ActionId::Save),
            Self::SelectBrush => Some(ActionId::SelectBrushTool),
            Self::SelectEraser => Some(ActionId::SelectEraser),
            Self::Quit => None,
        }
    }
}

/// Input events in screen space: the chrome strip starts at y = 0 and the canvas follows below it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Pos2, button: PointerButton },
    PointerMove { pos: Pos2 },
    PointerUp { pos: Pos2, button: PointerButton },
    Key(KeyCommand),
}

/// Converts raw egui input into [`InputEvent`]s relative to the palette surface
#[derive(Debug, Clone)]
pub struct InputHandler {
    surface: Rect,
}

impl InputHandler {
    pub fn new(surface: Rect) -> Self {
        Self { surface }
    }

    /// Update the on-screen rectangle of chrome plus canvas
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface = rect;
    }

    fn to_surface(&self, pos: Pos2) -> Pos2 {
        (pos - self.surface.min).to_pos2()
    }

    /// Drain this frame's pointer and key events.
    ///
    /// Presses outside the surface are dropped so other widgets keep their clicks.
    /// Moves and releases are always forwarded so a drag can leave the surface.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let wants_keyboard = ctx.wants_keyboard_input();
        let mut events = Vec::new();

        ctx.input(|input| {
            for event in &input.events {
                match event {
                    egui::Event::PointerMoved(pos) => {
                        events.push(InputEvent::PointerMove {
                            pos: self.to_surface(*pos),
                        });
                    }
                    egui::Event::PointerButton {
                        pos, button, pressed, ..
                    } => {
                        let local = self.to_surface(*pos);
                        if *pressed {
                            if self.surface.contains(*pos) {
                                events.push(InputEvent::PointerDown {
                                    pos: local,
                                    button: *button,
                                });
                            }
                        } else {
                            events.push(InputEvent::PointerUp {
                                pos: local,
                                button: *button,
                            });
                        }
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } if !wants_keyboard => {
                        if let Some(command) = KeyCommand::from_key(*key) {
                            events.push(InputEvent::Key(command));
                        }
                    }
                    _ => {}
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(KeyCommand::from_key(Key::Z), Some(KeyCommand::Undo));
        assert_eq!(KeyCommand::from_key(Key::Escape), Some(KeyCommand::Quit));
        assert_eq!(KeyCommand::from_key(Key::Q), None);
        assert_eq!(KeyCommand::SelectEraser.action(), Some(ActionId::SelectEraser));
        assert_eq!(KeyCommand::Quit.action(), None);
    }
}

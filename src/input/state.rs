//! Pointer state machine turning input events into canvas and chrome actions.
//!
//! ```text
//!   ┌────────────┐  down in chrome   ┌────────────┐
//!   │            ├──────────────────►│ ChromeDown │
//!   │    Idle    │◄──────────────────┤            │ up: dispatch if same region
//!   │            │                   └────────────┘
//!   │            │  down on canvas   ┌────────────┐
//!   │            ├──────────────────►│  Drawing   │ move: segment
//!   │            │◄──────────────────┤            │ up: commit
//!   └────────────┘                   └────────────┘
//! ```
//!
//! The machine only tracks the in-progress stroke. Every durable change is
//! returned as an [`InputAction`] for the controller to apply.

use egui::{PointerButton, Pos2, pos2, vec2};
use image::Rgb;

use super::InputEvent;
use crate::command::ActionId;
use crate::layout::Layout;
use crate::stroke::Stroke;

/// What the controller must do in response to one event
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Stamp a dot where a stroke begins
    StampDot { at: Pos2, color: Rgb<u8>, thickness: u32 },
    /// Rasterize a stroke segment
    DrawSegment {
        from: Pos2,
        to: Pos2,
        color: Rgb<u8>,
        thickness: u32,
    },
    /// A stroke finished; snapshot the canvas
    CommitStroke { points: usize },
    Dispatch(ActionId),
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum StrokeState {
    #[default]
    Idle,
    /// Primary button held over the chrome strip
    ChromeDown { pressed: Option<ActionId> },
    /// Primary button held over the canvas
    Drawing { stroke: Stroke },
}

impl StrokeState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::ChromeDown { .. } => "ChromeDown",
            Self::Drawing { .. } => "Drawing",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputStateMachine {
    state: StrokeState,
    chrome_height: f32,
    canvas_size: [u32; 2],
}

impl InputStateMachine {
    /// Machine for a canvas of `canvas_size` below a strip `chrome_height` tall
    pub fn new(chrome_height: f32, canvas_size: [u32; 2]) -> Self {
        Self {
            state: StrokeState::Idle,
            chrome_height,
            canvas_size,
        }
    }

    pub fn state(&self) -> &StrokeState {
        &self.state
    }

    /// True while a stroke is in progress
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, StrokeState::Drawing { .. })
    }

    /// Map a screen point onto the canvas, clamping to its edges
    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        let p = screen - vec2(0.0, self.chrome_height);
        let max_x = self.canvas_size[0].saturating_sub(1) as f32;
        let max_y = self.canvas_size[1].saturating_sub(1) as f32;
        pos2(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
    }

    /// Feed one event. `color` and `thickness` describe the active brush.
    pub fn handle(
        &mut self,
        event: InputEvent,
        layout: &Layout,
        color: Rgb<u8>,
        thickness: u32,
    ) -> Option<InputAction> {
        match event {
            InputEvent::Key(command) => match command.action() {
                Some(action) => Some(InputAction::Dispatch(action)),
                None => Some(InputAction::Quit),
            },
            InputEvent::PointerDown { button, .. } | InputEvent::PointerUp { button, .. }
                if button != PointerButton::Primary =>
            {
                None
            }
            InputEvent::PointerDown { pos, .. } => self.pointer_down(pos, layout, color, thickness),
            InputEvent::PointerMove { pos } => self.pointer_move(pos, color, thickness),
            InputEvent::PointerUp { pos, .. } => self.pointer_up(pos, layout),
        }
    }

    fn pointer_down(&mut self, pos: Pos2, layout: &Layout, color: Rgb<u8>, thickness: u32) -> Option<InputAction> {
        match self.state {
            StrokeState::Drawing { .. } => {
                log::debug!("Pointer down while drawing, continuing stroke");
                None
            }
            StrokeState::Idle | StrokeState::ChromeDown { .. } => {
                if layout.in_chrome(pos) {
                    let pressed = layout.hit_test(pos);
                    log::debug!("Idle -> ChromeDown ({:?})", pressed);
                    self.state = StrokeState::ChromeDown { pressed };
                    None
                } else {
                    let at = self.to_canvas(pos);
                    log::debug!("Idle -> Drawing at {:?}", at);
                    self.state = StrokeState::Drawing {
                        stroke: Stroke::begin(at),
                    };
                    Some(InputAction::StampDot { at, color, thickness })
                }
            }
        }
    }

    fn pointer_move(&mut self, pos: Pos2, color: Rgb<u8>, thickness: u32) -> Option<InputAction> {
        let to = self.to_canvas(pos);
        let StrokeState::Drawing { stroke } = &mut self.state else {
            return None;
        };
        let from = stroke.extend(to);
        Some(InputAction::DrawSegment {
            from,
            to,
            color,
            thickness,
        })
    }

    fn pointer_up(&mut self, pos: Pos2, layout: &Layout) -> Option<InputAction> {
        match std::mem::take(&mut self.state) {
            StrokeState::Idle => None,
            StrokeState::ChromeDown { pressed } => {
                log::debug!("ChromeDown -> Idle");
                let released = if layout.in_chrome(pos) { layout.hit_test(pos) } else { None };
                match (pressed, released) {
                    (Some(a), Some(b)) if a == b => Some(InputAction::Dispatch(a)),
                    _ => None,
                }
            }
            StrokeState::Drawing { stroke } => {
                log::debug!("Drawing -> Idle after {} points", stroke.point_count());
                Some(InputAction::CommitStroke { points: stroke.point_count() })
            }
        }
    }

    /// Drop an in-progress stroke without committing it
    pub fn cancel_stroke(&mut self) {
        if self.is_drawing() {
            log::debug!("Stroke cancelled");
            self.state = StrokeState::Idle;
        }
    }
}

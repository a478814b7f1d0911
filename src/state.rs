use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::effect::Effect;

/// Current tool selection. Only dispatched actions mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub color: Rgb<u8>,
    pub brush_index: usize,
    pub brush_width: u32,
    pub eraser: bool,
    pub effect: Effect,
    /// Components of the slider-driven custom swatch
    pub custom_color: Rgb<u8>,
}

impl SelectionState {
    pub fn new(color: Rgb<u8>, brush_index: usize, brush_width: u32) -> Self {
        Self {
            color,
            brush_index,
            brush_width,
            eraser: false,
            effect: Effect::Normal,
            custom_color: Rgb([0, 0, 0]),
        }
    }

    /// Color a stroke paints with: the background while erasing
    pub fn stroke_color(&self, background: Rgb<u8>) -> Rgb<u8> {
        if self.eraser { background } else { self.color }
    }
}

/// The part of the selection restored between sessions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPrefs {
    pub brush_index: usize,
    pub custom_color: [u8; 3],
}

impl Default for SelectionPrefs {
    fn default() -> Self {
        Self {
            brush_index: 1,
            custom_color: [0, 0, 0],
        }
    }
}

impl From<&SelectionState> for SelectionPrefs {
    fn from(selection: &SelectionState) -> Self {
        Self {
            brush_index: selection.brush_index,
            custom_color: selection.custom_color.0,
        }
    }
}

use image::Rgb;

use crate::effect::Effect;

/// Everything a chrome region or a key binding can ask the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    /// Pick a palette color by index
    SelectColor(usize),
    /// Pick the slider-driven custom color
    SelectCustomColor,
    /// Pick a brush width by index
    SelectBrush(usize),
    /// Leave eraser mode
    SelectBrushTool,
    SelectEraser,
    Clear,
    Save,
    ApplyEffect(Effect),
    Undo,
    Redo,
}

impl ActionId {
    /// Actions that replace the canvas wholesale
    pub fn swaps_canvas(&self) -> bool {
        matches!(self, ActionId::Clear | ActionId::Undo | ActionId::Redo)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionId::SelectColor(_) => "Color",
            ActionId::SelectCustomColor => "Custom",
            ActionId::SelectBrush(_) => "Size",
            ActionId::SelectBrushTool => "Brush",
            ActionId::SelectEraser => "Eraser",
            ActionId::Clear => "Clear",
            ActionId::Save => "Save",
            ActionId::ApplyEffect(effect) => effect.label(),
            ActionId::Undo => "Undo",
            ActionId::Redo => "Redo",
        }
    }
}

/// Data attached to a region, read by rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    Color(Rgb<u8>),
    BrushWidth(u32),
    Effect(Effect),
}

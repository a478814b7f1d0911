mod central_panel;
mod control_strip;

pub use central_panel::central_panel;
pub use control_strip::control_strip;

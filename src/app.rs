use egui::{ColorImage, Rect, TextureHandle, TextureOptions, pos2, vec2};
use image::Rgb;

use crate::input::InputHandler;
use crate::palette::{PaletteController, STATUS_DURATION};
use crate::panels;
use crate::state::SelectionPrefs;
use crate::util::time;

/// Height reserved below the canvas for the custom color sliders
pub const SLIDER_PANEL_HEIGHT: f32 = 40.0;

pub struct PaletteApp {
    controller: PaletteController,
    input_handler: InputHandler,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    custom_rgb: [u8; 3],
}

impl PaletteApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, mut controller: PaletteController) -> Self {
        if let Some(storage) = cc.storage {
            if let Some(prefs) = eframe::get_value::<SelectionPrefs>(storage, eframe::APP_KEY) {
                log::info!("Restoring selection preferences: {:?}", prefs);
                controller.apply_prefs(prefs);
            }
        }
        let custom_rgb = controller.selection().custom_color.0;

        Self {
            controller,
            input_handler: InputHandler::new(Rect::NOTHING),
            texture: None,
            uploaded_revision: None,
            custom_rgb,
        }
    }

    /// Re-upload the canvas pixels if they changed since the last frame
    fn sync_texture(&mut self, ctx: &egui::Context) -> TextureHandle {
        let canvas = self.controller.canvas();
        let revision = self.controller.revision();
        let image = || {
            ColorImage::from_rgb(
                [canvas.width() as usize, canvas.height() as usize],
                canvas.pixels().as_raw(),
            )
        };

        let stale = self.uploaded_revision != Some(revision);
        self.uploaded_revision = Some(revision);

        if let Some(texture) = &mut self.texture {
            if stale {
                texture.set(image(), TextureOptions::NEAREST);
            }
            return texture.clone();
        }

        let texture = ctx.load_texture("palette-canvas", image(), TextureOptions::NEAREST);
        self.texture = Some(texture.clone());
        texture
    }

    fn slider_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("custom_color")
            .exact_height(SLIDER_PANEL_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let mut changed = false;
                    for (label, value) in ["R", "G", "B"].into_iter().zip(self.custom_rgb.iter_mut()) {
                        changed |= ui.add(egui::Slider::new(value, 0..=255).text(label)).changed();
                    }
                    if changed {
                        self.controller.set_custom_color(Rgb(self.custom_rgb));
                    }
                });
            });
    }
}

impl eframe::App for PaletteApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &SelectionPrefs::from(self.controller.selection()));
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.slider_panel(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let config = self.controller.config();
                let chrome_height = config.chrome_height;
                let size = vec2(config.canvas_width as f32, chrome_height + config.canvas_height as f32);
                let (surface, _response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

                self.input_handler.set_surface_rect(surface);
                for event in self.input_handler.process_input(ctx) {
                    let outcome = self.controller.handle_event(event);
                    if outcome.quit {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        return;
                    }
                }

                let texture = self.sync_texture(ctx);
                let painter = ui.painter_at(surface);
                let canvas_rect = Rect::from_min_max(pos2(surface.min.x, surface.min.y + chrome_height), surface.max);

                let now = time::current_time_secs();
                let status = self.controller.status(now).cloned();
                panels::central_panel(&painter, canvas_rect, &texture, status.as_ref());
                panels::control_strip(&painter, surface.min, &self.controller);

                if status.is_some() {
                    ctx.request_repaint_after(std::time::Duration::from_secs_f64(STATUS_DURATION));
                }
            });
    }
}

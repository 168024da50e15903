use eframe::egui;

use mandeltouch_render::{DisplaySurface, PixelBuffer};

/// A [`PixelBuffer`] backed by an egui texture.
///
/// `present` uploads the buffer only when it was written since the last
/// upload; the texture itself is painted by the frame loop.
pub(crate) struct EguiSurface {
    buffer: PixelBuffer,
    egui_ctx: egui::Context,
    texture: Option<egui::TextureHandle>,
    stale: bool,
}

impl EguiSurface {
    pub(crate) fn new(egui_ctx: &egui::Context, width: u32, height: u32) -> mandeltouch_render::Result<Self> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
            egui_ctx: egui_ctx.clone(),
            texture: None,
            stale: true,
        })
    }

    pub(crate) fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }
}

impl DisplaySurface for EguiSurface {
    fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    fn buffer_mut(&mut self) -> &mut PixelBuffer {
        self.stale = true;
        &mut self.buffer
    }

    fn present(&mut self) {
        if !self.stale {
            return;
        }
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [self.buffer.width as usize, self.buffer.height as usize],
            &self.buffer.to_rgba_bytes(),
        );
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture = Some(self.egui_ctx.load_texture(
                    "fractal",
                    image,
                    egui::TextureOptions::NEAREST,
                ));
            }
        }
        self.stale = false;
    }
}

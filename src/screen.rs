use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use log::info;
use pixels::{Pixels, SurfaceTexture};
use std::error::Error;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

const SCALE: f64 = 10.0;
const ON: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
const OFF: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// A window showing the machine's framebuffer, one texel per pixel.
#[derive(Debug)]
pub struct Screen {
    window: Window,
    pixels: Pixels,
}

impl Screen {
    pub fn new(event_loop: &EventLoop<()>) -> Result<Self, Box<dyn Error>> {
        let window = {
            let size = LogicalSize::new(WIDTH as f64, HEIGHT as f64);
            let scaled_size = LogicalSize::new(WIDTH as f64 * SCALE, HEIGHT as f64 * SCALE);
            WindowBuilder::new()
                .with_title("chipvm")
                .with_inner_size(scaled_size)
                .with_min_inner_size(size)
                .build(event_loop)?
        };

        let pixels = {
            let size = window.inner_size();
            let texture = SurfaceTexture::new(size.width, size.height, &window);
            Pixels::new(WIDTH as u32, HEIGHT as u32, texture)?
        };

        info!("Attached display [success: true]");
        Ok(Self { window, pixels })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), Box<dyn Error>> {
        self.pixels.resize_surface(size.width, size.height)?;
        Ok(())
    }

    pub fn render(&mut self, framebuffer: &Framebuffer) -> Result<(), pixels::Error> {
        paint(framebuffer, self.pixels.get_frame_mut());
        self.pixels.render()
    }
}

/// Writes the framebuffer into an RGBA frame of the same dimensions.
pub fn paint(framebuffer: &Framebuffer, frame: &mut [u8]) {
    for (pixel, &on) in frame.chunks_exact_mut(4).zip(framebuffer.as_slice()) {
        pixel.copy_from_slice(if on { &ON } else { &OFF });
    }
}

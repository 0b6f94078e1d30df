/*!
 * Presentation sinks. The ppu hands each finished framebuffer to a `Screen`; a screen that can no
 * longer accept frames returns an error, which stops the run.
 */

use log::trace;

use crate::error::Result;
use crate::ppu::Framebuffer;

pub trait Screen {
    fn present(&mut self, frame: &Framebuffer) -> Result<()>;
}

/// A screen that accepts every frame without displaying it
#[derive(Debug, Default)]
pub struct NoGuiScreen {
    frames_presented: u64,
}

impl NoGuiScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl Screen for NoGuiScreen {
    fn present(&mut self, frame: &Framebuffer) -> Result<()> {
        self.frames_presented += 1;
        trace!(
            "discarding {}x{} frame {}",
            frame.width(),
            frame.height(),
            self.frames_presented
        );
        Ok(())
    }
}

#[cfg(feature = "window")]
pub use self::pixels_screen::PixelsScreen;

#[cfg(feature = "window")]
mod pixels_screen {
    use pixels::{Pixels, SurfaceTexture};
    use winit::{
        dpi::LogicalSize,
        event::{Event, WindowEvent},
        event_loop::{ControlFlow, EventLoop},
        platform::run_return::EventLoopExtRunReturn,
        window::{Window, WindowBuilder},
    };

    use super::Screen;
    use crate::error::{Error, Result};
    use crate::ppu::Framebuffer;

    pub struct PixelsScreen {
        pixels: Pixels,
        event_loop: EventLoop<()>,
        _window: Window,
    }

    impl PixelsScreen {
        pub fn new(logical_width: u32, logical_height: u32, scale: u32) -> Result<Self> {
            let event_loop = EventLoop::new();
            let window = {
                let size = LogicalSize::new(logical_width as f64, logical_height as f64);
                let real_size = LogicalSize::new(
                    (logical_width * scale) as f64,
                    (logical_height * scale) as f64,
                );
                WindowBuilder::new()
                    .with_title("Game Boy PPU")
                    .with_inner_size(real_size)
                    .with_min_inner_size(size)
                    .build(&event_loop)
                    .map_err(|e| Error::from_presentation(e.to_string()))?
            };

            let pixels = {
                let window_size = window.inner_size();
                let surface_texture =
                    SurfaceTexture::new(window_size.width, window_size.height, &window);
                Pixels::new(logical_width, logical_height, surface_texture)
                    .map_err(|e| Error::from_presentation(e.to_string()))?
            };

            Ok(Self {
                pixels,
                event_loop,
                _window: window,
            })
        }
    }

    impl Screen for PixelsScreen {
        #[allow(deprecated)]
        fn present(&mut self, frame: &Framebuffer) -> Result<()> {
            let rgba = frame.to_rgba();
            let target = self.pixels.get_frame_mut();
            if target.len() != rgba.len() {
                return Err(Error::from_presentation(format!(
                    "frame is {} bytes, window expects {}",
                    rgba.len(),
                    target.len()
                )));
            }
            target.copy_from_slice(&rgba);

            self.pixels
                .render()
                .map_err(|e| Error::from_presentation(e.to_string()))?;

            let mut closed = false;
            self.event_loop.run_return(|event, _, control_flow| {
                *control_flow = ControlFlow::Exit;
                if let Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } = event
                {
                    closed = true;
                }
            });

            if closed {
                Err(Error::from_presentation("window closed".to_string()))
            } else {
                Ok(())
            }
        }
    }
}

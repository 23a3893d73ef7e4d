use std::{sync::Arc, time::Duration};

use anyhow::Context;
use log::{debug, error};
use pixels::{
    Pixels, PixelsBuilder, SurfaceTexture,
    wgpu::{Color, TextureFormat},
};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowAttributes, WindowId},
};

use super::{frame::RenderFrame, sleeper::Sleeper};

pub(super) struct RendererWindow {
    config: RendererWindowConfig,
    resumed_window: Option<ResumedWindow>,
    sleeper: Sleeper,
    failure: Option<anyhow::Error>,
}

impl RendererWindow {
    pub fn new(config: RendererWindowConfig) -> Self {
        let sleeper = {
            let target_frame_time = Duration::from_micros(1_000_000 / config.target_fps.max(1));
            Sleeper::new(target_frame_time)
        };

        Self {
            config,
            resumed_window: None,
            sleeper,
            failure: None,
        }
    }

    /// The error that made the event loop exit early, if any.
    pub fn into_result(self) -> anyhow::Result<()> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, failure: anyhow::Error) {
        error!("{failure:?}");
        self.failure.get_or_insert(failure);
        event_loop.exit();
    }

    fn open(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<ResumedWindow> {
        let window = Arc::new({
            let window_size =
                LogicalSize::new(self.config.window_width, self.config.window_height);

            event_loop
                .create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(window_size),
                )
                .context("Creating window")?
        });

        let pixels = {
            let window_size = window.inner_size();

            let surface_texture =
                SurfaceTexture::new(window_size.width, window_size.height, window.clone());

            // The buffer stays at grid resolution, pixels scales it up to the surface.
            PixelsBuilder::new(
                self.config.buffer_width,
                self.config.buffer_height,
                surface_texture,
            )
            .texture_format(TextureFormat::Rgba8UnormSrgb)
            .clear_color(self.config.clear_color)
            .build()
            .context("Creating pixels buffer")?
        };

        Ok(ResumedWindow { window, pixels })
    }
}

pub struct RendererWindowConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub buffer_width: u32,
    pub buffer_height: u32,
    pub clear_color: Color,
    pub target_fps: u64,
    pub draw_callback: Box<dyn FnMut(RenderFrame)>,
    pub event_callback: Option<Box<dyn FnMut(&WindowEvent)>>,
}

struct ResumedWindow {
    window: Arc<Window>,
    pixels: Pixels<'static>,
}

impl ApplicationHandler for RendererWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resumed_window.is_some() {
            return;
        }

        match self.open(event_loop) {
            Ok(resumed_window) => {
                resumed_window.window.request_redraw();
                self.resumed_window = Some(resumed_window);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(ResumedWindow { window, pixels }) = self.resumed_window.as_mut() else {
            return;
        };

        let result = match event {
            WindowEvent::RedrawRequested => {
                let next_frame = RenderFrame {
                    width: self.config.buffer_width,
                    height: self.config.buffer_height,
                    buffer: pixels.frame_mut(),
                };

                (self.config.draw_callback)(next_frame);

                let rendered = pixels.render().context("Rendering with pixels");

                // FIXME: Throttling here blocks the whole event loop, so resizes lag behind a frame.
                self.sleeper.sleep();
                window.request_redraw();

                rendered
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                debug!("Window resized to {width}x{height}");
                window.request_redraw();

                pixels
                    .resize_surface(width.max(1), height.max(1))
                    .context("Resizing surface")
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            self.fail(event_loop, e);
            return;
        }

        if let Some(event_callback) = &mut self.config.event_callback {
            event_callback(&event);
        }
    }
}

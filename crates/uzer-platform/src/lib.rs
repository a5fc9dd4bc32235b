//! Desktop runner (winit window, software rendering presented through
//! softbuffer).

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use uzer_core::*;
use uzer_render::SoftwareRenderer;
use uzer_ui::layout_and_paint;

/// Window and host settings for [`run_desktop_app`].
#[derive(Clone, Debug)]
pub struct DesktopConfig {
    pub title: String,
    /// Logical (dp) inner size.
    pub size: (f64, f64),
    /// Force a light or dark theme; `None` follows the system.
    pub dark: Option<bool>,
    /// Padding (dp) reserved around the content, as a phone would for its
    /// status and navigation bars.
    pub insets: PaddingValues,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            title: "UzerTest".to_string(),
            size: (412.0, 915.0),
            dark: None,
            insets: PaddingValues::ZERO,
        }
    }
}

impl DesktopConfig {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = (width, height);
        self
    }
    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = Some(dark);
        self
    }
    pub fn insets(mut self, insets: PaddingValues) -> Self {
        self.insets = insets;
        self
    }
}

/// Wheel line step in px.
const LINE_DELTA_PX: f32 = 40.0;

/// Open a window and run `root` until it is closed.
///
/// A render failure (for example an image that cannot be decoded) is logged,
/// ends the event loop and is returned.
pub fn run_desktop_app(
    config: DesktopConfig,
    root: impl FnMut(&mut Scheduler) -> View + 'static,
) -> anyhow::Result<()> {
    use winit::application::ApplicationHandler;
    use winit::dpi::LogicalSize;
    use winit::event::{MouseScrollDelta, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, EventLoop};
    use winit::window::{Window, WindowAttributes};

    type SoftSurface = softbuffer::Surface<Arc<Window>, Arc<Window>>;

    struct App {
        config: DesktopConfig,
        root: Box<dyn FnMut(&mut Scheduler) -> View>,
        window: Option<Arc<Window>>,
        surface: Option<SoftSurface>,
        renderer: SoftwareRenderer,
        sched: Scheduler,
        frame_cache: Option<Frame>,
        mouse_pos: Vec2,
        shift: bool,
        system_dark: bool,
        failure: Option<anyhow::Error>,
    }

    impl App {
        fn new(config: DesktopConfig, root: Box<dyn FnMut(&mut Scheduler) -> View>) -> Self {
            Self {
                config,
                root,
                window: None,
                surface: None,
                renderer: SoftwareRenderer::new(),
                sched: Scheduler::new(),
                frame_cache: None,
                mouse_pos: Vec2::ZERO,
                shift: false,
                system_dark: false,
                failure: None,
            }
        }

        fn request_redraw(&self) {
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }

        fn create_window(&mut self, el: &ActiveEventLoop) -> anyhow::Result<()> {
            let (w, h) = self.config.size;
            let win = Arc::new(
                el.create_window(
                    WindowAttributes::default()
                        .with_title(self.config.title.clone())
                        .with_inner_size(LogicalSize::new(w, h)),
                )?,
            );
            let context = softbuffer::Context::new(win.clone())
                .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
            let surface = softbuffer::Surface::new(&context, win.clone())
                .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

            self.system_dark = matches!(win.theme(), Some(winit::window::Theme::Dark));
            log::info!(
                "window '{}' created: {:?} @ scale {}, system dark = {}",
                self.config.title,
                win.inner_size(),
                win.scale_factor(),
                self.system_dark
            );
            self.surface = Some(surface);
            self.resize(win.inner_size().width, win.inner_size().height);
            self.window = Some(win);
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.sched.size = (width, height);
            self.renderer.configure_surface(width, height);
            if let (Some(surface), Some(w), Some(h)) = (
                self.surface.as_mut(),
                NonZeroU32::new(width),
                NonZeroU32::new(height),
            ) && let Err(e) = surface.resize(w, h)
            {
                log::error!("softbuffer resize to {width}x{height} failed: {e}");
            }
        }

        fn redraw(&mut self) -> anyhow::Result<()> {
            let Some(window) = self.window.clone() else {
                return Ok(());
            };
            let (w, h) = self.sched.size;
            if w == 0 || h == 0 {
                return Ok(());
            }

            let t0 = Instant::now();
            let density = Density {
                scale: window.scale_factor() as f32,
            };
            let dark = self.config.dark.unwrap_or(self.system_dark);
            let insets = self.config.insets;
            let root = &mut *self.root;
            let sched = &mut self.sched;
            let frame = with_density(density, || {
                with_window_insets(insets, || {
                    with_system_dark(dark, || sched.compose(|s| root(s), layout_and_paint))
                })
            });
            let composed = t0.elapsed();

            self.renderer.frame(&frame.scene)?;
            self.frame_cache = Some(frame);
            log::trace!(
                "frame {w}x{h}: compose+layout {:.2?}, raster {:.2?}",
                composed,
                t0.elapsed() - composed
            );

            let Some(surface) = self.surface.as_mut() else {
                return Ok(());
            };
            let mut buffer = surface
                .buffer_mut()
                .map_err(|e| anyhow::anyhow!("softbuffer buffer: {e}"))?;
            let pixels = self.renderer.pixels_0rgb();
            let n = buffer.len().min(pixels.len());
            buffer[..n].copy_from_slice(&pixels[..n]);
            buffer
                .present()
                .map_err(|e| anyhow::anyhow!("softbuffer present: {e}"))?;
            Ok(())
        }

        fn fail(&mut self, el: &ActiveEventLoop, e: anyhow::Error) {
            log::error!("{e:#}");
            self.failure = Some(e);
            el.exit();
        }
    }

    impl ApplicationHandler<()> for App {
        fn resumed(&mut self, el: &ActiveEventLoop) {
            // Create the window once when app resumes.
            if self.window.is_none() {
                match self.create_window(el) {
                    Ok(()) => self.request_redraw(),
                    Err(e) => self.fail(el, e.context("failed to create window")),
                }
            }
        }

        fn window_event(
            &mut self,
            el: &ActiveEventLoop,
            _id: winit::window::WindowId,
            event: WindowEvent,
        ) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Window close requested");
                    el.exit();
                }
                WindowEvent::Resized(size) => {
                    log::info!("resized to {}x{}", size.width, size.height);
                    self.resize(size.width, size.height);
                    self.request_redraw();
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    log::info!("scale factor changed to {scale_factor}");
                    self.request_redraw();
                }
                WindowEvent::ThemeChanged(theme) => {
                    self.system_dark = theme == winit::window::Theme::Dark;
                    log::info!("system theme changed: dark = {}", self.system_dark);
                    self.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    self.mouse_pos = Vec2 {
                        x: position.x as f32,
                        y: position.y as f32,
                    };
                }
                WindowEvent::ModifiersChanged(mods) => {
                    self.shift = mods.state().shift_key();
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let (mut dx, mut dy) = match delta {
                        MouseScrollDelta::LineDelta(x, y) => (-x * LINE_DELTA_PX, -y * LINE_DELTA_PX),
                        MouseScrollDelta::PixelDelta(lp) => (-(lp.x as f32), -(lp.y as f32)),
                    };
                    // Shift turns a vertical wheel into a horizontal one.
                    if self.shift {
                        std::mem::swap(&mut dx, &mut dy);
                    }
                    log::debug!("MouseWheel: dx={dx}, dy={dy} at {:?}", self.mouse_pos);

                    if let Some(f) = &self.frame_cache
                        && f.dispatch_scroll(self.mouse_pos, Vec2 { x: dx, y: dy })
                    {
                        self.request_redraw();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Err(e) = self.redraw() {
                        self.fail(el, e.context("render failed"));
                    }
                }
                _ => {}
            }
        }
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, Box::new(root));
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_a_phone_window() {
        let c = DesktopConfig::default();
        assert_eq!(c.title, "UzerTest");
        assert_eq!(c.size, (412.0, 915.0));
        assert_eq!(c.dark, None);
        assert_eq!(c.insets, PaddingValues::ZERO);
    }

    #[test]
    fn builder_overrides() {
        let c = DesktopConfig::default()
            .title("x")
            .size(100.0, 200.0)
            .dark(true)
            .insets(PaddingValues::all(8.0));
        assert_eq!(c.title, "x");
        assert_eq!(c.size, (100.0, 200.0));
        assert_eq!(c.dark, Some(true));
        assert_eq!(c.insets.top, 8.0);
    }
}

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{error, warn};
use vello::{
    AaConfig, Renderer, RendererOptions,
    kurbo::Point,
    peniko::Color,
    util::{RenderContext, RenderSurface},
    wgpu,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{ViewerError, WalkError, WalkPlot};

/// Rebuilds the plot's walk, e.g. from a freshly generated trajectory.
pub type Regenerate<'p> = Box<dyn FnMut(&mut WalkPlot) -> Result<(), WalkError> + 'p>;

/// Shows `plot` in a window until it is closed. Blocks.
pub fn launch(plot: &mut WalkPlot) -> Result<(), ViewerError> {
    run(WalkViewer::new(plot, None))
}

/// Like [`launch`], pressing `R` calls `regenerate` and redraws.
pub fn launch_with<'p>(
    plot: &'p mut WalkPlot,
    regenerate: impl FnMut(&mut WalkPlot) -> Result<(), WalkError> + 'p,
) -> Result<(), ViewerError> {
    run(WalkViewer::new(plot, Some(Box::new(regenerate))))
}

fn run(mut viewer: WalkViewer<'_, '_>) -> Result<(), ViewerError> {
    EventLoop::new()?.run_app(&mut viewer)?;
    Ok(())
}

struct WalkViewer<'p, 's> {
    plot: &'p mut WalkPlot,
    regenerate: Option<Regenerate<'p>>,
    is_plot_outdated: bool,

    context: RenderContext,
    render_state: Option<RenderState<'s>>,
    renderers: Vec<Option<Renderer>>,

    is_mouse_down: bool,
    drag_start: Option<(f64, f64)>,
    prior_position: Option<Point>,
}

impl<'p> WalkViewer<'p, '_> {
    fn new(plot: &'p mut WalkPlot, regenerate: Option<Regenerate<'p>>) -> Self {
        Self {
            context: RenderContext::new(),
            plot,
            regenerate,
            is_plot_outdated: true,
            render_state: None,
            renderers: Vec::new(),
            is_mouse_down: false,
            drag_start: None,
            prior_position: None,
        }
    }

    fn request_redraw(&mut self) {
        self.is_plot_outdated = true;
        if let Some(RenderState { window, .. }) = &self.render_state {
            window.request_redraw();
        }
    }

    fn render(&mut self) {
        let Some(RenderState { surface, window }) = &self.render_state else {
            return;
        };

        if self.is_plot_outdated {
            self.plot.set_scale_factor(window.scale_factor());
            self.plot.redraw();
            self.is_plot_outdated = false;
        }

        let device_handle = &self.context.devices[surface.dev_id];
        let render_params = vello::RenderParams {
            base_color: Color::WHITE,
            width: surface.config.width,
            height: surface.config.height,
            antialiasing_method: AaConfig::Area,
        };

        let Some(renderer) = self.renderers[surface.dev_id].as_mut() else {
            warn!("no renderer for device {}", surface.dev_id);
            return;
        };
        if let Err(err) = renderer.render_to_texture(
            &device_handle.device,
            &device_handle.queue,
            &self.plot.scene,
            &surface.target_view,
            &render_params,
        ) {
            error!("failed to render walk: {err}");
            return;
        }

        let surface_texture = match surface.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => {
                warn!("failed to get surface texture: {err}");
                return;
            }
        };
        let mut encoder =
            device_handle
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Surface Blit"),
                });
        surface.blitter.copy(
            &device_handle.device,
            &mut encoder,
            &surface.target_view,
            &surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
        );
        device_handle.queue.submit([encoder.finish()]);
        surface_texture.present();

        if let Err(err) = device_handle.device.poll(wgpu::PollType::Poll) {
            warn!("device poll failed: {err}");
        }
    }
}

impl ApplicationHandler for WalkViewer<'_, '_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_state.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_inner_size(LogicalSize::new(
                self.plot.layout.logical_width,
                self.plot.layout.logical_height,
            ))
            .with_resizable(true)
            .with_title("Meander");
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let surface_future = self.context.create_surface(
            window.clone(),
            size.width,
            size.height,
            wgpu::PresentMode::AutoVsync,
        );
        let surface = match pollster::block_on(surface_future) {
            Ok(surface) => surface,
            Err(err) => {
                error!("failed to create surface: {err}");
                event_loop.exit();
                return;
            }
        };

        self.renderers
            .resize_with(self.context.devices.len(), || None);

        let id = surface.dev_id;
        if self.renderers[id].is_none() {
            let renderer = Renderer::new(
                &self.context.devices[id].device,
                RendererOptions {
                    use_cpu: false,
                    antialiasing_support: [AaConfig::Area].iter().copied().collect(),
                    num_init_threads: NonZeroUsize::new(1),
                    pipeline_cache: None,
                },
            );
            match renderer {
                Ok(renderer) => self.renderers[id] = Some(renderer),
                Err(err) => {
                    error!("failed to create renderer: {err}");
                    event_loop.exit();
                    return;
                }
            }
        }

        self.plot.set_scale_factor(window.scale_factor());
        self.render_state = Some(RenderState { surface, window });
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(render_state) = &self.render_state else {
            return;
        };
        if render_state.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => event_loop.exit(),
                    Key::Character("r") | Key::Character("R") => {
                        if let Some(regenerate) = self.regenerate.as_mut() {
                            match regenerate(self.plot) {
                                Ok(()) => self.request_redraw(),
                                Err(err) => warn!("failed to regenerate walk: {err}"),
                            }
                        }
                    }
                    _ => {}
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(RenderState { surface, .. }) = &mut self.render_state {
                    self.context
                        .resize_surface(surface, size.width, size.height);
                    self.plot.layout.resize(size.width, size.height);
                    self.request_redraw();
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.plot.set_scale_factor(scale_factor);
                self.request_redraw();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.is_mouse_down = state == ElementState::Pressed;
                    self.drag_start = if self.is_mouse_down {
                        self.prior_position.map(Into::into)
                    } else {
                        None
                    };
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.prior_position = None;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let factor = match delta {
                    MouseScrollDelta::LineDelta(_, y) => 1.0 - y as f64 / 10.0,
                    MouseScrollDelta::PixelDelta(delta) => 1.0 - delta.y / 500.0,
                };

                if let Some(prior) = self.prior_position {
                    self.plot.layout.zoom(prior.into(), factor);
                    self.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = Point {
                    x: position.x,
                    y: position.y,
                };

                if self.is_mouse_down {
                    if let (Some(start), Some(prior)) = (self.drag_start, self.prior_position) {
                        self.plot
                            .layout
                            .drag(start, prior.into(), position.into());
                        self.request_redraw();
                    }
                }

                self.prior_position = Some(position);
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }
}

struct RenderState<'s> {
    surface: RenderSurface<'s>,
    window: Arc<Window>,
}

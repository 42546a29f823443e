mod cli;
mod color;
mod engine;
mod events;
mod framepace;
mod gpu;
mod gui;
mod particle;
mod render;
mod surface;

use std::sync::Arc;

use clap::Parser;
use glam::Vec2;
use log::warn;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::color::Rgb;
use crate::engine::ParticleEngine;
use crate::events::FeedEvent;
use crate::framepace::FrameClock;
use crate::gpu::GpuContext;
use crate::gui::EguiOverlay;
use crate::render::RenderModule;
use crate::surface::{DrawList, Surface};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // Collect Arguments
    let args = cli::Args::parse();

    // Setup Winit
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut engine = ParticleEngine::new();
    engine.set_particle_cap((args.max_particles > 0).then_some(args.max_particles));

    // State
    let mut app_state = AppState {
        tokio_rt: tokio::runtime::Runtime::new()?,
        gpu: None,
        gfx: None,
        engine,
        clock: FrameClock::new(args.framerate),

        cursor: Vec2::ZERO,
        accent: args.accent,
    };

    event_loop.run_app(&mut app_state)?;
    Ok(())
}

struct GfxState {
    window: Arc<Window>,
    overlay: EguiOverlay,
    render_module: RenderModule,
}

struct AppState<'a> {
    tokio_rt: tokio::runtime::Runtime,
    gpu: Option<GpuContext<'a>>,
    gfx: Option<GfxState>,
    engine: ParticleEngine<DrawList>,
    clock: FrameClock,

    cursor: Vec2,
    accent: Rgb,
}

impl ApplicationHandler for AppState<'_> {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let window = Arc::new(
            event_loop
                .create_window(Window::default_attributes().with_title("Fireworks"))
                .unwrap(),
        );
        let window_size = window.inner_size();

        let gpu = self
            .tokio_rt
            .block_on(GpuContext::new(window.clone()))
            .unwrap();
        let render_module = RenderModule::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format(),
            window_size.width,
            window_size.height,
        );
        let mut overlay = EguiOverlay::new(&gpu.device, gpu.surface_format());
        overlay.resize(window_size.width, window_size.height);

        self.engine.initialize(DrawList::new(
            window_size.width as f32,
            window_size.height as f32,
        ));

        self.gfx = Some(GfxState {
            window,
            overlay,
            render_module,
        });
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (Some(gpu), Some(gfx)) = (self.gpu.as_mut(), self.gfx.as_mut()) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.engine.teardown();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size.width, new_size.height);
                gfx.render_module
                    .resize(&gpu.device, &gpu.queue, new_size.width, new_size.height);
                gfx.overlay.resize(new_size.width, new_size.height);
                if let Some(list) = self.engine.surface_mut() {
                    list.resize(new_size.width as f32, new_size.height as f32);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                gfx.overlay.mouse_moved(self.cursor);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                gfx.overlay.mouse_button(self.cursor, state, button);

                let canvas_click = matches!(
                    (state, button),
                    (ElementState::Pressed, MouseButton::Left)
                ) && !gfx.overlay.wants_pointer();
                if canvas_click && self.engine.is_running() {
                    if let Err(err) = self.engine.spawn_burst(self.cursor, Some(self.accent)) {
                        warn!("dropped click burst: {err}");
                    }
                }
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        let (Some(gpu), Some(gfx)) = (self.gpu.as_mut(), self.gfx.as_mut()) else {
            return;
        };
        if !self.engine.is_running() {
            return;
        }

        self.clock.begin_frame();

        let live = self.engine.live_count();
        let framerate = self.clock.framerate();
        let mut raised = Vec::new();
        gfx.overlay.run(self.clock.frame_time(), |ctx| {
            egui::Window::new("Studio")
                .default_width(170.0)
                .show(ctx, |ui| {
                    ui.label(format!("FPS {framerate:.1}"));
                    ui.label(format!("{live} live particles"));
                    ui.separator();

                    ui.label("Click anywhere to celebrate");
                    if ui.button("Post story").clicked() {
                        raised.push(FeedEvent::PostCreated);
                    }
                    if ui.button("Like").clicked() {
                        raised.push(FeedEvent::PostLiked);
                    }
                    if ui.button("Send message").clicked() {
                        raised.push(FeedEvent::MessageSent);
                    }
                });
        });

        let viewport = self
            .engine
            .surface()
            .map(|list| list.size())
            .unwrap_or(Vec2::ZERO);
        let mut rng = rand::thread_rng();
        for event in raised {
            let (origin, color) = events::burst_params(event, viewport, &mut rng);
            if let Err(err) = self.engine.spawn_burst(origin, Some(color)) {
                warn!("dropped {event:?} burst: {err}");
            }
        }

        if let Err(err) = self.engine.tick() {
            warn!("skipped tick: {err}");
            return;
        }

        let frame = match gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(err) => {
                warn!("skipping frame: {err}");
                return;
            }
        };

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        if let Some(list) = self.engine.surface_mut() {
            gfx.render_module
                .paint(&gpu.device, &gpu.queue, &mut encoder, list.commands());
            list.clear();
        }

        gfx.overlay.upload(&gpu.device, &gpu.queue, &mut encoder);

        // Composite trails to the frame, overlay on top
        {
            let view = frame
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());

            let mut rpass = gfx.render_module.begin_composite_pass(&mut encoder, &view);
            gfx.overlay.render(&mut rpass);
        }

        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        gfx.window.request_redraw();

        self.clock.end_frame();
    }
}

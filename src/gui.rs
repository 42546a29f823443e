use glam::Vec2;
use winit::event::{ElementState, MouseButton};

/// Egui plumbing for the stats-and-triggers overlay. The overlay only ever
/// shows labels and buttons, so keyboard input is not wired up.
pub struct EguiOverlay {
    ctx: egui::Context,
    raw_input: egui::RawInput,

    renderer: egui_wgpu::Renderer,
    primitives: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
}

impl EguiOverlay {
    pub fn new(device: &wgpu::Device, swapchain_format: wgpu::TextureFormat) -> Self {
        Self {
            ctx: egui::Context::default(),
            raw_input: egui::RawInput::default(),

            renderer: egui_wgpu::Renderer::new(device, swapchain_format, None, 1),
            primitives: Vec::new(),
            textures_delta: egui::TexturesDelta::default(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.raw_input.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::Vec2::new(width as f32, height as f32),
        ));
    }

    /// True when the pointer is over the overlay, in which case clicks are
    /// not meant for the particle canvas underneath.
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    pub fn mouse_moved(&mut self, position: Vec2) {
        self.raw_input
            .events
            .push(egui::Event::PointerMoved(egui::Pos2::new(
                position.x, position.y,
            )));
    }

    pub fn mouse_button(&mut self, position: Vec2, state: ElementState, button: MouseButton) {
        let button = match button {
            MouseButton::Left => egui::PointerButton::Primary,
            MouseButton::Right => egui::PointerButton::Secondary,
            MouseButton::Middle => egui::PointerButton::Middle,
            _ => return,
        };

        self.raw_input.events.push(egui::Event::PointerButton {
            pos: egui::Pos2::new(position.x, position.y),
            button,
            pressed: matches!(state, ElementState::Pressed),
            modifiers: egui::Modifiers::default(),
        });
    }

    pub fn run<F: FnOnce(&egui::Context)>(&mut self, frame_time: f32, run_ui: F) {
        self.raw_input.predicted_dt = frame_time;

        let raw_input = std::mem::take(&mut self.raw_input);
        self.ctx.begin_frame(raw_input);
        run_ui(&self.ctx);

        let output = self.ctx.end_frame();
        self.primitives = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        self.textures_delta = output.textures_delta;
    }

    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
    ) {
        for (id, delta) in &self.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        for id in &self.textures_delta.free {
            self.renderer.free_texture(id);
        }

        let screen = self.screen_descriptor();
        self.renderer
            .update_buffers(device, queue, encoder, &self.primitives, &screen);
    }

    pub fn render<'a>(&'a mut self, rpass: &mut wgpu::RenderPass<'a>) {
        let screen = self.screen_descriptor();
        self.renderer.render(rpass, &self.primitives, &screen);
    }

    fn screen_descriptor(&self) -> egui_wgpu::ScreenDescriptor {
        let rect = self.ctx.screen_rect();
        egui_wgpu::ScreenDescriptor {
            size_in_pixels: [rect.width() as u32, rect.height() as u32],
            pixels_per_point: self.ctx.pixels_per_point(),
        }
    }
}

//! Interactive 3D atomic model viewer
//!
//! Renders the selected element as a nucleus with rotating electron shells.
//! Hovering the nucleus or a shell highlights it and shows its caption; the
//! sidebar holds the element's reference data.
//!
//! Controls:
//! - Left mouse drag: Orbit camera (Shift: pan)
//! - Scroll: Zoom in/out
//! - Left/Right arrows: Previous/next element
//! - Space: Toggle camera auto-rotate
//! - T: Toggle light/dark theme
//! - R: Reset view
//! - Escape/Enter: Close/reopen the model

mod clock;
mod elements;
mod hover;
mod orbital;
mod renderer;
mod scene;
mod ui;

use clock::Clock;
use common::{GpuError, GraphicsContext, OrbitCamera};
use elements::{element_by_atomic_number, Element, Theme, ELEMENTS};
use renderer::Renderer;
use scene::AtomView;
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    view: AtomView,
    clock: Clock,
    camera: OrbitCamera,
    theme: Theme,
    selected: u32,
    mouse_pressed: bool,
    shift_held: bool,
    last_mouse_pos: Option<(f64, f64)>,
    cursor: Option<(f32, f32)>,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext) -> Self {
        let renderer = Renderer::new(&ctx);
        let mut camera = OrbitCamera::new(ctx.aspect_ratio());
        camera.auto_rotate = true;
        camera.update_orbital();

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &ctx.device,
            ctx.config.format,
            None,
            1,
        );

        let mut app = Self {
            ctx,
            renderer,
            view: AtomView::new(),
            clock: Clock::new(),
            camera,
            theme: Theme::Dark,
            selected: 1,
            mouse_pressed: false,
            shift_held: false,
            last_mouse_pos: None,
            cursor: None,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        };
        app.select(1);
        app
    }

    fn selected_element(&self) -> &'static Element {
        element_by_atomic_number(self.selected).unwrap_or(&ELEMENTS[0])
    }

    /// Switch to another element, remounting the scene with a fresh clock
    fn select(&mut self, atomic_number: u32) {
        let Some(element) = element_by_atomic_number(atomic_number) else {
            log::warn!("Ignoring unknown atomic number {}", atomic_number);
            return;
        };
        self.selected = element.atomic_number;
        self.clock = Clock::new();
        self.view.mount(element);
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
        self.renderer
            .resize(&self.ctx.device, new_size.width, new_size.height);
    }

    fn update(&mut self, dt: f32) {
        self.camera.update(dt);

        let elapsed = self.clock.tick();
        self.view.advance(elapsed);

        // Re-pick every frame: the shells move under a stationary cursor
        let picked = match self.cursor {
            Some(cursor) if !self.egui.ctx.wants_pointer_input() => {
                let viewport = (self.ctx.size.width, self.ctx.size.height);
                let (origin, direction) = hover::cursor_ray(cursor, viewport, &self.camera);
                match self.view.scene() {
                    Some(scene) => hover::pick(
                        origin,
                        direction,
                        scene.nucleus.size(),
                        &scene.shell_radii(),
                    ),
                    None => hover::HoverTarget::None,
                }
            }
            _ => hover::HoverTarget::None,
        };
        if let Some(scene) = self.view.scene_mut() {
            scene.observe_hover(picked);
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let (num_spheres, ring_ranges) = match self.view.scene() {
            Some(scene) => self.renderer.update_scene(&self.ctx.queue, scene),
            None => (0, Vec::new()),
        };

        // Build egui UI
        let element = self.selected_element();
        let mut sidebar = ui::SidebarResponse::default();
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            sidebar = ui::draw_element_sidebar(ctx, element, self.theme);
            match self.view.scene() {
                Some(scene) => {
                    ui::draw_element_caption(ctx, scene, element, self.theme);
                    ui::draw_hover_caption(ctx, scene);
                }
                None => ui::draw_loading_placeholder(ctx),
            }
        });

        self.egui.state.handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self.egui.ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui.renderer.update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(&mut encoder, &view, num_spheres, &ring_ranges);

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui.renderer.render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if sidebar.toggle_theme {
            self.theme = match self.theme {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            };
        }
        if let Some(atomic_number) = sidebar.selected {
            self.select(atomic_number);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::ArrowLeft => {
                if self.selected > 1 {
                    self.select(self.selected - 1);
                }
            }
            KeyCode::ArrowRight => {
                if (self.selected as usize) < ELEMENTS.len() {
                    self.select(self.selected + 1);
                }
            }
            KeyCode::Space => {
                self.camera.auto_rotate = !self.camera.auto_rotate;
            }
            KeyCode::KeyT => {
                self.theme = match self.theme {
                    Theme::Light => Theme::Dark,
                    Theme::Dark => Theme::Light,
                };
            }
            KeyCode::KeyR => {
                self.camera.distance = 5.0;
                self.camera.pitch = 0.3;
                self.camera.yaw = 0.0;
                self.camera.target = glam::Vec3::ZERO;
                self.camera.update_orbital();
            }
            KeyCode::Escape => self.view.unmount(),
            KeyCode::Enter => {
                if !self.view.is_mounted() {
                    self.select(self.selected);
                }
            }
            _ => {}
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x as f32, y as f32));
        if self.mouse_pressed {
            if let Some((last_x, last_y)) = self.last_mouse_pos {
                let dx = (x - last_x) as f32 * 0.01;
                let dy = (y - last_y) as f32 * 0.01;
                if self.shift_held {
                    self.camera.pan(-dx * 0.1, dy * 0.1);
                } else {
                    self.camera.orbit(dx, dy);
                }
            }
            self.last_mouse_pos = Some((x, y));
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom(delta * 0.5);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

fn run() -> Result<(), GpuError> {
    let (ctx, event_loop) = pollster::block_on(GraphicsContext::new(
        "Atomic Model Viewer - Rust/wgpu",
        1280,
        720,
    ))?;

    let mut app = App::new(ctx);
    let mut last_time = std::time::Instant::now();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                let consumed = app.handle_window_event(event);

                if !consumed {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => app.resize(*size),
                        WindowEvent::MouseInput { state, button, .. } => {
                            if *button == MouseButton::Left {
                                app.mouse_pressed = *state == ElementState::Pressed;
                                if !app.mouse_pressed {
                                    app.last_mouse_pos = None;
                                }
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            app.handle_mouse_move(position.x, position.y);
                        }
                        WindowEvent::CursorLeft { .. } => {
                            app.cursor = None;
                        }
                        WindowEvent::ModifiersChanged(modifiers) => {
                            app.shift_held = modifiers.state().shift_key();
                        }
                        WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    physical_key: PhysicalKey::Code(key),
                                    state,
                                    ..
                                },
                            ..
                        } => app.handle_key(*key, *state),
                        WindowEvent::MouseWheel { delta, .. } => {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => *y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            app.handle_scroll(scroll);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = std::time::Instant::now();
                            let dt = (now - last_time).as_secs_f32().min(0.1);
                            last_time = now;

                            app.update(dt);
                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => log::warn!("Render error: {:?}", e),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("atom_view: {}", err);
        std::process::exit(1);
    }
}

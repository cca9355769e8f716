use std::sync::Arc;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::ViewerConfig,
    gfx::{camera::CameraManager, rendering::RenderEngine, scene::Scene},
    input::{EventDispatcher, ListenerId, ViewportEvent, WindowEventTranslator},
    ui::{scene_input_panel, PanelState, UiManager},
};

/// The viewer application: owns the event loop until [`MeshViewerApp::run`]
pub struct MeshViewerApp {
    event_loop: EventLoop<()>,
    handler: AppHandler,
}

struct AppHandler {
    config: ViewerConfig,
    session: Option<ViewerSession>,
    startup_error: Option<anyhow::Error>,
}

/// Everything that exists while the viewer is attached to a window
struct ViewerSession {
    window: Arc<Window>,
    render_engine: RenderEngine,
    ui_manager: UiManager,
    scene: Scene,
    panel: PanelState,
    dispatcher: EventDispatcher<Scene>,
    camera_listener: ListenerId,
    translator: WindowEventTranslator,
    modifiers: ModifiersState,
}

impl MeshViewerApp {
    pub fn new(config: ViewerConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        Ok(Self {
            event_loop,
            handler: AppHandler {
                config,
                session: None,
                startup_error: None,
            },
        })
    }

    /// Runs until the window is closed; returns the startup error, if any.
    pub fn run(mut self) -> anyhow::Result<()> {
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop
            .run_app(&mut self.handler)
            .context("Event loop failed")?;

        match self.handler.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ViewerSession {
    /// Creates the window, GPU and UI state, and subscribes the camera.
    fn attach(event_loop: &ActiveEventLoop, config: &ViewerConfig) -> anyhow::Result<Self> {
        let window = event_loop
            .create_window(
                WindowAttributes::default()
                    .with_title(config.window.title.clone())
                    .with_inner_size(LogicalSize::new(config.window.width, config.window.height)),
            )
            .context("Failed to create window")?;
        let window = Arc::new(window);

        let (width, height): (u32, u32) = window.inner_size().into();
        let render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            config.window.clear_color,
        ))?;

        let mut ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );
        ui_manager.update_display_size(width, height);

        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let camera_manager = CameraManager::from_config(&config.camera, aspect);
        let mut scene = Scene::new(camera_manager, config);

        let mut panel = PanelState::new();
        panel.apply_load(&mut scene);

        let mut dispatcher = EventDispatcher::new();
        let camera_listener = dispatcher.subscribe(|scene: &mut Scene, event: &ViewportEvent| {
            scene.camera_manager.process_event(event)
        });

        log::info!("Viewer attached ({}x{})", width, height);

        Ok(Self {
            window,
            render_engine,
            ui_manager,
            scene,
            panel,
            dispatcher,
            camera_listener,
            translator: WindowEventTranslator::new(),
            modifiers: ModifiersState::empty(),
        })
    }

    /// Unsubscribes listeners; GPU, UI and window are dropped with `self`.
    fn detach(mut self) {
        if !self.dispatcher.unsubscribe(self.camera_listener) {
            log::warn!("Camera listener was already unsubscribed");
        }
        log::info!("Viewer detached");
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.scene
            .camera_manager
            .camera
            .resize_projection(width, height);
        self.render_engine.resize(width, height);
        self.ui_manager.update_display_size(width, height);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key_code: KeyCode) {
        match key_code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyC if self.modifiers.shift_key() => self.scene.camera_manager.reset(),
            _ => {}
        }
    }

    fn redraw(&mut self) {
        // The panel may replace scene contents, so it runs before upload.
        let panel = &mut self.panel;
        let scene = &mut self.scene;
        self.ui_manager.update_logic(&self.window, |ui| {
            scene_input_panel(ui, panel, scene);
        });

        self.render_engine.prepare_scene(&mut self.scene);
        self.scene.update();
        self.render_engine.update(&self.scene);

        let ui_manager = &mut self.ui_manager;
        self.render_engine.render_frame(
            &self.scene,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_manager.render_display_only(device, queue, encoder, view);
                },
            ),
        );
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }

        match ViewerSession::attach(event_loop, &self.config) {
            Ok(session) => self.session = Some(session),
            Err(err) => {
                log::error!("Failed to start viewer: {:#}", err);
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.window.id() != window_id {
            return;
        }

        // Handle UI input first
        let captured = session
            .ui_manager
            .handle_input(&session.window, window_id, &event);

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                session.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                session.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } if !captured => {
                session.handle_key(event_loop, key_code);
            }
            WindowEvent::RedrawRequested => {
                session.redraw();
            }
            other => {
                let Some(viewport_event) = session.translator.translate(&other) else {
                    return;
                };
                // Releases always get through so a drag cannot stick.
                let ends_gesture = matches!(
                    viewport_event,
                    ViewportEvent::PointerUp | ViewportEvent::PointerLeave
                );
                if captured && !ends_gesture {
                    return;
                }
                session
                    .dispatcher
                    .dispatch(&mut session.scene, &viewport_event);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = &self.session {
            session.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(session) = self.session.take() {
            session.detach();
        }
    }
}

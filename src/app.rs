// src/app.rs
//! Application shell: window, event loop, input routing, and the
//! per-frame update order
//!
//! The statue model loads on a background thread and is attached to
//! the scene when its channel delivers a result, so the first frames
//! render the room without it.

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

use crate::assets::{AssetError, ModelAsset};
use crate::audio::AudioSystem;
use crate::config::ScenePreset;
use crate::gfx::{
    camera::{CameraController, CameraManager, OrbitCamera},
    lighting::Lighting,
    rendering::RenderEngine,
    scene::{build_room, RoomTextures, Scene},
};
use crate::input::InputState;

/// Startup options resolved from the command line
pub struct AppOptions {
    pub preset: ScenePreset,
    pub assets_dir: PathBuf,
    pub mute: bool,
}

pub struct GalleriaApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    input: InputState,
    audio: Option<AudioSystem>,
    statue_rx: Option<mpsc::Receiver<Result<ModelAsset, AssetError>>>,
    options: AppOptions,
    started: Instant,
}

impl GalleriaApp {
    /// Builds the room scene and prepares the event loop
    pub fn new(options: AppOptions) -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        let preset = &options.preset;
        let camera_manager = CameraManager::new(
            OrbitCamera::from_preset(&preset.camera, 1.5),
            CameraController::from_preset(&preset.camera),
        );
        let mut scene = Scene::new(camera_manager, Lighting::from_preset(preset));

        let textures = RoomTextures::load(&options.assets_dir);
        build_room(&mut scene, preset, textures);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                input: InputState::new(),
                audio: None,
                statue_rx: None,
                options,
                started: Instant::now(),
            },
        }
    }

    /// Run the application (consumes self and starts the event loop)
    pub fn run(mut self) {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop
            .run_app(&mut self.app_state)
            .expect("Failed to run event loop");
    }
}

impl AppState {
    /// Spawns the background statue load
    fn start_statue_load(&mut self) {
        let (tx, rx) = mpsc::channel();
        let path = self.options.assets_dir.join("statue.glb");
        thread::spawn(move || {
            let _ = tx.send(ModelAsset::load_glb(&path));
        });
        self.statue_rx = Some(rx);
    }

    /// Attaches the statue once its load finishes; load failures leave
    /// the room running without it
    fn poll_statue(&mut self) {
        let Some(rx) = &self.statue_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(model)) => {
                let index = self
                    .scene
                    .attach_statue(&model, &self.options.preset.statue);
                if let Some(engine) = &self.render_engine {
                    self.scene.init_gpu_resources(
                        engine.device(),
                        engine.queue(),
                        engine.transform_layout(),
                    );
                }
                log::info!(
                    "statue attached ({} meshes, object {})",
                    model.meshes.len(),
                    index
                );
                self.statue_rx = None;
            }
            Ok(Err(e)) => {
                log::error!("statue load failed: {}", e);
                self.statue_rx = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.statue_rx = None;
            }
        }
    }

    fn init_audio(&mut self) {
        if self.options.mute {
            return;
        }
        let audio_preset = &self.options.preset.audio;
        match AudioSystem::new() {
            Ok(mut audio) => {
                let music_path = self.options.assets_dir.join(audio_preset.music_file);
                if let Err(e) = audio.play_music(&music_path, audio_preset.music_volume) {
                    log::warn!("music disabled: {}", e);
                }
                let click_path = self.options.assets_dir.join(audio_preset.click_file);
                if let Err(e) = audio.load_click(&click_path, audio_preset.click_volume) {
                    log::warn!("click sound disabled: {}", e);
                }
                self.audio = Some(audio);
            }
            Err(e) => {
                log::warn!("audio disabled: {}", e);
            }
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, repeat: bool) {
        if !repeat {
            match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyP => {
                    if let Some(audio) = &mut self.audio {
                        let playing = audio.toggle_music();
                        log::info!("music {}", if playing { "resumed" } else { "paused" });
                    }
                }
                _ => {}
            }
        }
        // Ambient adjustment repeats while the key is held.
        match code {
            KeyCode::ArrowUp => self.scene.lighting.ambient.brighten(),
            KeyCode::ArrowDown => self.scene.lighting.ambient.dim(),
            _ => {}
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Ok(window) = event_loop.create_window(
            WindowAttributes::default()
                .with_title("galleria")
                .with_inner_size(winit::dpi::LogicalSize::new(1200, 800)),
        ) {
            let window_handle = Arc::new(window);
            self.window = Some(window_handle.clone());

            let (width, height) = window_handle.inner_size().into();
            let clear_color = self.options.preset.room.clear_color;

            let window_clone = window_handle.clone();
            let renderer = pollster::block_on(async move {
                RenderEngine::new(window_clone, width, height, clear_color).await
            });

            self.scene.camera_manager.camera.resize_projection(width, height);
            self.scene.init_gpu_resources(
                renderer.device(),
                renderer.queue(),
                renderer.transform_layout(),
            );
            self.render_engine = Some(renderer);

            self.start_statue_load();
            self.init_audio();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if self.window.is_none() {
            return;
        }

        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    self.input.set(code, pressed);
                    if pressed {
                        self.handle_key(event_loop, code, event.repeat);
                    }
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.scene.cycle_paintings();
                if let Some(audio) = &self.audio {
                    audio.play_click();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.poll_statue();

                self.scene.camera_manager.apply_input(&self.input);
                self.scene.update();

                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.update(
                        self.scene.camera_manager.camera.uniform,
                        &self.scene.lighting,
                        self.started.elapsed().as_secs_f32(),
                    );
                    render_engine.render_frame(&self.scene);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}

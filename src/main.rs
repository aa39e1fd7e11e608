use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use maze_walker::cli::Cli;
use maze_walker::config::Settings;
use maze_walker::core::{Accumulator, Clock, EveryNTicks, WinitInput};
use maze_walker::scene::{Autopilot, ControllerKind, Scene, PLAYER_HEIGHT};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;
const UPDATE_HZ: f32 = 60.0;
const MAX_UPDATES_PER_FRAME: u8 = 5;
const STATUS_INTERVAL_FRAMES: u64 = 30;
const HEADLESS_ASPECT: f32 = 4.0 / 3.0;

// === Application ===

struct App {
    settings: Settings,
    kind: ControllerKind,
    window: Option<Arc<Window>>,
    scene: Option<Scene>,
    input: WinitInput,
    clock: Clock,
    accumulator: Accumulator,
    status_timer: EveryNTicks,
}

impl App {
    fn new(settings: Settings, kind: ControllerKind) -> Self {
        Self {
            settings,
            kind,
            window: None,
            scene: None,
            input: WinitInput::new(),
            clock: Clock::new(),
            accumulator: Accumulator::new(UPDATE_HZ, MAX_UPDATES_PER_FRAME),
            status_timer: EveryNTicks::new(STATUS_INTERVAL_FRAMES),
        }
    }

    /// Match the OS cursor to what the active controller wants
    fn sync_cursor(&mut self) {
        let (Some(window), Some(scene)) = (&self.window, &mut self.scene) else {
            return;
        };
        let captured = scene
            .controller
            .as_game()
            .map(|game| game.cursor_captured())
            .unwrap_or(false);
        if captured == self.input.is_captured() {
            return;
        }

        window.set_cursor_visible(!captured);
        let grab = if captured {
            window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            window.set_cursor_grab(CursorGrabMode::None)
        };
        if let Err(e) = grab {
            warn!("Cursor grab not supported: {}", e);
        }
        self.input.set_captured(captured);
        // Raw motion continues from here, so the controller must not see a jump
        let (x, y) = self.input.cursor();
        scene.controller.sync_mouse(x, y);
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        let (Some(window), Some(scene)) = (&self.window, &mut self.scene) else {
            return;
        };

        for _ in 0..self.accumulator.tick(delta) {
            scene.update();
        }

        if self.status_timer.tick() {
            let status = scene.status();
            window.set_title(&status);
            info!("{}", status);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("maze-walker")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let scene = match Scene::new(self.settings.clone(), aspect, self.kind) {
            Ok(scene) => scene,
            Err(e) => {
                error!("Failed to build scene: {}", e);
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.scene = Some(scene);
        self.clock.reset();
        self.sync_cursor();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(scene) = &mut self.scene {
                    scene.resize(size.width, size.height);
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(scene) = &mut self.scene {
                    scene.controller.release_all();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            other => {
                if let (Some(input), Some(scene)) =
                    (self.input.translate_window_event(&other), &mut self.scene)
                {
                    scene.handle_event(&input);
                    self.sync_cursor();
                }
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let (Some(input), Some(scene)) = (self.input.translate_device_event(&event), &mut self.scene) {
            scene.handle_event(&input);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

// === Headless ===

fn run_headless(settings: Settings, frames: usize) -> Result<()> {
    let mut scene = Scene::new(settings, HEADLESS_ASPECT, ControllerKind::Game)?;
    let tolerance = scene.settings().game.move_speed;
    let mut pilot = Autopilot::through_maze(scene.maze(), PLAYER_HEIGHT, tolerance)
        .context("Maze has no path from start to goal")?;

    println!("{}", scene.maze());
    let outcome = pilot.run(&mut scene, frames);
    println!("{}", scene.status());

    if !outcome.reached_goal {
        bail!(
            "Goal not reached after {} frames, stopped at {}",
            outcome.frames,
            outcome.position
        );
    }
    println!("Goal reached in {} frames", outcome.frames);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let settings = cli.settings()?;

    if cli.headless {
        return run_headless(settings, cli.frames);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(settings, cli.controller);

    println!(
        "Maze Walker - Controls: WASD move, Space/Shift up/down, mouse look, \
         C cursor, Ctrl sprint, Tab switch controller, Escape quit"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}

//! The maze world: geometry arena, camera, active controller and goal.

pub mod autopilot;
pub mod geometry;
pub mod maze;

pub use autopilot::{Autopilot, Outcome};
pub use geometry::{Geometry, GeometryId, GeometryInstance, MeshData, Shape};
pub use maze::{CellPos, Maze};

use glam::{Mat4, Vec3};
use log::{debug, info};

use crate::camera::Camera;
use crate::config::Settings;
use crate::controller::{CameraController, GameController, TrackballController};
use crate::error::ConfigError;
use crate::math::{cell_to_world, world_to_cell};
use crate::traits::{Action, Button, InputEvent};

/// Eye height of the player above the floor
pub const PLAYER_HEIGHT: f32 = 0.2;
/// Height of wall and goal block centers
const BLOCK_HEIGHT: f32 = 0.5;
const FLOOR_SIZE: f32 = 80.0;
const FLOOR_TEXTURE_REPEAT: f32 = 40.0;
/// Degrees the goal block turns per update
const GOAL_SPIN: f32 = 0.5;

/// Which controller a scene starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ControllerKind {
    #[default]
    Game,
    Trackball,
}

/// Owns everything in the maze world. Instances refer to their geometry by
/// [`GeometryId`]; nothing is shared by pointer.
#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub controller: CameraController,
    /// The controller not currently in use, swapped in on Tab
    parked: CameraController,
    geometries: Vec<Geometry>,
    instances: Vec<GeometryInstance>,
    maze: Maze,
    goal: Vec3,
    settings: Settings,
}

impl Scene {
    /// Generate the maze and place the camera on its start cell.
    pub fn new(settings: Settings, aspect: f32, kind: ControllerKind) -> Result<Self, ConfigError> {
        settings.validate()?;
        let maze = Maze::with_seed(settings.maze.rows, settings.maze.cols, settings.maze.seed)?;

        let (start_row, start_col) = maze.start();
        let (goal_row, goal_col) = maze.goal();
        let goal = cell_to_world(goal_row, goal_col, BLOCK_HEIGHT);

        let mut camera = Camera::new(settings.camera.projection(aspect));
        camera.position = cell_to_world(start_row, start_col, PLAYER_HEIGHT);

        let game = GameController::builder(settings.game.clone())
            .goal(goal)
            .build(&camera)?;
        let trackball = TrackballController::new(&settings.trackball)?;
        let (controller, parked) = match kind {
            ControllerKind::Game => (game.into(), trackball.into()),
            ControllerKind::Trackball => (trackball.into(), game.into()),
        };

        let mut scene = Self {
            camera,
            controller,
            parked,
            geometries: Vec::new(),
            instances: Vec::new(),
            maze,
            goal,
            settings,
        };
        scene.populate();
        info!(
            "scene ready: {} instances, start {:?}, goal {:?}, controller {}",
            scene.instances.len(),
            (start_row, start_col),
            (goal_row, goal_col),
            scene.controller.name()
        );
        Ok(scene)
    }

    fn populate(&mut self) {
        let brick = self.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        let gold = self.add_geometry(Geometry::cuboid(1.0, 1.0, 1.0));
        let floor = self.add_geometry(Geometry::plane(FLOOR_SIZE, FLOOR_SIZE, FLOOR_TEXTURE_REPEAT));

        let mut goal_block = GeometryInstance::at(gold, &self.geometries[gold.0], self.goal);
        goal_block.scale(Vec3::splat(0.5));
        self.instances
            .push(goal_block.with_collision(false).spin(GOAL_SPIN));

        let walls: Vec<GeometryInstance> = self
            .maze
            .wall_cells()
            .map(|(row, col)| {
                GeometryInstance::at(brick, &self.geometries[brick.0], cell_to_world(row, col, BLOCK_HEIGHT))
            })
            .collect();
        self.instances.extend(walls);

        self.instances
            .push(GeometryInstance::at(floor, &self.geometries[floor.0], Vec3::ZERO));
        debug!("maze layout:\n{}", self.maze);
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0)
    }

    pub fn instances(&self) -> &[GeometryInstance] {
        &self.instances
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn goal(&self) -> Vec3 {
        self.goal
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn reached_goal(&self) -> bool {
        [&self.controller, &self.parked]
            .into_iter()
            .filter_map(|c| c.as_game())
            .any(GameController::reached_goal)
    }

    /// Maze cell the camera currently stands on
    pub fn current_cell(&self) -> Option<CellPos> {
        world_to_cell(self.camera.position)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.projection_matrix() * self.camera.view_matrix()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.projection.set_aspect(width as f32 / height as f32);
        }
    }

    /// Feed one input event. Tab swaps controllers; everything else goes to
    /// the active one.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::Keyboard {
            key: Button::Tab,
            action: Action::Press,
            ..
        } = event
        {
            self.switch_controller();
            return;
        }
        self.controller.handle_event(&mut self.camera, event);
    }

    /// Swap the active and parked controllers. The incoming one picks up the
    /// current cursor position, and a game controller coming back re-centers
    /// its collision volume on wherever the camera ended up.
    pub fn switch_controller(&mut self) {
        let (x, y) = self.controller.mouse_position();
        std::mem::swap(&mut self.controller, &mut self.parked);
        self.controller.sync_mouse(x, y);
        let radius = self.settings.game.collision_radius;
        if let Some(game) = self.controller.as_game_mut() {
            game.set_bounding_space(&self.camera, radius);
        }
        info!("switched to {} controller", self.controller.name());
    }

    /// One frame: animate instances, then move the camera against them.
    pub fn update(&mut self) -> Option<Vec3> {
        for instance in &mut self.instances {
            instance.update();
        }
        self.controller.update(&mut self.camera, &self.instances)
    }

    /// Short human-readable state, used for the window title and logs
    pub fn status(&self) -> String {
        if self.reached_goal() {
            return format!("maze-walker | {} | goal reached!", self.controller.name());
        }
        let p = self.camera.position;
        let cell = self
            .current_cell()
            .map(|(row, col)| format!("cell ({row}, {col})"))
            .unwrap_or_else(|| "outside".to_string());
        format!(
            "maze-walker | {} | ({:.2}, {:.2}, {:.2}) | {}",
            self.controller.name(),
            p.x,
            p.y,
            p.z,
            cell
        )
    }
}

use glam::Vec3;
use maze_walker::config::Settings;
use maze_walker::scene::{Autopilot, ControllerKind, Scene, PLAYER_HEIGHT};
use maze_walker::traits::{Action, Button, Collider, InputEvent};
use winit::keyboard::ModifiersState;

fn seeded(seed: u64, rows: usize, cols: usize) -> Settings {
    let mut settings = Settings::default();
    settings.maze.seed = Some(seed);
    settings.maze.rows = rows;
    settings.maze.cols = cols;
    settings
}

fn key(key: Button, action: Action) -> InputEvent {
    InputEvent::Keyboard {
        key,
        action,
        mods: ModifiersState::empty(),
    }
}

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn test_scene_places_walls_goal_and_floor() {
        let scene = Scene::new(seeded(5, 15, 15), 1.0, ControllerKind::Game).unwrap();
        let walls = scene.maze().wall_cells().count();

        // goal block + walls + floor
        assert_eq!(scene.instances().len(), walls + 2);

        let goal_block = &scene.instances()[0];
        assert!(!goal_block.detects_collision());
        assert!(goal_block.world_center().abs_diff_eq(scene.goal(), 1e-6));
        assert_eq!(scene.goal(), Vec3::new(13.0, 0.5, -13.0));

        let floor = scene.instances().last().unwrap();
        assert!(floor.bounding_box().max.y <= 0.005 + 1e-6);
    }

    #[test]
    fn test_camera_starts_on_start_cell() {
        let scene = Scene::new(seeded(5, 15, 15), 1.0, ControllerKind::Game).unwrap();
        assert_eq!(scene.camera.position, Vec3::new(1.0, PLAYER_HEIGHT, -1.0));
        assert_eq!(scene.current_cell(), Some(scene.maze().start()));
        assert!(!scene.reached_goal());
    }

    #[test]
    fn test_wall_instances_match_maze_cells() {
        let scene = Scene::new(seeded(11, 9, 9), 1.0, ControllerKind::Game).unwrap();
        let walls = &scene.instances()[1..scene.instances().len() - 1];

        for (instance, (row, col)) in walls.iter().zip(scene.maze().wall_cells()) {
            let bounds = instance.bounding_box();
            assert!(bounds.center().abs_diff_eq(Vec3::new(col as f32, 0.5, -(row as f32)), 1e-6));
            assert!(bounds.half_extents().abs_diff_eq(Vec3::splat(0.5), 1e-6));
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.game.strategy = None;
        assert!(Scene::new(settings, 1.0, ControllerKind::Game).is_err());
    }
}

#[cfg(test)]
mod play_tests {
    use super::*;

    #[test]
    fn test_autopilot_walks_to_goal() {
        let mut scene = Scene::new(seeded(2024, 15, 15), 1.0, ControllerKind::Game).unwrap();
        let tolerance = scene.settings().game.move_speed;
        let mut pilot = Autopilot::through_maze(scene.maze(), PLAYER_HEIGHT, tolerance).unwrap();

        let outcome = pilot.run(&mut scene, 50_000);

        assert!(outcome.reached_goal, "stopped at {} after {} frames", outcome.position, outcome.frames);
        assert!(scene.status().contains("goal reached"));
        // Goal latch freezes the player
        let frozen = scene.camera.position;
        scene.handle_event(&key(Button::KeyS, Action::Press));
        scene.update();
        assert_eq!(scene.camera.position, frozen);
    }

    #[test]
    fn test_walking_into_start_wall_is_blocked() {
        let mut scene = Scene::new(seeded(3, 9, 9), 1.0, ControllerKind::Game).unwrap();
        // Backwards from the start cell is the outer border wall
        scene.handle_event(&key(Button::KeyS, Action::Press));
        for _ in 0..200 {
            scene.update();
        }
        // Wall face at z = -0.5, player half size 0.2
        assert!(scene.camera.position.z <= -0.7 + 1e-4, "z = {}", scene.camera.position.z);
        assert!((scene.camera.position.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_tab_switches_controller_and_keeps_camera() {
        let mut scene = Scene::new(seeded(8, 9, 9), 1.0, ControllerKind::Game).unwrap();
        assert_eq!(scene.controller.name(), "game");

        scene.handle_event(&key(Button::Tab, Action::Press));
        assert_eq!(scene.controller.name(), "trackball");
        // Trackball never moves on update
        scene.handle_event(&key(Button::KeyW, Action::Press));
        assert_eq!(scene.update(), None);

        scene.camera.position = Vec3::new(3.0, PLAYER_HEIGHT, -3.0);
        scene.handle_event(&key(Button::Tab, Action::Press));
        let game = scene.controller.as_game().unwrap();
        assert!(game.bounding_sphere().center.abs_diff_eq(Vec3::new(3.0, PLAYER_HEIGHT, -3.0), 1e-6));
    }

    #[test]
    fn test_switching_back_does_not_jump_mouse_look() {
        let mut scene = Scene::new(seeded(8, 9, 9), 1.0, ControllerKind::Game).unwrap();
        let sensitivity = scene.settings().game.sensitivity;

        scene.handle_event(&key(Button::Tab, Action::Press));
        scene.handle_event(&InputEvent::MouseMove { x: 400.0, y: 300.0 });
        scene.handle_event(&key(Button::Tab, Action::Press));
        assert_eq!(scene.controller.mouse_position(), (400.0, 300.0));

        let before = scene.camera.forward();
        scene.handle_event(&InputEvent::MouseMove { x: 401.0, y: 300.0 });
        let after = scene.camera.forward();

        let turned = Vec3::Y.dot(before.cross(after)).atan2(before.dot(after)).to_degrees();
        assert!((turned.abs() - sensitivity).abs() < 1e-3, "turned {turned} degrees");
    }

    #[test]
    fn test_warp_resyncs_without_turning() {
        let mut scene = Scene::new(seeded(8, 9, 9), 1.0, ControllerKind::Game).unwrap();
        let start = scene.camera.clone();

        scene.handle_event(&InputEvent::MouseWarp { x: 900.0, y: 700.0 });
        assert_eq!(scene.camera, start);

        scene.handle_event(&InputEvent::MouseMove { x: 900.0, y: 701.0 });
        let pitch = scene.controller.as_game().unwrap().pitch_angle();
        assert!((pitch.abs() - scene.settings().game.sensitivity).abs() < 1e-6);
    }

    #[test]
    fn test_focus_loss_ends_sprint() {
        let mut scene = Scene::new(seeded(8, 9, 9), 1.0, ControllerKind::Game).unwrap();
        let speed = scene.settings().game.move_speed;
        scene.handle_event(&key(Button::ControlLeft, Action::Press));
        assert!(scene.controller.as_game().unwrap().is_sprinting());

        scene.controller.release_all();

        let game = scene.controller.as_game().unwrap();
        assert!(!game.is_sprinting());
        assert!((game.move_speed() - speed).abs() < 1e-6);
    }

    #[test]
    fn test_trackball_start_orbits_with_mouse() {
        let mut scene = Scene::new(seeded(8, 9, 9), 1.0, ControllerKind::Trackball).unwrap();
        let start = scene.camera.position;

        scene.handle_event(&InputEvent::Mouse {
            button: Button::MouseLeft,
            action: Action::Press,
            x: 0.0,
            y: 0.0,
        });
        scene.handle_event(&InputEvent::MouseMove { x: 50.0, y: 0.0 });

        assert!(!scene.camera.position.abs_diff_eq(start, 1e-4));
        assert!((scene.camera.position.length() - start.length()).abs() < 1e-4);
    }
}

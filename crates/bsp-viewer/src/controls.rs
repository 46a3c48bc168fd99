//! Keyboard controls and on-screen help.

use bsp_painter::CameraCommand;
use macroquad::prelude::*;

use crate::{ViewMode, Viewer};

/// One camera step per key press.
pub const KEY_BINDINGS: [(KeyCode, CameraCommand); 14] = [
    (KeyCode::W, CameraCommand::MoveForward),
    (KeyCode::S, CameraCommand::MoveBackward),
    (KeyCode::A, CameraCommand::MoveLeft),
    (KeyCode::D, CameraCommand::MoveRight),
    (KeyCode::Q, CameraCommand::MoveUp),
    (KeyCode::E, CameraCommand::MoveDown),
    (KeyCode::Left, CameraCommand::TurnLeft),
    (KeyCode::Right, CameraCommand::TurnRight),
    (KeyCode::Up, CameraCommand::LookUp),
    (KeyCode::Down, CameraCommand::LookDown),
    (KeyCode::F, CameraCommand::RollClockwise),
    (KeyCode::G, CameraCommand::RollCounterClockwise),
    (KeyCode::H, CameraCommand::ZoomIn),
    (KeyCode::J, CameraCommand::ZoomOut),
];

pub const TOGGLE_MODE_KEY: KeyCode = KeyCode::B;

const HELP: [&str; 8] = [
    "W/S: forward/back",
    "A/D: left/right",
    "Q/E: up/down",
    "Arrows: turn/look",
    "F/G: roll",
    "H/J: zoom in/out",
    "B: toggle BSP/wireframe",
    "Esc: quit",
];

/// Handles this frame's key presses.
/// Returns true if the viewer state changed.
pub fn handle_input(viewer: &mut Viewer) -> bool {
    let mut changed = false;

    for (key, command) in KEY_BINDINGS {
        if is_key_pressed(key) {
            viewer.apply(command);
            changed = true;
        }
    }

    if is_key_pressed(TOGGLE_MODE_KEY) {
        viewer.toggle_mode();
        changed = true;
    }

    changed
}

/// Draws mode, tree and pass statistics plus the key help, starting at `y`.
pub fn draw_overlay(viewer: &Viewer, y: f32) {
    let mode = match viewer.mode() {
        ViewMode::Bsp => "BSP: ON",
        ViewMode::Wireframe => "BSP: OFF (wireframe)",
    };
    draw_text(mode, 10.0, y, 22.0, YELLOW);

    let tree = viewer.tree();
    let build = tree.stats();
    draw_text(
        &format!(
            "Tree: {} polygons ({} splits), {} nodes, depth {}",
            tree.polygon_count(),
            build.splits,
            tree.node_count(),
            tree.depth()
        ),
        10.0,
        y + 22.0,
        18.0,
        LIGHTGRAY,
    );

    let stats = viewer.stats();
    draw_text(
        &format!(
            "Pass: {} visited, {} drawn, {} culled, {} clipped",
            stats.visited, stats.drawn, stats.culled, stats.clipped
        ),
        10.0,
        y + 42.0,
        18.0,
        LIGHTGRAY,
    );

    let camera = viewer.camera();
    draw_text(
        &format!(
            "Camera: ({:.1}, {:.1}, {:.1})  focal {:.0}",
            camera.position.x, camera.position.y, camera.position.z, camera.focal_length
        ),
        10.0,
        y + 62.0,
        18.0,
        LIGHTGRAY,
    );

    let mut line_y = y + 90.0;
    for line in HELP {
        draw_text(line, 10.0, line_y, 16.0, GRAY);
        line_y += 18.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_has_one_key() {
        for (i, (key, command)) in KEY_BINDINGS.iter().enumerate() {
            assert_ne!(*key, TOGGLE_MODE_KEY);
            for (other_key, other_command) in &KEY_BINDINGS[i + 1..] {
                assert_ne!(key, other_key);
                assert_ne!(command, other_command);
            }
        }
    }
}

//! Free-flying camera and perspective projection.
//!
//! The camera is a plain value: input handling mutates it through
//! [`Camera::apply`] (one fixed step per command), and a render pass then
//! reads it without mutation.
//!
//! The camera sits at the origin of its own space looking down −Z with +Y
//! up. Yaw, pitch and roll rotate about the camera's Y, X and Z axes, in that
//! order. Movement happens along the same axes, so a forward step always
//! heads where the camera looks, and world +Y is the vertical direction.

use nalgebra::{Point2, Point3, Vector3};

/// Below this length the horizontal part of `forward` is treated as zero.
const RIGHT_EPSILON: f64 = 1e-9;

/// Focal length change per zoom step.
pub const ZOOM_FACTOR: f64 = 1.1;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space center of the viewport.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// One discrete camera control. Each applies exactly one fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraCommand {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
    RollClockwise,
    RollCounterClockwise,
    ZoomIn,
    ZoomOut,
}

/// Viewpoint position, orientation and lens.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    /// Radians.
    pub yaw: f64,
    /// Radians.
    pub pitch: f64,
    /// Radians.
    pub roll: f64,
    /// Distance covered by one movement step.
    pub move_speed: f64,
    /// Angle covered by one rotation step, in radians.
    pub rot_speed: f64,
    /// Distance from the eye to the image plane, in pixels.
    pub focal_length: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            move_speed: 0.5,
            rot_speed: 5f64.to_radians(),
            focal_length: 500.0,
        }
    }
}

impl Camera {
    /// Creates a camera at `position` with zero orientation and default speeds.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Sets the orientation angles (radians).
    pub fn with_orientation(mut self, yaw: f64, pitch: f64, roll: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    /// Sets the movement and rotation step sizes.
    pub fn with_speeds(mut self, move_speed: f64, rot_speed: f64) -> Self {
        self.move_speed = move_speed;
        self.rot_speed = rot_speed;
        self
    }

    /// Sets the focal length.
    pub fn with_focal_length(mut self, focal_length: f64) -> Self {
        self.focal_length = focal_length;
        self
    }

    /// Unit view direction: the camera's −Z axis in world space,
    /// `(cos p · sin y, sin p, −cos p · cos y)`.
    pub fn forward(&self) -> Vector3<f64> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vector3::new(cos_pitch * sin_yaw, sin_pitch, -cos_pitch * cos_yaw)
    }

    /// Horizontal unit vector to the right of [`Camera::forward`],
    /// `normalize(forward × up)`.
    ///
    /// Returns the zero vector when looking straight up or down, which turns
    /// lateral movement into a no-op.
    pub fn right(&self) -> Vector3<f64> {
        self.forward()
            .cross(&Vector3::y())
            .try_normalize(RIGHT_EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }

    /// Applies one control step.
    pub fn apply(&mut self, command: CameraCommand) {
        use CameraCommand::*;

        match command {
            MoveForward => self.position += self.forward() * self.move_speed,
            MoveBackward => self.position -= self.forward() * self.move_speed,
            MoveLeft => self.position -= self.right() * self.move_speed,
            MoveRight => self.position += self.right() * self.move_speed,
            MoveUp => self.position.y += self.move_speed,
            MoveDown => self.position.y -= self.move_speed,
            TurnLeft => self.yaw -= self.rot_speed,
            TurnRight => self.yaw += self.rot_speed,
            LookUp => self.pitch += self.rot_speed,
            LookDown => self.pitch -= self.rot_speed,
            RollClockwise => self.roll -= self.rot_speed,
            RollCounterClockwise => self.roll += self.rot_speed,
            ZoomIn => self.focal_length *= ZOOM_FACTOR,
            ZoomOut => self.focal_length /= ZOOM_FACTOR,
        }
    }

    /// Transforms a world point into camera space (camera at the origin,
    /// looking down −Z, +Y up).
    pub fn to_camera_space(&self, point: Point3<f64>) -> Vector3<f64> {
        let p = point - self.position;

        // Yaw: about the vertical (Y) axis. Positive yaw looks right.
        let (sin, cos) = self.yaw.sin_cos();
        let (x, z) = (p.x * cos + p.z * sin, -p.x * sin + p.z * cos);
        let y = p.y;

        // Pitch: about the lateral (X) axis. Positive pitch looks up.
        let (sin, cos) = self.pitch.sin_cos();
        let (y, z) = (y * cos + z * sin, -y * sin + z * cos);

        // Roll: about the view (Z) axis. Positive roll turns the camera
        // counter-clockwise, so the image turns clockwise.
        let (sin, cos) = self.roll.sin_cos();
        let (x, y) = (x * cos + y * sin, -x * sin + y * cos);

        Vector3::new(x, y, z)
    }

    /// Projects a world point to screen coordinates.
    ///
    /// Returns `None` for points behind the camera or on its plane
    /// (camera-space depth ≤ 0). Pure: the camera is never modified.
    pub fn project(&self, point: Point3<f64>, viewport: &Viewport) -> Option<Point2<f64>> {
        let view = self.to_camera_space(point);
        let depth = -view.z;
        if depth <= 0.0 {
            return None;
        }

        let scale = self.focal_length / depth;
        let center = viewport.center();
        Some(Point2::new(center.x + view.x * scale, center.y - view.y * scale))
    }
}

/// Free-function form of [`Camera::project`].
pub fn project(point: Point3<f64>, camera: &Camera, viewport: &Viewport) -> Option<Point2<f64>> {
    camera.project(point, viewport)
}

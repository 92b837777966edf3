use glam::{Mat3, Vec3};

/// A 3-axis Euler rotation, all angles in radians.
///
/// Pitch rotates about x (tilt up/down), roll about y (the forward axis),
/// yaw about z (the up axis). The composition order is fixed to
/// `Rx · Ry · Rz` applied to the column vector; reordering the axes changes
/// the result, so the order is part of the visual contract.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotation {
    pub const IDENTITY: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    pub fn from_degrees(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self {
            pitch: pitch.to_radians(),
            yaw: yaw.to_radians(),
            roll: roll.to_radians(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.pitch == 0.0 && self.yaw == 0.0 && self.roll == 0.0
    }

    /// The combined rotation matrix, `Rx(pitch) · Ry(roll) · Rz(yaw)`.
    pub fn matrix(&self) -> Mat3 {
        Mat3::from_rotation_x(self.pitch)
            * Mat3::from_rotation_y(self.roll)
            * Mat3::from_rotation_z(self.yaw)
    }

    pub fn rotate(&self, point: Vec3) -> Vec3 {
        if self.is_identity() {
            return point;
        }
        self.matrix() * point
    }
}

//! Cubemap projection: six square faces packed into a 2×3 cross atlas.
//!
//! The atlas is split at the fixed thresholds 1/3 and 2/3 horizontally and
//! 1/2 vertically (boundary-inclusive towards the lower cell index). Each
//! face plane sits at distance 1 from the origin with local coordinates
//! spanning [−1,1]²; there is no blending across seams. The top row holds
//! the left/front/right faces, the bottom row up/back/down.

use glam::{vec2, vec3, Vec2, Vec3};

use crate::sphere::LatLon;

const COLUMN_SPLIT_LEFT: f32 = 1.0 / 3.0;
const COLUMN_SPLIT_RIGHT: f32 = 2.0 / 3.0;
const ROW_SPLIT: f32 = 0.5;

/// One face of the cube, named by its outward axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Looks right; top row, right cell.
    PosX,
    /// Looks left; top row, left cell.
    NegX,
    /// Looks forward; top row, middle cell.
    PosY,
    /// Looks backward; bottom row, middle cell.
    NegY,
    /// Looks up; bottom row, left cell.
    PosZ,
    /// Looks down; bottom row, right cell.
    NegZ,
}

impl Face {
    /// Atlas cell for this face as (column, top-row flag).
    fn cell(self) -> (usize, bool) {
        match self {
            Face::NegX => (0, true),
            Face::PosY => (1, true),
            Face::PosX => (2, true),
            Face::PosZ => (0, false),
            Face::NegY => (1, false),
            Face::NegZ => (2, false),
        }
    }
}

/// Selects the atlas cell containing `uv`.
pub fn face_for_uv(uv: Vec2) -> Face {
    let top = uv.y >= ROW_SPLIT;
    match (uv.x <= COLUMN_SPLIT_LEFT, uv.x <= COLUMN_SPLIT_RIGHT, top) {
        (true, _, true) => Face::NegX,
        (false, true, true) => Face::PosY,
        (false, false, true) => Face::PosX,
        (true, _, false) => Face::PosZ,
        (false, true, false) => Face::NegY,
        (false, false, false) => Face::NegZ,
    }
}

/// Selects the face whose axis dominates the direction.
pub fn face_for_point(point: Vec3) -> Face {
    let abs = point.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        if point.x >= 0.0 {
            Face::PosX
        } else {
            Face::NegX
        }
    } else if abs.y >= abs.z {
        if point.y >= 0.0 {
            Face::PosY
        } else {
            Face::NegY
        }
    } else if point.z >= 0.0 {
        Face::PosZ
    } else {
        Face::NegZ
    }
}

/// Converts an atlas coordinate to a point on the unit cube's surface.
pub fn uv_to_point(uv: Vec2) -> Vec3 {
    let face = face_for_uv(uv);
    let (column, top) = face.cell();
    let u_local = (uv.x - column as f32 / 3.0) * 3.0;
    let v_local = if top { (uv.y - ROW_SPLIT) * 2.0 } else { uv.y * 2.0 };
    let lx = 2.0 * u_local - 1.0;
    let ly = 2.0 * v_local - 1.0;
    match face {
        Face::NegX => vec3(-1.0, lx, ly),
        Face::PosY => vec3(lx, 1.0, ly),
        Face::PosX => vec3(1.0, -lx, ly),
        Face::PosZ => vec3(-ly, -lx, 1.0),
        Face::NegY => vec3(-ly, -1.0, -lx),
        Face::NegZ => vec3(-ly, lx, -1.0),
    }
}

/// Converts a direction to the atlas coordinate of the face it pierces.
///
/// Every direction hits exactly one face, so this conversion is total.
pub fn point_to_uv(point: Vec3) -> Vec2 {
    let face = face_for_point(point);
    let scale = match face {
        Face::PosX | Face::NegX => point.x.abs(),
        Face::PosY | Face::NegY => point.y.abs(),
        Face::PosZ | Face::NegZ => point.z.abs(),
    };
    let q = point / scale;
    let (lx, ly) = match face {
        Face::NegX => (q.y, q.z),
        Face::PosY => (q.x, q.z),
        Face::PosX => (-q.y, q.z),
        Face::PosZ => (-q.y, -q.x),
        Face::NegY => (-q.z, -q.x),
        Face::NegZ => (q.y, -q.x),
    };
    let (column, top) = face.cell();
    let u = (lx + 1.0) / 6.0 + column as f32 / 3.0;
    let v = (ly + 1.0) / 4.0 + if top { ROW_SPLIT } else { 0.0 };
    vec2(u, v)
}

/// Converts an atlas coordinate to latitude/longitude.
pub fn uv_to_lat_lon(uv: Vec2) -> LatLon {
    LatLon::from_point(uv_to_point(uv))
}

/// Converts latitude/longitude to an atlas coordinate.
pub fn lat_lon_to_uv(lat_lon: LatLon) -> Vec2 {
    point_to_uv(lat_lon.to_point())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn atlas_cells_select_the_documented_faces() {
        // Top-left cell holds the left-looking face, bottom-middle the
        // backward-looking one; thresholds are 1/3, 2/3, and 1/2.
        assert_eq!(face_for_uv(vec2(0.1, 0.9)), Face::NegX);
        assert_eq!(face_for_uv(vec2(0.5, 0.1)), Face::NegY);
        assert_eq!(face_for_uv(vec2(0.5, 0.9)), Face::PosY);
        assert_eq!(face_for_uv(vec2(0.9, 0.9)), Face::PosX);
        assert_eq!(face_for_uv(vec2(0.1, 0.1)), Face::PosZ);
        assert_eq!(face_for_uv(vec2(0.9, 0.1)), Face::NegZ);
    }

    #[test]
    fn cell_boundaries_are_inclusive_toward_lower_cells() {
        assert_eq!(face_for_uv(vec2(1.0 / 3.0, 0.75)), Face::NegX);
        assert_eq!(face_for_uv(vec2(2.0 / 3.0, 0.75)), Face::PosY);
        assert_eq!(face_for_uv(vec2(0.5, 0.5)), Face::PosY);
    }

    #[test]
    fn cell_centres_look_along_their_axes() {
        let cases = [
            (vec2(1.0 / 6.0, 0.75), -Vec3::X),
            (vec2(0.5, 0.75), Vec3::Y),
            (vec2(5.0 / 6.0, 0.75), Vec3::X),
            (vec2(1.0 / 6.0, 0.25), Vec3::Z),
            (vec2(0.5, 0.25), -Vec3::Y),
            (vec2(5.0 / 6.0, 0.25), -Vec3::Z),
        ];
        for (uv, axis) in cases {
            let p = uv_to_point(uv);
            assert!((p - axis).length() < EPS, "cell {uv:?} should look along {axis:?}, got {p:?}");
        }
    }

    #[test]
    fn uv_round_trips_inside_faces() {
        let samples = [
            vec2(0.2, 0.7),
            vec2(0.55, 0.8),
            vec2(0.9, 0.6),
            vec2(0.1, 0.3),
            vec2(0.45, 0.15),
            vec2(0.8, 0.4),
        ];
        for uv in samples {
            let back = point_to_uv(uv_to_point(uv));
            assert!((back - uv).length() < EPS, "expected {uv:?}, got {back:?}");
        }
    }

    #[test]
    fn point_round_trips_through_the_atlas() {
        let directions = [
            vec3(0.9, 0.3, -0.2),
            vec3(-0.1, -0.8, 0.4),
            vec3(0.2, 0.1, 0.95),
            vec3(-0.7, 0.5, -0.1),
        ];
        for dir in directions {
            let uv = point_to_uv(dir);
            let back = uv_to_point(uv);
            // Forward output is on the cube surface; compare directions.
            assert!(
                (back.normalize() - dir.normalize()).length() < EPS,
                "expected direction {dir:?}, got {back:?}"
            );
        }
    }

    #[test]
    fn seam_between_front_and_left_faces_is_continuous() {
        let front_edge = uv_to_point(vec2(COLUMN_SPLIT_LEFT + 1e-6, 0.75));
        let left_edge = uv_to_point(vec2(COLUMN_SPLIT_LEFT - 1e-6, 0.75));
        assert!((front_edge - left_edge).length() < 1e-4);
    }
}

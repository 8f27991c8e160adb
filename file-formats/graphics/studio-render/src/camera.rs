//! Camera placement for preview renders.
//!
//! First-person weapon models are authored around the eye point, so they get
//! a fixed close-up camera. Everything else is framed from an orbit position
//! derived from the model bounds.

use glam::{Mat4, Vec3};
use studio_mdl::Bounds;

/// File name prefixes used by first-person weapon models
pub const VIEWMODEL_PREFIXES: [&str; 2] = ["v_", "pv-"];

pub const NEAR_PLANE: f32 = 0.01;
pub const FAR_PLANE: f32 = 1000.0;

const VIEWMODEL_FOV_DEGREES: f32 = 90.0;
const VIEWMODEL_EYE: Vec3 = Vec3::new(-1.0, 1.4, 1.0);
const VIEWMODEL_TARGET: Vec3 = Vec3::new(-5.0, 1.4, 1.0);

const ORBIT_FOV_DEGREES: f32 = 65.0;
/// Passed to `tan` as radians. With the scale, the eye sits about 1.058x the
/// model size away.
const ORBIT_FRAMING_ANGLE: f32 = 32.5;
const ORBIT_FRAMING_SCALE: f32 = 4.0;
const ORBIT_FALLBACK_DISTANCE: f32 = 50.0;

/// How the camera is placed for a model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPolicy {
    /// Fixed close-up for first-person weapon models
    Viewmodel,
    /// Bounds-driven orbit position
    Orbit,
}

impl CameraPolicy {
    /// Picks a policy from a file stem such as `v_crowbar`.
    pub fn classify(stem: &str) -> Self {
        let stem = stem.to_ascii_lowercase();
        if VIEWMODEL_PREFIXES
            .iter()
            .any(|prefix| stem.starts_with(prefix))
        {
            Self::Viewmodel
        } else {
            Self::Orbit
        }
    }
}

/// Resolved eye, target and lens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub policy: CameraPolicy,
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_y: f32,
}

impl Camera {
    /// Places a camera for `bounds` using `policy`.
    pub fn new(policy: CameraPolicy, bounds: &Bounds) -> Self {
        match policy {
            CameraPolicy::Viewmodel => Self {
                policy,
                eye: VIEWMODEL_EYE,
                target: VIEWMODEL_TARGET,
                fov_y: VIEWMODEL_FOV_DEGREES.to_radians(),
            },
            CameraPolicy::Orbit => {
                let distance = orbit_distance(bounds);
                Self {
                    policy,
                    eye: Vec3::new(-distance, 0.0, distance * 0.5),
                    target: bounds.center(),
                    fov_y: ORBIT_FOV_DEGREES.to_radians(),
                }
            }
        }
    }

    /// Mirrors model space along X into world space.
    pub fn world() -> Mat4 {
        Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0))
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, Vec3::Z)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// `projection * view * world` for a `width x height` target.
    pub fn model_view_projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        self.projection(aspect) * self.view() * Self::world()
    }
}

/// Eye distance from the larger of the X and Z extents.
fn orbit_distance(bounds: &Bounds) -> f32 {
    let extent = bounds.extent();
    let size = extent.z.max(extent.x);
    let distance = size * 0.5 / ORBIT_FRAMING_ANGLE.tan() * ORBIT_FRAMING_SCALE;
    if distance.is_finite() && distance > 0.0 {
        distance
    } else {
        ORBIT_FALLBACK_DISTANCE
    }
}

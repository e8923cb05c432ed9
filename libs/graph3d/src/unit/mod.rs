//! Point objects: positioned spheres drawn as screen-space circles.
//!
//! A [`Unit3D`] has no mesh, only a position and a radius that project to a
//! screen position and screen radius. Collections of units are culled and
//! depth-ordered with the same active-stack and sorter machinery as polygons.
//! Each unit also carries a queue of [`UnitAction`]s and a remembered copy
//! of that queue.

mod action;

pub use action::{ActionMemory, UnitAction, UnitActionKind};

use ::config::constants::{MIN_PERSPECTIVE_K, UNIT_FALLBACK_DEPTH, UNIT_MIN_PROJECTION_DEPTH};

use crate::core::angle::Axis3D;
use crate::core::color::Color;
use crate::core::point::{square_distance_from_origin, Point3D};
use crate::core::transform::{move_point, rotate_point};
use crate::error::{Graph3dResult, ResultExt};
use crate::lighting::Fog;
use crate::model::ActiveIndexes;
use crate::sort::group_sort_descending;
use crate::surface::DrawingSurface;

const SCREEN_LIMIT: f32 = i32::MAX as f32;

/// A point object with a radius.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Unit3D {
    primary_position: Point3D,
    camera_position: Point3D,
    primary_radius: f32,
    screen_position: Point3D,
    screen_radius: f32,
    square_distance_from_camera: f32,
    actions: Vec<UnitAction>,
    actions_memory: Vec<UnitAction>,
}

impl Unit3D {
    /// Creates a unit at `position`; its camera position starts there too.
    pub fn new(position: Point3D, radius: f32) -> Self {
        Self {
            primary_position: position,
            camera_position: position,
            primary_radius: radius,
            ..Self::default()
        }
    }

    /// Rest position.
    pub fn primary_position(&self) -> Point3D {
        self.primary_position
    }

    /// Moves the rest position and the camera position with it.
    pub fn set_primary_position(&mut self, position: Point3D) {
        self.primary_position = position;
        self.camera_position = position;
    }

    /// Radius in world units.
    pub fn primary_radius(&self) -> f32 {
        self.primary_radius
    }

    /// Sets the world radius.
    pub fn set_primary_radius(&mut self, radius: f32) {
        self.primary_radius = radius;
    }

    /// Copies the rest position into the camera position.
    pub fn reset_camera_position(&mut self) {
        self.camera_position = self.primary_position;
    }

    /// Camera-space position.
    pub fn camera_position(&self) -> Point3D {
        self.camera_position
    }

    /// Mutable camera-space position.
    pub fn camera_position_mut(&mut self) -> &mut Point3D {
        &mut self.camera_position
    }

    /// Projected position; `z` holds the camera-space depth.
    pub fn screen_position(&self) -> Point3D {
        self.screen_position
    }

    /// Projected radius.
    pub fn screen_radius(&self) -> f32 {
        self.screen_radius
    }

    /// Last value computed by [`Unit3D::calculate_square_distance_from_camera`].
    pub fn square_distance_from_camera(&self) -> f32 {
        self.square_distance_from_camera
    }

    /// Squared distance of the rest position from the camera at the origin.
    pub fn calculate_square_distance_from_camera(&mut self) -> f32 {
        self.square_distance_from_camera = square_distance_from_origin(self.primary_position);
        self.square_distance_from_camera
    }

    /// Translates the camera position.
    pub fn move_by(&mut self, dx: f32, dy: f32, dz: f32) {
        move_point(dx, dy, dz, &mut self.camera_position);
    }

    /// Rotates the camera position about the origin.
    pub fn rotate(&mut self, angle: f32, axis: Axis3D) {
        rotate_point(angle, axis, &mut self.camera_position);
    }

    /// Queued actions.
    pub fn actions(&self) -> &[UnitAction] {
        &self.actions
    }

    /// Mutable action queue.
    pub fn actions_mut(&mut self) -> &mut Vec<UnitAction> {
        &mut self.actions
    }

    /// Queues an action.
    pub fn push_action(&mut self, action: UnitAction) {
        self.actions.push(action);
    }

    /// Actions saved by the last [`Unit3D::remember_actions`].
    pub fn actions_memory(&self) -> &[UnitAction] {
        &self.actions_memory
    }

    /// Saves a copy of the current queue, replacing the previous one.
    pub fn remember_actions(&mut self) {
        self.actions_memory.clone_from(&self.actions);
    }

    /// Applies the queued `Move`, `Rotate` and `Zoom` actions to the camera
    /// position in queue order and returns how many were applied.
    ///
    /// Rotation reads its axis from the first integer parameter (0 = X,
    /// 1 = Y, 2 = Z); an unknown axis skips the action. `Transform` and the
    /// section actions describe mesh changes and are left to the caller.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::point::Point3D;
    /// use graph3d::unit::{Unit3D, UnitAction, UnitActionKind};
    /// let mut u = Unit3D::new(Point3D::new(1.0, 0.0, 10.0), 1.0);
    /// let mut step = UnitAction::new(UnitActionKind::Move, None);
    /// step.set_transformation(&[0.0, 0.0, 5.0]);
    /// u.push_action(step);
    /// assert_eq!(u.apply_actions(), 1);
    /// assert_eq!(u.camera_position(), Point3D::new(1.0, 0.0, 15.0));
    /// ```
    pub fn apply_actions(&mut self) -> usize {
        let mut applied = 0;
        for action in &self.actions {
            let f = action.floats();
            match action.kind() {
                UnitActionKind::Move => move_point(f[0], f[1], f[2], &mut self.camera_position),
                UnitActionKind::Rotate => {
                    let axis = match action.ints()[0] {
                        0 => Axis3D::OXyz,
                        1 => Axis3D::OYxz,
                        2 => Axis3D::OZyx,
                        _ => continue,
                    };
                    rotate_point(f[0], axis, &mut self.camera_position);
                }
                UnitActionKind::Zoom => self.camera_position *= f[0],
                _ => continue,
            }
            applied += 1;
        }
        applied
    }

    /// Projects the camera position and radius to the screen.
    ///
    /// Units at or behind depth 0.001 are projected as if at depth 0.1.
    ///
    /// # Examples
    /// ```
    /// use graph3d::core::point::Point3D;
    /// use graph3d::unit::Unit3D;
    /// let mut u = Unit3D::new(Point3D::new(2.0, 1.0, 100.0), 5.0);
    /// u.calculate_screen_values(1000.0, 320, -240);
    /// assert_eq!(u.screen_radius(), 50.0);
    /// assert_eq!(u.screen_position(), Point3D::new(340.0, 230.0, 100.0));
    /// ```
    pub fn calculate_screen_values(&mut self, k: f32, cx: i32, cy: i32) {
        let k = k.max(MIN_PERSPECTIVE_K);
        let cam = self.camera_position;
        let depth = if cam.z <= UNIT_MIN_PROJECTION_DEPTH {
            UNIT_FALLBACK_DEPTH
        } else {
            cam.z
        };
        let scale = k / depth;
        self.screen_radius = self.primary_radius * scale;
        self.screen_position = Point3D::new(
            (cam.x * scale + cx as f32).clamp(-SCREEN_LIMIT, SCREEN_LIMIT),
            (-(cy as f32) - cam.y * scale).clamp(-SCREEN_LIMIT, SCREEN_LIMIT),
            cam.z,
        );
    }
}

impl AsRef<Unit3D> for Unit3D {
    fn as_ref(&self) -> &Unit3D {
        self
    }
}

/// A unit drawn as a filled circle.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeModel3D {
    /// Position and radius.
    pub unit: Unit3D,
    color: Color,
    draw_color: Color,
}

impl ShapeModel3D {
    /// Creates a white circle.
    pub fn new(unit: Unit3D) -> Self {
        Self {
            unit,
            color: Color::WHITE,
            draw_color: Color::WHITE,
        }
    }

    /// Material colour.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the material colour and the colour drawn this frame.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.draw_color = color;
    }

    /// Colour the next draw will use.
    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Restores the drawn colour to the material colour.
    pub fn reset_lighting(&mut self) {
        self.draw_color = self.color;
    }

    /// Blends fog into the drawn colour by screen depth.
    pub fn add_fog(&mut self, color: Color, min_distance: f32, full_distance: f32) -> Graph3dResult<()> {
        let fog = Fog::new(color, min_distance, full_distance)?;
        self.apply_fog(&fog);
        Ok(())
    }

    /// Blends prepared fog into the drawn colour.
    pub fn apply_fog(&mut self, fog: &Fog) {
        let z = self.unit.screen_position().z;
        if let Some(c) = fog.blend(self.draw_color, self.draw_color.a, z) {
            self.draw_color = c;
        }
    }

    /// Draws the circle into `buffer`.
    pub fn show(&self, surface: &dyn DrawingSurface, buffer: usize) -> Graph3dResult<()> {
        let r = self.unit.screen_radius();
        let p = self.unit.screen_position();
        surface
            .fill_ellipse(self.draw_color, p.x - r, p.y - r, r + r, r + r, buffer)
            .context("ShapeModel3D", "show")
    }
}

impl AsRef<Unit3D> for ShapeModel3D {
    fn as_ref(&self) -> &Unit3D {
        &self.unit
    }
}

/// Removes units entirely in front of `min_z`, and when `max_z > min_z`
/// those entirely beyond `max_z`, using camera depth widened by the screen
/// radius.
pub fn filter_units_by_z_pos<U: AsRef<Unit3D>>(units: &[U], active: &mut ActiveIndexes, min_z: f32, max_z: f32) -> usize {
    let mut removed = active.retain_by(|i| {
        let u = units[i].as_ref();
        u.camera_position.z + u.screen_radius > min_z
    });
    if max_z > min_z {
        removed += active.retain_by(|i| {
            let u = units[i].as_ref();
            u.camera_position.z - u.screen_radius < max_z
        });
    }
    removed
}

/// Removes units whose circle lies entirely outside the `width` × `height`
/// screen.
pub fn filter_units_by_xy_pos<U: AsRef<Unit3D>>(units: &[U], active: &mut ActiveIndexes, width: f32, height: f32) -> usize {
    active.retain_by(|i| {
        let u = units[i].as_ref();
        let (p, r) = (u.screen_position, u.screen_radius);
        !(p.x + r <= 0.0 || p.y + r <= 0.0 || p.x - r >= width || p.y - r >= height)
    })
}

/// Orders the active units by descending screen depth.
pub fn sort_units_by_depth<U: AsRef<Unit3D>>(units: &[U], active: &mut ActiveIndexes) {
    group_sort_descending(active.as_mut_slice(), |i| units[i].as_ref().screen_position.z);
}

/// Orders the active units by descending screen radius.
pub fn sort_units_by_size<U: AsRef<Unit3D>>(units: &[U], active: &mut ActiveIndexes) {
    group_sort_descending(active.as_mut_slice(), |i| units[i].as_ref().screen_radius);
}

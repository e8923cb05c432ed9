//! Parameter buffers for actions queued on a unit.
//!
//! An action carries float and integer parameters whose layout depends on
//! the action kind and, for [`UnitActionKind::Transform`], on the kind of
//! model the unit stands for:
//!
//! | kind | floats | ints |
//! |------|--------|------|
//! | `Move`, `MovePoly3DSection` | `dx, dy, dz` | section index (section moves only) |
//! | `Rotate` | angle | axis code |
//! | `RotatePoly3DSection` | angle | section index, axis code |
//! | `Zoom` | factor, starts at 1 | none |
//! | `Transform` | shape parameters (6 for `Plane3D`, 11 `Cylinder3D`, 12 `Tor3D`, 10 `Ellipse3D`, 4 `Poly3D`) | grid sizes (2 for `CellPlane3D`, 3 `Prism3D`) |

use crate::model::ModelKind;

/// What an action does to its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitActionKind {
    /// Translation.
    Move,
    /// Rotation about an axis.
    Rotate,
    /// Uniform scaling.
    Zoom,
    /// Shape parameter change.
    Transform,
    /// Translation of one section of an extruded polygon.
    MovePoly3DSection,
    /// Rotation of one section of an extruded polygon.
    RotatePoly3DSection,
}

impl UnitActionKind {
    /// Numeric code of this kind.
    pub fn code(self) -> i32 {
        match self {
            UnitActionKind::Move => 0,
            UnitActionKind::Rotate => 1,
            UnitActionKind::Zoom => 2,
            UnitActionKind::Transform => 3,
            UnitActionKind::MovePoly3DSection => 4,
            UnitActionKind::RotatePoly3DSection => 5,
        }
    }

    /// Kind for a numeric code.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => UnitActionKind::Move,
            1 => UnitActionKind::Rotate,
            2 => UnitActionKind::Zoom,
            3 => UnitActionKind::Transform,
            4 => UnitActionKind::MovePoly3DSection,
            5 => UnitActionKind::RotatePoly3DSection,
            _ => return None,
        })
    }
}

/// Second set of parameter buffers, shaped like the action's own, for
/// callers that track how parameters change between frames.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActionMemory {
    /// Remembered float parameters.
    pub floats: Vec<f32>,
    /// Remembered integer parameters.
    pub ints: Vec<i32>,
}

/// One queued action with its parameter buffers.
///
/// # Examples
/// ```
/// use graph3d::model::ModelKind;
/// use graph3d::unit::{UnitAction, UnitActionKind};
/// let mut grow = UnitAction::new(UnitActionKind::Transform, Some(ModelKind::Plane3D));
/// assert_eq!(grow.floats().len(), 6);
/// grow.set_transformation(&[1.0, 2.0]);
/// assert_eq!(&grow.floats()[..3], &[1.0, 2.0, 0.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct UnitAction {
    kind: UnitActionKind,
    model_kind: Option<ModelKind>,
    floats: Vec<f32>,
    ints: Vec<i32>,
    memory: Option<ActionMemory>,
}

impl UnitAction {
    /// Creates an action with default parameters for `kind` and
    /// `model_kind`, without a memory buffer.
    pub fn new(kind: UnitActionKind, model_kind: Option<ModelKind>) -> Self {
        Self {
            kind,
            model_kind,
            floats: float_buffer(kind, model_kind),
            ints: int_buffer(kind, model_kind),
            memory: None,
        }
    }

    /// Action kind.
    pub fn kind(&self) -> UnitActionKind {
        self.kind
    }

    /// Model kind the parameters are laid out for.
    pub fn model_kind(&self) -> Option<ModelKind> {
        self.model_kind
    }

    /// Changes the model kind and resets every buffer to its new default
    /// layout.
    pub fn set_model_kind(&mut self, model_kind: Option<ModelKind>) {
        self.model_kind = model_kind;
        self.floats = float_buffer(self.kind, model_kind);
        self.ints = int_buffer(self.kind, model_kind);
        if self.memory.is_some() {
            self.memory = Some(self.fresh_memory());
        }
    }

    /// Float parameters.
    pub fn floats(&self) -> &[f32] {
        &self.floats
    }

    /// Integer parameters.
    pub fn ints(&self) -> &[i32] {
        &self.ints
    }

    /// Copies `params` over the float parameters; extra values on either
    /// side are ignored.
    pub fn set_transformation(&mut self, params: &[f32]) {
        for (dst, src) in self.floats.iter_mut().zip(params) {
            *dst = *src;
        }
    }

    /// Copies `params` over the integer parameters; extra values on either
    /// side are ignored.
    pub fn set_int_transformation(&mut self, params: &[i32]) {
        for (dst, src) in self.ints.iter_mut().zip(params) {
            *dst = *src;
        }
    }

    /// Whether the memory buffer exists.
    pub fn memory_enabled(&self) -> bool {
        self.memory.is_some()
    }

    /// Creates the memory buffer with default values, or drops it.
    pub fn set_memory_enabled(&mut self, enabled: bool) {
        self.memory = enabled.then(|| self.fresh_memory());
    }

    /// Memory buffer, if enabled.
    pub fn memory(&self) -> Option<&ActionMemory> {
        self.memory.as_ref()
    }

    /// Mutable memory buffer, if enabled.
    pub fn memory_mut(&mut self) -> Option<&mut ActionMemory> {
        self.memory.as_mut()
    }

    /// Copies the current parameters into the memory buffer. Returns `false`
    /// when memory is disabled.
    pub fn remember(&mut self) -> bool {
        match &mut self.memory {
            Some(memory) => {
                memory.floats.clone_from(&self.floats);
                memory.ints.clone_from(&self.ints);
                true
            }
            None => false,
        }
    }

    fn fresh_memory(&self) -> ActionMemory {
        ActionMemory {
            floats: float_buffer(self.kind, self.model_kind),
            ints: int_buffer(self.kind, self.model_kind),
        }
    }
}

fn float_buffer(kind: UnitActionKind, model_kind: Option<ModelKind>) -> Vec<f32> {
    match kind {
        UnitActionKind::Move | UnitActionKind::MovePoly3DSection => vec![0.0; 3],
        UnitActionKind::Rotate | UnitActionKind::RotatePoly3DSection => vec![0.0],
        UnitActionKind::Zoom => vec![1.0],
        UnitActionKind::Transform => {
            let len = match model_kind {
                Some(ModelKind::Plane3D) => 6,
                Some(ModelKind::Cylinder3D) => 11,
                Some(ModelKind::Tor3D) => 12,
                Some(ModelKind::Ellipse3D) => 10,
                Some(ModelKind::Poly3D) => 4,
                _ => 0,
            };
            vec![0.0; len]
        }
    }
}

fn int_buffer(kind: UnitActionKind, model_kind: Option<ModelKind>) -> Vec<i32> {
    match kind {
        UnitActionKind::Rotate | UnitActionKind::MovePoly3DSection => vec![0],
        UnitActionKind::RotatePoly3DSection => vec![0; 2],
        UnitActionKind::Move | UnitActionKind::Zoom => Vec::new(),
        UnitActionKind::Transform => {
            let len = match model_kind {
                Some(ModelKind::CellPlane3D) => 2,
                Some(ModelKind::Prism3D) => 3,
                _ => 0,
            };
            vec![0; len]
        }
    }
}

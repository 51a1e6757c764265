//! Candidate interpretations.

use serde::{Deserialize, Serialize};
use sig_types::{Grade, InterId, Rect, Shape, ShrinkRatios, StaffId};

/// Lifecycle status of an Inter. ABNORMAL is tracked separately as a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterStatus {
    Active,
    Removed,
}

/// Optional payload attached by the upstream classifier.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterAttributes {
    /// Pitch step relative to the staff (heads and alterations).
    pub pitch: Option<f64>,
    /// Pitch as measured on the image, before rounding.
    pub measured_pitch: Option<f64>,
    /// Staff governing the symbol.
    pub staff: Option<StaffId>,
    /// Alteration that belongs to a key signature rather than to a note.
    pub in_key: bool,
}

/// Input descriptor for one detected glyph interpretation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterDescriptor {
    pub shape: Shape,
    pub bounds: Rect,
    pub grade: Grade,
    #[serde(default)]
    pub attributes: InterAttributes,
}

impl InterDescriptor {
    pub fn new(shape: Shape, bounds: Rect, grade: Grade) -> Self {
        Self {
            shape,
            bounds,
            grade,
            attributes: InterAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: InterAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Pitch information carried by alterations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlterInfo {
    pub pitch: Option<f64>,
    pub measured_pitch: Option<f64>,
    pub staff: Option<StaffId>,
}

/// Kinds of composite interpretations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnsembleKind {
    /// Heads sharing a stem.
    Chord,
    /// Key alterations at the start of a staff.
    KeySignature,
}

impl EnsembleKind {
    pub fn min_members(&self) -> usize {
        1
    }

    pub fn max_members(&self) -> Option<usize> {
        match self {
            Self::Chord => None,
            Self::KeySignature => Some(7),
        }
    }

    /// Whether an Inter of this kind may be a member.
    pub fn accepts(&self, member: &InterKind) -> bool {
        match self {
            Self::Chord => matches!(member, InterKind::Head { .. }),
            Self::KeySignature => matches!(member, InterKind::KeyAlter(_)),
        }
    }
}

/// Shape variant with its subtype payload.
///
/// Every shape-specific behavior (abnormal rules, relation validation,
/// editing constraints) dispatches on this closed set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InterKind {
    Head { pitch: Option<i32> },
    Stem,
    Alter(AlterInfo),
    KeyAlter(AlterInfo),
    Dot,
    Ornament,
    Mark,
    Ensemble(EnsembleKind),
}

impl InterKind {
    pub fn from_descriptor(shape: Shape, attributes: &InterAttributes) -> Self {
        let alter = || AlterInfo {
            pitch: attributes.pitch,
            measured_pitch: attributes.measured_pitch,
            staff: attributes.staff,
        };

        match shape {
            Shape::NoteheadBlack | Shape::NoteheadVoid | Shape::WholeNote | Shape::BreveNote => {
                InterKind::Head {
                    pitch: attributes.pitch.map(|p| p.round() as i32),
                }
            }
            Shape::Stem => InterKind::Stem,
            Shape::Sharp | Shape::Flat | Shape::Natural | Shape::DoubleSharp | Shape::DoubleFlat => {
                if attributes.in_key {
                    InterKind::KeyAlter(alter())
                } else {
                    InterKind::Alter(alter())
                }
            }
            Shape::AugmentationDot => InterKind::Dot,
            Shape::Trill | Shape::Mordent | Shape::Turn => InterKind::Ornament,
            Shape::Fermata | Shape::Accent | Shape::Staccato => InterKind::Mark,
            Shape::Chord => InterKind::Ensemble(EnsembleKind::Chord),
            Shape::KeySignature => InterKind::Ensemble(EnsembleKind::KeySignature),
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, Self::Head { .. })
    }

    pub fn ensemble(&self) -> Option<EnsembleKind> {
        match self {
            Self::Ensemble(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn alter_info(&self) -> Option<&AlterInfo> {
        match self {
            Self::Alter(info) | Self::KeyAlter(info) => Some(info),
            _ => None,
        }
    }

    /// Key alterations only move horizontally along their staff.
    pub fn horizontal_only(&self) -> bool {
        matches!(self, Self::KeyAlter(_))
    }
}

/// A candidate interpretation owned by a SIG.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inter {
    id: InterId,
    shape: Shape,
    kind: InterKind,
    bounds: Rect,
    grade: Grade,
    contextual: Option<Grade>,
    status: InterStatus,
    abnormal: bool,
}

impl Inter {
    pub(crate) fn new(id: InterId, descriptor: &InterDescriptor) -> Self {
        Self {
            id,
            shape: descriptor.shape,
            kind: InterKind::from_descriptor(descriptor.shape, &descriptor.attributes),
            bounds: descriptor.bounds,
            grade: descriptor.grade,
            contextual: None,
            status: InterStatus::Active,
            abnormal: false,
        }
    }

    pub fn id(&self) -> InterId {
        self.id
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn kind(&self) -> &InterKind {
        &self.kind
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds shrunk about their center, used for overlap detection.
    pub fn core_bounds(&self, ratios: &ShrinkRatios) -> Rect {
        self.bounds.shrink(ratios)
    }

    /// Intrinsic grade as assigned by the classifier.
    pub fn grade(&self) -> Grade {
        self.grade
    }

    /// Last computed contextual grade, `None` when invalidated.
    pub fn contextual_grade(&self) -> Option<Grade> {
        self.contextual
    }

    pub fn status(&self) -> InterStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == InterStatus::Active
    }

    pub fn is_removed(&self) -> bool {
        self.status == InterStatus::Removed
    }

    pub fn is_abnormal(&self) -> bool {
        self.abnormal
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub(crate) fn set_grade(&mut self, grade: Grade) {
        self.grade = grade;
        self.contextual = None;
    }

    pub(crate) fn set_contextual(&mut self, grade: Grade) {
        self.contextual = Some(grade);
    }

    pub(crate) fn invalidate(&mut self) {
        self.contextual = None;
    }

    pub(crate) fn set_status(&mut self, status: InterStatus) {
        self.status = status;
        self.contextual = None;
        if status == InterStatus::Removed {
            self.abnormal = false;
        }
    }

    pub(crate) fn set_abnormal(&mut self, abnormal: bool) {
        self.abnormal = abnormal;
    }
}

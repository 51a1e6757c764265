//! Closed catalog of recognized shapes.
//!
//! Declaration order matters: it is the tie-break order used when two
//! conflicting interpretations end up with exactly the same contextual grade.
//! Primary notation comes first, then ornaments, then stylistic marks.
//! Ensembles never compete and come last.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Coarse shape family, in decreasing tie-break priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShapeCategory {
    /// Heads, stems, alterations, augmentation dots.
    Primary,
    /// Trills, mordents, turns.
    Ornamental,
    /// Fermatas, accents, staccato marks.
    Stylistic,
    /// Composite interpretations (chords, key signatures).
    Ensemble,
}

/// Family of an alteration sign, used for key-signature compatibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlterFamily {
    Sharp,
    Flat,
    Natural,
}

/// Shape tag of an interpretation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    // Primary
    NoteheadBlack,
    NoteheadVoid,
    WholeNote,
    BreveNote,
    Stem,
    Sharp,
    Flat,
    Natural,
    DoubleSharp,
    DoubleFlat,
    AugmentationDot,
    // Ornamental
    Trill,
    Mordent,
    Turn,
    // Stylistic
    Fermata,
    Accent,
    Staccato,
    // Ensembles
    Chord,
    KeySignature,
}

impl Shape {
    pub const ALL: [Shape; 19] = [
        Shape::NoteheadBlack,
        Shape::NoteheadVoid,
        Shape::WholeNote,
        Shape::BreveNote,
        Shape::Stem,
        Shape::Sharp,
        Shape::Flat,
        Shape::Natural,
        Shape::DoubleSharp,
        Shape::DoubleFlat,
        Shape::AugmentationDot,
        Shape::Trill,
        Shape::Mordent,
        Shape::Turn,
        Shape::Fermata,
        Shape::Accent,
        Shape::Staccato,
        Shape::Chord,
        Shape::KeySignature,
    ];

    pub fn category(&self) -> ShapeCategory {
        match self {
            Self::NoteheadBlack
            | Self::NoteheadVoid
            | Self::WholeNote
            | Self::BreveNote
            | Self::Stem
            | Self::Sharp
            | Self::Flat
            | Self::Natural
            | Self::DoubleSharp
            | Self::DoubleFlat
            | Self::AugmentationDot => ShapeCategory::Primary,
            Self::Trill | Self::Mordent | Self::Turn => ShapeCategory::Ornamental,
            Self::Fermata | Self::Accent | Self::Staccato => ShapeCategory::Stylistic,
            Self::Chord | Self::KeySignature => ShapeCategory::Ensemble,
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(
            self,
            Self::NoteheadBlack | Self::NoteheadVoid | Self::WholeNote | Self::BreveNote
        )
    }

    /// Whether the duration this head stands for needs a stem.
    pub fn requires_stem(&self) -> bool {
        matches!(self, Self::NoteheadBlack | Self::NoteheadVoid)
    }

    pub fn alter_family(&self) -> Option<AlterFamily> {
        match self {
            Self::Sharp | Self::DoubleSharp => Some(AlterFamily::Sharp),
            Self::Flat | Self::DoubleFlat => Some(AlterFamily::Flat),
            Self::Natural => Some(AlterFamily::Natural),
            _ => None,
        }
    }

    pub fn is_alteration(&self) -> bool {
        self.alter_family().is_some()
    }

    pub fn is_ensemble(&self) -> bool {
        self.category() == ShapeCategory::Ensemble
    }

    /// Tie-break comparison: `Less` means `self` has the higher priority.
    pub fn priority_cmp(&self, other: &Shape) -> Ordering {
        self.category()
            .cmp(&other.category())
            .then_with(|| self.cmp(other))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoteheadBlack => "notehead-black",
            Self::NoteheadVoid => "notehead-void",
            Self::WholeNote => "whole-note",
            Self::BreveNote => "breve-note",
            Self::Stem => "stem",
            Self::Sharp => "sharp",
            Self::Flat => "flat",
            Self::Natural => "natural",
            Self::DoubleSharp => "double-sharp",
            Self::DoubleFlat => "double-flat",
            Self::AugmentationDot => "augmentation-dot",
            Self::Trill => "trill",
            Self::Mordent => "mordent",
            Self::Turn => "turn",
            Self::Fermata => "fermata",
            Self::Accent => "accent",
            Self::Staccato => "staccato",
            Self::Chord => "chord",
            Self::KeySignature => "key-signature",
        };
        write!(f, "{}", name)
    }
}

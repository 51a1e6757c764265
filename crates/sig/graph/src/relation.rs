//! Relation catalog: typed edges between two Inters.

use serde::{Deserialize, Serialize};
use sig_types::{InterId, SupportWeights};
use std::fmt;

use crate::error::{GraphError, GraphResult};
use crate::inter::{Inter, InterKind};

/// Flavors of mutual support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportKind {
    /// A stem attached to a head. Symmetric.
    HeadStem,
    /// An accidental governing the head it precedes. Symmetric.
    AlterHead,
    /// An augmentation dot lengthening a head. The head is boosted.
    DotHead,
    /// Any other support from source to target.
    Generic,
}

impl SupportKind {
    /// Symmetric supports boost both ends; directional ones boost the target.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::HeadStem | Self::AlterHead)
    }

    pub fn default_weight(&self, weights: &SupportWeights) -> f64 {
        match self {
            Self::HeadStem => weights.head_stem,
            Self::AlterHead => weights.alter_head,
            Self::DotHead => weights.dot_head,
            Self::Generic => weights.generic,
        }
    }

    fn accepts(&self, source: &InterKind, target: &InterKind) -> bool {
        match self {
            Self::HeadStem => {
                (source.is_head() && matches!(target, InterKind::Stem))
                    || (matches!(source, InterKind::Stem) && target.is_head())
            }
            Self::AlterHead => {
                (matches!(source, InterKind::Alter(_)) && target.is_head())
                    || (source.is_head() && matches!(target, InterKind::Alter(_)))
            }
            Self::DotHead => matches!(source, InterKind::Dot) && target.is_head(),
            Self::Generic => source.ensemble().is_none() && target.ensemble().is_none(),
        }
    }
}

/// A weighted support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Support {
    pub kind: SupportKind,
    pub weight: f64,
}

impl Support {
    /// Support using the configured weight for its kind.
    pub fn new(kind: SupportKind, weights: &SupportWeights) -> Self {
        Self {
            kind,
            weight: kind.default_weight(weights),
        }
    }

    pub fn with_weight(kind: SupportKind, weight: f64) -> Self {
        Self { kind, weight }
    }
}

/// A typed edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Relation {
    Support(Support),
    /// Mutually incompatible claims on the same evidence.
    Exclusion,
    /// Source ensemble owns target member.
    Containment,
}

/// Discriminant of a [`Relation`], for lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Support,
    Exclusion,
    Containment,
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Support => write!(f, "support"),
            Self::Exclusion => write!(f, "exclusion"),
            Self::Containment => write!(f, "containment"),
        }
    }
}

impl Relation {
    pub fn support(kind: SupportKind, weights: &SupportWeights) -> Self {
        Relation::Support(Support::new(kind, weights))
    }

    pub fn relation_type(&self) -> RelationType {
        match self {
            Self::Support(_) => RelationType::Support,
            Self::Exclusion => RelationType::Exclusion,
            Self::Containment => RelationType::Containment,
        }
    }

    /// Whether `(a, b)` and `(b, a)` denote the same relation.
    pub fn is_symmetric(&self) -> bool {
        match self {
            Self::Support(support) => support.kind.is_symmetric(),
            Self::Exclusion => true,
            Self::Containment => false,
        }
    }

    pub fn as_support(&self) -> Option<&Support> {
        match self {
            Self::Support(support) => Some(support),
            _ => None,
        }
    }

    /// Type-level validation of a candidate edge.
    pub(crate) fn validate(&self, source: &Inter, target: &Inter) -> GraphResult<()> {
        let ok = match self {
            Self::Support(support) => {
                if !support.weight.is_finite() || support.weight < 0.0 {
                    return Err(GraphError::InvalidWeight(support.weight));
                }
                support.kind.accepts(source.kind(), target.kind())
            }
            Self::Exclusion => {
                source.kind().ensemble().is_none() && target.kind().ensemble().is_none()
            }
            Self::Containment => match source.kind().ensemble() {
                Some(ensemble) => ensemble.accepts(target.kind()),
                None => false,
            },
        };

        if ok {
            Ok(())
        } else {
            Err(GraphError::InvalidEndpoints {
                relation: self.relation_type(),
                source_shape: source.shape(),
                target_shape: target.shape(),
            })
        }
    }
}

/// An edge as seen from outside the graph.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationRef {
    pub source: InterId,
    pub target: InterId,
    pub relation: Relation,
}

impl RelationRef {
    /// The endpoint that is not `id`.
    pub fn other(&self, id: InterId) -> InterId {
        if self.source == id {
            self.target
        } else {
            self.source
        }
    }

    pub fn involves(&self, id: InterId) -> bool {
        self.source == id || self.target == id
    }

    /// Whether `id` receives grade support from this edge.
    pub fn supports(&self, id: InterId) -> bool {
        match &self.relation {
            Relation::Support(support) => {
                self.target == id || (support.kind.is_symmetric() && self.source == id)
            }
            _ => false,
        }
    }
}

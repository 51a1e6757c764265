//! Contextual grade model.
//!
//! Every support edge for which an Inter is a supported end contributes a
//! ratio `1 + weight * partner_grade`, where `partner_grade` is the intrinsic
//! grade of the other end. With `R` the product of those ratios and `g` the
//! intrinsic grade, the contextual grade is
//!
//! ```text
//! g * R / (1 + g * (R - 1))
//! ```
//!
//! which stays in `[0, 1]`, equals `g` without support and never decreases
//! when support is added.

use sig_types::{Grade, InterId};

use crate::error::GraphResult;
use crate::graph::SIGraph;
use crate::relation::RelationType;

/// Combine an intrinsic grade with support ratios.
pub fn combine<I>(intrinsic: Grade, ratios: I) -> Grade
where
    I: IntoIterator<Item = f64>,
{
    let g = intrinsic.value();
    let r: f64 = ratios.into_iter().product();
    if r <= 1.0 || g <= 0.0 {
        return intrinsic;
    }
    // Same expression divided through by R, finite even when R overflows.
    Grade::clamped(g / (g + (1.0 - g) / r))
}

/// Support ratio contributed by a partner of the given intrinsic grade.
pub fn support_ratio(weight: f64, partner: Grade) -> f64 {
    1.0 + weight * partner.value()
}

/// Compute the contextual grade of an Inter from its current supports.
pub fn contextual_grade(sig: &SIGraph, id: InterId) -> GraphResult<Grade> {
    let inter = sig.inter(id)?;
    let mut ratios = Vec::new();
    for rel in sig.relations_of_type(id, RelationType::Support) {
        if !rel.supports(id) {
            continue;
        }
        if let Some(support) = rel.relation.as_support() {
            let partner = sig.inter(rel.other(id))?;
            ratios.push(support_ratio(support.weight, partner.grade()));
        }
    }
    Ok(combine(inter.grade(), ratios))
}

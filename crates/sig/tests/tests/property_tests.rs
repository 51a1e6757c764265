#[path = "property/reduction.rs"]
mod reduction;

#[path = "property/grade_monotonicity.rs"]
mod grade_monotonicity;

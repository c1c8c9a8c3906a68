use crate::vec2::Vec2;

/// Pull along a link. `delta` points from the `from` endpoint to the `to`
/// endpoint's position subtracted from it, i.e. `from - to`. The magnitude
/// grows past the rest length so stretched links tighten faster; it never
/// drops below one full unit, which biases the layout toward fast
/// convergence.
pub(super) fn attraction_force(delta: Vec2, link_length: f64, delta_ticks: f64) -> Vec2 {
    let compression = (delta.length() / link_length).max(1.0);
    delta.normalized() * (compression * delta_ticks)
}

/// Push between an unordered pair, applied from the perspective of the node
/// doing the pushing. Fades linearly to zero at `radius`; coincident nodes
/// produce no force because the zero vector normalizes to zero.
pub(super) fn repulsion_force(delta: Vec2, radius: f64, falloff: f64, delta_ticks: f64) -> Vec2 {
    let repulsion = ((radius - delta.length()) / falloff).max(0.0);
    delta.normalized() * (repulsion * delta_ticks)
}

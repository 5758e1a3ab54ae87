//! Closed-form one-dimensional kinematics.

/// Solves `a·t² + b·t + c = 0`.
///
/// Returns `None` when `a` is zero. The absolute value of the discriminant
/// is used, so a negative discriminant still yields a pair of real numbers.
/// These are not roots of the equation; they lean towards reporting a hazard
/// as reachable sooner than it is.
///
/// # Returns
/// The root on the `+√` branch followed by the root on the `−√` branch.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a == 0.0 {
        return None;
    }
    let sqrt_discr = (b * b - 4.0 * a * c).abs().sqrt();
    let denom = 2.0 * a;
    Some(((-b + sqrt_discr) / denom, (-b - sqrt_discr) / denom))
}

/// Calculates the time it would take a body to cover `dist` metres at a
/// constant acceleration, i.e. solves `dist = vel·t + ½·acc·t²` for `t`.
///
/// For an accelerating body this is the only non-negative crossing; for a
/// braking body it is the first arrival. Returns infinity if the body never
/// gets there: it is stationary, or both crossings lie in the past.
///
/// # Parameters
/// * `acc` - The acceleration in m/s<sup>2</sup>
/// * `vel` - The current velocity in m/s
/// * `dist` - The signed distance to the target in m
pub fn time_to_reach(acc: f64, vel: f64, dist: f64) -> f64 {
    match quadratic_roots(0.5 * acc, vel, -dist) {
        None if vel == 0.0 => f64::INFINITY,
        None => dist / vel,
        Some((t0, t1)) if t0 < 0.0 && t1 < 0.0 => f64::INFINITY,
        Some((t, _)) => t,
    }
}

/// The time it takes to brake from `vel` to a standstill, including the
/// delay before the brakes reach full deceleration.
///
/// # Parameters
/// * `vel` - The current velocity in m/s
/// * `dec` - The deceleration, a negative number in m/s<sup>2</sup>
/// * `delay` - The brake activation delay in s
pub fn time_to_stop(vel: f64, dec: f64, delay: f64) -> f64 {
    -vel / dec + delay
}

/// The distance covered while braking from `vel` to a standstill, assuming
/// the velocity is held constant until the brakes activate.
///
/// # Parameters
/// * `vel` - The current velocity in m/s
/// * `dec` - The deceleration, a negative number in m/s<sup>2</sup>
/// * `delay` - The brake activation delay in s
pub fn stopping_distance(vel: f64, dec: f64, delay: f64) -> f64 {
    vel * delay - 0.5 * vel * vel / dec
}

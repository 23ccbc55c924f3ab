//! Interpolation math shared by the interpolator variants:
//! - blend_f32 / lerp_into (component-wise linear blend)
//! - slerp_quat_into (spherical blend with shortest-arc sign correction)

/// Below this angle cosine the slerp weights are computed with trigonometry;
/// above it the quaternions are nearly parallel and a linear blend is used.
const SLERP_LINEAR_THRESHOLD: f32 = 0.9999;

/// Linear blend of two scalars: `a * (1 - t) + b * t`.
#[inline]
pub fn blend_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Component-wise linear blend of `from` and `to` into `out`.
/// `from` and `to` must hold at least `out.len()` components.
#[inline]
pub fn lerp_into(from: &[f32], to: &[f32], t: f32, out: &mut [f32]) {
    for ((o, a), b) in out.iter_mut().zip(from).zip(to) {
        *o = blend_f32(*a, *b, t);
    }
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn quat_at(v: &[f32]) -> [f32; 4] {
    [v[0], v[1], v[2], v[3]]
}

/// Weights `(k0, k1)` applied to the start and end quaternion.
#[inline]
fn slerp_weights(cos_omega: f32, t: f32) -> (f32, f32) {
    if cos_omega > SLERP_LINEAR_THRESHOLD {
        return (1.0 - t, t);
    }
    let cos = cos_omega as f64;
    let sin_omega = (1.0 - cos * cos).sqrt();
    let omega = sin_omega.atan2(cos);
    let inv_sin = sin_omega.recip();
    let t = t as f64;
    (
        (((1.0 - t) * omega).sin() * inv_sin) as f32,
        ((t * omega).sin() * inv_sin) as f32,
    )
}

/// Spherical linear interpolation of the quaternion stored in components 0..4
/// (x, y, z, w). If the dot product is negative the end quaternion is negated
/// so the shortest arc is taken. Components past index 3 are blended linearly.
///
/// `out` must hold at least 4 components; `from` and `to` at least `out.len()`.
pub fn slerp_quat_into(from: &[f32], to: &[f32], t: f32, out: &mut [f32]) {
    let a = quat_at(from);
    let mut b = quat_at(to);
    let mut cos_omega = dot4(a, b);
    if cos_omega < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
        cos_omega = -cos_omega;
    }
    let (k0, k1) = slerp_weights(cos_omega, t);
    for i in 0..4 {
        out[i] = a[i] * k0 + b[i] * k1;
    }
    lerp_into(&from[4..], &to[4..], t, &mut out[4..]);
}

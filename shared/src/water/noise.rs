//! 3D simplex gradient noise.
//!
//! This is the permutation-polynomial formulation commonly used in WebGL
//! shaders, so `water.wgsl` evaluates exactly the same function on the GPU.
//! The kernel is `max(0.5 - r², 0)^4`, which is C² across simplex borders, and
//! the result is clamped to `[-1, 1]`.

use bevy::math::{Vec3, Vec4};

const C_X: f32 = 1.0 / 6.0;
const C_Y: f32 = 1.0 / 3.0;
/// 1/7, spreads the 49 gradient directions over the octahedron
const N_: f32 = 0.142_857_15;
const KERNEL_RADIUS_SQ: f32 = 0.5;
const OUTPUT_SCALE: f32 = 105.0;

/// Deterministic, stateless scalar noise field over R³.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseField;

impl NoiseField {
    pub const fn new() -> Self {
        Self
    }

    /// Noise value at `(x, y, z)`, always within `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        simplex3(Vec3::new(x, y, z)).clamp(-1.0, 1.0)
    }
}

#[inline(always)]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline(always)]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline(always)]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

#[inline(always)]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

/// GLSL `step(edge, x)`.
#[inline(always)]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

fn simplex3(v: Vec3) -> f32 {
    // Skew to find the containing simplex cell
    let i = (v + Vec3::splat((v.x + v.y + v.z) * C_Y)).floor();
    let x0 = v - i + Vec3::splat((i.x + i.y + i.z) * C_X);

    // Rank the coordinates to pick the traversal order of the corners
    let g = Vec3::new(step(x0.y, x0.x), step(x0.z, x0.y), step(x0.x, x0.z));
    let l = Vec3::ONE - g;
    let i1 = Vec3::new(g.x.min(l.z), g.y.min(l.x), g.z.min(l.y));
    let i2 = Vec3::new(g.x.max(l.z), g.y.max(l.x), g.z.max(l.y));

    let x1 = x0 - i1 + Vec3::splat(C_X);
    let x2 = x0 - i2 + Vec3::splat(C_Y);
    let x3 = x0 - Vec3::splat(0.5);

    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients on a 7x7 grid folded onto an octahedron
    let ns = Vec3::new(2.0 * N_, 0.5 * N_ - 1.0, N_);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -Vec4::new(
        step(h.x, 0.0),
        step(h.y, 0.0),
        step(h.z, 0.0),
        step(h.w, 0.0),
    );

    // b0.xzyw + s0.xzyw * sh.xxyy, likewise for the second half
    let a0 = Vec4::new(b0.x, b0.z, b0.y, b0.w)
        + Vec4::new(s0.x, s0.z, s0.y, s0.w) * Vec4::new(sh.x, sh.x, sh.y, sh.y);
    let a1 = Vec4::new(b1.x, b1.z, b1.y, b1.w)
        + Vec4::new(s1.x, s1.z, s1.y, s1.w) * Vec4::new(sh.z, sh.z, sh.w, sh.w);

    let p0 = Vec3::new(a0.x, a0.y, h.x);
    let p1 = Vec3::new(a0.z, a0.w, h.y);
    let p2 = Vec3::new(a1.x, a1.y, h.z);
    let p3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    let p0 = p0 * norm.x;
    let p1 = p1 * norm.y;
    let p2 = p2 * norm.z;
    let p3 = p3 * norm.w;

    let m = (Vec4::splat(KERNEL_RADIUS_SQ)
        - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
    .max(Vec4::ZERO);
    let m2 = m * m;
    let m4 = m2 * m2;

    OUTPUT_SCALE * m4.dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

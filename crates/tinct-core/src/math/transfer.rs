//! Nonlinear transfer functions
//!
//! The pixel kernel works in f32; everything here matches that. Negative
//! inputs are clamped to zero before any power function is applied.

/// SMPTE ST.2084 (PQ) constants
pub const PQ_C1: f32 = 0.8359375; // 3424 / 4096
pub const PQ_C2: f32 = 18.8515625; // 2413 / 4096 * 32
pub const PQ_C3: f32 = 18.6875; // 2392 / 4096 * 32
pub const PQ_M1: f32 = 0.1593017578125; // 2610 / 4096 / 4
pub const PQ_M2: f32 = 78.84375; // 2523 / 4096 * 128

/// ST.2084 Equation 4.1: signal N in [0,1] to linear light in [0,1]
/// (1.0 = 10,000 cd/m²).
///
/// L = ( max(N^(1/m2) - c1, 0) / (c2 - c3*N^(1/m2)) )^(1/m1)
#[inline]
pub fn pq_eotf(n: f32) -> f32 {
    let n1m2 = n.powf(1.0 / PQ_M2);
    let num = (n1m2 - PQ_C1).max(0.0);
    let den = PQ_C2 - PQ_C3 * n1m2;
    (num / den).powf(1.0 / PQ_M1)
}

/// ST.2084 Equation 5.2: linear light in [0,1] to signal in [0,1].
///
/// N = ( (c1 + c2*L^m1) / (1 + c3*L^m1) )^m2
#[inline]
pub fn pq_oetf(l: f32) -> f32 {
    let lm1 = l.powf(PQ_M1);
    ((PQ_C1 + PQ_C2 * lm1) / (1.0 + PQ_C3 * lm1)).powf(PQ_M2)
}

/// ARIB STD-B67 (HLG) constants
pub const HLG_A: f32 = 0.178_832_77;
pub const HLG_B: f32 = 0.284_668_92;
pub const HLG_C: f32 = 0.559_910_73;

/// HLG OETF: scene-linear light in [0,1] to signal in [0,1]
#[inline]
pub fn hlg_oetf(e: f32) -> f32 {
    if e <= 1.0 / 12.0 {
        (3.0 * e).sqrt()
    } else {
        HLG_A * (12.0 * e - HLG_B).ln() + HLG_C
    }
}

/// HLG inverse OETF: signal in [0,1] back to scene-linear light in [0,1]
#[inline]
pub fn hlg_eotf(s: f32) -> f32 {
    if s <= 0.5 {
        (s * s) / 3.0
    } else {
        (((s - HLG_C) / HLG_A).exp() + HLG_B) / 12.0
    }
}

/// Clamped power: max(v, 0)^exponent. Serves both gamma decode (exponent
/// = γ) and gamma encode (exponent = 1/γ).
#[inline]
pub fn gamma_apply(v: f32, exponent: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(exponent) }
}

//! Math for color management
//!
//! - 3×3 matrix operations for RGB↔XYZ derivation and composition
//! - Bradford chromatic adaptation
//! - Nonlinear transfer functions (gamma, PQ, HLG)

pub mod chromatic_adaptation;
pub mod matrix;
pub mod transfer;

pub use chromatic_adaptation::bradford_adaptation;
pub use matrix::Matrix3x3;

//! NCLX color descriptors
//!
//! AVIF/HEIF containers can describe color with a compact `colr` box of
//! ITU-T H.273 code points instead of a full ICC blob. This module maps
//! between those descriptors and profiles. Mapping a profile back to NCLX
//! is lossy by design: when it fails, callers keep the ICC blob.

use log::warn;

use crate::error::{Error, Result};
use crate::primaries::{BT709, BT2020, Curve, CurveKind, P3, Primaries};
use crate::profile::{Profile, generate_description};

// Colour primaries (H.273 Table 2)
pub const CP_BT709: u16 = 1;
pub const CP_UNSPECIFIED: u16 = 2;
pub const CP_BT2020: u16 = 9;
pub const CP_SMPTE432: u16 = 12;

// Transfer characteristics (H.273 Table 3)
pub const TC_UNSPECIFIED: u16 = 2;
pub const TC_GAMMA22: u16 = 4;
pub const TC_GAMMA28: u16 = 5;
pub const TC_SRGB: u16 = 13;
pub const TC_PQ: u16 = 16;
pub const TC_HLG: u16 = 18;

// Matrix coefficients (H.273 Table 4)
pub const MC_BT709: u16 = 1;
pub const MC_UNSPECIFIED: u16 = 2;
pub const MC_BT2020_NCL: u16 = 9;
pub const MC_CHROMA_DERIVED_NCL: u16 = 12;

/// An NCLX `colr` descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nclx {
    pub colour_primaries: u16,
    pub transfer_characteristics: u16,
    pub matrix_coefficients: u16,
    pub full_range: bool,
}

/// Primaries for a known colour_primaries code point
pub fn primaries_for(colour_primaries: u16) -> Option<Primaries> {
    match colour_primaries {
        CP_BT709 => Some(BT709),
        CP_BT2020 => Some(BT2020),
        CP_SMPTE432 => Some(P3),
        _ => None,
    }
}

/// Match primaries against the known code points, within 1e-3 on every
/// xy coordinate
pub fn find_primaries(primaries: &Primaries) -> Option<(u16, &'static str)> {
    const TABLE: [(u16, &str, Primaries); 3] = [
        (CP_BT709, "BT.709", BT709),
        (CP_BT2020, "BT.2020", BT2020),
        (CP_SMPTE432, "P3", P3),
    ];
    TABLE
        .iter()
        .find(|(_, _, known)| primaries.approx_eq(known, 1e-3))
        .map(|&(code, name, _)| (code, name))
}

impl Nclx {
    /// Synthesize a profile carrying this descriptor's semantics.
    /// Unsupported code points degrade to BT.709 / gamma 2.2 with a
    /// warning, matching how image pipelines treat unknown `colr` boxes.
    pub fn to_profile(&self) -> Result<Profile> {
        let primaries = match primaries_for(self.colour_primaries) {
            Some(p) => p,
            None => {
                warn!(
                    "unsupported colour_primaries {}, using BT.709",
                    self.colour_primaries
                );
                BT709
            }
        };

        let (curve, max_luminance) = match self.transfer_characteristics {
            TC_HLG => (Curve::hlg(), 0),
            TC_PQ => (Curve::pq(), 10000),
            TC_GAMMA22 => (Curve::gamma(2.2), 0),
            TC_GAMMA28 => (Curve::gamma(2.8), 0),
            other => {
                warn!("unsupported transfer_characteristics {other}, using gamma 2.2");
                (Curve::gamma(2.2), 0)
            }
        };

        let description = generate_description(&primaries, &curve, max_luminance);
        Profile::create(&primaries, &curve, max_luminance, &description)
    }

    /// Express a profile as NCLX, or report why it cannot be
    pub fn from_profile(profile: &Profile) -> Result<Self> {
        let query = profile.query()?;

        let (colour_primaries, _name) = find_primaries(&query.primaries)
            .ok_or(Error::NclxUnrepresentable("primaries match no code point"))?;

        let matrix_coefficients = match colour_primaries {
            CP_BT709 => MC_BT709,
            CP_BT2020 => MC_BT2020_NCL,
            _ => MC_CHROMA_DERIVED_NCL,
        };

        let transfer_characteristics = if query.curve.kind == CurveKind::Pq
            && query.luminance == 10000
        {
            TC_PQ
        } else {
            if query.luminance != 0 {
                // Only PQ implies a luminance; anything else cannot carry
                // one through NCLX.
                return Err(Error::NclxUnrepresentable("explicit luminance without PQ"));
            }
            match query.curve.kind {
                CurveKind::Hlg => TC_HLG,
                CurveKind::Gamma if (query.curve.gamma - 2.2).abs() < 1e-3 => TC_GAMMA22,
                CurveKind::Gamma if (query.curve.gamma - 2.8).abs() < 1e-3 => TC_GAMMA28,
                _ => return Err(Error::NclxUnrepresentable("transfer curve has no code point")),
            }
        };

        Ok(Self {
            colour_primaries,
            transfer_characteristics,
            matrix_coefficients,
            full_range: true,
        })
    }
}

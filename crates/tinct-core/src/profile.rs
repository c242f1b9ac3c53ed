//! Color profiles
//!
//! A `Profile` owns an in-memory ICC tag set and a description string.
//! Profiles come from four places: parsing a packed blob, synthesis from
//! primaries + curve + luminance, cloning, or the linear derivation of an
//! existing profile. `query` recovers those semantics from any profile,
//! including ones that only describe their gamut through an A2B0 LUT.

use log::debug;

use crate::color::{D50, Xyz};
use crate::error::{Error, Result};
use crate::icc::tags::{self, Cicp, MluTag, TrcTag};
use crate::icc::{IccProfile, TagSignature};
use crate::math::{Matrix3x3, bradford_adaptation};
use crate::nclx;
use crate::primaries::{BT709, BT2020, Curve, CurveKind, P3, Primaries};
use crate::raw::Raw;

/// The semantics `query` recovers from a profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileQuery {
    pub primaries: Primaries,
    pub curve: Curve,
    /// Peak luminance in cd/m²; 0 when the profile does not say
    pub luminance: u32,
}

/// Built-in profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockProfile {
    /// BT.709 primaries, gamma 2.4, 300 cd/m²
    Srgb,
    /// Display P3 primaries, gamma 2.4, 300 cd/m²
    P3,
    /// BT.2020 primaries, PQ, 10,000 cd/m²
    Bt2020Pq,
}

/// An ICC color profile with a human-readable description
#[derive(Debug, Clone)]
pub struct Profile {
    icc: IccProfile,
    description: String,
}

impl Profile {
    /// Parse a packed ICC blob. When `description` is `None`, the embedded
    /// `desc` text is used, falling back to `"Unknown"`.
    pub fn parse(bytes: &[u8], description: Option<&str>) -> Result<Self> {
        let icc = IccProfile::parse(bytes)?;
        let description = match description {
            Some(d) => d.to_string(),
            None => icc
                .mlu_tag(TagSignature::DESC)
                .and_then(|mlu| mlu.get("en", "US").map(str::to_string))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
        };
        Ok(Self { icc, description })
    }

    /// Build a display-class matrix/TRC profile. Colorants are written
    /// D50-relative with a Bradford `chad` tag, so `query` recovers the
    /// input primaries exactly (within fixed-point quantization).
    pub fn create(
        primaries: &Primaries,
        curve: &Curve,
        max_luminance: u32,
        description: &str,
    ) -> Result<Self> {
        let to_xyz = primaries.to_xyz_matrix()?;
        let white = primaries.white_xyz();
        let chad = bradford_adaptation(white, D50);
        let colorants = chad.multiply(&to_xyz);

        let mut icc = IccProfile::new_display_rgb();
        icc.set_tag(TagSignature::MEDIA_WHITE, tags::encode_xyz(D50));
        icc.set_tag(TagSignature::CHAD, tags::encode_sf32_matrix(&chad));
        icc.set_tag(
            TagSignature::RED_COLORANT,
            tags::encode_xyz(Xyz::from_array(colorants.column(0))),
        );
        icc.set_tag(
            TagSignature::GREEN_COLORANT,
            tags::encode_xyz(Xyz::from_array(colorants.column(1))),
        );
        icc.set_tag(
            TagSignature::BLUE_COLORANT,
            tags::encode_xyz(Xyz::from_array(colorants.column(2))),
        );

        let gamma = match curve.kind {
            CurveKind::Gamma | CurveKind::Complex if curve.gamma > 0.0 => curve.gamma as f64,
            CurveKind::Pq | CurveKind::Hlg => 1.0,
            _ => 1.0,
        };
        let trc = TrcTag::encode_gamma(gamma);
        icc.set_tag(TagSignature::RED_TRC, trc.clone());
        icc.set_tag(TagSignature::GREEN_TRC, trc.clone());
        icc.set_tag(TagSignature::BLUE_TRC, trc);

        // PQ and HLG have no parametric curve form; signal them with cicp
        if matches!(curve.kind, CurveKind::Pq | CurveKind::Hlg) {
            let colour_primaries = nclx::find_primaries(primaries)
                .map(|(cp, _)| cp as u8)
                .unwrap_or(nclx::CP_UNSPECIFIED as u8);
            let transfer = match curve.kind {
                CurveKind::Pq => nclx::TC_PQ as u8,
                _ => nclx::TC_HLG as u8,
            };
            icc.set_tag(
                TagSignature::CICP,
                Cicp {
                    colour_primaries,
                    transfer_characteristics: transfer,
                    matrix_coefficients: 0,
                    full_range: true,
                }
                .encode(),
            );
        }

        if max_luminance > 0 {
            icc.set_tag(
                TagSignature::LUMINANCE,
                tags::encode_xyz(Xyz::new(0.0, max_luminance as f64, 0.0)),
            );
        }

        let mut profile = Self {
            icc,
            description: description.to_string(),
        };
        profile.set_mlu("desc", "en", "US", description)?;
        Ok(profile)
    }

    /// One of the built-in profiles
    pub fn create_stock(stock: StockProfile) -> Result<Self> {
        match stock {
            StockProfile::Srgb => Self::create(&BT709, &Curve::gamma(2.4), 300, "SRGB"),
            StockProfile::P3 => Self::create(&P3, &Curve::gamma(2.4), 300, "P3"),
            StockProfile::Bt2020Pq => {
                Self::create(&BT2020, &Curve::pq(), 10000, "BT2020 PQ")
            }
        }
    }

    /// Clone through a pack/parse round trip, preserving the description
    pub fn try_clone(&self) -> Result<Self> {
        Self::parse(&self.icc.serialize(), Some(&self.description))
    }

    /// The linear-light (gamma 1.0) sibling of this profile
    pub fn linear(&self) -> Result<Self> {
        let query = self.query()?;
        let description = format!("{} (Linear)", self.description);
        Self::create(
            &query.primaries,
            &Curve::gamma(1.0),
            query.luminance,
            &description,
        )
    }

    /// Recover primaries, curve, and luminance
    pub fn query(&self) -> Result<ProfileQuery> {
        Ok(ProfileQuery {
            primaries: self.query_primaries()?,
            curve: self.query_curve(),
            luminance: self.query_luminance(),
        })
    }

    fn query_primaries(&self) -> Result<Primaries> {
        let icc = &self.icc;
        let white = icc
            .xyz_tag(TagSignature::MEDIA_WHITE)
            .ok_or(Error::MissingWhitePoint)?;

        let red = icc.xyz_tag(TagSignature::RED_COLORANT);
        let green = icc.xyz_tag(TagSignature::GREEN_COLORANT);
        let blue = icc.xyz_tag(TagSignature::BLUE_COLORANT);

        let tmp_colorants = match (red, green, blue) {
            (Some(r), Some(g), Some(b)) => {
                Matrix3x3::from_columns(r.to_array(), g.to_array(), b.to_array())
            }
            _ => {
                // No colorant tags; try to harvest them from the raw A2B0
                // matrix instead.
                let harvested = icc
                    .tag(TagSignature::A2B0)
                    .and_then(tags::a2b_matrix)
                    .ok_or(Error::MissingColorants)?;
                debug!("recovered colorants from A2B0 matrix");
                harvested
            }
        };

        let explicit_chad = icc.chad_matrix();
        let is_v2 = icc.header.encoded_version() < 0x0400_0000;

        // Pre-v4 profiles without an explicit chad tag behave as if one
        // had been synthesized toward D50.
        let chad = explicit_chad.or_else(|| {
            if is_v2 {
                Some(bradford_adaptation(white, D50))
            } else {
                None
            }
        });

        let (colorants, adapted_white) = match chad.and_then(|c| c.inverse().map(|inv| (c, inv)))
        {
            Some((_, inv_chad)) => {
                let colorants = inv_chad.multiply(&tmp_colorants);
                let adapted_white = if is_v2 && explicit_chad.is_none() {
                    // Old profile, no real chad tag: honor wtpt untouched
                    white
                } else {
                    Xyz::from_array(inv_chad.multiply_vec(white.to_array()))
                };
                (colorants, adapted_white)
            }
            None => (tmp_colorants, white),
        };

        let xy = |col: [f64; 3]| {
            let (x, y, _) = Xyz::from_array(col).to_xyy();
            [x as f32, y as f32]
        };
        let (wx, wy, _) = adapted_white.to_xyy();

        Ok(Primaries {
            red: xy(colorants.column(0)),
            green: xy(colorants.column(1)),
            blue: xy(colorants.column(2)),
            white: [wx as f32, wy as f32],
        })
    }

    fn query_curve(&self) -> Curve {
        let icc = &self.icc;
        let mut curve = match icc.trc_tag(TagSignature::RED_TRC) {
            Some(trc) => {
                let gamma = trc.estimate_gamma() as f32;
                if trc.is_pure_gamma() {
                    Curve::gamma(gamma)
                } else {
                    Curve {
                        kind: CurveKind::Complex,
                        gamma,
                        matrix_curve_scale: 0.0,
                    }
                }
            }
            None if icc.has_tag(TagSignature::A2B0) => Curve {
                kind: CurveKind::Complex,
                gamma: -1.0,
                matrix_curve_scale: 0.0,
            },
            None => Curve::default(),
        };

        // cicp names PQ/HLG explicitly; it wins over the gamma-1 TRC such
        // profiles also carry.
        if let Some(cicp) = icc.cicp() {
            match cicp.transfer_characteristics as u16 {
                nclx::TC_PQ => curve.kind = CurveKind::Pq,
                nclx::TC_HLG => curve.kind = CurveKind::Hlg,
                _ => {}
            }
        }

        if let Some(scale) = icc
            .tag(TagSignature::A2B0)
            .and_then(tags::a2b_matrix_curve_scale)
        {
            curve.matrix_curve_scale = scale;
        }

        curve
    }

    fn query_luminance(&self) -> u32 {
        self.icc
            .xyz_tag(TagSignature::LUMINANCE)
            .map(|lumi| lumi.y as u32)
            .unwrap_or(0)
    }

    /// Serialize into `out`. The buffer is resized to fit.
    pub fn pack(&self, out: &mut Raw) -> Result<()> {
        out.set_from(&self.icc.serialize());
        Ok(())
    }

    /// Serialized size in bytes
    pub fn size(&self) -> usize {
        self.icc.serialize().len()
    }

    /// The packed ICC bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        self.icc.serialize()
    }

    /// Replace the tag set with the result of packing and reparsing it
    pub fn reload(&mut self) -> Result<()> {
        let fresh = Self::parse(&self.icc.serialize(), Some(&self.description))?;
        self.icc = fresh.icc;
        Ok(())
    }

    /// Write a localized ASCII string tag (e.g. `"desc"`, `"cprt"`)
    pub fn set_mlu(&mut self, tag: &str, language: &str, country: &str, text: &str) -> Result<()> {
        let sig = TagSignature::from_name(tag).ok_or_else(|| {
            Error::Icc(crate::icc::IccError::CorruptedData(format!(
                "not a tag name: {tag:?}"
            )))
        })?;
        self.icc
            .set_tag(sig, MluTag::single(language, country, text).encode());
        Ok(())
    }

    /// Read a localized string tag
    pub fn get_mlu(&self, tag: &str, language: &str, country: &str) -> Option<String> {
        let sig = TagSignature::from_name(tag)?;
        self.icc
            .mlu_tag(sig)
            .and_then(|mlu| mlu.get(language, country).map(str::to_string))
    }

    /// Overwrite the tone curves with a pure gamma; green and blue link to
    /// the red curve.
    pub fn set_gamma(&mut self, gamma: f32) {
        let trc = TrcTag::encode_gamma(gamma as f64);
        self.icc.set_tag(TagSignature::RED_TRC, trc.clone());
        self.icc.set_tag(TagSignature::GREEN_TRC, trc.clone());
        self.icc.set_tag(TagSignature::BLUE_TRC, trc);
    }

    /// Overwrite the peak luminance tag (cd/m²)
    pub fn set_luminance(&mut self, luminance: u32) {
        self.icc.set_tag(
            TagSignature::LUMINANCE,
            tags::encode_xyz(Xyz::new(0.0, luminance as f64, 0.0)),
        );
    }

    /// Two profiles match when they are the same object or pack to
    /// identical bytes. Matching profiles reformat instead of transforming.
    pub fn matches(&self, other: &Profile) -> bool {
        std::ptr::eq(self, other) || self.icc.serialize() == other.icc.serialize()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The underlying ICC tag set
    pub fn icc(&self) -> &IccProfile {
        &self.icc
    }
}

/// Compact description for synthesized profiles, e.g. `"Tinct P0.64 2.4g 300nits"`
pub fn generate_description(primaries: &Primaries, curve: &Curve, max_luminance: u32) -> String {
    format!(
        "Tinct P{} {}g {}nits",
        primaries.red[0], curve.gamma, max_luminance
    )
}

//! ICC profile header
//!
//! The header is exactly 128 bytes. See ICC.1:2022 Section 7.2.

use super::error::IccError;
use super::types::{DateTimeNumber, XyzNumber};
use crate::color::D50;

/// Profile file signature, 'acsp'
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Minimum valid profile size (header only)
pub const MIN_PROFILE_SIZE: usize = 128;

/// ICC profile header
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Total profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version
    pub version: ProfileVersion,
    /// Device class
    pub device_class: ProfileClass,
    /// Color space of device data
    pub color_space: ColorSpaceSignature,
    /// Profile connection space
    pub pcs: ColorSpaceSignature,
    /// Creation date
    pub creation_date: DateTimeNumber,
    /// Must be 'acsp'
    pub signature: u32,
    /// Primary platform signature
    pub platform: u32,
    /// Profile flags
    pub flags: u32,
    /// Device manufacturer
    pub manufacturer: u32,
    /// Device model
    pub model: u32,
    /// Device attributes
    pub attributes: u64,
    /// Rendering intent
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant (D50)
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// MD5 profile ID, or zero
    pub profile_id: [u8; 16],
}

impl IccHeader {
    /// Parse a header from the front of a profile
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < MIN_PROFILE_SIZE {
            return Err(IccError::TooSmall {
                expected: MIN_PROFILE_SIZE,
                actual: data.len(),
            });
        }

        let be32 = |o: usize| u32::from_be_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);

        let signature = be32(36);
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(signature));
        }

        let version = ProfileVersion {
            major: data[8],
            minor: data[9] >> 4,
            patch: data[9] & 0x0F,
        };

        let device_class = ProfileClass::from_u32(be32(12))?;
        let color_space = ColorSpaceSignature::from_u32(be32(16))?;
        let pcs = ColorSpaceSignature::from_u32(be32(20))?;
        let rendering_intent = RenderingIntent::from_u32(be32(64))?;

        let attributes = u64::from_be_bytes([
            data[56], data[57], data[58], data[59], data[60], data[61], data[62], data[63],
        ]);

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&data[84..100]);

        Ok(Self {
            size: be32(0),
            cmm_type: be32(4),
            version,
            device_class,
            color_space,
            pcs,
            creation_date: DateTimeNumber::from_bytes(&data[24..36]).unwrap_or_default(),
            signature,
            platform: be32(40),
            flags: be32(44),
            manufacturer: be32(48),
            model: be32(52),
            attributes,
            rendering_intent,
            illuminant: XyzNumber::from_bytes(&data[68..80]).unwrap_or_default(),
            creator: be32(80),
            profile_id,
        })
    }

    /// Cross-check the header against the actual byte count
    pub fn validate(&self, data_len: usize) -> Result<(), IccError> {
        if self.signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(self.signature));
        }
        if self.size as usize > data_len {
            return Err(IccError::SizeMismatch {
                header_size: self.size,
                actual_size: data_len,
            });
        }
        Ok(())
    }

    /// Serialize to the 128-byte wire layout. Bytes 100..128 are reserved
    /// and written as zero.
    pub fn serialize(&self) -> [u8; 128] {
        let mut out = [0u8; 128];
        out[0..4].copy_from_slice(&self.size.to_be_bytes());
        out[4..8].copy_from_slice(&self.cmm_type.to_be_bytes());
        out[8] = self.version.major;
        out[9] = (self.version.minor << 4) | (self.version.patch & 0x0F);
        out[12..16].copy_from_slice(&self.device_class.to_u32().to_be_bytes());
        out[16..20].copy_from_slice(&self.color_space.to_u32().to_be_bytes());
        out[20..24].copy_from_slice(&self.pcs.to_u32().to_be_bytes());
        out[24..36].copy_from_slice(&self.creation_date.to_bytes());
        out[36..40].copy_from_slice(&self.signature.to_be_bytes());
        out[40..44].copy_from_slice(&self.platform.to_be_bytes());
        out[44..48].copy_from_slice(&self.flags.to_be_bytes());
        out[48..52].copy_from_slice(&self.manufacturer.to_be_bytes());
        out[52..56].copy_from_slice(&self.model.to_be_bytes());
        out[56..64].copy_from_slice(&self.attributes.to_be_bytes());
        out[64..68].copy_from_slice(&self.rendering_intent.to_u32().to_be_bytes());
        out[68..80].copy_from_slice(&self.illuminant.to_bytes());
        out[80..84].copy_from_slice(&self.creator.to_be_bytes());
        out[84..100].copy_from_slice(&self.profile_id);
        out
    }

    /// Version as the raw big-endian header word, for the v2-vs-v4 checks
    /// (`encoded_version() < 0x0400_0000` means pre-v4).
    pub fn encoded_version(&self) -> u32 {
        u32::from_be_bytes([
            self.version.major,
            (self.version.minor << 4) | (self.version.patch & 0x0F),
            0,
            0,
        ])
    }

    /// A fresh display-class RGB header the profile builder starts from
    pub fn new_display_rgb() -> Self {
        Self {
            size: 0,
            cmm_type: 0,
            version: ProfileVersion {
                major: 4,
                minor: 4,
                patch: 0,
            },
            device_class: ProfileClass::Display,
            color_space: ColorSpaceSignature::Rgb,
            pcs: ColorSpaceSignature::Xyz,
            creation_date: DateTimeNumber::default(),
            signature: PROFILE_SIGNATURE,
            platform: 0,
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: RenderingIntent::Perceptual,
            illuminant: XyzNumber::from_xyz(D50),
            creator: 0,
            profile_id: [0; 16],
        }
    }
}

/// ICC profile version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    pub fn is_v4(&self) -> bool {
        self.major >= 4
    }
}

/// ICC device class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileClass {
    Input,
    Display,
    Output,
    DeviceLink,
    ColorSpace,
    Abstract,
    NamedColor,
}

impl ProfileClass {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match &val.to_be_bytes() {
            b"scnr" => Ok(Self::Input),
            b"mntr" => Ok(Self::Display),
            b"prtr" => Ok(Self::Output),
            b"link" => Ok(Self::DeviceLink),
            b"spac" => Ok(Self::ColorSpace),
            b"abst" => Ok(Self::Abstract),
            b"nmcl" => Ok(Self::NamedColor),
            _ => Err(IccError::InvalidProfileClass(val)),
        }
    }

    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(match self {
            Self::Input => *b"scnr",
            Self::Display => *b"mntr",
            Self::Output => *b"prtr",
            Self::DeviceLink => *b"link",
            Self::ColorSpace => *b"spac",
            Self::Abstract => *b"abst",
            Self::NamedColor => *b"nmcl",
        })
    }
}

/// Color space signatures a color core encounters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpaceSignature {
    Xyz,
    Lab,
    Rgb,
    Gray,
    Cmyk,
    YCbCr,
}

impl ColorSpaceSignature {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match &val.to_be_bytes() {
            b"XYZ " => Ok(Self::Xyz),
            b"Lab " => Ok(Self::Lab),
            b"RGB " => Ok(Self::Rgb),
            b"GRAY" => Ok(Self::Gray),
            b"CMYK" => Ok(Self::Cmyk),
            b"YCbr" => Ok(Self::YCbCr),
            _ => Err(IccError::InvalidColorSpace(val)),
        }
    }

    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(match self {
            Self::Xyz => *b"XYZ ",
            Self::Lab => *b"Lab ",
            Self::Rgb => *b"RGB ",
            Self::Gray => *b"GRAY",
            Self::Cmyk => *b"CMYK",
            Self::YCbCr => *b"YCbr",
        })
    }

    pub fn channels(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Cmyk => 4,
            _ => 3,
        }
    }
}

/// ICC rendering intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderingIntent {
    #[default]
    Perceptual,
    RelativeColorimetric,
    Saturation,
    AbsoluteColorimetric,
}

impl RenderingIntent {
    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        match val {
            0 => Ok(Self::Perceptual),
            1 => Ok(Self::RelativeColorimetric),
            2 => Ok(Self::Saturation),
            3 => Ok(Self::AbsoluteColorimetric),
            _ => Err(IccError::InvalidRenderingIntent(val)),
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            Self::Perceptual => 0,
            Self::RelativeColorimetric => 1,
            Self::Saturation => 2,
            Self::AbsoluteColorimetric => 3,
        }
    }
}

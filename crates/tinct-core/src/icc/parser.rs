//! ICC profile container
//!
//! `IccProfile` is the in-memory tag set: the parsed header plus each
//! tag's raw bytes in table order. Typed reads parse on demand and treat
//! damaged tags as absent; mutation replaces a tag's blob wholesale.

use super::error::IccError;
use super::header::{IccHeader, MIN_PROFILE_SIZE};
use super::tags::{self, Cicp, MluTag, TrcTag};
use super::types::TagSignature;
use crate::color::Xyz;
use crate::math::Matrix3x3;

/// An ICC profile as a bag of raw tags
#[derive(Debug, Clone, PartialEq)]
pub struct IccProfile {
    /// Parsed 128-byte header
    pub header: IccHeader,
    /// Tags in table order; data includes the 8-byte type header
    tags: Vec<TagEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TagEntry {
    pub sig: u32,
    pub data: Vec<u8>,
}

impl IccProfile {
    /// Parse a profile from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        let header = IccHeader::parse(data)?;
        header.validate(data.len())?;

        if data.len() < MIN_PROFILE_SIZE + 4 {
            return Err(IccError::TooSmall {
                expected: MIN_PROFILE_SIZE + 4,
                actual: data.len(),
            });
        }
        let tag_count = u32::from_be_bytes([data[128], data[129], data[130], data[131]]) as usize;

        let table_start = 132;
        let entry_size = 12;
        let required = table_start + tag_count * entry_size;
        if data.len() < required {
            return Err(IccError::TooSmall {
                expected: required,
                actual: data.len(),
            });
        }

        let mut tags = Vec::with_capacity(tag_count);
        for i in 0..tag_count {
            let o = table_start + i * entry_size;
            let sig = u32::from_be_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
            let offset =
                u32::from_be_bytes([data[o + 4], data[o + 5], data[o + 6], data[o + 7]]);
            let size =
                u32::from_be_bytes([data[o + 8], data[o + 9], data[o + 10], data[o + 11]]);

            let end = offset as usize + size as usize;
            if end > data.len() {
                return Err(IccError::TagOutOfBounds {
                    tag: sig,
                    offset,
                    size,
                    profile_size: data.len(),
                });
            }
            tags.push(TagEntry {
                sig,
                data: data[offset as usize..end].to_vec(),
            });
        }

        Ok(Self { header, tags })
    }

    /// An empty display-class RGB profile ready for tag insertion
    pub fn new_display_rgb() -> Self {
        Self {
            header: IccHeader::new_display_rgb(),
            tags: Vec::new(),
        }
    }

    pub(crate) fn entries(&self) -> &[TagEntry] {
        &self.tags
    }

    /// Raw bytes of a tag, including its 8-byte type header
    pub fn tag(&self, sig: TagSignature) -> Option<&[u8]> {
        self.tags
            .iter()
            .find(|t| t.sig == sig.0)
            .map(|t| t.data.as_slice())
    }

    pub fn has_tag(&self, sig: TagSignature) -> bool {
        self.tags.iter().any(|t| t.sig == sig.0)
    }

    /// Replace a tag's data, or append the tag if it is not present yet
    pub fn set_tag(&mut self, sig: TagSignature, data: Vec<u8>) {
        if let Some(entry) = self.tags.iter_mut().find(|t| t.sig == sig.0) {
            entry.data = data;
        } else {
            self.tags.push(TagEntry { sig: sig.0, data });
        }
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    // ---- typed reads ----

    /// First XYZ value of an 'XYZ ' tag
    pub fn xyz_tag(&self, sig: TagSignature) -> Option<Xyz> {
        self.tag(sig).and_then(tags::parse_xyz)
    }

    /// A 'curv' or 'para' tone curve
    pub fn trc_tag(&self, sig: TagSignature) -> Option<TrcTag> {
        self.tag(sig).and_then(TrcTag::parse)
    }

    /// The chromatic adaptation matrix from the 'chad' tag
    pub fn chad_matrix(&self) -> Option<Matrix3x3> {
        self.tag(TagSignature::CHAD)
            .and_then(tags::parse_sf32_matrix)
    }

    /// A localized text tag ('mluc', 'desc', or 'text')
    pub fn mlu_tag(&self, sig: TagSignature) -> Option<MluTag> {
        self.tag(sig).and_then(MluTag::parse)
    }

    /// Coding-independent code points, when present
    pub fn cicp(&self) -> Option<Cicp> {
        self.tag(TagSignature::CICP).and_then(Cicp::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::tags::encode_xyz;

    fn minimal_profile_bytes() -> Vec<u8> {
        let profile = IccProfile::new_display_rgb();
        profile.serialize()
    }

    #[test]
    fn test_parse_minimal() {
        let bytes = minimal_profile_bytes();
        let profile = IccProfile::parse(&bytes).unwrap();
        assert_eq!(profile.header.version.major, 4);
        assert_eq!(profile.tag_count(), 0);
    }

    #[test]
    fn test_too_small() {
        assert!(IccProfile::parse(&[0u8; 100]).is_err());
    }

    #[test]
    fn test_set_and_read_tag() {
        let mut profile = IccProfile::new_display_rgb();
        let white = Xyz::new(0.9642, 1.0, 0.8249);
        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(white));
        assert!(profile.has_tag(TagSignature::MEDIA_WHITE));
        let read = profile.xyz_tag(TagSignature::MEDIA_WHITE).unwrap();
        assert!(read.approx_eq(&white, 1e-4));
    }

    #[test]
    fn test_set_tag_replaces() {
        let mut profile = IccProfile::new_display_rgb();
        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(Xyz::new(1.0, 1.0, 1.0)));
        profile.set_tag(TagSignature::MEDIA_WHITE, encode_xyz(Xyz::new(0.5, 0.5, 0.5)));
        assert_eq!(profile.tag_count(), 1);
        let read = profile.xyz_tag(TagSignature::MEDIA_WHITE).unwrap();
        assert!(read.approx_eq(&Xyz::new(0.5, 0.5, 0.5), 1e-4));
    }

    #[test]
    fn test_tag_out_of_bounds() {
        let mut bytes = minimal_profile_bytes();
        // Claim one tag pointing past the end
        let len = bytes.len();
        bytes[128..132].copy_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(b"wtpt");
        bytes.extend_from_slice(&(len as u32 + 1000).to_be_bytes());
        bytes.extend_from_slice(&20u32.to_be_bytes());
        // Patch total size so the header check passes
        let total = bytes.len() as u32;
        bytes[0..4].copy_from_slice(&total.to_be_bytes());
        assert!(matches!(
            IccProfile::parse(&bytes),
            Err(IccError::TagOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_damaged_tag_reads_as_absent() {
        let mut profile = IccProfile::new_display_rgb();
        profile.set_tag(TagSignature::MEDIA_WHITE, b"XYZ \0\0\0\0".to_vec());
        assert!(profile.has_tag(TagSignature::MEDIA_WHITE));
        assert!(profile.xyz_tag(TagSignature::MEDIA_WHITE).is_none());
    }
}

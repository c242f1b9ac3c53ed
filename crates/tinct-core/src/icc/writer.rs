//! ICC profile serialization
//!
//! Layout is deterministic: header, tag table in stored order, then data
//! blocks aligned to 4 bytes. Tags with identical bytes share one block,
//! which is how linked curves (gTRC/bTRC pointing at rTRC's data) appear
//! on the wire. Serializing, reparsing, and serializing again yields
//! identical bytes.

use std::collections::HashMap;

use super::parser::IccProfile;

const HEADER_SIZE: usize = 128;
const TABLE_ENTRY_SIZE: usize = 12;

impl IccProfile {
    /// Serialize the profile to its wire format
    pub fn serialize(&self) -> Vec<u8> {
        let entries = self.entries();
        let table_start = HEADER_SIZE + 4;
        let data_start = table_start + entries.len() * TABLE_ENTRY_SIZE;

        // Lay out data blocks, sharing identical ones
        let mut blocks: Vec<u8> = Vec::new();
        let mut offsets: Vec<(u32, u32)> = Vec::with_capacity(entries.len());
        let mut seen: HashMap<&[u8], u32> = HashMap::new();

        for entry in entries {
            let offset = match seen.get(entry.data.as_slice()) {
                Some(&off) => off,
                None => {
                    while blocks.len() % 4 != 0 {
                        blocks.push(0);
                    }
                    let off = (data_start + blocks.len()) as u32;
                    blocks.extend_from_slice(&entry.data);
                    seen.insert(entry.data.as_slice(), off);
                    off
                }
            };
            offsets.push((offset, entry.data.len() as u32));
        }
        while blocks.len() % 4 != 0 {
            blocks.push(0);
        }

        let total = data_start + blocks.len();

        let mut header = self.header.clone();
        header.size = total as u32;

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&header.serialize());
        out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for (entry, &(offset, size)) in entries.iter().zip(&offsets) {
            out.extend_from_slice(&entry.sig.to_be_bytes());
            out.extend_from_slice(&offset.to_be_bytes());
            out.extend_from_slice(&size.to_be_bytes());
        }
        out.extend_from_slice(&blocks);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Xyz;
    use crate::icc::tags::{TrcTag, encode_xyz};
    use crate::icc::types::TagSignature;

    fn sample_profile() -> IccProfile {
        let mut profile = IccProfile::new_display_rgb();
        profile.set_tag(
            TagSignature::MEDIA_WHITE,
            encode_xyz(Xyz::new(0.9642, 1.0, 0.8249)),
        );
        profile.set_tag(TagSignature::RED_TRC, TrcTag::encode_gamma(2.4));
        profile.set_tag(TagSignature::GREEN_TRC, TrcTag::encode_gamma(2.4));
        profile.set_tag(TagSignature::BLUE_TRC, TrcTag::encode_gamma(2.4));
        profile
    }

    #[test]
    fn test_serialize_parse_serialize_is_stable() {
        let profile = sample_profile();
        let first = profile.serialize();
        let reparsed = IccProfile::parse(&first).unwrap();
        let second = reparsed.serialize();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_tags_share_data() {
        let profile = sample_profile();
        let bytes = profile.serialize();

        // rTRC/gTRC/bTRC all carry the same curve; their table entries
        // must point at one shared block.
        let offset_of = |sig: &[u8; 4]| -> u32 {
            let count =
                u32::from_be_bytes([bytes[128], bytes[129], bytes[130], bytes[131]]) as usize;
            for i in 0..count {
                let o = 132 + i * 12;
                if &bytes[o..o + 4] == sig {
                    return u32::from_be_bytes([
                        bytes[o + 4],
                        bytes[o + 5],
                        bytes[o + 6],
                        bytes[o + 7],
                    ]);
                }
            }
            panic!("tag not found");
        };
        let r = offset_of(b"rTRC");
        assert_eq!(r, offset_of(b"gTRC"));
        assert_eq!(r, offset_of(b"bTRC"));
    }

    #[test]
    fn test_header_size_matches_output() {
        let bytes = sample_profile().serialize();
        let declared = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
        assert_eq!(declared, bytes.len());
    }

    #[test]
    fn test_data_blocks_are_aligned() {
        let bytes = sample_profile().serialize();
        let count = u32::from_be_bytes([bytes[128], bytes[129], bytes[130], bytes[131]]) as usize;
        for i in 0..count {
            let o = 132 + i * 12;
            let offset =
                u32::from_be_bytes([bytes[o + 4], bytes[o + 5], bytes[o + 6], bytes[o + 7]]);
            assert_eq!(offset % 4, 0);
        }
    }
}

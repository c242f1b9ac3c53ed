//! Text tag types: 'mluc', 'desc', and 'text'
//!
//! v4 profiles carry multi-localized Unicode strings; v2 profiles use the
//! older description and plain-text layouts. We write 'mluc' and read all
//! three.

/// One localized record of an 'mluc' tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MluRecord {
    pub language: [u8; 2],
    pub country: [u8; 2],
    pub text: String,
}

/// A multi-localized Unicode tag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MluTag {
    pub records: Vec<MluRecord>,
}

impl MluTag {
    /// A single-record MLU, the shape this crate writes
    pub fn single(language: &str, country: &str, text: &str) -> Self {
        Self {
            records: vec![MluRecord {
                language: two_bytes(language),
                country: two_bytes(country),
                text: text.to_string(),
            }],
        }
    }

    /// Parse any of 'mluc', 'desc', or 'text'. The v2 layouts surface as a
    /// single record with an empty locale.
    pub fn parse(tag: &[u8]) -> Option<Self> {
        if tag.len() < 8 {
            return None;
        }
        match &tag[0..4] {
            b"mluc" => Self::parse_mluc(tag),
            b"desc" => Self::parse_desc(tag),
            b"text" => Self::parse_text(tag),
            _ => None,
        }
    }

    fn parse_mluc(tag: &[u8]) -> Option<Self> {
        if tag.len() < 16 {
            return None;
        }
        let record_count = u32::from_be_bytes([tag[8], tag[9], tag[10], tag[11]]) as usize;
        let record_size = u32::from_be_bytes([tag[12], tag[13], tag[14], tag[15]]) as usize;
        if record_size < 12 {
            return None;
        }

        let mut records = Vec::with_capacity(record_count);
        for i in 0..record_count {
            let o = 16 + i * record_size;
            if tag.len() < o + 12 {
                break;
            }
            let language = [tag[o], tag[o + 1]];
            let country = [tag[o + 2], tag[o + 3]];
            let len =
                u32::from_be_bytes([tag[o + 4], tag[o + 5], tag[o + 6], tag[o + 7]]) as usize;
            // String offset is relative to the start of the tag
            let off =
                u32::from_be_bytes([tag[o + 8], tag[o + 9], tag[o + 10], tag[o + 11]]) as usize;
            if off + len > tag.len() {
                continue;
            }
            if let Some(text) = decode_utf16be(&tag[off..off + len]) {
                records.push(MluRecord {
                    language,
                    country,
                    text,
                });
            }
        }

        Some(Self { records })
    }

    fn parse_desc(tag: &[u8]) -> Option<Self> {
        if tag.len() < 12 {
            return None;
        }
        let ascii_count = u32::from_be_bytes([tag[8], tag[9], tag[10], tag[11]]) as usize;
        if tag.len() < 12 + ascii_count {
            return None;
        }
        let text = ascii_until_nul(&tag[12..12 + ascii_count]);
        Some(Self {
            records: vec![MluRecord {
                language: [0; 2],
                country: [0; 2],
                text,
            }],
        })
    }

    fn parse_text(tag: &[u8]) -> Option<Self> {
        let text = ascii_until_nul(&tag[8..]);
        Some(Self {
            records: vec![MluRecord {
                language: [0; 2],
                country: [0; 2],
                text,
            }],
        })
    }

    /// Look up by locale; falls back to the first record
    pub fn get(&self, language: &str, country: &str) -> Option<&str> {
        let lang = two_bytes(language);
        let ctry = two_bytes(country);
        self.records
            .iter()
            .find(|r| r.language == lang && r.country == ctry)
            .or_else(|| self.records.first())
            .map(|r| r.text.as_str())
    }

    /// Encode as an 'mluc' tag
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"mluc");
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&(self.records.len() as u32).to_be_bytes());
        out.extend_from_slice(&12u32.to_be_bytes());

        // Record table first, then the UTF-16BE string pool
        let mut pool: Vec<u8> = Vec::new();
        let pool_base = 16 + self.records.len() * 12;
        for record in &self.records {
            let encoded: Vec<u8> = record
                .text
                .encode_utf16()
                .flat_map(|u| u.to_be_bytes())
                .collect();
            out.extend_from_slice(&record.language);
            out.extend_from_slice(&record.country);
            out.extend_from_slice(&(encoded.len() as u32).to_be_bytes());
            out.extend_from_slice(&((pool_base + pool.len()) as u32).to_be_bytes());
            pool.extend_from_slice(&encoded);
        }
        out.extend_from_slice(&pool);
        out
    }
}

fn two_bytes(s: &str) -> [u8; 2] {
    let bytes = s.as_bytes();
    [
        bytes.first().copied().unwrap_or(0),
        bytes.get(1).copied().unwrap_or(0),
    ]
}

fn ascii_until_nul(data: &[u8]) -> String {
    data.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| b as char)
        .collect()
}

fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&u| u != 0)
        .collect();
    String::from_utf16(&units).ok()
}

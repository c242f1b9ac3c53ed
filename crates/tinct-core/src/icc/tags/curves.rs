//! Tone reproduction curves: 'curv' and 'para' tag types
//!
//! See ICC.1:2022 Sections 10.6 (curv) and 10.18 (para).

use crate::icc::types::{S15Fixed16, U8Fixed8};

/// A parsed TRC tag
#[derive(Debug, Clone, PartialEq)]
pub enum TrcTag {
    /// 'curv' with count 0
    Identity,
    /// 'curv' with count 1: a u8Fixed8 gamma
    Gamma(f64),
    /// 'curv' lookup table of u16 samples
    Table(Vec<u16>),
    /// 'para' parametric curve, function types 0..=4
    Parametric { function: u16, params: [f64; 7] },
}

impl TrcTag {
    /// Parse a 'curv' or 'para' tag blob
    pub fn parse(tag: &[u8]) -> Option<Self> {
        if tag.len() < 8 {
            return None;
        }
        match &tag[0..4] {
            b"curv" => Self::parse_curv(&tag[8..]),
            b"para" => Self::parse_para(&tag[8..]),
            _ => None,
        }
    }

    fn parse_curv(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        let count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        match count {
            0 => Some(Self::Identity),
            1 => {
                if data.len() < 6 {
                    return None;
                }
                let gamma = U8Fixed8::from_be_bytes([data[4], data[5]]).to_f64();
                Some(Self::Gamma(gamma))
            }
            _ => {
                if data.len() < 4 + count * 2 {
                    return None;
                }
                let table = (0..count)
                    .map(|i| u16::from_be_bytes([data[4 + i * 2], data[5 + i * 2]]))
                    .collect();
                Some(Self::Table(table))
            }
        }
    }

    fn parse_para(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        let function = u16::from_be_bytes([data[0], data[1]]);
        if function > 4 {
            return None;
        }
        let count = match function {
            0 => 1,
            1 => 3,
            2 => 4,
            3 => 5,
            _ => 7,
        };
        if data.len() < 4 + count * 4 {
            return None;
        }
        let mut params = [0.0; 7];
        for (i, p) in params.iter_mut().take(count).enumerate() {
            let o = 4 + i * 4;
            *p = S15Fixed16::from_be_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]])
                .to_f64();
        }
        Some(Self::Parametric { function, params })
    }

    /// Encode a pure-gamma curve as a 'para' function type 0 tag.
    /// s15.16 keeps far more of the gamma's precision than 'curv''s u8.8.
    pub fn encode_gamma(gamma: f64) -> Vec<u8> {
        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(b"para");
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&0u16.to_be_bytes()); // function type 0
        out.extend_from_slice(&[0; 2]);
        out.extend_from_slice(&S15Fixed16::from_f64(gamma).to_be_bytes());
        out
    }

    /// True when the curve is a plain power function
    pub fn is_pure_gamma(&self) -> bool {
        matches!(
            self,
            Self::Identity | Self::Gamma(_) | Self::Parametric { function: 0, .. }
        )
    }

    /// Evaluate the curve (encoded → linear) at `x` in [0,1]
    pub fn eval(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        match self {
            Self::Identity => x,
            Self::Gamma(g) => x.powf(*g),
            Self::Table(table) => eval_table(table, x),
            Self::Parametric { function, params } => eval_parametric(*function, params, x),
        }
    }

    /// Best-fit exponent for the curve, the way a CMM summarizes an
    /// arbitrary TRC as a single gamma: average ln(y)/ln(x) over interior
    /// samples.
    pub fn estimate_gamma(&self) -> f64 {
        match self {
            Self::Identity => 1.0,
            Self::Gamma(g) => *g,
            Self::Parametric {
                function: 0,
                params,
            } => params[0],
            _ => {
                let mut sum = 0.0;
                let mut n = 0u32;
                for i in 1..32 {
                    let x = i as f64 / 32.0;
                    let y = self.eval(x);
                    if x > 0.01 && x < 0.99 && y > 0.001 && y < 0.999 {
                        sum += y.ln() / x.ln();
                        n += 1;
                    }
                }
                if n > 0 { sum / n as f64 } else { 1.0 }
            }
        }
    }
}

fn eval_table(table: &[u16], x: f64) -> f64 {
    if table.is_empty() {
        return x;
    }
    if table.len() == 1 {
        return table[0] as f64 / 65535.0;
    }
    let pos = x * (table.len() - 1) as f64;
    let idx = pos.floor() as usize;
    if idx >= table.len() - 1 {
        return table[table.len() - 1] as f64 / 65535.0;
    }
    let frac = pos - idx as f64;
    let v0 = table[idx] as f64;
    let v1 = table[idx + 1] as f64;
    (v0 + frac * (v1 - v0)) / 65535.0
}

fn eval_parametric(function: u16, p: &[f64; 7], x: f64) -> f64 {
    let (g, a, b, c, d, e, f) = (p[0], p[1], p[2], p[3], p[4], p[5], p[6]);
    let pow = |v: f64| v.max(0.0).powf(g);
    match function {
        // Y = X^g
        0 => x.powf(g),
        // Y = (aX + b)^g for X >= -b/a, else 0
        1 => {
            let threshold = if a.abs() > 1e-10 { -b / a } else { 0.0 };
            if x >= threshold { pow(a * x + b) } else { 0.0 }
        }
        // Y = (aX + b)^g + c for X >= -b/a, else c
        2 => {
            let threshold = if a.abs() > 1e-10 { -b / a } else { 0.0 };
            if x >= threshold { pow(a * x + b) + c } else { c }
        }
        // Y = (aX + b)^g for X >= d, else cX
        3 => {
            if x >= d {
                pow(a * x + b)
            } else {
                c * x
            }
        }
        // Y = (aX + b)^g + e for X >= d, else cX + f
        _ => {
            if x >= d {
                pow(a * x + b) + e
            } else {
                c * x + f
            }
        }
    }
}

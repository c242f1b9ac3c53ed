//! Color transforms
//!
//! A `Transform` pairs a source and destination profile with pixel
//! layouts, derives the composed linear RGB→RGB matrix through XYZ, and
//! runs the conversion over pixel buffers, fanning out across worker
//! tasks. Profiles are borrowed; a transform never outlives them.
//!
//! A `None` profile means the pixel stream is already CIE XYZ: the matrix
//! is identity and no transfer function applies on that side.

use log::debug;

use crate::context::Context;
use crate::convert::{self, ConvertJob};
use crate::error::{Error, Result};
use crate::math::Matrix3x3;
use crate::primaries::CurveKind;
use crate::profile::Profile;

/// Channel layout of a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// CIE XYZ float triples
    Xyz,
    /// R, G, B
    Rgb,
    /// R, G, B, A
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            Self::Rgba => 4,
            _ => 3,
        }
    }

    pub fn has_alpha(self) -> bool {
        self == Self::Rgba
    }

    /// Float samples: XYZ always, RGB/RGBA at depth 32
    pub fn is_float(self, depth: u32) -> bool {
        match self {
            Self::Xyz => true,
            Self::Rgb | Self::Rgba => depth == 32,
        }
    }

    /// Bytes per pixel for this layout at a given depth. Depths 9..=16
    /// pack into u16, depth 8 into u8, depth 32 into f32.
    pub fn bytes_per_pixel(self, depth: u32) -> usize {
        match self {
            Self::Xyz => 12,
            Self::Rgb => {
                if depth == 32 {
                    12
                } else if depth > 8 {
                    6
                } else {
                    3
                }
            }
            Self::Rgba => {
                if depth == 32 {
                    16
                } else if depth > 8 {
                    8
                } else {
                    4
                }
            }
        }
    }
}

/// Which nonlinearity a side of the transform applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transfer {
    /// Pass-through (XYZ stream)
    None,
    /// Power function
    Gamma,
    /// SMPTE ST.2084
    Pq,
    /// ARIB STD-B67
    Hlg,
}

/// Everything `run` needs, derived once by `prepare`
#[derive(Debug, Clone, Copy)]
pub(crate) struct Prepared {
    pub mat_src_to_dst: [[f32; 3]; 3],
    pub src_eotf: Transfer,
    pub src_gamma: f32,
    pub dst_oetf: Transfer,
    pub dst_inv_gamma: f32,
    /// Matching profiles skip the color math and only reformat
    pub profiles_match: bool,
}

/// A pixel transform between two profiles
pub struct Transform<'a> {
    src_profile: Option<&'a Profile>,
    dst_profile: Option<&'a Profile>,
    src_format: PixelFormat,
    src_depth: u32,
    dst_format: PixelFormat,
    dst_depth: u32,
    prepared: Option<Prepared>,
    #[cfg(feature = "lcms2")]
    engine: Option<crate::engine::EngineTransform>,
}

impl<'a> Transform<'a> {
    pub fn new(
        src_profile: Option<&'a Profile>,
        src_format: PixelFormat,
        src_depth: u32,
        dst_profile: Option<&'a Profile>,
        dst_format: PixelFormat,
        dst_depth: u32,
    ) -> Self {
        Self {
            src_profile,
            dst_profile,
            src_format,
            src_depth,
            dst_format,
            dst_depth,
            prepared: None,
            #[cfg(feature = "lcms2")]
            engine: None,
        }
    }

    /// Derive the composed matrix and transfer selections. Idempotent;
    /// `run` calls it lazily.
    pub fn prepare(&mut self) -> Result<()> {
        if self.prepared.is_some() {
            return Ok(());
        }

        let (src_to_xyz, src_eotf, src_gamma) = derive_xyz_matrix_and_transfer(self.src_profile)?;
        let (dst_to_xyz, dst_oetf, dst_gamma) = derive_xyz_matrix_and_transfer(self.dst_profile)?;

        let dst_inv_gamma = if dst_oetf == Transfer::Gamma && dst_gamma != 0.0 {
            1.0 / dst_gamma
        } else {
            dst_gamma
        };

        let xyz_to_dst = dst_to_xyz.inverse().ok_or(Error::SingularMatrix)?;
        let mat_src_to_dst = xyz_to_dst.multiply(&src_to_xyz);

        let profiles_match = match (self.src_profile, self.dst_profile) {
            (None, None) => true,
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        self.prepared = Some(Prepared {
            mat_src_to_dst: mat_src_to_dst.to_f32(),
            src_eotf,
            src_gamma,
            dst_oetf,
            dst_inv_gamma,
            profiles_match,
        });
        Ok(())
    }

    /// Convert `pixel_count` pixels from `src` into `dst`, splitting the
    /// range across `ctx.jobs` workers. Returns only after every worker
    /// has finished.
    pub fn run(
        &mut self,
        ctx: &Context,
        src: &[u8],
        dst: &mut [u8],
        pixel_count: usize,
    ) -> Result<()> {
        let src_bpp = self.src_format.bytes_per_pixel(self.src_depth);
        let dst_bpp = self.dst_format.bytes_per_pixel(self.dst_depth);

        let need_src = pixel_count * src_bpp;
        if src.len() < need_src {
            return Err(Error::BufferSize {
                expected: need_src,
                actual: src.len(),
            });
        }
        let need_dst = pixel_count * dst_bpp;
        if dst.len() < need_dst {
            return Err(Error::BufferSize {
                expected: need_dst,
                actual: dst.len(),
            });
        }
        if pixel_count == 0 {
            return Ok(());
        }

        let use_external = !ctx.ccmm_allowed;
        if use_external && !cfg!(feature = "lcms2") {
            debug!("external engine not compiled in; using built-in path");
        }

        #[cfg(feature = "lcms2")]
        if use_external
            && self.src_format.is_float(self.src_depth)
            && self.dst_format.is_float(self.dst_depth)
        {
            if self.engine.is_none() {
                self.engine = Some(crate::engine::EngineTransform::new(
                    self.src_profile,
                    self.src_format,
                    self.src_depth,
                    self.dst_profile,
                    self.dst_format,
                    self.dst_depth,
                )?);
            }
            let inner = match &self.engine {
                Some(engine) => engine.inner(),
                None => unreachable!("engine was just created"),
            };
            run_sliced(
                ctx,
                &src[..need_src],
                src_bpp,
                &mut dst[..need_dst],
                dst_bpp,
                pixel_count,
                |s, d, _n| inner.transform_pixels(s, d),
            );
            return Ok(());
        }
        // Integer layouts always use the built-in converter

        self.prepare()?;
        let prepared = match self.prepared {
            Some(p) => p,
            None => unreachable!("prepare() populates the state"),
        };
        let job = ConvertJob {
            prepared,
            src_format: self.src_format,
            src_depth: self.src_depth,
            dst_format: self.dst_format,
            dst_depth: self.dst_depth,
        };
        run_sliced(
            ctx,
            &src[..need_src],
            src_bpp,
            &mut dst[..need_dst],
            dst_bpp,
            pixel_count,
            |s, d, n| convert::convert_slice(&job, s, d, n),
        );
        Ok(())
    }
}

/// Derive a profile's linear RGB→XYZ matrix and the transfer function its
/// pixels are encoded with. A missing profile means the stream is XYZ.
///
/// The matrix follows Hoffmann's derivation (docs-hoffmann.de §11.4)
/// through the query-returned chromaticities.
fn derive_xyz_matrix_and_transfer(
    profile: Option<&Profile>,
) -> Result<(Matrix3x3, Transfer, f32)> {
    let Some(profile) = profile else {
        return Ok((Matrix3x3::identity(), Transfer::None, 0.0));
    };

    let query = profile.query()?;
    let matrix = query.primaries.to_xyz_matrix()?;

    let (transfer, gamma) = match query.curve.kind {
        CurveKind::Pq => (Transfer::Pq, 0.0),
        CurveKind::Hlg => (Transfer::Hlg, 0.0),
        _ => {
            // Unknown or complex curves ride the gamma path with their
            // best-fit estimate; a non-positive estimate degrades to 1.0.
            let gamma = if query.curve.gamma > 0.0 {
                query.curve.gamma
            } else {
                1.0
            };
            (Transfer::Gamma, gamma)
        }
    };
    Ok((matrix, transfer, gamma))
}

/// Split `pixel_count` into contiguous per-task slices and dispatch.
/// The final task absorbs the remainder; a single task runs inline.
fn run_sliced<F>(
    ctx: &Context,
    src: &[u8],
    src_bpp: usize,
    dst: &mut [u8],
    dst_bpp: usize,
    pixel_count: usize,
    task: F,
) where
    F: Fn(&[u8], &mut [u8], usize) + Sync,
{
    let task_count = ctx.jobs.max(1).min(pixel_count);

    if task_count <= 1 {
        task(src, dst, pixel_count);
        return;
    }

    debug!("using {task_count} tasks for pixel transform");
    let per_task = pixel_count / task_count;

    rayon::scope(|scope| {
        let task = &task;
        let mut src_rest = src;
        let mut dst_rest = dst;
        for i in 0..task_count {
            let count = if i == task_count - 1 {
                pixel_count - per_task * (task_count - 1)
            } else {
                per_task
            };
            let (src_chunk, src_tail) = src_rest.split_at(count * src_bpp);
            let (dst_chunk, dst_tail) = dst_rest.split_at_mut(count * dst_bpp);
            src_rest = src_tail;
            dst_rest = dst_tail;
            scope.spawn(move |_| task(src_chunk, dst_chunk, count));
        }
    });
}

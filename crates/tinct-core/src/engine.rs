//! External CMM fallback (Little CMS)
//!
//! When a context forbids the built-in path, transforms route through
//! lcms2 over the packed profile bytes: absolute colorimetric intent,
//! alpha copied, optimization and the one-pixel cache disabled so a
//! single transform handle can serve concurrent workers over disjoint
//! slices. A synthetic XYZ profile stands in when one side of the
//! transform is null.
//!
//! Only float layouts are routed here; integer layouts always use the
//! built-in converter.

use lcms2::{DisallowCache, Flags, Intent, PixelFormat as LcmsFormat, ThreadContext};

use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::transform::PixelFormat;

pub(crate) type FloatTransform = lcms2::Transform<u8, u8, ThreadContext, DisallowCache>;

pub(crate) struct EngineTransform {
    transform: FloatTransform,
}

fn lcms_format(format: PixelFormat, depth: u32) -> Result<LcmsFormat> {
    if !format.is_float(depth) {
        return Err(Error::Engine("only float layouts are routed externally"));
    }
    Ok(match format {
        PixelFormat::Xyz => LcmsFormat::XYZ_FLT,
        PixelFormat::Rgb => LcmsFormat::RGB_FLT,
        PixelFormat::Rgba => LcmsFormat::RGBA_FLT,
    })
}

impl EngineTransform {
    pub fn new(
        src_profile: Option<&Profile>,
        src_format: PixelFormat,
        src_depth: u32,
        dst_profile: Option<&Profile>,
        dst_format: PixelFormat,
        dst_depth: u32,
    ) -> Result<Self> {
        let in_format = lcms_format(src_format, src_depth)?;
        let out_format = lcms_format(dst_format, dst_depth)?;

        let ctx = ThreadContext::new();
        let open = |profile: Option<&Profile>| -> Result<lcms2::Profile<ThreadContext>> {
            match profile {
                Some(p) => lcms2::Profile::new_icc_context(&ctx, &p.to_bytes())
                    .map_err(|_| Error::Engine("profile rejected by engine")),
                None => Ok(lcms2::Profile::new_xyz_context(&ctx)),
            }
        };
        let input = open(src_profile)?;
        let output = open(dst_profile)?;

        let flags = Flags::NO_CACHE | Flags::COPY_ALPHA | Flags::NO_OPTIMIZE;
        let transform = FloatTransform::new_flags_context(
            &ctx,
            &input,
            in_format,
            &output,
            out_format,
            Intent::AbsoluteColorimetric,
            flags,
        )
        .map_err(|_| Error::Engine("transform creation failed"))?;

        Ok(Self { transform })
    }

    pub fn inner(&self) -> &FloatTransform {
        &self.transform
    }
}

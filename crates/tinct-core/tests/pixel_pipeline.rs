//! End-to-end pixel pipeline scenarios
//!
//! Each test drives the public API the way a codec front-end would:
//! build profiles, construct a transform over buffer layouts, run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tinct_core::primaries::{BT709, BT2020, Curve};
use tinct_core::{Context, PixelFormat, Profile, StockProfile, Transform};

fn ctx_with_jobs(jobs: usize) -> Context {
    Context::new().with_jobs(jobs)
}

fn u16_pixels(dst: &[u8]) -> Vec<u16> {
    dst.chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn f32_pixels(dst: &[u8]) -> Vec<f32> {
    dst.chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[test]
fn srgb_gray_linearizes_to_float() {
    let srgb = Profile::create_stock(StockProfile::Srgb).unwrap();
    let linear = srgb.linear().unwrap();

    let mut transform = Transform::new(
        Some(&srgb),
        PixelFormat::Rgb,
        8,
        Some(&linear),
        PixelFormat::Rgb,
        32,
    );
    let src = [128u8, 128, 128];
    let mut dst = [0u8; 12];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 1)
        .unwrap();

    let expected = (128.0f32 / 255.0).powf(2.4);
    for v in f32_pixels(&dst) {
        assert!((v - expected).abs() < 1e-4, "linearized {v}, expected {expected}");
    }
}

#[test]
fn bt709_red_primary_into_bt2020() {
    let src_profile = Profile::create(&BT709, &Curve::gamma(2.4), 300, "BT.709").unwrap();
    let dst_profile = Profile::create(&BT2020, &Curve::gamma(2.4), 300, "BT.2020").unwrap();

    let mut transform = Transform::new(
        Some(&src_profile),
        PixelFormat::Rgb,
        10,
        Some(&dst_profile),
        PixelFormat::Rgb,
        10,
    );

    let mut src = [0u8; 6];
    src[0..2].copy_from_slice(&1023u16.to_ne_bytes());
    let mut dst = [0u8; 6];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 1)
        .unwrap();

    // The BT.709 red primary sits inside BT.2020: linear
    // (0.6275, 0.0691, 0.0164) re-encoded at gamma 2.4.
    let out = u16_pixels(&dst);
    let expected = [842u16, 336, 185];
    for (channel, (&got, &want)) in out.iter().zip(&expected).enumerate() {
        assert!(
            (got as i32 - want as i32).abs() <= 2,
            "channel {channel}: got {got}, expected ~{want}"
        );
    }
}

#[test]
fn bt709_white_and_black_are_preserved() {
    let src_profile = Profile::create(&BT709, &Curve::gamma(2.4), 300, "BT.709").unwrap();
    let dst_profile = Profile::create(&BT2020, &Curve::gamma(2.4), 300, "BT.2020").unwrap();

    let mut transform = Transform::new(
        Some(&src_profile),
        PixelFormat::Rgb,
        10,
        Some(&dst_profile),
        PixelFormat::Rgb,
        10,
    );

    let mut src = [0u8; 12];
    for i in 0..3 {
        src[i * 2..i * 2 + 2].copy_from_slice(&1023u16.to_ne_bytes());
    }
    let mut dst = [0u8; 12];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 2)
        .unwrap();

    assert_eq!(u16_pixels(&dst), vec![1023, 1023, 1023, 0, 0, 0]);
}

#[test]
fn pq_signal_decodes_to_linear_light() {
    let pq = Profile::create_stock(StockProfile::Bt2020Pq).unwrap();
    let linear = Profile::create(&BT2020, &Curve::gamma(1.0), 10000, "BT.2020 Linear").unwrap();

    let mut transform = Transform::new(
        Some(&pq),
        PixelFormat::Rgb,
        32,
        Some(&linear),
        PixelFormat::Rgb,
        32,
    );

    // SMPTE ST.2084 reference pair: signal 0.5081 is 1,000 cd/m², i.e.
    // 0.1 of full scale.
    let mut src = [0u8; 12];
    for i in 0..3 {
        src[i * 4..i * 4 + 4].copy_from_slice(&0.5081f32.to_ne_bytes());
    }
    let mut dst = [0u8; 12];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 1)
        .unwrap();

    for v in f32_pixels(&dst) {
        assert!((v - 0.1).abs() < 1e-3, "PQ decode produced {v}");
    }
}

#[test]
fn hlg_signal_decodes_to_linear_light() {
    let hlg = Profile::create(&BT2020, &Curve::hlg(), 1000, "BT.2020 HLG").unwrap();
    let linear = Profile::create(&BT2020, &Curve::gamma(1.0), 1000, "BT.2020 Linear").unwrap();

    let mut transform = Transform::new(
        Some(&hlg),
        PixelFormat::Rgb,
        32,
        Some(&linear),
        PixelFormat::Rgb,
        32,
    );

    // The HLG knee: signal 0.5 is scene-linear 1/12
    let mut src = [0u8; 12];
    for i in 0..3 {
        src[i * 4..i * 4 + 4].copy_from_slice(&0.5f32.to_ne_bytes());
    }
    let mut dst = [0u8; 12];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 1)
        .unwrap();

    for v in f32_pixels(&dst) {
        assert!((v - 1.0 / 12.0).abs() < 1e-4, "HLG decode produced {v}");
    }
}

#[test]
fn identity_reformat_rgba8_is_exact() {
    let profile = Profile::create_stock(StockProfile::Srgb).unwrap();
    let mut transform = Transform::new(
        Some(&profile),
        PixelFormat::Rgba,
        8,
        Some(&profile),
        PixelFormat::Rgba,
        8,
    );
    let src = [10u8, 20, 30, 40];
    let mut dst = [0u8; 4];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 1)
        .unwrap();
    assert_eq!(dst, src);
}

#[test]
fn matching_profile_rgb8_to_rgba16_depth12() {
    let profile = Profile::create_stock(StockProfile::Srgb).unwrap();
    let clone = profile.try_clone().unwrap();
    let mut transform = Transform::new(
        Some(&profile),
        PixelFormat::Rgb,
        8,
        Some(&clone),
        PixelFormat::Rgba,
        12,
    );
    let src = [255u8, 128, 0];
    let mut dst = [0u8; 8];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 1)
        .unwrap();

    // 128 rescales to 128 × 4095/255 = 2055.53 → 2056; alpha is opaque
    assert_eq!(u16_pixels(&dst), vec![4095, 2056, 0, 4095]);
}

#[test]
fn xyz_passthrough_without_profiles() {
    let mut transform = Transform::new(None, PixelFormat::Xyz, 32, None, PixelFormat::Xyz, 32);
    let mut src = [0u8; 24];
    for (i, v) in [0.9642f32, 1.0, 0.8249, 0.25, 0.5, 0.75].iter().enumerate() {
        src[i * 4..i * 4 + 4].copy_from_slice(&v.to_ne_bytes());
    }
    let mut dst = [0u8; 24];
    transform
        .run(&ctx_with_jobs(1), &src, &mut dst, 2)
        .unwrap();
    assert_eq!(src, dst);
}

#[test]
fn worker_count_does_not_change_output() {
    let _ = env_logger::builder().is_test(true).try_init();

    let src_profile = Profile::create_stock(StockProfile::Srgb).unwrap();
    let dst_profile = Profile::create_stock(StockProfile::Bt2020Pq).unwrap();

    let pixels = 10_007; // odd count leaves a remainder slice
    let mut rng = ChaCha8Rng::seed_from_u64(0x1cc);
    let mut src = vec![0u8; pixels * 4];
    rng.fill(&mut src[..]);

    let mut transform = Transform::new(
        Some(&src_profile),
        PixelFormat::Rgba,
        8,
        Some(&dst_profile),
        PixelFormat::Rgba,
        12,
    );

    let mut serial = vec![0u8; pixels * 8];
    transform
        .run(&ctx_with_jobs(1), &src, &mut serial, pixels)
        .unwrap();

    for jobs in [2, 3, 7, 16] {
        let mut parallel = vec![0u8; pixels * 8];
        transform
            .run(&ctx_with_jobs(jobs), &src, &mut parallel, pixels)
            .unwrap();
        assert_eq!(serial, parallel, "output diverged at {jobs} workers");
    }
}

#[test]
fn repeated_runs_after_one_prepare_are_stable() {
    let src_profile = Profile::create_stock(StockProfile::Srgb).unwrap();
    let dst_profile = Profile::create(&BT2020, &Curve::gamma(2.4), 300, "BT.2020").unwrap();
    let mut transform = Transform::new(
        Some(&src_profile),
        PixelFormat::Rgb,
        8,
        Some(&dst_profile),
        PixelFormat::Rgb,
        8,
    );
    transform.prepare().unwrap();

    let src = [200u8, 100, 50, 1, 2, 3];
    let mut first = [0u8; 6];
    let mut second = [0u8; 6];
    let ctx = ctx_with_jobs(2);
    transform.run(&ctx, &src, &mut first, 2).unwrap();
    transform.run(&ctx, &src, &mut second, 2).unwrap();
    assert_eq!(first, second);
}

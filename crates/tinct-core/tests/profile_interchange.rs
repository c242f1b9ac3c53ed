//! Profile interchange flows
//!
//! Exercises the paths a container codec drives: pack a profile into a
//! byte blob, hand the blob around, reopen it, and negotiate NCLX
//! against it.

use tinct_core::primaries::{BT2020, Curve, CurveKind};
use tinct_core::{Nclx, Profile, Raw, StockProfile, nclx};

#[test]
fn packed_profile_survives_the_wire() {
    let original = Profile::create_stock(StockProfile::Srgb).unwrap();

    let mut wire = Raw::new();
    original.pack(&mut wire).unwrap();
    assert_eq!(wire.len(), original.size());

    let reopened = Profile::parse(&wire, None).unwrap();
    assert_eq!(reopened.description(), "SRGB");

    // Semantic tags are byte-stable across pack → parse → pack
    let mut repacked = Raw::new();
    reopened.pack(&mut repacked).unwrap();
    assert_eq!(&wire[..], &repacked[..]);

    let query = reopened.query().unwrap();
    assert_eq!(query.curve.kind, CurveKind::Gamma);
    assert_eq!(query.luminance, 300);
}

#[test]
fn hdr_profile_negotiates_nclx_instead_of_icc() {
    // A PQ BT.2020 image can drop the ICC blob entirely
    let profile = Profile::create_stock(StockProfile::Bt2020Pq).unwrap();
    let descriptor = Nclx::from_profile(&profile).unwrap();
    assert_eq!(descriptor.colour_primaries, nclx::CP_BT2020);
    assert_eq!(descriptor.transfer_characteristics, nclx::TC_PQ);
    assert_eq!(descriptor.matrix_coefficients, nclx::MC_BT2020_NCL);
    assert!(descriptor.full_range);

    // And the receiving side reconstructs an equivalent profile
    let rebuilt = descriptor.to_profile().unwrap();
    let query = rebuilt.query().unwrap();
    assert_eq!(query.curve.kind, CurveKind::Pq);
    assert_eq!(query.luminance, 10000);
    assert!(query.primaries.approx_eq(&BT2020, 1e-4));
}

#[test]
fn sdr_profile_with_luminance_keeps_icc() {
    // Gamma 2.4 at 300 nits has no NCLX expression; the codec falls back
    // to embedding the blob.
    let profile = Profile::create_stock(StockProfile::Srgb).unwrap();
    assert!(Nclx::from_profile(&profile).is_err());
    assert!(Profile::parse(&profile.to_bytes(), None).is_ok());
}

#[test]
fn reload_round_trips_mutations() {
    let mut profile = Profile::create(&BT2020, &Curve::gamma(2.2), 100, "HDR Display").unwrap();
    profile.set_luminance(4000);
    profile.set_gamma(2.6);
    profile
        .set_mlu("cprt", "en", "US", "No rights reserved")
        .unwrap();
    profile.reload().unwrap();

    let query = profile.query().unwrap();
    assert_eq!(query.luminance, 4000);
    assert!((query.curve.gamma - 2.6).abs() < 1e-4);
    assert_eq!(
        profile.get_mlu("cprt", "en", "US").as_deref(),
        Some("No rights reserved")
    );
    assert_eq!(profile.description(), "HDR Display");
}

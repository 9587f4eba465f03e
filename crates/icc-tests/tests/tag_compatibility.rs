//! Exhaustive (tag signature, type signature) compatibility checks
//!
//! For every pair the table marks illegal, the factory must produce
//! nothing - validation happens before any body decoding, so a bare type
//! header is enough input.

use oxicc_core::tags::{compatible, Tag};
use oxicc_core::{TagSignature, TypeSignature};

/// Every tag signature the compatibility table constrains, with its
/// allowed type signatures. Mirrors the decoder's table; the test fails
/// if either side drifts.
fn constrained_tags() -> Vec<(TagSignature, Vec<TypeSignature>)> {
    use TagSignature as T;
    use TypeSignature as Y;

    let xyz_only = vec![Y::XYZ];
    let trc = vec![Y::CURVE, Y::PARAMETRIC_CURVE];
    let a2b = vec![Y::LUT8, Y::LUT16, Y::LUT_A2B];
    let b2a = vec![Y::LUT8, Y::LUT16, Y::LUT_B2A];
    let any_lut = vec![Y::LUT8, Y::LUT16, Y::LUT_A2B, Y::LUT_B2A];
    let text_like = vec![Y::TEXT, Y::MLUC];
    let desc_like = vec![Y::DESC, Y::MLUC];

    vec![
        (T::MEDIA_WHITE_POINT, xyz_only.clone()),
        (T::MEDIA_BLACK_POINT, xyz_only.clone()),
        (T::RED_COLORANT, xyz_only.clone()),
        (T::GREEN_COLORANT, xyz_only.clone()),
        (T::BLUE_COLORANT, xyz_only.clone()),
        (T::LUMINANCE, xyz_only),
        (T::RED_TRC, trc.clone()),
        (T::GREEN_TRC, trc.clone()),
        (T::BLUE_TRC, trc.clone()),
        (T::GRAY_TRC, trc),
        (T::A2B0, a2b.clone()),
        (T::A2B1, a2b.clone()),
        (T::A2B2, a2b),
        (T::B2A0, b2a.clone()),
        (T::B2A1, b2a.clone()),
        (T::B2A2, b2a.clone()),
        (T::GAMUT, b2a),
        (T::PREVIEW0, any_lut.clone()),
        (T::PREVIEW1, any_lut.clone()),
        (T::PREVIEW2, any_lut),
        (T::CHROMATIC_ADAPTATION, vec![Y::S15_FIXED16_ARRAY]),
        (T::COPYRIGHT, text_like.clone()),
        (T::CHAR_TARGET, text_like),
        (T::PROFILE_DESC, desc_like.clone()),
        (T::DEVICE_MFG_DESC, desc_like.clone()),
        (T::DEVICE_MODEL_DESC, desc_like.clone()),
        (T::VIEWING_COND_DESC, desc_like),
        (T::TECHNOLOGY, vec![Y::SIGNATURE]),
        (T::VIEWING_CONDITIONS, vec![Y::VIEWING_CONDITIONS]),
        (T::MEASUREMENT, vec![Y::MEASUREMENT]),
        (T::NAMED_COLOR2, vec![Y::NAMED_COLOR2]),
        (T::COLORANT_ORDER, vec![Y::COLORANT_ORDER]),
        (T::COLORANT_TABLE, vec![Y::COLORANT_TABLE]),
        (T::COLORANT_TABLE_OUT, vec![Y::COLORANT_TABLE]),
        (T::CHROMATICITY, vec![Y::CHROMATICITY]),
        (T::PROFILE_SEQUENCE_DESC, vec![Y::PROFILE_SEQUENCE_DESC]),
        (T::CALIBRATION_DATE_TIME, vec![Y::DATE_TIME]),
        (T::OUTPUT_RESPONSE, vec![Y::RESPONSE_CURVE_SET16]),
    ]
}

/// All type signatures the decoder models
fn all_type_signatures() -> Vec<TypeSignature> {
    use TypeSignature as Y;
    vec![
        Y::CHROMATICITY,
        Y::COLORANT_ORDER,
        Y::COLORANT_TABLE,
        Y::CURVE,
        Y::DATA,
        Y::DATE_TIME,
        Y::DESC,
        Y::LUT16,
        Y::LUT8,
        Y::LUT_A2B,
        Y::LUT_B2A,
        Y::MEASUREMENT,
        Y::MLUC,
        Y::NAMED_COLOR2,
        Y::PARAMETRIC_CURVE,
        Y::PROFILE_SEQUENCE_DESC,
        Y::RESPONSE_CURVE_SET16,
        Y::S15_FIXED16_ARRAY,
        Y::SIGNATURE,
        Y::TEXT,
        Y::U16_FIXED16_ARRAY,
        Y::UINT16_ARRAY,
        Y::UINT32_ARRAY,
        Y::UINT64_ARRAY,
        Y::UINT8_ARRAY,
        Y::VIEWING_CONDITIONS,
        Y::XYZ,
    ]
}

/// A payload that is just the type header; enough for validation to run
fn bare_payload(type_sig: TypeSignature) -> Vec<u8> {
    let mut data = type_sig.0.to_be_bytes().to_vec();
    data.extend_from_slice(&[0u8; 4]);
    data
}

#[test]
fn every_illegal_pair_is_rejected() {
    for (tag_sig, allowed) in constrained_tags() {
        for type_sig in all_type_signatures() {
            if allowed.contains(&type_sig) {
                continue;
            }
            assert!(
                !compatible(tag_sig, type_sig),
                "table claims '{tag_sig}' may carry '{type_sig}'"
            );
            assert!(
                Tag::parse(tag_sig, &bare_payload(type_sig)).is_none(),
                "factory produced a value for illegal pair ('{tag_sig}', '{type_sig}')"
            );
        }
    }
}

#[test]
fn every_legal_pair_passes_validation() {
    for (tag_sig, allowed) in constrained_tags() {
        for type_sig in allowed {
            assert!(
                compatible(tag_sig, type_sig),
                "table rejects legal pair ('{tag_sig}', '{type_sig}')"
            );
        }
    }
}

#[test]
fn unconstrained_tags_accept_any_type() {
    for private in [*b"APPL", *b"MS00", *b"zz00"] {
        let tag_sig = TagSignature::from_bytes(private);
        for type_sig in all_type_signatures() {
            assert!(compatible(tag_sig, type_sig));
        }
    }
}

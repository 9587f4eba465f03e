//! Header decoding: exact field recovery, truncation, magic validation

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use icc_tests::ProfileBuilder;
use oxicc_core::header::{ProfileClass, ProfileHeader, RenderingIntent};
use oxicc_core::types::XyzNumber;
use oxicc_core::{ColorSpace, ProfileError};

#[test]
fn every_field_round_trips() -> Result<()> {
    let bytes = ProfileBuilder::new()
        .cmm_type(u32::from_be_bytes(*b"ADBE"))
        .version(4, 4, 2)
        .device_class(*b"prtr")
        .color_space(*b"CMYK")
        .pcs(*b"Lab ")
        .creation_date([2023, 11, 30, 23, 59, 58])
        .platform(u32::from_be_bytes(*b"APPL"))
        .manufacturer(0x4D414E55)
        .model(0x4D4F444C)
        .attributes(0x0000_0001_0000_0002)
        .rendering_intent(2)
        .creator(u32::from_be_bytes(*b"oxic"))
        .checksum(0xDEADBEEF)
        .build();

    let header = ProfileHeader::parse(&bytes)?;
    assert_eq!(header.size as usize, bytes.len());
    assert_eq!(header.cmm_type, u32::from_be_bytes(*b"ADBE"));
    assert_eq!(
        (header.version.major, header.version.minor, header.version.bugfix),
        (4, 4, 2)
    );
    assert_eq!(header.device_class, ProfileClass::Output);
    assert_eq!(header.color_space, ColorSpace::Cmyk);
    assert_eq!(header.pcs, ColorSpace::Lab);
    assert_eq!(header.creation_date.year, 2023);
    assert_eq!(header.creation_date.month, 11);
    assert_eq!(header.creation_date.day, 30);
    assert_eq!(header.creation_date.hour, 23);
    assert_eq!(header.creation_date.minute, 59);
    assert_eq!(header.creation_date.second, 58);
    assert_eq!(header.platform, u32::from_be_bytes(*b"APPL"));
    assert_eq!(header.manufacturer, 0x4D414E55);
    assert_eq!(header.model, 0x4D4F444C);
    assert_eq!(header.attributes, 0x0000_0001_0000_0002);
    assert_eq!(header.rendering_intent, RenderingIntent::Saturation);
    assert_eq!(header.creator, u32::from_be_bytes(*b"oxic"));
    assert_eq!(header.checksum, 0xDEADBEEF);
    Ok(())
}

#[test]
fn boundary_dates_survive() -> Result<()> {
    for date in [
        [0u16, 0, 0, 0, 0, 0],
        [1900, 1, 1, 0, 0, 0],
        [2000, 2, 29, 12, 30, 30],
        [9999, 12, 31, 23, 59, 59],
        [u16::MAX, u16::MAX, u16::MAX, u16::MAX, u16::MAX, u16::MAX],
    ] {
        let bytes = ProfileBuilder::new().creation_date(date).build();
        let header = ProfileHeader::parse(&bytes)?;
        assert_eq!(
            [
                header.creation_date.year,
                header.creation_date.month,
                header.creation_date.day,
                header.creation_date.hour,
                header.creation_date.minute,
                header.creation_date.second,
            ],
            date
        );
    }
    Ok(())
}

#[test]
fn all_four_rendering_intents() -> Result<()> {
    let expected = [
        RenderingIntent::Perceptual,
        RenderingIntent::MediaRelative,
        RenderingIntent::Saturation,
        RenderingIntent::IccAbsolute,
    ];
    for (value, intent) in expected.iter().enumerate() {
        let bytes = ProfileBuilder::new()
            .rendering_intent(value as u32)
            .build();
        assert_eq!(ProfileHeader::parse(&bytes)?.rendering_intent, *intent);
    }
    Ok(())
}

#[test]
fn truncated_prefixes_always_fail_cleanly() {
    let full = ProfileBuilder::new().build();

    // Every length below 128 must fail with Truncated, never panic
    for len in 0..128 {
        match ProfileHeader::parse(&full[..len]) {
            Err(ProfileError::Truncated { expected: 128, actual }) => {
                assert_eq!(actual, len);
            }
            other => panic!("prefix of {len} bytes: expected Truncated, got {other:?}"),
        }
    }

    // Seeded random mutations of short prefixes behave the same way
    let mut rng = ChaCha8Rng::seed_from_u64(0x1CC0);
    for _ in 0..256 {
        let len = rng.random_range(0..128);
        let mut prefix = full[..len].to_vec();
        if !prefix.is_empty() {
            let at = rng.random_range(0..prefix.len());
            prefix[at] = rng.random();
        }
        assert!(matches!(
            ProfileHeader::parse(&prefix),
            Err(ProfileError::Truncated { .. })
        ));
    }
}

#[test]
fn bad_magic_is_rejected() {
    let bytes = ProfileBuilder::new().magic(0x12345678).build();
    assert!(matches!(
        ProfileHeader::parse(&bytes),
        Err(ProfileError::BadMagic(0x12345678))
    ));
}

#[test]
fn encoded_illuminant_is_normalized_to_d50() -> Result<()> {
    // A header claiming a D65 PCS illuminant still decodes as D50
    let bytes = ProfileBuilder::new()
        .illuminant([0x0000F333, 0x00010000, 0x000116C7])
        .build();
    let header = ProfileHeader::parse(&bytes)?;
    assert_eq!(header.illuminant, XyzNumber::D50);
    Ok(())
}

#[test]
fn unknown_signatures_are_preserved_not_fatal() -> Result<()> {
    let bytes = ProfileBuilder::new()
        .device_class(*b"????")
        .color_space(*b"!!!!")
        .rendering_intent(42)
        .build();
    let header = ProfileHeader::parse(&bytes)?;
    assert_eq!(
        header.device_class,
        ProfileClass::Unknown(u32::from_be_bytes(*b"????"))
    );
    assert_eq!(
        header.color_space,
        ColorSpace::Unknown(u32::from_be_bytes(*b"!!!!"))
    );
    assert_eq!(header.rendering_intent, RenderingIntent::Perceptual);
    Ok(())
}

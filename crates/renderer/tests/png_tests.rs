//! Tests for PNG encoding of rendered surfaces.

use std::io::Read;

use profile_common::ProfileError;
use renderer::png::create_png;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Split a PNG into (type, data) chunks after the signature.
fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    let mut out = Vec::new();
    let mut pos = 8;
    while pos + 8 <= png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&kind);
        hasher.update(&data);
        assert_eq!(hasher.finalize(), crc, "bad CRC on {:?}", kind);

        out.push((kind, data));
        pos += 12 + len;
    }
    assert_eq!(pos, png.len());
    out
}

#[test]
fn test_png_structure() {
    let pixels = [255u8, 0, 0, 255].repeat(3 * 2);
    let png = create_png(&pixels, 3, 2).unwrap();

    assert_eq!(&png[0..8], &PNG_SIGNATURE);
    let chunks = chunks(&png);
    let kinds: Vec<&[u8; 4]> = chunks.iter().map(|(k, _)| k).collect();
    assert_eq!(kinds, vec![b"IHDR", b"IDAT", b"IEND"]);

    let ihdr = &chunks[0].1;
    assert_eq!(ihdr.len(), 13);
    assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), 3);
    assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), 2);
    // 8-bit RGBA, no interlace
    assert_eq!(&ihdr[8..], &[8, 6, 0, 0, 0]);
}

#[test]
fn test_idat_holds_filtered_scanlines() {
    let pixels: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
    let png = create_png(&pixels, 2, 2).unwrap();
    let idat = chunks(&png).remove(1).1;

    let mut raw = Vec::new();
    flate2::read::ZlibDecoder::new(&idat[..]).read_to_end(&mut raw).unwrap();

    let mut expected = vec![0u8];
    expected.extend_from_slice(&pixels[0..8]);
    expected.push(0);
    expected.extend_from_slice(&pixels[8..16]);
    assert_eq!(raw, expected);
}

#[test]
fn test_short_buffer_is_rejected() {
    let err = create_png(&[0u8; 15], 2, 2).unwrap_err();
    assert!(matches!(err, ProfileError::BufferTooSmall { required: 16, actual: 15 }));
}

#[test]
fn test_zero_size_is_rejected() {
    assert!(matches!(create_png(&[], 0, 4), Err(ProfileError::Encode(_))));
    assert!(matches!(create_png(&[], 4, 0), Err(ProfileError::Encode(_))));
}

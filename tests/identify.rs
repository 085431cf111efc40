mod common;

use common::{build_container, data_offset, Entry};
use icodec::{CancelToken, DecodeError, FrameKind, IcoDecoder, PngColorType};
use std::io::Cursor;

//===========================================================================//

#[test]
fn identify_reports_sizes_without_pixels() {
    let entries = vec![
        Entry::new(2, 2, common::PNG_2X2_GRAY.to_vec()),
        Entry::new(2, 2, common::BMP_2X2_1BPP.to_vec()),
        Entry::new(5, 3, common::BMP_5X3_4BPP.to_vec()),
    ];
    let bytes = build_container(1, &entries);
    let info = icodec::identify_from_memory(&bytes).unwrap();
    assert_eq!((info.width(), info.height()), (5, 3));
    assert_eq!(info.frames().len(), 3);
    // Per-frame sizes are the sub-image sizes, with bitmap heights already
    // halved for the doubled-height storage.
    let sizes: Vec<(u32, u32)> = info
        .frames()
        .iter()
        .map(|frame| (frame.width(), frame.height()))
        .collect();
    assert_eq!(sizes, vec![(2, 2), (2, 2), (5, 3)]);
    assert_eq!(info.frames()[0].metadata().kind(), FrameKind::Png);
    assert_eq!(info.frames()[1].metadata().kind(), FrameKind::Bmp);
    assert_eq!(info.frames()[1].metadata().bits_per_pixel(), 1);
    assert_eq!(info.frames()[2].metadata().bits_per_pixel(), 4);
    let png = info.png_metadata().unwrap();
    assert_eq!(png.color_type, PngColorType::Grayscale);
    assert_eq!(png.bit_depth, 8);
}

#[test]
fn identify_agrees_with_decode() {
    let entries = vec![
        Entry::new(2, 2, common::PNG_2X2_GRAY.to_vec()),
        Entry::new(2, 2, common::BMP_2X2_1BPP.to_vec()),
        Entry::new(5, 3, common::BMP_5X3_4BPP.to_vec()),
    ];
    let bytes = build_container(1, &entries);
    let info = icodec::identify_from_memory(&bytes).unwrap();
    let image = icodec::decode_from_memory(&bytes).unwrap();
    assert_eq!(info.frames().len(), image.frames().len());
    assert_eq!(info.width(), image.width());
    assert_eq!(info.height(), image.height());
    for (probed, decoded) in info.frames().iter().zip(image.frames()) {
        assert_eq!(probed.metadata().kind(), decoded.metadata().kind());
        assert_eq!(
            probed.metadata().bits_per_pixel(),
            decoded.metadata().bits_per_pixel()
        );
    }
    assert_eq!(info.png_metadata(), image.png_metadata());
}

#[test]
fn identify_agrees_with_decode_for_bitmap_only_containers() {
    let entries = vec![
        Entry::new(2, 2, common::BMP_2X2_1BPP.to_vec()),
        Entry::new(5, 3, common::BMP_5X3_4BPP.to_vec()),
    ];
    let bytes = build_container(1, &entries);
    let info = icodec::identify_from_memory(&bytes).unwrap();
    let image = icodec::decode_from_memory(&bytes).unwrap();
    assert_eq!(info.frames().len(), image.frames().len());
    assert_eq!((info.width(), info.height()), (5, 3));
    assert_eq!((image.width(), image.height()), (5, 3));
    assert!(info.png_metadata().is_none());
}

#[test]
fn identify_reports_partial_frame_count_on_truncation() {
    let entries = vec![
        Entry::new(2, 2, common::BMP_2X2_1BPP.to_vec()),
        Entry::new(5, 3, common::BMP_5X3_4BPP.to_vec()),
    ];
    let mut bytes = build_container(1, &entries);
    bytes.truncate(data_offset(&entries, 1));
    let info = icodec::identify_from_memory(&bytes).unwrap();
    assert_eq!(info.frames().len(), 1);
    assert_eq!((info.width(), info.height()), (2, 2));
}

#[test]
fn identify_can_be_cancelled() {
    let entries = vec![Entry::new(2, 2, common::BMP_2X2_1BPP.to_vec())];
    let bytes = build_container(1, &entries);
    let token = CancelToken::new();
    token.cancel();
    match IcoDecoder::new().identify(Cursor::new(&bytes), &token) {
        Err(DecodeError::Cancelled) => {}
        Ok(_) => panic!("identify succeeded despite cancellation"),
        Err(error) => panic!("unexpected error: {:?}", error),
    }
}

#[test]
fn identify_fails_on_truncated_directory() {
    let bytes = build_container(1, &[]);
    match icodec::identify_from_memory(&bytes[..3]) {
        Err(DecodeError::TruncatedHeader) => {}
        Ok(_) => panic!("identify succeeded on a truncated header"),
        Err(error) => panic!("unexpected error: {:?}", error),
    }
}

//===========================================================================//

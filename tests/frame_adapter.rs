use framegate::lowlevel::luma_bt601;
use framegate::{adapt, ErrorKind, FrameGateError, FrameRef, PixelFormat};

fn bgr_frame(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x * 40) as u8, (y * 50) as u8, ((x + y) * 20) as u8]);
        }
    }
    data
}

#[test]
fn bgr_frame_keeps_dimensions_and_uses_bt601() {
    let (width, height) = (5, 3);
    let data = bgr_frame(width, height);
    let view = adapt(FrameRef::packed(&data, width, height, PixelFormat::Bgr24)).unwrap();

    assert!(!view.is_borrowed());
    assert_eq!((view.width(), view.height()), (width, height));
    let gray = view.view();
    for y in 0..height {
        for x in 0..width {
            let px = &data[(y * width + x) * 3..][..3];
            let expected = luma_bt601(px[2], px[1], px[0]);
            assert_eq!(*gray.get(x, y).unwrap(), expected);
        }
    }
}

#[test]
fn rgb_and_bgr_agree_on_swapped_channels() {
    let (width, height) = (4, 4);
    let bgr = bgr_frame(width, height);
    let rgb: Vec<u8> = bgr
        .chunks_exact(3)
        .flat_map(|px| [px[2], px[1], px[0]])
        .collect();

    let a = adapt(FrameRef::packed(&bgr, width, height, PixelFormat::Bgr24)).unwrap();
    let b = adapt(FrameRef::packed(&rgb, width, height, PixelFormat::Rgb24)).unwrap();
    assert_eq!(a.view().as_slice(), b.view().as_slice());
}

#[test]
fn alpha_channel_is_ignored() {
    let bgra = [10u8, 20, 30, 0, 10, 20, 30, 255];
    let rgba = [30u8, 20, 10, 77, 30, 20, 10, 1];
    let a = adapt(FrameRef::packed(&bgra, 2, 1, PixelFormat::Bgra32)).unwrap();
    let b = adapt(FrameRef::packed(&rgba, 2, 1, PixelFormat::Rgba32)).unwrap();
    let expected = luma_bt601(30, 20, 10);
    assert_eq!(a.view().as_slice(), &[expected, expected]);
    assert_eq!(b.view().as_slice(), &[expected, expected]);
}

#[test]
fn padded_rows_are_skipped() {
    // Two BGR pixels per row plus two padding bytes.
    let data = [
        0u8, 0, 255, 255, 255, 255, 9, 9, //
        0, 255, 0, 0, 0, 0, 9, 9,
    ];
    let frame = FrameRef {
        data: &data,
        width: 2,
        height: 2,
        stride: 8,
        format: PixelFormat::Bgr24,
    };
    let view = adapt(frame).unwrap();
    assert_eq!(view.view().as_slice(), &[76u8, 255, 150, 0]);
}

#[test]
fn gray_frames_are_borrowed_without_copy() {
    let data = [1u8, 2, 3, 0, 4, 5, 6, 0];
    let frame = FrameRef {
        data: &data,
        width: 3,
        height: 2,
        stride: 4,
        format: PixelFormat::Gray8,
    };
    let view = adapt(frame).unwrap();
    assert!(view.is_borrowed());
    assert_eq!(view.view().as_slice().as_ptr(), data.as_ptr());
    assert_eq!(view.view().row(1).unwrap(), &[4u8, 5, 6]);
}

#[test]
fn planar_layouts_are_format_errors() {
    let data = [0u8; 24];
    for format in [PixelFormat::Yuv420p, PixelFormat::Nv12] {
        let err = adapt(FrameRef::packed(&data, 4, 4, format)).unwrap_err();
        assert_eq!(err, FrameGateError::UnsupportedFormat { format });
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

#[test]
fn truncated_buffers_are_format_errors() {
    let data = [0u8; 10];
    let err = adapt(FrameRef::packed(&data, 2, 2, PixelFormat::Bgr24)).unwrap_err();
    assert_eq!(err, FrameGateError::BufferTooSmall { needed: 12, got: 10 });
    assert_eq!(err.kind(), ErrorKind::Format);

    let frame = FrameRef {
        data: &[0u8; 12],
        width: 2,
        height: 2,
        stride: 5,
        format: PixelFormat::Bgr24,
    };
    assert_eq!(
        adapt(frame).unwrap_err(),
        FrameGateError::InvalidStride {
            width: 6,
            stride: 5
        }
    );
}

#[test]
fn conversion_is_deterministic_and_leaves_input_untouched() {
    let data = bgr_frame(6, 4);
    let before = data.clone();
    let a = adapt(FrameRef::packed(&data, 6, 4, PixelFormat::Bgr24)).unwrap();
    let b = adapt(FrameRef::packed(&data, 6, 4, PixelFormat::Bgr24)).unwrap();
    assert_eq!(a.view().as_slice(), b.view().as_slice());
    assert_eq!(data, before);
}

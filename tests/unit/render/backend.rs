use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: (data.len() / 4) as u32,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn straight_alpha_undoes_premultiplication() {
    let out = frame(
        vec![
            51, 51, 51, 255, // opaque
            64, 0, 32, 128, // half covered
            0, 0, 0, 0, // empty
            9, 9, 9, 0, // junk under zero alpha
        ],
        true,
    )
    .into_straight();
    assert!(!out.premultiplied);
    assert_eq!(&out.data[0..4], &[51, 51, 51, 255]);
    assert_eq!(&out.data[4..8], &[128, 0, 64, 128]);
    assert_eq!(&out.data[8..12], &[0, 0, 0, 0]);
    assert_eq!(&out.data[12..16], &[0, 0, 0, 0]);
}

#[test]
fn straight_frames_are_left_alone() {
    let data = vec![200, 10, 10, 20];
    let out = frame(data.clone(), false).into_straight();
    assert_eq!(out.data, data);
}

#[test]
fn oversaturated_channels_are_clamped() {
    let out = frame(vec![200, 0, 0, 100], true).into_straight();
    assert_eq!(out.data[0], 255);
}

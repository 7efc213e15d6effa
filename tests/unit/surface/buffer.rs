use super::*;

#[test]
fn from_rgba_rejects_wrong_length() {
    let err = PixelBuffer::from_rgba(Size::new(2, 2), vec![0; 15]).unwrap_err();
    assert!(err.to_string().contains("must be 16 bytes"));
    assert!(PixelBuffer::from_rgba(Size::new(2, 2), vec![0; 16]).is_ok());
}

#[test]
fn new_is_transparent() {
    let b = PixelBuffer::new(Size::new(3, 2)).unwrap();
    assert_eq!(b.as_bytes().len(), 24);
    assert!(b.as_bytes().iter().all(|&v| v == 0));
}

#[test]
fn pixel_lookup_is_row_major() {
    let mut data = vec![0u8; 2 * 2 * 4];
    // (x=0, y=1) starts at byte (1 * 2) * 4.
    data[8..12].copy_from_slice(&[1, 2, 3, 4]);
    let b = PixelBuffer::from_rgba(Size::new(2, 2), data).unwrap();
    assert_eq!(b.pixel(0, 1), Some([1, 2, 3, 4]));
    assert_eq!(b.pixel(2, 0), None);
}

#[test]
fn ensure_size_is_noop_for_same_size() {
    let mut b = PixelBuffer::filled(Size::new(2, 1), [9, 9, 9, 9]).unwrap();
    assert!(!b.ensure_size(Size::new(2, 1)).unwrap());
    assert_eq!(b.as_bytes(), &[9, 9, 9, 9, 9, 9, 9, 9]);
}

#[test]
fn ensure_size_discards_old_content() {
    let mut b = PixelBuffer::filled(Size::new(2, 1), [9, 9, 9, 9]).unwrap();
    assert!(b.ensure_size(Size::new(3, 2)).unwrap());
    assert_eq!(b.size(), Size::new(3, 2));
    assert!(b.as_bytes().iter().all(|&v| v == 0));
}

#[test]
fn chroma_key_method_matches_scenarios() {
    let mut green = PixelBuffer::filled(Size::new(1, 1), [0, 255, 0, 255]).unwrap();
    green.chroma_key(&Threshold::DEFAULT, KeyingMode::Sequential);
    assert_eq!(green.pixel(0, 0), Some([0, 255, 0, 0]));

    let mut skin = PixelBuffer::filled(Size::new(1, 1), [200, 50, 60, 255]).unwrap();
    skin.chroma_key(&Threshold::DEFAULT, KeyingMode::Parallel);
    assert_eq!(skin.pixel(0, 0), Some([200, 50, 60, 255]));
}

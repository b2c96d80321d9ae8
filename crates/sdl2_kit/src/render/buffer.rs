//! Caller buffer checks for pixel transfers
//!
//! The native library trusts the pointer, pitch and rectangle it is given, so
//! every transfer between a Rust slice and native pixels is sized here first.

use crate::foundation::geometry::Rect;
use crate::render::types::PixelFormat;

/// The area a transfer touches: `rect` or the whole `w` x `h` extent
///
/// `None` when the rectangle has a negative size or reaches outside the extent.
pub(crate) fn area_within(rect: Option<&Rect>, w: i32, h: i32) -> Option<Rect> {
    let Some(r) = rect else {
        return Some(Rect::new(0, 0, w.max(0), h.max(0)));
    };
    let fits = r.x >= 0
        && r.y >= 0
        && r.w >= 0
        && r.h >= 0
        && r.x.checked_add(r.w).is_some_and(|right| right <= w)
        && r.y.checked_add(r.h).is_some_and(|bottom| bottom <= h);
    fits.then_some(*r)
}

/// Bytes spanned by `rows` rows of `row` bytes laid out `pitch` apart
///
/// `None` when the pitch is shorter than a row or the size overflows.
pub(crate) fn span(row: usize, rows: usize, pitch: usize) -> Option<usize> {
    if row == 0 || rows == 0 {
        return Some(0);
    }
    if pitch < row {
        return None;
    }
    pitch.checked_mul(rows - 1)?.checked_add(row)
}

/// Bytes one row of `cols` pixels takes in a packed format
pub(crate) fn row_bytes(format: PixelFormat, cols: i32) -> Option<usize> {
    usize::try_from(cols).ok()?.checked_mul(format.bytes_per_pixel() as usize)
}

/// Size of a chroma plane for a luma area of `w` x `h`
pub(crate) fn chroma(w: i32, h: i32) -> (usize, usize) {
    ((w.max(0) as usize).div_ceil(2), (h.max(0) as usize).div_ceil(2))
}

/// Whether a single buffer at `pitch` covers `area` of a texture in `format`
///
/// Planar formats carry their chroma planes after the luma plane, at half the
/// pitch for YV12/IYUV and at the full pitch for NV12/NV21.
pub(crate) fn covers(format: PixelFormat, area: &Rect, len: usize, pitch: usize) -> bool {
    let Some(row) = row_bytes(format, area.w) else {
        return false;
    };
    let rows = area.h.max(0) as usize;
    let Some(luma) = span(row, rows, pitch) else {
        return false;
    };
    let (cw, ch) = chroma(area.w, area.h);
    let Some(plane) = pitch.checked_mul(rows) else {
        return false;
    };
    let needed = match format {
        PixelFormat::YV12 | PixelFormat::IYUV if rows > 0 => {
            let chroma_pitch = pitch.div_ceil(2);
            span(cw, ch, chroma_pitch)
                .and_then(|half| half.checked_mul(2))
                .and_then(|planes| plane.checked_add(planes))
        }
        PixelFormat::NV12 | PixelFormat::NV21 if rows > 0 => {
            span(cw * 2, ch, pitch).and_then(|interleaved| plane.checked_add(interleaved))
        }
        _ => Some(luma),
    };
    needed.is_some_and(|needed| len >= needed)
}

/// Pitch as the native `int`
pub(crate) fn native_pitch(pitch: usize) -> Option<i32> {
    i32::try_from(pitch).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_defaults_to_extent() {
        assert_eq!(area_within(None, 4, 3), Some(Rect::new(0, 0, 4, 3)));
        assert_eq!(area_within(Some(&Rect::new(1, 1, 3, 2)), 4, 3), Some(Rect::new(1, 1, 3, 2)));
    }

    #[test]
    fn test_area_rejects_outside_and_negative() {
        assert_eq!(area_within(Some(&Rect::new(2, 0, 3, 1)), 4, 3), None);
        assert_eq!(area_within(Some(&Rect::new(-1, 0, 1, 1)), 4, 3), None);
        assert_eq!(area_within(Some(&Rect::new(0, 0, -2, 1)), 4, 3), None);
        assert_eq!(area_within(Some(&Rect::new(i32::MAX, 0, 1, 1)), 4, 3), None);
    }

    #[test]
    fn test_span() {
        assert_eq!(span(16, 4, 16), Some(64));
        assert_eq!(span(8, 2, 16), Some(24));
        assert_eq!(span(16, 4, 8), None);
        assert_eq!(span(0, 4, 0), Some(0));
        assert_eq!(span(1, usize::MAX, usize::MAX), None);
    }

    #[test]
    fn test_covers_packed_and_planar() {
        let area = Rect::new(0, 0, 4, 4);
        assert!(covers(PixelFormat::ARGB8888, &area, 64, 16));
        assert!(!covers(PixelFormat::ARGB8888, &area, 63, 16));
        assert!(!covers(PixelFormat::ARGB8888, &area, 64, 12));
        // 16 luma bytes plus two 2x2 chroma planes
        assert!(covers(PixelFormat::IYUV, &area, 24, 4));
        assert!(!covers(PixelFormat::IYUV, &area, 16, 4));
        assert!(covers(PixelFormat::NV12, &area, 24, 4));
        assert!(!covers(PixelFormat::NV12, &area, 20, 4));
    }
}

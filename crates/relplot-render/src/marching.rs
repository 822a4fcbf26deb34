//! Marching squares for a single cell.
//!
//! A cell is classified by which of its corners are non-negative:
//!
//! ```text
//!   1 ── top ── 2
//!   │           │
//!  left       right
//!   │           │
//!   4 ─ bottom ─ 8
//! ```
//!
//! Patterns `0` and `15` contain no crossing. Every other pattern yields one
//! segment joining the two edges whose endpoints differ in sign, except the
//! two diagonal saddles (`6` and `9`), which are ambiguous without a centre
//! sample and emit both candidate segments.
//!
//! Crossings are placed by linear interpolation along the edge and rounded
//! to whole pixels.

/// Integer pixel position, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A straight piece of contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: PixelPoint,
    pub end: PixelPoint,
}

/// Relation values at the four corners of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl Corners {
    /// 4-bit sign pattern; a bit is set when its corner is `>= 0`.
    pub fn pattern(&self) -> u8 {
        let bit = |value: f64, mask: u8| if value >= 0.0 { mask } else { 0 };
        bit(self.top_left, 1)
            | bit(self.top_right, 2)
            | bit(self.bottom_left, 4)
            | bit(self.bottom_right, 8)
    }

    pub fn all_finite(&self) -> bool {
        self.top_left.is_finite()
            && self.top_right.is_finite()
            && self.bottom_left.is_finite()
            && self.bottom_right.is_finite()
    }

    /// Whether the contour may pass through the cell.
    pub fn has_crossing(&self) -> bool {
        self.all_finite() && !matches!(self.pattern(), 0 | 15)
    }
}

/// Offset of the zero crossing along an edge of `size` pixels whose
/// endpoints hold `a` and `b`.
#[inline]
fn crossing(a: f64, b: f64, size: i32) -> i32 {
    (a * f64::from(size) / (a - b)).round() as i32
}

/// Emit the contour segments of the cell whose top-left pixel is `origin`
/// and whose side is `step` pixels. Returns the number of segments emitted.
pub fn march_cell(
    origin: PixelPoint,
    step: i32,
    corners: &Corners,
    emit: &mut impl FnMut(Segment),
) -> usize {
    if !corners.all_finite() {
        return 0;
    }
    let Corners {
        top_left: v11,
        top_right: v12,
        bottom_left: v21,
        bottom_right: v22,
    } = *corners;
    let (sx, sy) = (origin.x, origin.y);

    let top = || PixelPoint::new(sx + crossing(v11, v12, step), sy);
    let bottom = || PixelPoint::new(sx + crossing(v21, v22, step), sy + step);
    let left = || PixelPoint::new(sx, sy + crossing(v11, v21, step));
    let right = || PixelPoint::new(sx + step, sy + crossing(v12, v22, step));

    let mut count = 0;
    let mut segment = |start: PixelPoint, end: PixelPoint| {
        emit(Segment { start, end });
        count += 1;
    };

    match corners.pattern() {
        1 | 14 => segment(top(), left()),
        2 | 13 => segment(top(), right()),
        4 | 11 => segment(bottom(), left()),
        8 | 7 => segment(bottom(), right()),
        3 | 12 => segment(left(), right()),
        5 | 10 => segment(top(), bottom()),
        6 => {
            segment(top(), right());
            segment(bottom(), left());
        }
        9 => {
            segment(top(), left());
            segment(bottom(), right());
        }
        _ => {}
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners(top_left: f64, top_right: f64, bottom_left: f64, bottom_right: f64) -> Corners {
        Corners {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    fn march(c: Corners) -> Vec<Segment> {
        let mut out = Vec::new();
        march_cell(PixelPoint::new(100, 200), 10, &c, &mut |s| out.push(s));
        out
    }

    fn seg(x0: i32, y0: i32, x1: i32, y1: i32) -> Segment {
        Segment {
            start: PixelPoint::new(x0, y0),
            end: PixelPoint::new(x1, y1),
        }
    }

    #[test]
    fn test_pattern_bits() {
        assert_eq!(corners(1.0, -1.0, -1.0, -1.0).pattern(), 1);
        assert_eq!(corners(-1.0, 1.0, -1.0, -1.0).pattern(), 2);
        assert_eq!(corners(-1.0, -1.0, 1.0, -1.0).pattern(), 4);
        assert_eq!(corners(-1.0, -1.0, -1.0, 1.0).pattern(), 8);
        assert_eq!(corners(0.0, 0.0, 0.0, 0.0).pattern(), 15);
    }

    #[test]
    fn test_uniform_cells_emit_nothing() {
        assert!(march(corners(1.0, 2.0, 3.0, 4.0)).is_empty());
        assert!(march(corners(-1.0, -2.0, -3.0, -4.0)).is_empty());
    }

    #[test]
    fn test_single_corner_cuts_top_and_left() {
        // Crossing at 1/(1+3) of each edge: round(2.5) = 3 pixels in.
        assert_eq!(
            march(corners(1.0, -3.0, -3.0, -3.0)),
            vec![seg(103, 200, 100, 203)]
        );
        // Complement gives the same segment.
        assert_eq!(
            march(corners(-1.0, 3.0, 3.0, 3.0)),
            vec![seg(103, 200, 100, 203)]
        );
    }

    #[test]
    fn test_top_right_corner() {
        assert_eq!(
            march(corners(-1.0, 1.0, -1.0, -1.0)),
            vec![seg(105, 200, 110, 205)]
        );
    }

    #[test]
    fn test_bottom_corners() {
        assert_eq!(
            march(corners(-1.0, -1.0, 1.0, -1.0)),
            vec![seg(105, 210, 100, 205)]
        );
        assert_eq!(
            march(corners(-1.0, -1.0, -1.0, 1.0)),
            vec![seg(105, 210, 110, 205)]
        );
    }

    #[test]
    fn test_horizontal_and_vertical_splits() {
        // Top row positive: the curve runs left to right.
        assert_eq!(
            march(corners(1.0, 1.0, -1.0, -1.0)),
            vec![seg(100, 205, 110, 205)]
        );
        // Right column positive: the curve runs top to bottom.
        assert_eq!(
            march(corners(-1.0, 1.0, -1.0, 1.0)),
            vec![seg(105, 200, 105, 210)]
        );
    }

    #[test]
    fn test_saddles_emit_both_segments() {
        let anti = march(corners(-1.0, 1.0, 1.0, -1.0));
        assert_eq!(anti, vec![seg(105, 200, 110, 205), seg(105, 210, 100, 205)]);

        let main = march(corners(1.0, -1.0, -1.0, 1.0));
        assert_eq!(main, vec![seg(105, 200, 100, 205), seg(105, 210, 110, 205)]);
    }

    #[test]
    fn test_zero_corner_counts_as_positive() {
        // Zero at the top-left lands the crossing exactly on the corner.
        assert_eq!(
            march(corners(0.0, -1.0, -1.0, -1.0)),
            vec![seg(100, 200, 100, 200)]
        );
    }

    #[test]
    fn test_non_finite_corner_means_no_crossing() {
        assert!(march(corners(f64::NAN, -1.0, 1.0, 1.0)).is_empty());
        assert!(march(corners(f64::INFINITY, -1.0, -1.0, -1.0)).is_empty());
        assert!(!corners(1.0, f64::NEG_INFINITY, 1.0, 1.0).has_crossing());
    }
}

//! SVG path data for a plotted series.

use crate::config::Curve;

/// Build path data through `points` (already in plot coordinates).
pub fn build_path(points: &[(f64, f64)], curve: Curve) -> String {
    match curve {
        Curve::Linear => linear_path(points),
        Curve::MonotoneX => monotone_x_path(points),
    }
}

/// Polyline: `M x0 y0 L x1 y1 ...`. Empty input gives an empty string.
pub fn linear_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        d.push_str(&format!("{} {} {}", cmd, coord(*x), coord(*y)));
    }
    d
}

/// Monotone cubic interpolation along x.
///
/// Tangents follow Steffen's method as used by d3's `curveMonotoneX`, so the
/// curve stays within the y range of each pair of neighbouring points.
/// Fewer than three points fall back to a polyline.
pub fn monotone_x_path(points: &[(f64, f64)]) -> String {
    if points.len() < 3 {
        return linear_path(points);
    }
    let tangents = monotone_tangents(points);
    let (x0, y0) = points[0];
    let mut d = format!("M {} {}", coord(x0), coord(y0));
    for i in 0..points.len() - 1 {
        let (xa, ya) = points[i];
        let (xb, yb) = points[i + 1];
        let dx = (xb - xa) / 3.0;
        d.push_str(&format!(
            " C {} {} {} {} {} {}",
            coord(xa + dx),
            coord(ya + dx * tangents[i]),
            coord(xb - dx),
            coord(yb - dx * tangents[i + 1]),
            coord(xb),
            coord(yb)
        ));
    }
    d
}

fn secant(a: (f64, f64), b: (f64, f64)) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        0.0
    } else {
        (b.1 - a.1) / h
    }
}

fn monotone_tangents(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let (prev, cur, next) = (points[i - 1], points[i], points[i + 1]);
        let h0 = cur.0 - prev.0;
        let h1 = next.0 - cur.0;
        let s0 = secant(prev, cur);
        let s1 = secant(cur, next);
        let p = if h0 + h1 == 0.0 {
            0.0
        } else {
            (s0 * h1 + s1 * h0) / (h0 + h1)
        };
        tangents[i] = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);
    tangents
}

fn end_tangent(a: (f64, f64), b: (f64, f64), neighbour: f64) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (b.1 - a.1) / h - neighbour) / 2.0
    }
}

fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Coordinates are written with at most two decimals, trailing zeros dropped.
fn coord(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0 + 0.0;
    format!("{}", rounded)
}

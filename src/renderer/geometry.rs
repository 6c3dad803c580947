// Geometry helpers (CPU-side)
//
// This module is backend-free.

use crate::Rect;
use crate::transform::Transform2D;
use glam::{DVec2, dvec2};

// helper: the four edges of an outlined rectangle.
// Left and bottom edges are inset by one pixel so the outline stays inside
// `rect` when drawn with 1px lines.
pub(crate) fn rect_outline(rect: Rect) -> [(DVec2, DVec2); 4] {
    let x1 = rect.x;
    let y1 = rect.y;
    let x2 = rect.x + rect.w;
    let y2 = rect.y + rect.h;

    [
        (dvec2(x1, y1), dvec2(x2, y1)),             // top
        (dvec2(x1 + 1.0, y1), dvec2(x1 + 1.0, y2)), // left
        (dvec2(x2, y1), dvec2(x2, y2)),             // right
        (dvec2(x1, y2 - 1.0), dvec2(x2, y2 - 1.0)), // bottom
    ]
}

// helper: axis-aligned bounds of a `width` x `height` image after `transform`.
// Returns (min, max).
pub(crate) fn transformed_bounds(transform: &Transform2D, width: f64, height: f64) -> (DVec2, DVec2) {
    let corners = [
        transform.apply(dvec2(0.0, 0.0)),
        transform.apply(dvec2(width, 0.0)),
        transform.apply(dvec2(width, height)),
        transform.apply(dvec2(0.0, height)),
    ];
    let mut min = corners[0];
    let mut max = corners[0];
    for c in &corners[1..] {
        min = min.min(*c);
        max = max.max(*c);
    }
    (min, max)
}

// helper: Liang-Barsky clip of the segment `from`-`to` against the box
// `min`..`max`. Returns the visible part, or `None` when nothing is inside.
// The coordinate on the clipping edge is pinned to the edge itself, so far
// endpoints do not drag rounding error into it.
pub(crate) fn clip_segment(from: DVec2, to: DVec2, min: DVec2, max: DVec2) -> Option<(DVec2, DVec2)> {
    let d = to - from;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let (mut start, mut end) = (from, to);

    for (axis, p, q, edge) in [
        (0, -d.x, from.x - min.x, min.x),
        (0, d.x, max.x - from.x, max.x),
        (1, -d.y, from.y - min.y, min.y),
        (1, d.y, max.y - from.y, max.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t0 {
                t0 = r;
                start = from + d * r;
                start[axis] = edge;
            }
        } else if r < t1 {
            t1 = r;
            end = from + d * r;
            end[axis] = edge;
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((start.clamp(min, max), end.clamp(min, max)))
}

// helper: Bresenham pixel walk between two points (both endpoints included).
pub(crate) fn line_points(x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<(i64, i64)> {
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };

    let mut points = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let mut x = x1;
    let mut y = y1;
    let mut err = dx - dy;

    loop {
        points.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    points
}

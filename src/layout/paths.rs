//! SVG path geometry for relationship lines.
//!
//! Marriages are drawn as a double line: two parallel strokes offset
//! `MARRIAGE_LINE_GAP` above and below the direct segment. When the two
//! endpoints share a row the strokes are straight; otherwise each stroke
//! independently follows an L-route with quadratic-curve corners at the
//! midpoint x. The two strokes carry the same corner direction so they can
//! never cross.

use super::Line;

/// Half-gap between the two strokes of a marriage double line.
pub(super) const MARRIAGE_LINE_GAP: f32 = 2.0;

fn fmt(value: f32) -> String {
    format!("{value:.2}")
}

/// The two offset strokes for a marriage segment.
pub(super) fn double_line_paths(line: Line, corner_radius: f32) -> (String, String) {
    let off = MARRIAGE_LINE_GAP;

    // Same row: two straight horizontal strokes.
    if line.y1 == line.y2 {
        return (
            straight_path(line.x1, line.y1 - off, line.x2, line.y2 - off),
            straight_path(line.x1, line.y1 + off, line.x2, line.y2 + off),
        );
    }

    let horizontal_first = (line.x2 - line.x1).abs() > (line.y2 - line.y1).abs();
    if !horizontal_first {
        // Vertical delta dominates: plain offset strokes along the direct
        // segment.
        return (
            straight_path(line.x1, line.y1 - off, line.x2, line.y2 - off),
            straight_path(line.x1, line.y1 + off, line.x2, line.y2 + off),
        );
    }

    (
        l_route_stroke(line, corner_radius, -off),
        l_route_stroke(line, corner_radius, off),
    )
}

fn straight_path(x1: f32, y1: f32, x2: f32, y2: f32) -> String {
    format!("M {} {} L {} {}", fmt(x1), fmt(y1), fmt(x2), fmt(y2))
}

/// One stroke of an L-routed double line: horizontal leg to the midpoint x,
/// a quadratic corner into the vertical leg, then a second corner into the
/// horizontal approach of the far endpoint. `off` shifts the whole stroke
/// vertically.
fn l_route_stroke(line: Line, corner_radius: f32, off: f32) -> String {
    let mid_x = (line.x1 + line.x2) / 2.0;
    let y1 = line.y1 + off;
    let y2 = line.y2 + off;

    // Approach the midpoint from the start side.
    let lead_x = if line.x1 < line.x2 {
        mid_x - corner_radius
    } else {
        mid_x + corner_radius
    };
    // Turn downward or upward into the vertical leg.
    let drop_y = if line.y1 < line.y2 {
        line.y1 + corner_radius + off
    } else {
        line.y1 - corner_radius + off
    };
    // Leave the vertical leg toward the end point.
    let exit_x = if mid_x < line.x2 {
        mid_x + corner_radius
    } else {
        mid_x - corner_radius
    };

    format!(
        "M {} {} L {} {} Q {} {} {} {} L {} {} Q {} {} {} {} L {} {}",
        fmt(line.x1),
        fmt(y1),
        fmt(lead_x),
        fmt(y1),
        fmt(mid_x),
        fmt(y1),
        fmt(mid_x),
        fmt(drop_y),
        fmt(mid_x),
        fmt(y2),
        fmt(mid_x),
        fmt(y2),
        fmt(exit_x),
        fmt(y2),
        fmt(line.x2),
        fmt(y2),
    )
}

/// Rounded L-path for a parent-child line: vertical leg, corner at the
/// vertical midpoint, horizontal run, corner, vertical leg into the child.
/// Collapses to a straight vertical line when the endpoints share an x.
pub(super) fn l_shaped_path(line: Line, corner_radius: f32) -> String {
    if line.x1 == line.x2 {
        return straight_path(line.x1, line.y1, line.x2, line.y2);
    }

    let mid_y = (line.y1 + line.y2) / 2.0;
    let sign = if line.x2 > line.x1 {
        corner_radius
    } else {
        -corner_radius
    };

    format!(
        "M {} {} L {} {} Q {} {} {} {} L {} {} Q {} {} {} {} L {} {}",
        fmt(line.x1),
        fmt(line.y1),
        fmt(line.x1),
        fmt(mid_y - corner_radius),
        fmt(line.x1),
        fmt(mid_y),
        fmt(line.x1 + sign),
        fmt(mid_y),
        fmt(line.x2 - sign),
        fmt(mid_y),
        fmt(line.x2),
        fmt(mid_y),
        fmt(line.x2),
        fmt(mid_y + corner_radius),
        fmt(line.x2),
        fmt(line.y2),
    )
}

//! HSL to RGB helpers shared by the sphere colour uniform and the keyframed
//! colour cycle.

/// Wrap a value into `[0, 1)`. Negative inputs wrap from the top.
#[inline]
pub fn wrap01(v: f32) -> f32 {
    let w = v % 1.0;
    if w < 0.0 {
        w + 1.0
    } else {
        w
    }
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Convert normalised HSL (all components 0..1) to RGB 0..1.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

/// Convert HSL given as degrees and percentages to RGB 0..1.
///
/// Hue wraps into `[0, 360)`; saturation and lightness clamp after scaling.
pub fn hsl_degrees_to_rgb(h_deg: f32, s_pct: f32, l_pct: f32) -> [f32; 3] {
    let h = ((h_deg % 360.0) + 360.0) % 360.0 / 360.0;
    hsl_to_rgb(h, clamp01(s_pct / 100.0), clamp01(l_pct / 100.0))
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

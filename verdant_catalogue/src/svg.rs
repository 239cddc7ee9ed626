// Copyright 2025 the Verdant Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG output for retained marks.

use std::collections::HashMap;
use std::fmt::Write as _;

use kurbo::{Rect, RoundedRect, Shape};
use peniko::Brush;
use verdant_charts::{HeuristicTextMeasurer, TextMeasurer};
use verdant_core::{
    Fill, MarkDiff, MarkId, MarkPayload, RectPayload, RingPayload, StripePattern, TextAnchor,
    TextBaseline, TextPayload,
};

/// Marks of one section, kept up to date from [`MarkDiff`]s.
///
/// Several scenes share one HTML page, so `<defs>` ids carry the scene's prefix.
#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    view_box: Option<Rect>,
    id_prefix: String,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Prefixes every `<defs>` id with `prefix`; use one prefix per page section.
    pub(crate) fn set_id_prefix(&mut self, prefix: impl Into<String>) {
        self.id_prefix = prefix.into();
    }

    fn pattern_id(&self, index: usize) -> String {
        if self.id_prefix.is_empty() {
            format!("stripes-{index}")
        } else {
            format!("{}-stripes-{index}", self.id_prefix)
        }
    }

    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id, z_index, new, ..
                } => {
                    self.marks.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.marks.len()
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = match (self.view_box, self.content_bounds()) {
            (Some(a), Some(b)) => a.union(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => Rect::new(0.0, 0.0, 100.0, 100.0),
        };

        let mut ordered: Vec<(&MarkId, &(i32, MarkPayload))> = self.marks.iter().collect();
        ordered.sort_by_key(|(id, (z, _))| (*z, id.0));

        let mut patterns: Vec<(StripePattern, String)> = Vec::new();
        for (_, (_, payload)) in &ordered {
            if let MarkPayload::Rect(RectPayload {
                fill: Fill::Stripes(p),
                ..
            }) = payload
                && !patterns.iter().any(|(q, _)| q == p)
            {
                patterns.push((*p, self.pattern_id(patterns.len())));
            }
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        if !patterns.is_empty() {
            out.push_str("<defs>\n");
            for (p, id) in &patterns {
                write_pattern(&mut out, id, p);
            }
            out.push_str("</defs>\n");
        }

        for (_, (_, payload)) in ordered {
            match payload {
                MarkPayload::Rect(r) => write_rect(&mut out, r, &patterns),
                MarkPayload::Text(t) => write_text(&mut out, t),
                MarkPayload::Path(p) => {
                    let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
                    write_paint_attr(&mut out, "fill", &p.fill);
                    if p.stroke_width > 0.0 {
                        write_paint_attr(&mut out, "stroke", &p.stroke);
                        let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
                    }
                    out.push_str("/>\n");
                }
                MarkPayload::Ring(r) => write_ring(&mut out, r),
            }
        }

        out.push_str("</svg>\n");
        out
    }

    fn content_bounds(&self) -> Option<Rect> {
        let measurer = HeuristicTextMeasurer::default();
        self.marks
            .values()
            .filter_map(|(_, payload)| match payload {
                MarkPayload::Text(t) => Some(text_bounds(t, &measurer)),
                other => other.bounds(),
            })
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(10.0, 10.0))
    }
}

fn text_bounds(t: &TextPayload, measurer: &impl TextMeasurer) -> Rect {
    let size = measurer.measure(&t.text, t.font_size);
    let (x0, x1) = match t.anchor {
        TextAnchor::Start => (t.pos.x, t.pos.x + size.width),
        TextAnchor::Middle => (t.pos.x - size.width * 0.5, t.pos.x + size.width * 0.5),
        TextAnchor::End => (t.pos.x - size.width, t.pos.x),
    };
    let (y0, y1) = match t.baseline {
        TextBaseline::Middle => (t.pos.y - size.height * 0.5, t.pos.y + size.height * 0.5),
        TextBaseline::Alphabetic => (t.pos.y - size.height, t.pos.y),
        TextBaseline::Hanging => (t.pos.y, t.pos.y + size.height),
    };
    Rect::new(x0, y0, x1, y1)
}

fn write_pattern(out: &mut String, id: &str, p: &StripePattern) {
    let (primary, _) = svg_paint(&Brush::Solid(p.primary));
    let (secondary, _) = svg_paint(&Brush::Solid(p.secondary));
    let _ = writeln!(
        out,
        r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="{t}" height="{t}" patternTransform="rotate({a})"><rect width="{w}" height="{t}" fill="{primary}"/><rect x="{w}" width="{w}" height="{t}" fill="{secondary}"/></pattern>"#,
        t = p.tile,
        a = p.angle,
        w = p.stripe_width(),
    );
}

fn write_rect(out: &mut String, r: &RectPayload, patterns: &[(StripePattern, String)]) {
    let radii = r.radii;
    let uniform = radii.top_left == radii.top_right
        && radii.top_left == radii.bottom_right
        && radii.top_left == radii.bottom_left;
    if uniform {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            r.rect.x0,
            r.rect.y0,
            r.rect.width(),
            r.rect.height(),
        );
        if radii.top_left > 0.0 {
            let _ = write!(out, r#" rx="{}""#, radii.top_left);
        }
    } else {
        let path = RoundedRect::from_rect(r.rect, radii).to_path(0.1);
        let _ = write!(out, r#"<path d="{}""#, path.to_svg());
    }
    match &r.fill {
        Fill::Solid(brush) => write_paint_attr(out, "fill", brush),
        Fill::Stripes(p) => match patterns.iter().find(|(q, _)| q == p) {
            Some((_, id)) => {
                let _ = write!(out, r#" fill="url(#{id})""#);
            }
            None => write_paint_attr(out, "fill", &Brush::Solid(p.primary)),
        },
    }
    out.push_str("/>\n");
}

fn write_text(out: &mut String, t: &TextPayload) {
    let baseline = match t.baseline {
        TextBaseline::Middle => "middle",
        TextBaseline::Alphabetic => "alphabetic",
        TextBaseline::Hanging => "hanging",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
        t.pos.x, t.pos.y, t.font_size, baseline
    );
    if t.font_weight != 400 {
        let _ = write!(out, r#" font-weight="{}""#, t.font_weight);
    }
    out.push_str(match t.anchor {
        TextAnchor::Start => r#" text-anchor="start""#,
        TextAnchor::Middle => r#" text-anchor="middle""#,
        TextAnchor::End => r#" text-anchor="end""#,
    });
    write_paint_attr(out, "fill", &t.fill);
    out.push('>');
    out.push_str(&escape_xml(&t.text));
    out.push_str("</text>\n");
}

fn write_ring(out: &mut String, r: &RingPayload) {
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="none""#,
        r.center.x, r.center.y, r.radius
    );
    write_paint_attr(out, "stroke", &r.stroke);
    let _ = write!(
        out,
        r#" stroke-width="{}" stroke-dasharray="{} {}" stroke-dashoffset="{}""#,
        r.stroke_width,
        r.dash_length,
        r.circumference(),
        r.dash_offset
    );
    if r.rotation != 0.0 {
        let _ = write!(
            out,
            r#" transform="rotate({} {} {})""#,
            r.rotation, r.center.x, r.center.y
        );
    }
    out.push_str("/>\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

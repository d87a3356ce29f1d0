use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{LineStrokeStyle, RenderFrame, Renderer, TextHAlign};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Serializes frames into standalone SVG documents.
///
/// The last rendered document is kept until the next `render` call.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    font_family: String,
    document: String,
    frames_rendered: usize,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_owned(),
            document: String::new(),
            frames_rendered: 0,
        }
    }
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_document(&self, frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        write!(
            out,
            r#"<svg xmlns="{SVG_NAMESPACE}" width="{width}" height="{height}" viewBox="0 0 {width} {height}""#
        )?;
        if frame.opacity < 1.0 {
            write!(out, r#" opacity="{}""#, frame.opacity)?;
        }
        out.push('>');

        let clipped: Vec<_> = frame.texts.iter().filter_map(|text| text.clip).collect();
        if !clipped.is_empty() {
            out.push_str("<defs>");
            for (index, clip) in clipped.iter().enumerate() {
                write!(
                    out,
                    r#"<clipPath id="clip-{index}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    clip.x, clip.y, clip.width, clip.height
                )?;
            }
            out.push_str("</defs>");
        }

        for rect in &frame.rects {
            write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                rect.x, rect.y, rect.width, rect.height, rect.fill
            )?;
            write_opacity(&mut out, rect.opacity)?;
            out.push_str("/>");
        }

        for path in &frame.paths {
            write!(out, r#"<path d="{}""#, path.path.to_svg_data())?;
            match path.fill {
                Some(fill) => write!(out, r#" fill="{fill}""#)?,
                None => out.push_str(r#" fill="none""#),
            }
            match path.stroke {
                Some(stroke) => write!(
                    out,
                    r#" stroke="{stroke}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="round""#,
                    path.stroke_width
                )?,
                None => out.push_str(r#" stroke="none""#),
            }
            write_opacity(&mut out, path.opacity)?;
            out.push_str("/>");
        }

        for line in &frame.lines {
            write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
                line.x1, line.y1, line.x2, line.y2, line.color, line.stroke_width
            )?;
            if let LineStrokeStyle::Dashed { on, off } = line.style {
                write!(out, r#" stroke-dasharray="{on},{off}""#)?;
            }
            out.push_str("/>");
        }

        for circle in &frame.circles {
            write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                circle.cx, circle.cy, circle.radius, circle.fill
            )?;
        }

        let mut clip_index = 0;
        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            write!(
                out,
                r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" fill="{}" text-anchor="{anchor}""#,
                text.x,
                text.y,
                escape_xml(&self.font_family),
                text.font_size_px,
                text.color
            )?;
            if text.clip.is_some() {
                write!(out, r##" clip-path="url(#clip-{clip_index})""##)?;
                clip_index += 1;
            }
            write!(out, ">{}</text>", escape_xml(&text.text))?;
        }

        out.push_str("</svg>");
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = self
            .write_document(frame)
            .map_err(|err| ChartError::InvalidData(format!("failed to write svg: {err}")))?;
        self.frames_rendered += 1;
        Ok(())
    }
}

fn write_opacity(out: &mut String, opacity: f64) -> std::fmt::Result {
    if opacity < 1.0 {
        write!(out, r#" opacity="{opacity}""#)?;
    }
    Ok(())
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_xml;

    #[test]
    fn xml_special_characters_are_escaped() {
        assert_eq!(escape_xml("Oil & <Gas>"), "Oil &amp; &lt;Gas&gt;");
        assert_eq!(escape_xml("it's \"ok\""), "it&#39;s &quot;ok&quot;");
    }
}

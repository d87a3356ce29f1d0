use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::{Path, PathCommand};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub paths_drawn: usize,
    pub lines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// This renderer supports two modes:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgba(0.0, 0.0, 0.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the offscreen surface as PNG, e.g. for dashboard exports.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(writer)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color, 1.0);
        context.set_operator(cairo::Operator::Source);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(cairo::Operator::Over);

        // Fully transparent canvas: the chart is in its no-data state.
        if frame.opacity <= 0.0 {
            self.last_stats = CairoRenderStats::default();
            return Ok(());
        }

        let canvas = frame.opacity;
        self.last_stats = CairoRenderStats {
            rects_drawn: draw_rects(context, frame, canvas)?,
            paths_drawn: draw_paths(context, frame, canvas)?,
            lines_drawn: draw_lines(context, frame, canvas)?,
            circles_drawn: draw_circles(context, frame, canvas)?,
            texts_drawn: draw_texts(context, frame, canvas)?,
        };
        Ok(())
    }
}

fn draw_rects(context: &Context, frame: &RenderFrame, canvas: f64) -> ChartResult<usize> {
    for rect in &frame.rects {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        apply_color(context, rect.fill, rect.opacity * canvas);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
    }
    Ok(frame.rects.len())
}

fn trace_path(context: &Context, path: &Path) {
    context.new_path();
    for command in &path.commands {
        match *command {
            PathCommand::MoveTo { x, y } => context.move_to(x, y),
            PathCommand::LineTo { x, y } => context.line_to(x, y),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => context.curve_to(x1, y1, x2, y2, x, y),
            PathCommand::Close => context.close_path(),
        }
    }
}

fn draw_paths(context: &Context, frame: &RenderFrame, canvas: f64) -> ChartResult<usize> {
    for primitive in &frame.paths {
        trace_path(context, &primitive.path);
        let alpha = primitive.opacity * canvas;
        if let Some(fill) = primitive.fill {
            apply_color(context, fill, alpha);
            context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill area band", err))?;
        }
        if let Some(stroke) = primitive.stroke {
            apply_color(context, stroke, alpha);
            context.set_line_width(primitive.stroke_width);
            context.set_line_join(cairo::LineJoin::Round);
            context.set_line_cap(cairo::LineCap::Round);
            context
                .stroke_preserve()
                .map_err(|err| map_backend_error("failed to stroke curve", err))?;
        }
        context.new_path();
    }
    Ok(frame.paths.len())
}

fn draw_lines(context: &Context, frame: &RenderFrame, canvas: f64) -> ChartResult<usize> {
    for line in &frame.lines {
        apply_color(context, line.color, canvas);
        context.set_line_width(line.stroke_width);
        match line.style {
            LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
            LineStrokeStyle::Dashed { on, off } => context.set_dash(&[on, off], 0.0),
        }
        context.move_to(line.x1, line.y1);
        context.line_to(line.x2, line.y2);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke tick or rule", err))?;
    }
    context.set_dash(&[], 0.0);
    Ok(frame.lines.len())
}

fn draw_circles(context: &Context, frame: &RenderFrame, canvas: f64) -> ChartResult<usize> {
    for circle in &frame.circles {
        context.new_path();
        context.arc(circle.cx, circle.cy, circle.radius, 0.0, std::f64::consts::TAU);
        apply_color(context, circle.fill, canvas);
        context
            .fill()
            .map_err(|err| map_backend_error("failed to fill cursor dot", err))?;
    }
    Ok(frame.circles.len())
}

fn draw_texts(context: &Context, frame: &RenderFrame, canvas: f64) -> ChartResult<usize> {
    for text in &frame.texts {
        context
            .save()
            .map_err(|err| map_backend_error("failed to save cairo state", err))?;
        // Treemap labels stay inside their cell.
        if let Some(clip) = text.clip {
            context.rectangle(clip.x, clip.y, clip.width, clip.height);
            context.clip();
        }

        let layout = pangocairo::functions::create_layout(context);
        let font = FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
        layout.set_font_description(Some(&font));
        layout.set_text(&text.text);

        let (text_width, _) = layout.pixel_size();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let x = match text.h_align {
            TextHAlign::Left => text.x,
            TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.x - f64::from(text_width),
        };

        apply_color(context, text.color, canvas);
        context.move_to(x, text.y - baseline);
        pangocairo::functions::show_layout(context, &layout);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore cairo state", err))?;
    }
    Ok(frame.texts.len())
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color, opacity: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * opacity);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}

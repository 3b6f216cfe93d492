//! A surface that records drawing calls instead of producing pixels.

use kinfolk_core::{
    color::Color,
    draw::{StrokeDefinition, TextDefinition},
    geometry::{Bounds, Point, Size},
};

use super::{Resizable, Surface};

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        region: Bounds,
    },
    RoundedRect {
        bounds: Bounds,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<StrokeDefinition>,
    },
    Dot {
        center: Point,
        radius: f32,
        fill: Color,
    },
    Line {
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    QuadraticCurve {
        from: Point,
        control: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    Text {
        position: Point,
        content: String,
        style: TextDefinition,
    },
}

/// A [`Surface`] that keeps a display list of every call it receives.
///
/// `clear` is recorded like any other call; it does not erase earlier
/// commands, so the list is a faithful trace of what the renderer did.
///
/// # Example
///
/// ```
/// # use kinfolk::surface::{DrawCommand, RecordingSurface, Surface};
/// # use kinfolk_core::{color::Color, geometry::{Point, Size}};
/// let mut surface = RecordingSurface::new(Size::new(800.0, 400.0));
/// surface.dot(Point::new(400.0, 40.0), 6.0, Color::default());
/// assert_eq!(surface.dots().count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// All recorded commands, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Bounds of every rounded rectangle (person node) drawn.
    pub fn nodes(&self) -> impl Iterator<Item = Bounds> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::RoundedRect { bounds, .. } => Some(*bounds),
            _ => None,
        })
    }

    /// Endpoints of every straight line drawn.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }

    /// Centers of every junction dot drawn.
    pub fn dots(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Dot { center, .. } => Some(*center),
            _ => None,
        })
    }

    /// Endpoints and control point of every curve drawn.
    pub fn curves(&self) -> impl Iterator<Item = (Point, Point, Point)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::QuadraticCurve {
                from, control, to, ..
            } => Some((*from, *control, *to)),
            _ => None,
        })
    }

    /// Every text line drawn, with its anchor.
    pub fn texts(&self) -> impl Iterator<Item = (Point, &str)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text {
                position, content, ..
            } => Some((*position, content.as_str())),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, region: Bounds) {
        self.commands.push(DrawCommand::Clear { region });
    }

    fn rounded_rect(
        &mut self,
        bounds: Bounds,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<&StrokeDefinition>,
    ) {
        self.commands.push(DrawCommand::RoundedRect {
            bounds,
            radius,
            fill,
            stroke: stroke.cloned(),
        });
    }

    fn dot(&mut self, center: Point, radius: f32, fill: Color) {
        self.commands.push(DrawCommand::Dot {
            center,
            radius,
            fill,
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: &StrokeDefinition) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.clone(),
        });
    }

    fn quadratic_curve(&mut self, from: Point, control: Point, to: Point, stroke: &StrokeDefinition) {
        self.commands.push(DrawCommand::QuadraticCurve {
            from,
            control,
            to,
            stroke: stroke.clone(),
        });
    }

    fn text(&mut self, position: Point, content: &str, style: &TextDefinition) {
        self.commands.push(DrawCommand::Text {
            position,
            content: content.to_string(),
            style: style.clone(),
        });
    }
}

impl Resizable for RecordingSurface {
    fn resize(&mut self, size: Size) {
        self.size = size;
    }
}

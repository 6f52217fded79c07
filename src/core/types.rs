// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// The desired number of samples per letter.
pub const DEFAULT_TARGET_COUNT: usize = 100;

/// Pen width (in canvas units) the capture surface uses when a stroke
/// carries none of its own.
pub const DEFAULT_PEN_WIDTH: f32 = 20.0;

/// A validated dataset label: one uppercase ASCII letter, A through Z.
/// This is the "key" of the whole dataset; every sample belongs to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

impl Letter {
    /// Accepts any ASCII letter and normalizes it to uppercase.
    pub fn new(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Self(c.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// All 26 letters in alphabetical order.
    pub fn all() -> impl Iterator<Item = Letter> {
        ('A'..='Z').map(Letter)
    }
}

impl TryFrom<char> for Letter {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Letter::new(c).ok_or(c)
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> char {
        letter.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single sampled pen position, in the capture surface's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

/// One continuous pen-down-to-pen-up path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<StrokePoint>,
    /// Pen width in canvas units.
    #[serde(default = "default_pen_width")]
    pub width: f32,
}

fn default_pen_width() -> f32 {
    DEFAULT_PEN_WIDTH
}

impl Stroke {
    pub fn new(points: Vec<StrokePoint>) -> Self {
        Self { points, width: DEFAULT_PEN_WIDTH }
    }
}

/// The ink for one letter cell, as exported by the capture surface.
/// This is the interchange object between the drawing UI and the engine;
/// it carries geometry only, no pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeDrawing {
    pub strokes: Vec<Stroke>,
}

impl StrokeDrawing {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    /// True when the drawing contains no ink at all.
    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|s| s.points.is_empty())
    }

    /// Tight bounding box over every stroke point, or None for empty ink.
    pub fn bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for stroke in &self.strokes {
            for p in &stroke.points {
                bounds = Some(match bounds {
                    None => Rect { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y },
                    Some(r) => Rect {
                        min_x: r.min_x.min(p.x),
                        min_y: r.min_y.min(p.y),
                        max_x: r.max_x.max(p.x),
                        max_y: r.max_y.max(p.y),
                    },
                });
            }
        }
        bounds
    }
}

/// An axis-aligned box in capture coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Grows the box by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Rect {
        Rect {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// What the operator is currently asked to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Letter(Letter),
    Word(String),
}

impl Prompt {
    /// The letters a save for this prompt will produce, in order.
    pub fn letters(&self) -> Vec<Letter> {
        match self {
            Prompt::Letter(l) => vec![*l],
            Prompt::Word(w) => w.chars().filter_map(Letter::new).collect(),
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::Letter(l) => write!(f, "{}", l),
            Prompt::Word(w) => write!(f, "{}", w),
        }
    }
}

/// Whether the session requests single letters or whole words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Letter,
    Word,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_accepts_ascii_and_uppercases() {
        assert_eq!(Letter::new('q').map(Letter::as_char), Some('Q'));
        assert_eq!(Letter::new('A').map(Letter::as_char), Some('A'));
        assert_eq!(Letter::new('é'), None);
        assert_eq!(Letter::new('1'), None);
        assert_eq!(Letter::all().count(), 26);
    }

    #[test]
    fn bounds_cover_all_strokes() {
        let drawing = StrokeDrawing::new(vec![
            Stroke::new(vec![
                StrokePoint { x: 10.0, y: 40.0 },
                StrokePoint { x: 30.0, y: 20.0 },
            ]),
            Stroke::new(vec![StrokePoint { x: 50.0, y: 25.0 }]),
        ]);
        let b = drawing.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (10.0, 20.0, 50.0, 40.0));
        assert!(!drawing.is_empty());
    }

    #[test]
    fn empty_drawing_has_no_bounds() {
        let drawing = StrokeDrawing::default();
        assert!(drawing.is_empty());
        assert!(drawing.bounds().is_none());

        // A stroke object with no points is still empty ink.
        let drawing = StrokeDrawing::new(vec![Stroke::new(vec![])]);
        assert!(drawing.is_empty());
        assert!(drawing.bounds().is_none());
    }

    #[test]
    fn drawing_roundtrips_through_json() {
        let drawing = StrokeDrawing::new(vec![Stroke::new(vec![
            StrokePoint { x: 1.5, y: 2.5 },
            StrokePoint { x: 3.0, y: 4.0 },
        ])]);
        let json = serde_json::to_string(&drawing).unwrap();
        let back: StrokeDrawing = serde_json::from_str(&json).unwrap();
        assert_eq!(drawing, back);
    }

    #[test]
    fn stroke_width_defaults_when_absent() {
        let json = r#"{"strokes":[{"points":[{"x":0.0,"y":0.0}]}]}"#;
        let drawing: StrokeDrawing = serde_json::from_str(json).unwrap();
        assert_eq!(drawing.strokes[0].width, DEFAULT_PEN_WIDTH);
    }
}

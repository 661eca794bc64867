//! Display modes: which tips to show and record.
//!
//! Each [`DisplayMode`] maps to a plain handler function that turns a sensor
//! frame into a list of [`Tip`]s.  Track numbers are stable per mode so the
//! recorder can stitch a tip's positions into one curve.

use crate::sensor::{Finger, Pointable, SensorFrame};

/// A tip to draw and record this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Tip {
    pub pointable: Pointable,
    pub label:     String,
    pub track:     usize,
}

pub type TipHandler = fn(&SensorFrame) -> Vec<Tip>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// All five fingertips of every hand; track `5 × hand + finger`.
    #[default]
    Fingertips,
    /// The index finger of every hand; track = hand.
    IndexFingers,
    /// Every tool tip; track = tool.
    Tooltips,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Fingertips,
        DisplayMode::IndexFingers,
        DisplayMode::Tooltips,
    ];

    /// The mode after this one, wrapping around.
    pub fn next(self) -> DisplayMode {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn title(self) -> &'static str {
        match self {
            DisplayMode::Fingertips => "Show Fingertips",
            DisplayMode::IndexFingers => "Show Index Fingers",
            DisplayMode::Tooltips => "Show Tooltips",
        }
    }

    pub fn handler(self) -> TipHandler {
        match self {
            DisplayMode::Fingertips => fingertips,
            DisplayMode::IndexFingers => index_fingers,
            DisplayMode::Tooltips => tooltips,
        }
    }
}

fn fingertips(frame: &SensorFrame) -> Vec<Tip> {
    frame
        .hands
        .iter()
        .enumerate()
        .flat_map(|(i, hand)| {
            Finger::ALL.iter().enumerate().map(move |(j, &finger)| Tip {
                pointable: hand.finger(finger),
                label:     finger.label().to_string(),
                track:     5 * i + j,
            })
        })
        .collect()
}

fn index_fingers(frame: &SensorFrame) -> Vec<Tip> {
    frame
        .hands
        .iter()
        .enumerate()
        .map(|(i, hand)| Tip {
            pointable: hand.finger(Finger::Index),
            label:     hand.side.label().to_string(),
            track:     i,
        })
        .collect()
}

fn tooltips(frame: &SensorFrame) -> Vec<Tip> {
    frame
        .tools
        .iter()
        .enumerate()
        .map(|(i, &tool)| Tip {
            pointable: tool,
            label:     format!("tool {}", i),
            track:     i,
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Sensor → screen mapping
// ════════════════════════════════════════════════════════════════════════════

/// Maps sensor millimetres onto a `width × height` canvas: `x` centred,
/// `y` flipped so up is up, `z` turned into a tip diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TipMapper {
    pub width:  f64,
    pub height: f64,
}

impl TipMapper {
    pub fn screen_x(&self, p: Pointable) -> f64 {
        p.tip[0] as f64 + self.width / 2.0
    }

    pub fn screen_y(&self, p: Pointable) -> f64 {
        self.height - p.tip[1] as f64
    }

    /// Depth −100..100 mm mapped linearly onto a 15..30 px diameter
    /// (not clamped).
    pub fn screen_z(&self, p: Pointable) -> f64 {
        map_range(p.tip[2] as f64, -100.0, 100.0, 15.0, 30.0)
    }

    pub fn screen(&self, p: Pointable) -> [f64; 3] {
        [self.screen_x(p), self.screen_y(p), self.screen_z(p)]
    }
}

fn map_range(v: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

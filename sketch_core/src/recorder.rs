//! Multi-track curve recorder.
//!
//! The recorder keeps a bounded history of frames.  A frame holds at most one
//! point per track; tracks are sparse indices (one per hand, finger or tool)
//! and a frame only stores the tracks actually written.  Each animation tick is bracketed by [`CurveRecorder::begin_record`]
//! and [`CurveRecorder::end_record`], so every track written during the tick
//! lands in the same historical sample.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Number of frames kept when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 1000;

// ════════════════════════════════════════════════════════════════════════════
// Point3
// ════════════════════════════════════════════════════════════════════════════

/// A recorded sample.  `z` is free for whatever the sketch wants to keep
/// alongside the screen position (the leap sketch stores the tip size).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point3 { x, y, z }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// One tick's worth of points, keyed by track.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    tracks: BTreeMap<usize, Point3>,
}

impl Frame {
    /// The point recorded for `track`, if any.
    pub fn get(&self, track: usize) -> Option<Point3> {
        self.tracks.get(&track).copied()
    }

    /// Number of points stored in this frame.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// One past the highest track index written in this frame (saturating).
    pub fn track_span(&self) -> usize {
        self.tracks.keys().next_back().map_or(0, |&t| t.saturating_add(1))
    }

    /// Recorded `(track, point)` pairs in track order.
    pub fn points(&self) -> impl Iterator<Item = (usize, Point3)> + '_ {
        self.tracks.iter().map(|(&t, &p)| (t, p))
    }

    fn set(&mut self, track: usize, point: Point3) {
        self.tracks.insert(track, point);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CurveRecorder
// ════════════════════════════════════════════════════════════════════════════

/// Bounded FIFO of recorded frames plus the frame currently being written.
#[derive(Debug)]
pub struct CurveRecorder {
    history:  VecDeque<Frame>,
    capacity: usize,
    active:   Option<Frame>,
}

impl Default for CurveRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveRecorder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A recorder keeping at most `capacity` frames (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        CurveRecorder {
            history: VecDeque::with_capacity(capacity),
            capacity,
            active: None,
        }
    }

    /// Open a new, empty frame.
    pub fn begin_record(&mut self) -> Result<(), RecordError> {
        if self.active.is_some() {
            return Err(RecordError::FrameAlreadyOpen);
        }
        self.active = Some(Frame::default());
        Ok(())
    }

    /// Write `point` into the open frame at `track`.  A second write to the
    /// same track in the same frame replaces the first.
    pub fn add_point(&mut self, point: impl Into<Point3>, track: usize) -> Result<(), RecordError> {
        let frame = self.active.as_mut().ok_or(RecordError::NoActiveFrame)?;
        frame.set(track, point.into());
        Ok(())
    }

    /// Close the open frame and append it to the history, dropping the
    /// oldest frame if the history is full.
    pub fn end_record(&mut self) -> Result<(), RecordError> {
        let frame = self.active.take().ok_or(RecordError::NoActiveFrame)?;
        if self.history.len() >= self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(frame);
        Ok(())
    }

    /// Every frame's value for `track`, oldest first.  `None` marks frames in
    /// which the track was not observed.
    pub fn curve(&self, track: usize) -> Vec<Option<Point3>> {
        self.history.iter().map(|f| f.get(track)).collect()
    }

    /// The curve for `track` split at gaps: each inner vector is a run of
    /// consecutively observed points.  Empty runs are never returned.
    pub fn polylines(&self, track: usize) -> Vec<Vec<Point3>> {
        let mut runs = Vec::new();
        let mut run  = Vec::new();
        for entry in self.history.iter().map(|f| f.get(track)) {
            match entry {
                Some(p) => run.push(p),
                None if !run.is_empty() => runs.push(std::mem::take(&mut run)),
                None => {}
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        runs
    }

    /// Serialise the curve for `track` as a JSON array (`null` for gaps).
    pub fn curve_json(&self, track: usize) -> serde_json::Result<String> {
        serde_json::to_string(&self.curve(track))
    }

    /// Drop the whole history.  An open frame stays open.
    pub fn reset(&mut self) {
        tracing::debug!(frames = self.history.len(), "recorder reset");
        self.history.clear();
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// One past the highest track index present anywhere in the history.
    pub fn track_count(&self) -> usize {
        self.history.iter().map(Frame::track_span).max().unwrap_or(0)
    }

    /// Recorded frames, oldest first.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.history.iter()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

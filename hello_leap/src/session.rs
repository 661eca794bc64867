//! Sketch state: the recorder, the display mode and the latest sensor frame.
//!
//! `Session` is owned by the render loop; nothing here is global.  Each frame
//! it opens a recording frame, draws the recorded trails, draws and records
//! the tips picked by the current [`DisplayMode`], and commits the frame.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use sketch_canvas::{Align, Canvas, Input, Rgba, Sketch, StrokeStyle};
use sketch_core::{Affine, CurveRecorder, Point, DEFAULT_CAPACITY};

use crate::display::{DisplayMode, Tip, TipMapper};
use crate::sensor::{SensorFrame, SimInput};

/// Number of recorded tracks drawn as trails.
pub const MAX_TRAILS: usize = 10;

const TIP_FILL:   Rgba = Rgba::new(255, 0, 0, 100);
const TITLE_FILL: Rgba = Rgba::new(0, 0, 0, 30);

// ════════════════════════════════════════════════════════════════════════════
// Config
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width:      usize,
    pub height:     usize,
    /// Frames kept by the recorder.
    pub capacity:   usize,
    /// Tracks drawn as trails.
    pub max_trails: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width:      1024,
            height:     768,
            capacity:   DEFAULT_CAPACITY,
            max_trails: MAX_TRAILS,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

pub struct Session {
    rec:        CurveRecorder,
    mode:       DisplayMode,
    drawing:    bool,
    max_trails: usize,

    frames:     Receiver<SensorFrame>,
    latest:     SensorFrame,
    /// Present when frames come from the simulator.
    sim_tx:     Option<Sender<SimInput>>,
}

impl Session {
    pub fn new(
        cfg: &Config,
        frames: Receiver<SensorFrame>,
        sim_tx: Option<Sender<SimInput>>,
    ) -> Self {
        Session {
            rec:        CurveRecorder::with_capacity(cfg.capacity),
            mode:       DisplayMode::default(),
            drawing:    true,
            max_trails: cfg.max_trails,
            frames,
            latest:     SensorFrame::default(),
            sim_tx,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn recorder(&self) -> &CurveRecorder {
        &self.rec
    }

    pub fn latest_frame(&self) -> &SensorFrame {
        &self.latest
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: char) {
        match key {
            // next mode, fresh trails
            ' ' => {
                self.rec.reset();
                self.mode = self.mode.next();
                tracing::info!(mode = self.mode.title(), "display mode");
            }
            'd' => {
                self.drawing = !self.drawing;
                tracing::info!(drawing = self.drawing, "trail display toggled");
            }
            'c' => match self.rec.curve_json(0) {
                Ok(json) => tracing::info!(track = 0, curve = %json, "recorded curve"),
                Err(e) => tracing::warn!(error = %e, "could not serialise curve"),
            },
            'r' => {
                self.rec.reset();
                tracing::info!("trails reset");
            }
            _ => match serde_json::to_string(&self.latest) {
                Ok(json) => tracing::info!(frame = %json, "sensor frame"),
                Err(e) => tracing::warn!(error = %e, "could not serialise frame"),
            },
        }
    }

    // ── per-frame ─────────────────────────────────────────────────────────

    /// Keep the newest frame waiting on the channel.
    fn drain_frames(&mut self) {
        loop {
            match self.frames.try_recv() {
                Ok(frame) => self.latest = frame,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.latest.hands.is_empty() || !self.latest.tools.is_empty() {
                        tracing::warn!("sensor disconnected");
                        self.latest = SensorFrame::default();
                    }
                    break;
                }
            }
        }
    }

    /// Draw and record one frame against `frame`.
    pub fn render(&mut self, canvas: &mut Canvas, frame: &SensorFrame) {
        if let Err(e) = self.rec.begin_record() {
            tracing::warn!(error = %e, "begin_record");
        }

        canvas.background(Rgba::WHITE);

        if self.drawing {
            for track in 0..self.max_trails {
                self.draw_trail(canvas, track);
            }
        }

        let mapper = TipMapper {
            width:  canvas.width() as f64,
            height: canvas.height() as f64,
        };
        for tip in (self.mode.handler())(frame) {
            draw_tip(canvas, &mapper, &tip);
            self.save_tip(&mapper, &tip);
        }

        show_title(canvas, self.mode.title());

        if let Err(e) = self.rec.end_record() {
            tracing::warn!(error = %e, "end_record");
        }
    }

    fn save_tip(&mut self, mapper: &TipMapper, tip: &Tip) {
        if let Err(e) = self.rec.add_point(mapper.screen(tip.pointable), tip.track) {
            tracing::warn!(error = %e, track = tip.track, "add_point");
        }
    }

    /// One polyline per run of consecutive observations.
    fn draw_trail(&self, canvas: &mut Canvas, track: usize) {
        let style = StrokeStyle::new(Rgba::BLACK, 1.0);
        for run in self.rec.polylines(track) {
            let points: Vec<Point> = run.iter().map(|p| Point::new(p.x, p.y)).collect();
            canvas.polyline(Affine::IDENTITY, &points, style);
        }
    }
}

impl Sketch for Session {
    fn draw(&mut self, canvas: &mut Canvas, input: &Input) {
        if let Some(tx) = &self.sim_tx {
            let _ = tx.send(SimInput::Pointer {
                x:       input.mouse.x,
                y:       input.mouse.y,
                width:   canvas.width() as f64,
                height:  canvas.height() as f64,
                pressed: input.mouse_pressed,
            });
        }
        self.drain_frames();
        let frame = std::mem::take(&mut self.latest);
        self.render(canvas, &frame);
        self.latest = frame;
    }

    fn key_typed(&mut self, key: char, _input: &Input) {
        self.handle_key(key);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(tx) = &self.sim_tx {
            let _ = tx.send(SimInput::Quit);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Drawing helpers
// ════════════════════════════════════════════════════════════════════════════

fn draw_tip(canvas: &mut Canvas, mapper: &TipMapper, tip: &Tip) {
    let [x, y, z] = mapper.screen(tip.pointable);
    canvas.ellipse(Affine::IDENTITY, Point::new(x, y), z, z, Some(TIP_FILL), None);
    canvas.text(
        Affine::IDENTITY,
        &tip.label,
        Point::new(x + 15.0, y + 5.0),
        10.0,
        Rgba::BLACK,
        Align::Left,
    );
}

fn show_title(canvas: &mut Canvas, title: &str) {
    let x = canvas.width() as f64 / 2.0;
    canvas.text(Affine::IDENTITY, title, Point::new(x, 100.0), 50.0, TITLE_FILL, Align::Center);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{Hand, HandSide, Pointable};
    use std::sync::mpsc;

    fn session() -> (Session, Sender<SensorFrame>) {
        let (tx, rx) = mpsc::channel();
        let cfg = Config { width: 200, height: 200, capacity: 5, max_trails: MAX_TRAILS };
        (Session::new(&cfg, rx, None), tx)
    }

    fn one_hand(x: f32) -> SensorFrame {
        let mut fingers = [Pointable::default(); 5];
        for (j, f) in fingers.iter_mut().enumerate() {
            *f = Pointable::at(x + 10.0 * j as f32, 100.0, 0.0);
        }
        SensorFrame {
            id:    1,
            hands: vec![Hand { side: HandSide::Right, fingers }],
            tools: vec![Pointable::at(x, 50.0, 0.0)],
        }
    }

    #[test]
    fn every_render_commits_one_frame() {
        let (mut s, _tx) = session();
        let mut canvas = Canvas::new(200, 200);
        s.render(&mut canvas, &one_hand(0.0));
        s.render(&mut canvas, &SensorFrame::default());
        s.render(&mut canvas, &one_hand(5.0));

        let rec = s.recorder();
        assert_eq!(rec.len(), 3);
        assert!(!rec.is_recording());
        let curve = rec.curve(1);
        assert!(curve[0].is_some() && curve[1].is_none() && curve[2].is_some());
        // index finger tip (x = 10) mapped to the canvas centre + 10
        assert_eq!(curve[0].map(|p| p.x), Some(110.0));
        assert_eq!(curve[0].map(|p| p.y), Some(100.0));
    }

    #[test]
    fn history_is_bounded_by_config() {
        let (mut s, _tx) = session();
        let mut canvas = Canvas::new(200, 200);
        for i in 0..12 {
            s.render(&mut canvas, &one_hand(i as f32));
        }
        assert_eq!(s.recorder().len(), 5);
    }

    #[test]
    fn space_resets_and_switches_mode() {
        let (mut s, _tx) = session();
        let mut canvas = Canvas::new(200, 200);
        s.render(&mut canvas, &one_hand(0.0));
        s.handle_key(' ');
        assert_eq!(s.mode(), DisplayMode::IndexFingers);
        assert!(s.recorder().is_empty());
    }

    #[test]
    fn tooltip_mode_records_tools() {
        let (mut s, _tx) = session();
        s.handle_key(' ');
        s.handle_key(' ');
        assert_eq!(s.mode(), DisplayMode::Tooltips);
        let mut canvas = Canvas::new(200, 200);
        s.render(&mut canvas, &one_hand(-20.0));
        assert_eq!(s.recorder().curve(0)[0].map(|p| p.x), Some(80.0));
        assert_eq!(s.recorder().track_count(), 1);
    }

    #[test]
    fn toggles_and_logging_keys() {
        let (mut s, _tx) = session();
        s.handle_key('d');
        assert!(!s.is_drawing());
        s.handle_key('d');
        assert!(s.is_drawing());

        let mut canvas = Canvas::new(200, 200);
        s.render(&mut canvas, &one_hand(0.0));
        s.handle_key('c');
        s.handle_key('x');
        assert_eq!(s.recorder().len(), 1);
        s.handle_key('r');
        assert!(s.recorder().is_empty());
    }

    #[test]
    fn draw_keeps_latest_frame_from_channel() {
        let (mut s, tx) = session();
        let mut older = one_hand(0.0);
        older.id = 1;
        let mut newer = one_hand(30.0);
        newer.id = 2;
        tx.send(older).unwrap();
        tx.send(newer).unwrap();

        let mut canvas = Canvas::new(200, 200);
        s.draw(&mut canvas, &Input::default());
        assert_eq!(s.latest_frame().id, 2);
        assert_eq!(s.recorder().curve(0)[0].map(|p| p.x), Some(130.0));
    }

    #[test]
    fn quiet_channel_redraws_last_frame() {
        let (mut s, tx) = session();
        tx.send(one_hand(30.0)).unwrap();

        let mut canvas = Canvas::new(200, 200);
        for _ in 0..3 {
            s.draw(&mut canvas, &Input::default());
        }
        assert_eq!(s.latest_frame(), &one_hand(30.0));
        let xs: Vec<_> = s.recorder().curve(0).iter().map(|p| p.map(|p| p.x)).collect();
        assert_eq!(xs, vec![Some(130.0); 3]);
    }

    #[test]
    fn trails_are_drawn_in_black() {
        let (mut s, _tx) = session();
        let mut canvas = Canvas::new(200, 200);
        s.render(&mut canvas, &one_hand(-50.0));
        s.render(&mut canvas, &one_hand(50.0));
        s.render(&mut canvas, &SensorFrame::default());
        // thumb trail from x = 50 to x = 150 at y = 100
        assert_eq!(canvas.pixel(100, 100), Some(Rgba::BLACK.to_argb()));
    }
}

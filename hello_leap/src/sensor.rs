//! Motion-sensor frames from LeapMotion hardware or a mouse-driven simulator.
//!
//! The public interface is [`SensorFrame`] delivered over a `mpsc` channel.
//! The sketch doesn't need to know whether frames came from real hardware or
//! the simulator.
//!
//! Sensor coordinates follow the LeapMotion convention: millimetres, origin at
//! the device, `x` to the right, `y` up, `z` toward the user.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use serde::Serialize;

// ════════════════════════════════════════════════════════════════════════════
// SensorFrame
// ════════════════════════════════════════════════════════════════════════════

/// Anything with a tip: a finger or a tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Pointable {
    /// Tip position in millimetres.
    pub tip: [f32; 3],
}

impl Pointable {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Pointable { tip: [x, y, z] }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn label(self) -> &'static str {
        match self {
            HandSide::Left => "left",
            HandSide::Right => "right",
        }
    }
}

/// Fingers in the order the sensor reports them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index finger",
            Finger::Middle => "middle finger",
            Finger::Ring => "ring finger",
            Finger::Pinky => "pinky",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hand {
    pub side:    HandSide,
    /// Indexed by [`Finger`] order.
    pub fingers: [Pointable; 5],
}

impl Hand {
    pub fn finger(&self, finger: Finger) -> Pointable {
        self.fingers[finger as usize]
    }
}

/// Everything the sensor saw in one tracking frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SensorFrame {
    pub id:    u64,
    pub hands: Vec<Hand>,
    pub tools: Vec<Pointable>,
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource: one interface for hardware and simulation
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`SensorFrame`]s over a channel.
pub trait FrameSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<SensorFrame>);
}

/// Spawn a frame source on its own thread and return the receiving end.
pub fn spawn_frame_source<S: FrameSource>(source: S) -> Receiver<SensorFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapFrameSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Frame source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// LeapC no longer tracks tools, so hardware frames carry hands only.
#[cfg(feature = "leap")]
pub struct LeapFrameSource;

#[cfg(feature = "leap")]
impl FrameSource for LeapFrameSource {
    fn run(self: Box<Self>, tx: Sender<SensorFrame>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = ?e, "failed to create LeapC connection");
                return;
            }
        };
        if let Err(e) = connection.open() {
            tracing::error!(error = ?e, "failed to open LeapMotion device");
            return;
        }
        tracing::info!("LeapMotion connection open");

        let mut id = 0u64;
        loop {
            let msg = match connection.poll(100) {
                Ok(m) => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands = frame
                    .hands()
                    .filter_map(|h| {
                        let side = if h.hand_type() == HandType::Left {
                            HandSide::Left
                        } else {
                            HandSide::Right
                        };
                        let tips: Vec<Pointable> = h
                            .digits()
                            .map(|d| {
                                let t = d.distal().next_joint();
                                Pointable::at(t.x, t.y, t.z)
                            })
                            .collect();
                        let fingers: [Pointable; 5] = tips.try_into().ok()?;
                        Some(Hand { side, fingers })
                    })
                    .collect();

                id += 1;
                if tx.send(SensorFrame { id, hands, tools: Vec::new() }).is_err() {
                    return;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource: mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the sketch window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Current pointer position in canvas pixels and the canvas size.
    Pointer {
        x:       f64,
        y:       f64,
        width:   f64,
        height:  f64,
        pressed: bool,
    },
    Quit,
}

/// Frame source driven by [`SimInput`] events from the sketch window.
///
/// The right hand and a tool follow the pointer.  While the button is held a
/// left hand and a second tool appear, mirrored across the vertical centre
/// line.  Fingertips bob in depth so the tip size changes.
pub struct SimFrameSource {
    pub rx: Receiver<SimInput>,
}

// Right-hand fingertip offsets from the palm, in millimetres.
const FINGER_OFFSETS: [(f32, f32); 5] = [
    (-60.0, 20.0),
    (-25.0, 70.0),
    (0.0, 80.0),
    (25.0, 72.0),
    (50.0, 55.0),
];

impl SimFrameSource {
    /// Build the frame for one pointer sample.  `id` also drives the depth
    /// animation.
    pub fn synthesize(id: u64, input: SimInput) -> Option<SensorFrame> {
        let SimInput::Pointer { x, y, width, height, pressed } = input else {
            return None;
        };
        // invert the sketch's sensor → screen mapping
        let palm_x = (x - width / 2.0) as f32;
        let palm_y = (height - y) as f32 - 60.0;
        let phase = id as f32 * 0.08;

        let hand = |side: HandSide, cx: f32| {
            let mirror = if side == HandSide::Left { -1.0 } else { 1.0 };
            let mut fingers = [Pointable::default(); 5];
            for (i, (dx, dy)) in FINGER_OFFSETS.iter().enumerate() {
                let z = 80.0 * (phase + i as f32 * 0.7).sin();
                fingers[i] = Pointable::at(cx + mirror * dx, palm_y + dy, z);
            }
            Hand { side, fingers }
        };

        let tool = |cx: f32| Pointable::at(cx, palm_y + 60.0, 60.0 * phase.cos());

        let mut frame = SensorFrame {
            id,
            hands: vec![hand(HandSide::Right, palm_x)],
            tools: vec![tool(palm_x)],
        };
        if pressed {
            frame.hands.push(hand(HandSide::Left, -palm_x));
            frame.tools.push(tool(-palm_x));
        }
        Some(frame)
    }
}

impl FrameSource for SimFrameSource {
    fn run(self: Box<Self>, tx: Sender<SensorFrame>) {
        let mut id = 0u64;
        for input in self.rx {
            if input == SimInput::Quit {
                return;
            }
            id += 1;
            if let Some(frame) = Self::synthesize(id, input) {
                if tx.send(frame).is_err() {
                    return;
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

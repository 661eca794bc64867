//! # hello_leap
//!
//! Shows how to get and record curves with a LeapMotion controller.
//! Fingertip (or tool tip) positions are drawn every frame and recorded per
//! track; the recorded history is drawn back as trails, broken wherever a tip
//! went missing.
//!
//! ## Keys
//!
//! | Key | Action |
//! |---|---|
//! | `Space` | Reset trails and switch display mode |
//! | `d` | Toggle trail display |
//! | `c` | Log the recorded curve of track 0 |
//! | `r` | Reset trails |
//! | any other | Log the current sensor frame |
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: the mouse drives a right hand and a
//!   tool; holding the button adds a mirrored left hand and a second tool.
//! * `leap`: **Hardware mode**: polls a real LeapMotion controller via LeapC.

pub mod app;
pub mod display;
pub mod sensor;
pub mod session;

//! Wiring: frame source, window and session.

use std::sync::mpsc;

use sketch_canvas::SketchWindow;

use crate::sensor::{spawn_frame_source, SimFrameSource, SimInput};
use crate::session::{Config, Session};

/// Where sensor frames come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Source {
    #[default]
    Simulated,
    #[cfg(feature = "leap")]
    Leap,
}

/// Run the sketch until the window closes.
pub fn run(cfg: Config, source: Source) -> Result<(), sketch_canvas::CanvasError> {
    let (frames, sim_tx) = match source {
        Source::Simulated => {
            let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
            (spawn_frame_source(SimFrameSource { rx: sim_rx }), Some(sim_tx))
        }
        #[cfg(feature = "leap")]
        Source::Leap => (spawn_frame_source(crate::sensor::LeapFrameSource), None),
    };
    tracing::info!(?source, capacity = cfg.capacity, "starting hello_leap");

    let mut window = SketchWindow::new("Hello Leap", cfg.width, cfg.height)?;
    let mut session = Session::new(&cfg, frames, sim_tx);
    sketch_canvas::run(&mut window, &mut session)
}

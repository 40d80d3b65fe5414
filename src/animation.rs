use crate::context::SessionState;
use crate::output::OutputRecord;
use crate::render::Renderer;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Lines shown during one tick of a flipbook.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AnimationFrame {
    pub lines: Vec<String>,
}

impl AnimationFrame {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self { lines: lines.into_iter().map(Into::into).collect() }
    }

    fn as_record(&self) -> OutputRecord {
        OutputRecord::text(self.lines.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnimationSequence {
    pub frames: Vec<AnimationFrame>,
}

impl AnimationSequence {
    pub fn new(frames: Vec<AnimationFrame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

pub enum AnimationStep {
    /// a frame went out; wait this long before the next one
    Frame(Duration),
    /// playback is over, this is the session holding the final frame
    Finished(SessionState),
}

/// Plays a sequence once, one frame per `advance` call.
///
/// Each frame is derived from the snapshot the animation started on, so the
/// log ends up with a single record for the whole playback.
pub struct Animation {
    sequence: Arc<AnimationSequence>,
    base: SessionState,
    current: SessionState,
    next_frame: usize,
    interval: Duration,
}

impl Animation {
    pub fn start(sequence: Arc<AnimationSequence>, base: SessionState, interval: Duration) -> Self {
        info!(frames = sequence.len(), ?interval, "animation started");
        Self {
            sequence,
            current: base.clone(),
            base,
            next_frame: 0,
            interval,
        }
    }

    pub fn advance(&mut self, renderer: &mut Renderer) -> AnimationStep {
        let Some(frame) = self.sequence.frames.get(self.next_frame) else {
            // nothing was played, so there is no frame record to count
            renderer.release_input();
            return AnimationStep::Finished(self.current.clone());
        };

        // replace the previous frame in place
        if self.next_frame > 0 {
            renderer.drop_lines(frame.lines.len());
        }
        self.current = self.base.with_appended([frame.as_record()]);
        renderer.render(self.current.outputs(), true);
        self.next_frame += 1;

        if self.next_frame == self.sequence.len() {
            renderer.finish_animation();
            info!("animation finished");
            AnimationStep::Finished(self.current.clone())
        } else {
            AnimationStep::Frame(self.interval)
        }
    }
}

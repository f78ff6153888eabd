//! Sprite-sheet animation timing.
//!
//! The clock only advances the column (`frame_x`) inside whatever row and
//! frame count the owner configured; it knows nothing about player states.

use serde::{Deserialize, Serialize};

/// Source rectangle in a sprite sheet and where to draw it.
///
/// Produced for the renderer every frame; nothing in this crate draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteFrame {
    /// Left edge of the source rectangle in the sheet
    pub source_x: f32,
    /// Top edge of the source rectangle in the sheet
    pub source_y: f32,
    /// Frame width (source and destination)
    pub width: f32,
    /// Frame height (source and destination)
    pub height: f32,
    /// Destination left edge in the world
    pub dest_x: f32,
    /// Destination top edge in the world
    pub dest_y: f32,
    /// Draw the bounding-box outline (debug mode)
    pub debug_outline: bool,
}

/// Outcome of one [`AnimationClock::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameAdvance {
    /// The column index changed this tick
    pub advanced: bool,
    /// The column wrapped from `max_frame` back to 0
    pub wrapped: bool,
}

/// Fixed-rate sprite frame clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClock {
    /// Current column in the sprite sheet
    frame_x: u32,
    /// Current row in the sprite sheet
    frame_y: u32,
    /// Last valid column index for the current row
    max_frame: u32,
    /// Milliseconds per frame
    frame_interval: f32,
    /// Milliseconds accumulated since the last advance
    frame_timer: f32,
}

impl AnimationClock {
    /// Create a clock running at `fps` frames per second on row 0.
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not strictly positive.
    #[must_use]
    pub fn new(fps: f32, max_frame: u32) -> Self {
        assert!(fps > 0.0 && fps.is_finite(), "animation fps must be positive, got {fps}");
        Self {
            frame_x: 0,
            frame_y: 0,
            max_frame,
            frame_interval: 1000.0 / fps,
            frame_timer: 0.0,
        }
    }

    /// Switch to another sprite row, restarting at column 0.
    pub fn set_row(&mut self, frame_y: u32, max_frame: u32) {
        self.frame_y = frame_y;
        self.max_frame = max_frame;
        self.frame_x = 0;
    }

    /// Accumulate `delta_ms`; advance one column once a full interval has
    /// elapsed.
    pub fn tick(&mut self, delta_ms: f32) -> FrameAdvance {
        self.frame_timer += delta_ms;
        if self.frame_timer < self.frame_interval {
            return FrameAdvance::default();
        }

        self.frame_timer = 0.0;
        if self.frame_x < self.max_frame {
            self.frame_x += 1;
            FrameAdvance {
                advanced: true,
                wrapped: false,
            }
        } else {
            self.frame_x = 0;
            FrameAdvance {
                advanced: true,
                wrapped: true,
            }
        }
    }

    /// Whether the last column of the row is showing.
    #[must_use]
    pub const fn on_last_frame(&self) -> bool {
        self.frame_x >= self.max_frame
    }

    /// Current column.
    #[must_use]
    pub const fn frame_x(&self) -> u32 {
        self.frame_x
    }

    /// Current row.
    #[must_use]
    pub const fn frame_y(&self) -> u32 {
        self.frame_y
    }

    /// Last column index of the current row.
    #[must_use]
    pub const fn max_frame(&self) -> u32 {
        self.max_frame
    }

    /// Milliseconds per frame.
    #[must_use]
    pub const fn frame_interval(&self) -> f32 {
        self.frame_interval
    }

    /// Source/destination rectangle for a sheet whose cells are
    /// `width` x `height`, drawn with its top-left corner at `dest_x, dest_y`.
    #[must_use]
    pub fn sprite_frame(
        &self,
        width: f32,
        height: f32,
        dest_x: f32,
        dest_y: f32,
        debug_outline: bool,
    ) -> SpriteFrame {
        SpriteFrame {
            source_x: self.frame_x as f32 * width,
            source_y: self.frame_y as f32 * height,
            width,
            height,
            dest_x,
            dest_y,
            debug_outline,
        }
    }

    /// Milliseconds accumulated toward the next frame.
    #[must_use]
    pub const fn frame_timer(&self) -> f32 {
        self.frame_timer
    }
}

//! Animation Playback

use crate::error::{AnimError, Result};
use crate::keyframes::{KeyframeList, WINDOW_LEN};
use rigid::geometry::RigidTransform;
use rigid::interpolation::catmull_rom;
use rigid::math::{clamp, Float};

/// Default time between keyframes in milliseconds.
pub const DEFAULT_MS_BETWEEN_KEYFRAMES: u32 = 2000;

/// Shortest time between keyframes in milliseconds.
pub const MIN_MS_BETWEEN_KEYFRAMES: u32 = 100;

/// Longest time between keyframes in milliseconds.
pub const MAX_MS_BETWEEN_KEYFRAMES: u32 = 10000;

/// Change of the time between keyframes per speed adjustment.
pub const MS_BETWEEN_KEYFRAMES_STEP: u32 = 100;

/// Default number of frames rendered per second of playback.
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;

/// Lowest playback frame rate.
pub const MIN_FRAMES_PER_SECOND: u32 = 1;

/// Highest playback frame rate; frames must be at least 1 ms apart.
pub const MAX_FRAMES_PER_SECOND: u32 = 1000;

/// Fewest keyframes that can be played. The first and last keyframes only
/// shape the curve.
pub const MIN_KEYFRAMES_TO_PLAY: usize = WINDOW_LEN;

/// Playback speed settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaybackOptions {
    ms_between_keyframes: u32,
    frames_per_second: u32,
}

impl PlaybackOptions {
    /// Create playback options. Out of range values are clamped.
    ///
    /// * `ms_between_keyframes` - Time between keyframes in milliseconds.
    /// * `frames_per_second`    - Frames rendered per second.
    pub fn new(ms_between_keyframes: u32, frames_per_second: u32) -> Self {
        let ms = clamp(
            ms_between_keyframes,
            MIN_MS_BETWEEN_KEYFRAMES,
            MAX_MS_BETWEEN_KEYFRAMES,
        );
        if ms != ms_between_keyframes {
            warn!(
                "{} ms between keyframes out of range; using {} ms",
                ms_between_keyframes, ms
            );
        }

        let fps = clamp(frames_per_second, MIN_FRAMES_PER_SECOND, MAX_FRAMES_PER_SECOND);
        if fps != frames_per_second {
            warn!(
                "{} frames per second out of range; using {}",
                frames_per_second, fps
            );
        }

        Self {
            ms_between_keyframes: ms,
            frames_per_second: fps,
        }
    }

    /// Returns the time between keyframes in milliseconds.
    pub fn ms_between_keyframes(&self) -> u32 {
        self.ms_between_keyframes
    }

    /// Returns the number of frames rendered per second.
    pub fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Returns the time between rendered frames in milliseconds.
    pub fn frame_interval_ms(&self) -> u32 {
        1000 / self.frames_per_second
    }

    /// Shortens the time between keyframes by one step and returns it.
    pub fn faster(&mut self) -> u32 {
        self.ms_between_keyframes = self
            .ms_between_keyframes
            .saturating_sub(MS_BETWEEN_KEYFRAMES_STEP)
            .max(MIN_MS_BETWEEN_KEYFRAMES);
        info!("{} ms between keyframes", self.ms_between_keyframes);
        self.ms_between_keyframes
    }

    /// Lengthens the time between keyframes by one step and returns it.
    pub fn slower(&mut self) -> u32 {
        self.ms_between_keyframes = (self.ms_between_keyframes + MS_BETWEEN_KEYFRAMES_STEP)
            .min(MAX_MS_BETWEEN_KEYFRAMES);
        info!("{} ms between keyframes", self.ms_between_keyframes);
        self.ms_between_keyframes
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MS_BETWEEN_KEYFRAMES, DEFAULT_FRAMES_PER_SECOND)
    }
}

/// The state of the scene at some time during playback.
#[derive(Clone, Debug, PartialEq)]
pub enum Playback {
    /// Interpolated poses, one per transform node.
    Frame(Vec<RigidTransform>),

    /// The end was reached; the scene rests at this keyframe.
    Finished(usize),
}

/// Plays a keyframe list back as a Catmull-Rom spline per node.
#[derive(Clone, Debug, Default)]
pub struct Animator {
    /// Speed settings.
    pub options: PlaybackOptions,

    /// Set while playing; clearing it cancels playback.
    playing: bool,

    /// Playback clock in milliseconds.
    elapsed_ms: u64,
}

impl Animator {
    /// Create an animator.
    ///
    /// * `options` - Speed settings.
    pub fn new(options: PlaybackOptions) -> Self {
        Self {
            options,
            playing: false,
            elapsed_ms: 0,
        }
    }

    /// Returns `true` while playing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Returns the playback clock in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Returns the time between rendered frames in milliseconds.
    pub fn frame_interval_ms(&self) -> u32 {
        self.options.frame_interval_ms()
    }

    /// Starts playback from the beginning.
    ///
    /// * `len` - Number of keyframes.
    pub fn start(&mut self, len: usize) -> Result<()> {
        if len < MIN_KEYFRAMES_TO_PLAY {
            return Err(AnimError::TooFewKeyframes {
                required: MIN_KEYFRAMES_TO_PLAY,
                found: len,
            });
        }
        self.playing = true;
        self.elapsed_ms = 0;
        info!("Playing animation of {} keyframes", len);
        Ok(())
    }

    /// Stops playback.
    pub fn stop(&mut self) {
        if self.playing {
            info!("Stopping animation at {} ms", self.elapsed_ms);
        }
        self.playing = false;
    }

    /// Advances the playback clock and returns the state of the scene at the
    /// new time. Playback stops when the end is reached.
    ///
    /// * `keyframes` - The keyframes.
    /// * `ms`        - Milliseconds to advance the clock by.
    pub fn advance(&mut self, keyframes: &KeyframeList, ms: u64) -> Result<Playback> {
        if !self.playing {
            return Err(AnimError::NotPlaying);
        }
        self.elapsed_ms += ms;
        let state = self.sample(keyframes, self.elapsed_ms)?;
        if let Playback::Finished(i) = state {
            self.playing = false;
            info!("Finished playing animation; now at keyframe {}", i);
        }
        Ok(state)
    }

    /// Returns the state of the scene `ms` milliseconds into playback.
    ///
    /// Keyframe `i + 1` is reached at `i * ms_between_keyframes`. Time `t` in
    /// keyframe units lies between keyframes `floor(t) + 1` and
    /// `floor(t) + 2`. Playback ends at the second to last keyframe.
    ///
    /// * `keyframes` - The keyframes.
    /// * `ms`        - Time since the start of playback in milliseconds.
    pub fn sample(&self, keyframes: &KeyframeList, ms: u64) -> Result<Playback> {
        let len = keyframes.len();
        if len < MIN_KEYFRAMES_TO_PLAY {
            return Err(AnimError::TooFewKeyframes {
                required: MIN_KEYFRAMES_TO_PLAY,
                found: len,
            });
        }

        let t = ms as Float / self.options.ms_between_keyframes() as Float;
        if t >= (len - 3) as Float {
            return Ok(Playback::Finished(len - 2));
        }

        let i = t.floor();
        let [c0, c1, c2, c3] = keyframes.window(i as usize)?;
        let n = c1.len();
        for c in [c0, c2, c3] {
            if c.len() != n {
                return Err(AnimError::NodeCountMismatch {
                    expected: n,
                    actual: c.len(),
                });
            }
        }

        let s = t - i;
        debug!("Sampling keyframes {}..{} at {:.3}", i, i + 3.0, s);
        Ok(Playback::Frame(
            (0..n)
                .map(|k| catmull_rom(&c0[k], &c1[k], &c2[k], &c3[k], s))
                .collect(),
        ))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyframes::Keyframe;
    use proptest::prelude::*;
    use rigid::geometry::Vector3f;

    fn tagged(x: Float) -> Keyframe {
        Keyframe::new(vec![RigidTransform::from_translation(Vector3f::new(
            x, 0.0, 0.0,
        ))])
    }

    fn list_of(n: usize) -> KeyframeList {
        let mut list = KeyframeList::new();
        for i in 0..n {
            list.insert_after_current(tagged(i as Float));
        }
        list
    }

    #[test]
    fn options_are_clamped() {
        let o = PlaybackOptions::new(50, 0);
        assert_eq!(o.ms_between_keyframes(), MIN_MS_BETWEEN_KEYFRAMES);
        assert_eq!(o.frames_per_second(), 1);
        assert_eq!(PlaybackOptions::new(20000, 60).ms_between_keyframes(), 10000);

        let o = PlaybackOptions::new(1000, 2000);
        assert_eq!(o.frames_per_second(), MAX_FRAMES_PER_SECOND);
        assert_eq!(o.frame_interval_ms(), 1);

        let o = PlaybackOptions::default();
        assert_eq!(o.ms_between_keyframes(), 2000);
        assert_eq!(o.frames_per_second(), 60);
        assert_eq!(o.frame_interval_ms(), 16);
    }

    #[test]
    fn faster_and_slower_step_within_bounds() {
        let mut o = PlaybackOptions::new(200, 60);
        assert_eq!(o.faster(), 100);
        assert_eq!(o.faster(), 100);
        assert_eq!(o.slower(), 200);

        let mut o = PlaybackOptions::new(9900, 60);
        assert_eq!(o.slower(), 10000);
        assert_eq!(o.slower(), 10000);
    }

    #[test]
    fn start_needs_four_keyframes() {
        let mut a = Animator::default();
        assert_eq!(
            a.start(3),
            Err(AnimError::TooFewKeyframes {
                required: 4,
                found: 3
            })
        );
        assert!(!a.is_playing());
        a.start(4).unwrap();
        assert!(a.is_playing());
        a.stop();
        assert!(!a.is_playing());
    }

    #[test]
    fn sample_starts_at_second_keyframe() {
        let a = Animator::new(PlaybackOptions::new(1000, 60));
        let list = list_of(5);
        assert_eq!(a.sample(&list, 0), Ok(Playback::Frame(vec![list.frames()[1][0]])));
    }

    #[test]
    fn sample_interpolates_between_inner_keyframes() {
        let a = Animator::new(PlaybackOptions::new(1000, 60));
        let list = list_of(5);
        match a.sample(&list, 1500).unwrap() {
            Playback::Frame(poses) => {
                assert!(approx_eq!(
                    Float,
                    poses[0].translation().x,
                    2.5,
                    epsilon = 1e-9
                ));
            }
            p => panic!("unexpected {:?}", p),
        }
    }

    #[test]
    fn sample_finishes_at_second_to_last_keyframe() {
        let a = Animator::new(PlaybackOptions::new(1000, 60));
        let list = list_of(5);
        assert_eq!(a.sample(&list, 2000), Ok(Playback::Finished(3)));
        assert_eq!(a.sample(&list, 99999), Ok(Playback::Finished(3)));
        assert!(a.sample(&list_of(3), 0).is_err());
    }

    #[test]
    fn advance_runs_to_the_end_and_stops() {
        let mut a = Animator::new(PlaybackOptions::new(100, 50));
        let list = list_of(4);
        a.start(list.len()).unwrap();

        let mut frames = 0;
        loop {
            match a.advance(&list, a.frame_interval_ms() as u64).unwrap() {
                Playback::Frame(_) => frames += 1,
                Playback::Finished(i) => {
                    assert_eq!(i, 2);
                    break;
                }
            }
        }
        // One keyframe interval of 100 ms at 20 ms per frame.
        assert_eq!(frames, 4);
        assert!(!a.is_playing());
        assert_eq!(a.advance(&list, 20), Err(AnimError::NotPlaying));
    }

    #[test]
    fn fastest_frame_rate_still_reaches_the_end() {
        let mut a = Animator::new(PlaybackOptions::new(100, u32::MAX));
        let list = list_of(4);
        a.start(list.len()).unwrap();

        let mut frames = 0;
        while let Playback::Frame(_) = a.advance(&list, a.frame_interval_ms() as u64).unwrap() {
            frames += 1;
            assert!(frames <= 100, "playback stalled at {} ms", a.elapsed_ms());
        }
        assert_eq!(a.elapsed_ms(), 100);
    }

    proptest! {
        #[test]
        fn evenly_spaced_keyframes_play_linearly(ms in 0..3000u64) {
            let a = Animator::new(PlaybackOptions::new(1000, 60));
            let list = list_of(6);
            match a.sample(&list, ms).unwrap() {
                Playback::Frame(poses) => {
                    let expected = 1.0 + ms as Float / 1000.0;
                    prop_assert!(approx_eq!(
                        Float,
                        poses[0].translation().x,
                        expected,
                        epsilon = 1e-9
                    ));
                }
                Playback::Finished(i) => prop_assert!(false, "finished at {}", i),
            }
        }
    }
}

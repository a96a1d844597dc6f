//! Command line options

use anim::animator::{DEFAULT_FRAMES_PER_SECOND, DEFAULT_MS_BETWEEN_KEYFRAMES};
use clap::Parser;

/// Number of keyframes recorded by default.
pub const DEFAULT_KEYFRAMES: usize = 6;

/// Options for the headless animation driver.
#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Options {
    /// Time between keyframes during playback.
    #[clap(
        long = "ms-between-keyframes",
        short = 'm',
        value_name = "MS",
        default_value_t = DEFAULT_MS_BETWEEN_KEYFRAMES,
        help = "Milliseconds between keyframes during playback."
    )]
    pub ms_between_keyframes: u32,

    /// Playback frame rate.
    #[clap(
        long = "fps",
        short = 'f',
        value_name = "NUM",
        default_value_t = DEFAULT_FRAMES_PER_SECOND,
        help = "Frames per second sampled during playback."
    )]
    pub frames_per_second: u32,

    /// Number of keyframes to record.
    #[clap(
        long = "keyframes",
        short = 'k',
        value_name = "NUM",
        default_value_t = DEFAULT_KEYFRAMES,
        help = "Number of scripted keyframes to record (at least 4 to play)."
    )]
    pub keyframes: usize,

    /// Only print poses of this node.
    #[clap(
        long = "node",
        short = 'n',
        value_name = "NAME",
        help = "Print poses of the named node only."
    )]
    pub node: Option<String>,

    /// Print the recorded keyframes in text form.
    #[clap(long, help = "Print the recorded keyframes in text form.")]
    pub dump: bool,
}

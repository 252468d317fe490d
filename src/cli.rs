use clap::Parser;

/// CLI arguments for the ant farm replayer
#[derive(Parser, Debug)]
#[command(name = "ant_farm", about = "🐜 Replay an ant farm turn by turn")]
pub struct Args {
    /// Path to the ant farm file
    #[arg(short = 'm', long = "map")]
    pub map: String,

    /// Milliseconds from one turn's start to the next
    #[arg(long, default_value_t = 2000)]
    pub turn_ms: u64,

    /// Milliseconds an ant spends moving through a tunnel
    #[arg(long, default_value_t = 1500)]
    pub move_ms: u64,

    /// Animation frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Jump to this turn before playing
    #[arg(long)]
    pub seek: Option<usize>,

    /// Only parse and validate the map, then print the summary
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Keep looping playback until interrupted
    #[arg(long = "loop", default_value_t = false)]
    pub loop_playback: bool,

    /// Random seed for the room depth jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Suppress per-turn lines
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

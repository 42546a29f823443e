use clap::Parser;

use crate::color::Rgb;

/// Full-window firework particle animation
#[derive(Parser)]
#[command()]
pub struct Args {
    /// Tick rate of the animation, `0` runs uncapped
    #[arg(short, long, default_value_t = 60)]
    pub framerate: u32,

    /// Upper bound on concurrently live particles, `0` disables the cap
    #[arg(long, default_value_t = 20_000)]
    pub max_particles: usize,

    /// Burst color for pointer clicks, as `#RRGGBB`
    #[arg(long, default_value = "#FFD700", value_parser = Rgb::from_hex)]
    pub accent: Rgb,
}

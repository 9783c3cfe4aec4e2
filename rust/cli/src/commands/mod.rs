//! Command handler modules for the Tonk CLI.
//!
//! Each subcommand is implemented in its own module file with a consistent
//! pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Output streams (`&mut dyn Write`) passed as parameters for testability
//! - Errors propagated via the `CliError` enum

pub mod cfg;
pub mod deal;
pub mod play;
pub mod rng;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::handle_play_command;
pub use rng::handle_rng_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;

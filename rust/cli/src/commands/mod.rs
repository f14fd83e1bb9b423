//! Command handlers, one module per subcommand.
//!
//! Each handler takes its output streams as `&mut dyn Write` (and `play`
//! its input as `&mut dyn BufRead`) and returns `Result<(), CliError>`;
//! [`crate::run`] turns the result into an exit code.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;

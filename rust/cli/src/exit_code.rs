//! Process exit codes returned by [`crate::run`].

use crate::error::CliError;

/// Command finished normally.
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration, I/O or engine failure.
pub const ERROR: i32 = 2;

/// Stopped before finishing (Ctrl+C convention).
pub const INTERRUPTED: i32 = 130;

/// Exit code for a failed command.
pub fn for_error(err: &CliError) -> i32 {
    match err {
        CliError::Interrupted(_) => INTERRUPTED,
        _ => ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interruption_maps_to_130() {
        assert_eq!(for_error(&CliError::Interrupted("saved 3/10".into())), 130);
        assert_eq!(for_error(&CliError::InvalidInput("x".into())), ERROR);
    }
}

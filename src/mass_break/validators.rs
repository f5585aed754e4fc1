//! # Validators
//!
//! Decides which block breaks may spread.

use crate::entity::GameMode;

/// Decides whether a block break should spread to connected blocks.
///
/// Only survival players qualify, and when `require_sneak` is set they must also
/// be sneaking.
pub fn should_process_mass_break(game_mode: GameMode, is_sneaking: bool, require_sneak: bool) -> bool {
    if game_mode != GameMode::Survival {
        return false;
    }

    !require_sneak || is_sneaking
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(GameMode::Survival, false, false => true)]
    #[test_case(GameMode::Survival, true, false => true)]
    #[test_case(GameMode::Survival, true, true => true)]
    #[test_case(GameMode::Survival, false, true => false)]
    #[test_case(GameMode::Creative, true, true => false)]
    #[test_case(GameMode::Creative, false, false => false)]
    #[test_case(GameMode::Adventure, true, false => false)]
    #[test_case(GameMode::Spectator, true, true => false)]
    fn eligibility(game_mode: GameMode, is_sneaking: bool, require_sneak: bool) -> bool {
        should_process_mass_break(game_mode, is_sneaking, require_sneak)
    }
}

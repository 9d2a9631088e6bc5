use crate::error::BattleError;
use crate::sim::battle::Battler;

pub fn validate_switch(battler: &Battler, index: usize) -> Result<(), BattleError> {
    let Some(target) = battler.roster.get(index) else {
        return Err(BattleError::InvalidSwitchTarget {
            index,
            roster_len: battler.roster.len(),
        });
    };
    if index == battler.active && !battler.active_creature().is_fainted() {
        return Err(BattleError::SwitchTargetActive { index });
    }
    if target.is_fainted() {
        return Err(BattleError::SwitchTargetFainted { index });
    }
    Ok(())
}

/// First healthy roster member other than the active one.
pub fn next_available(battler: &Battler) -> Option<usize> {
    battler
        .roster
        .iter()
        .enumerate()
        .find(|(index, creature)| *index != battler.active && !creature.is_fainted())
        .map(|(index, _)| index)
}

/// Brings `index` in and clears the stages of whoever was out.
pub fn switch_in(battler: &mut Battler, index: usize) {
    battler.active = index;
    battler.stages.reset();
    battler.pending_replacement = false;
}

use thiserror::Error;

/// Contract violations raised before any battle state is touched.
///
/// Game-rule outcomes (misses, failed flee attempts, blocked statuses) are
/// narration, never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("switch target {index} is out of range (roster has {roster_len} members)")]
    InvalidSwitchTarget { index: usize, roster_len: usize },
    #[error("switch target {index} is already active")]
    SwitchTargetActive { index: usize },
    #[error("switch target {index} has fainted")]
    SwitchTargetFainted { index: usize },
    #[error("roster must contain at least one creature")]
    EmptyRoster,
    #[error("roster has no creature able to battle")]
    NoHealthyMember,
    #[error("battle is already over")]
    BattleOver,
    #[error("a replacement must be switched in before anything else")]
    ReplacementRequired,
    #[error("move slot {index} is out of range (creature knows {known} moves)")]
    MoveIndexOutOfRange { index: usize, known: usize },
    #[error("move slot {index} has no uses left")]
    MoveExhausted { index: usize },
    #[error("struggle is only available when every move is exhausted")]
    StruggleUnavailable,
    #[error("item target {index} is out of range or fainted")]
    InvalidItemTarget { index: usize },
    #[error("trainer-owned creatures cannot be captured")]
    CaptureNotAllowed,
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("unknown move '{0}'")]
    UnknownMove(String),
    #[error("unknown ability '{0}'")]
    UnknownAbility(String),
    #[error("unknown held item '{0}'")]
    UnknownItem(String),
    #[error("a creature may know at most four moves (got {0})")]
    TooManyMoves(usize),
    #[error("level {0} is outside 1..=100")]
    InvalidLevel(u8),
}

use thiserror::Error;

use crate::VarToken;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// Some variable has run out of candidate words.
    #[error("contradiction: a domain became empty")]
    Contradiction,

    #[error("variable {0:?} has zero length")]
    ZeroLength(VarToken),

    #[error("variable {0:?} does not belong to this crossword")]
    UnknownVariable(VarToken),

    #[error("variable {0:?} cannot overlap itself")]
    SelfOverlap(VarToken),

    #[error("overlap ({x_pos}, {y_pos}) is out of range for {x:?} and {y:?}")]
    OverlapOutOfRange {
        x: VarToken,
        y: VarToken,
        x_pos: usize,
        y_pos: usize,
    },

    #[error("gave up after {0} guesses")]
    GuessLimit(u32),
}

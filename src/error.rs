use thiserror::Error;

/// Raw row masks that place a black and a white stone on the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row {row} has a cell set in both color masks")]
pub struct OverlappingStones {
    pub row: u8,
}

/// Rejected turn-controller actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("it is not the computer's turn")]
    NotCpuTurn,

    #[error("coordinate ({x}, {y}) is out of range")]
    OutOfRange { x: u8, y: u8 },

    #[error("illegal move at ({x}, {y})")]
    IllegalMove { x: u8, y: u8 },

    #[error("cannot pass while a legal move exists")]
    PassNotAllowed,

    #[error("move selector returned an illegal move at ({x}, {y})")]
    SelectorIllegalMove { x: u8, y: u8 },

    #[error("move selector passed while legal moves exist")]
    SelectorPassed,
}

/// Resume-record decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot has wrong length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid snapshot magic (expected RVSR)")]
    BadMagic,

    #[error("unsupported snapshot version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("invalid game mode bits: {0}")]
    InvalidMode(u8),

    #[error(transparent)]
    Board(#[from] OverlappingStones),
}

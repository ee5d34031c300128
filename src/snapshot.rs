//! Resume record for a suspended game.
//!
//! Layout: 12-byte header (magic `RVSR`, u32 LE version, u32 LE CRC32 of the
//! payload) followed by a 25-byte payload:
//!
//! | offset | size | field                                              |
//! |--------|------|----------------------------------------------------|
//! | 0      | 8    | black row masks                                    |
//! | 8      | 8    | white row masks                                    |
//! | 16     | 1    | mode (2 bits), level (3 bits), white turn, passed  |
//! | 17     | 1    | cursor `x | y << 3`                                |
//! | 18     | 1    | settings bits                                      |
//! | 19     | 4    | play frames, u32 LE                                |
//! | 23     | 2    | play count, u16 LE                                 |
//!
//! Fixed-stone marks are not stored; restoring re-analyzes the board.

use crate::board::{BOARD_SIZE, Board};
use crate::config::MAX_LEVEL;
use crate::error::SnapshotError;
use crate::types::{GameMode, Move, Settings};

const MAGIC: &[u8; 4] = b"RVSR";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 12;
const PAYLOAD_SIZE: usize = 25;
pub const SNAPSHOT_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE;

const FLAG_MODE_MASK: u8 = 0x03;
const FLAG_LEVEL_SHIFT: u8 = 2;
const FLAG_LEVEL_MASK: u8 = 0x07;
const FLAG_WHITE_TURN: u8 = 0x20;
const FLAG_LAST_PASSED: u8 = 0x40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub mode: GameMode,
    pub level: u8,
    pub cursor: Move,
    pub settings: Settings,
    pub play_frames: u32,
    pub play_count: u16,
}

impl Snapshot {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
        payload.extend((0..BOARD_SIZE).map(|y| self.board.black_row(y)));
        payload.extend((0..BOARD_SIZE).map(|y| self.board.white_row(y)));

        let mut flags = self.mode.to_bits() | (self.level.min(MAX_LEVEL) << FLAG_LEVEL_SHIFT);
        if self.board.is_white_turn() {
            flags |= FLAG_WHITE_TURN;
        }
        if self.board.is_last_passed() {
            flags |= FLAG_LAST_PASSED;
        }
        payload.push(flags);
        payload.push((self.cursor.x & 0x07) | ((self.cursor.y & 0x07) << 3));
        payload.push(self.settings.to_bits());
        payload.extend_from_slice(&self.play_frames.to_le_bytes());
        payload.extend_from_slice(&self.play_count.to_le_bytes());
        debug_assert_eq!(payload.len(), PAYLOAD_SIZE);

        let crc = crc32fast::hash(&payload);
        let mut out = Vec::with_capacity(SNAPSHOT_SIZE);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(&payload);
        out
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() != SNAPSHOT_SIZE {
            return Err(SnapshotError::InvalidLength {
                expected: SNAPSHOT_SIZE,
                actual: data.len(),
            });
        }

        if &data[0..4] != MAGIC {
            return Err(SnapshotError::BadMagic);
        }

        let version = read_u32_le(data, 4);
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                expected: VERSION,
                actual: version,
            });
        }

        let expected_crc = read_u32_le(data, 8);
        let payload = &data[HEADER_SIZE..];
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            return Err(SnapshotError::CrcMismatch {
                expected: expected_crc,
                actual: actual_crc,
            });
        }

        let mut black = [0u8; BOARD_SIZE];
        let mut white = [0u8; BOARD_SIZE];
        black.copy_from_slice(&payload[0..8]);
        white.copy_from_slice(&payload[8..16]);

        let flags = payload[16];
        let mode_bits = flags & FLAG_MODE_MASK;
        let mode = GameMode::from_bits(mode_bits).ok_or(SnapshotError::InvalidMode(mode_bits))?;
        let level = (flags >> FLAG_LEVEL_SHIFT) & FLAG_LEVEL_MASK;
        let board = Board::from_rows(
            black,
            white,
            flags & FLAG_WHITE_TURN != 0,
            flags & FLAG_LAST_PASSED != 0,
        )?;

        let cursor = payload[17];
        Ok(Self {
            board,
            mode,
            level,
            cursor: Move::new(cursor & 0x07, (cursor >> 3) & 0x07),
            settings: Settings::from_bits(payload[18]),
            play_frames: read_u32_le(payload, 19),
            play_count: u16::from_le_bytes([payload[23], payload[24]]),
        })
    }
}

fn read_u32_le(data: &[u8], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

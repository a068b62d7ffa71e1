use crate::types::Square;

/// One bit per square, A1 in the least significant bit.
/// Used as the attack map: a set bit means the square is attacked.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BitBoard(pub u64);

impl BitBoard {
    pub const EMPTY: BitBoard = BitBoard(0);

    pub fn set_bit(&mut self, square: Square) {
        self.0 |= square.as_bit();
    }

    pub fn is_bit_set(&self, square: Square) -> bool {
        (self.0 & square.as_bit()) != 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }
}

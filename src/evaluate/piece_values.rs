use shakmaty::Role;

use crate::search::Score;

/// Material value of each piece type. Kings are never counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceValues {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 1,
            knight: 3,
            bishop: 3,
            rook: 5,
            queen: 9,
        }
    }
}

impl PieceValues {
    pub fn material_value(&self, role: Role) -> Score {
        match role {
            Role::Pawn => self.pawn,
            Role::Knight => self.knight,
            Role::Bishop => self.bishop,
            Role::Rook => self.rook,
            Role::Queen => self.queen,
            Role::King => 0,
        }
    }
}

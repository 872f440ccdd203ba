//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{CastlingRights, Color, File, Piece, PositionSetup, Rank, Square};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

impl PositionSetup {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// Only the syntax of each field is checked here. Whether the result is
    /// a legal position is decided when a board is built from it.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let mut setup = PositionSetup::empty();
        parse_placement(parts[0], &mut setup)?;

        setup.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        setup.castling = parse_castling(parts[2])?;
        setup.en_passant = parse_en_passant(parts[3])?;

        setup.halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        setup.fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(setup)
    }

    /// Converts the setup back to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank != Rank::R1 {
                placement.push('/');
            }
        }

        let mut castling = String::new();
        let rights = self.castling;
        if rights.can_castle_kingside(Color::White) {
            castling.push('K');
        }
        if rights.can_castle_queenside(Color::White) {
            castling.push('Q');
        }
        if rights.can_castle_kingside(Color::Black) {
            castling.push('k');
        }
        if rights.can_castle_queenside(Color::Black) {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);

        format!(
            "{} {} {} {} {} {}",
            placement,
            self.side_to_move.to_fen_char(),
            castling,
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl FromStr for PositionSetup {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

fn parse_placement(placement: &str, setup: &mut PositionSetup) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            ranks.len()
        )));
    }

    // FEN lists rank 8 first.
    for (rank, text) in Rank::ALL.into_iter().rev().zip(ranks) {
        let mut file = 0u32;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip;
            } else if let Some((piece, color)) = Piece::from_fen_char(c) {
                if let Some(f) = File::from_index(file as u8) {
                    setup.put(Square::new(f, rank), piece, color);
                }
                file += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c, rank
                )));
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} does not describe exactly 8 squares",
                rank
            )));
        }
    }

    Ok(())
}

fn parse_castling(castling: &str) -> Result<CastlingRights, FenError> {
    let mut rights = CastlingRights::NONE;
    if castling == "-" {
        return Ok(rights);
    }

    for c in castling.chars() {
        let flag = match c {
            'K' => CastlingRights::WHITE_KINGSIDE,
            'Q' => CastlingRights::WHITE_QUEENSIDE,
            'k' => CastlingRights::BLACK_KINGSIDE,
            'q' => CastlingRights::BLACK_QUEENSIDE,
            _ => {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )))
            }
        };
        if rights.raw() & flag != 0 {
            return Err(FenError::InvalidCastlingRights(format!(
                "duplicate '{}'",
                c
            )));
        }
        rights.insert(flag);
    }

    Ok(rights)
}

fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
    if ep == "-" {
        return Ok(None);
    }

    let lowercase = !ep.chars().any(|c| c.is_ascii_uppercase());
    match Square::from_algebraic(ep) {
        Some(sq) if lowercase && matches!(sq.rank(), Rank::R3 | Rank::R6) => Ok(Some(sq)),
        _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let setup = PositionSetup::from_fen(PositionSetup::STARTPOS).unwrap();
        assert_eq!(setup, PositionSetup::startpos());
        assert_eq!(setup.side_to_move, Color::White);
        assert_eq!(setup.castling, CastlingRights::ALL);
        assert_eq!(setup.en_passant, None);
        assert_eq!(setup.halfmove_clock, 0);
        assert_eq!(setup.fullmove_number, 1);
    }

    #[test]
    fn parse_custom_position() {
        let setup = PositionSetup::from_fen(
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        )
        .unwrap();
        assert_eq!(setup.side_to_move, Color::White);
        assert_eq!(setup.halfmove_clock, 2);
        assert_eq!(setup.fullmove_number, 3);
        assert_eq!(setup.piece_at(Square::C6), Some((Piece::Knight, Color::Black)));
        assert_eq!(setup.piece_at(Square::F3), Some((Piece::Knight, Color::White)));
        assert_eq!(setup.piece_at(Square::G1), None);
    }

    #[test]
    fn roundtrip() {
        for fen in [
            PositionSetup::STARTPOS,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 b Kq - 37 90",
        ] {
            assert_eq!(PositionSetup::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn from_str() {
        let setup: PositionSetup = PositionSetup::STARTPOS.parse().unwrap();
        assert_eq!(setup, PositionSetup::default());
    }

    #[test]
    fn invalid_fen() {
        assert!(matches!(
            PositionSetup::from_fen("invalid"),
            Err(FenError::InvalidPartCount(_))
        ));

        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/8 x KQkq - 0 1"),
            Err(FenError::InvalidActiveColor(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_rank_count() {
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8 w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_invalid_char() {
        assert!(matches!(
            PositionSetup::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            PositionSetup::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB0KBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_piece_placement_wrong_squares() {
        assert!(matches!(
            PositionSetup::from_fen("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            PositionSetup::from_fen("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/44 w - - 0 1").map(|s| s.to_fen()),
            Ok(_)
        ));
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/45 w - - 0 1"),
            Err(FenError::InvalidPiecePlacement(_))
        ));
    }

    #[test]
    fn invalid_castling_rights() {
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/8 w XYZ - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/8 w KK - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
    }

    #[test]
    fn invalid_en_passant() {
        for ep in ["abc", "x3", "e4", "E3"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep);
            assert!(
                matches!(
                    PositionSetup::from_fen(&fen),
                    Err(FenError::InvalidEnPassantSquare(_))
                ),
                "{ep} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_counters() {
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/8 w - - abc 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/8 w - - 0 xyz"),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(
            PositionSetup::from_fen("8/8/8/8/8/8/8/8 w - - -1 1"),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
    }

    #[test]
    fn en_passant_and_castling_fields() {
        let setup = PositionSetup::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .unwrap();
        assert_eq!(setup.side_to_move, Color::Black);
        assert_eq!(setup.en_passant, Some(Square::E3));

        let setup = PositionSetup::from_fen("8/8/8/8/8/8/8/8 b Kq d6 0 1").unwrap();
        assert_eq!(setup.en_passant, Some(Square::D6));
        assert!(setup.castling.can_castle_kingside(Color::White));
        assert!(!setup.castling.can_castle_queenside(Color::White));
        assert!(setup.castling.can_castle_queenside(Color::Black));
        assert!(!setup.castling.can_castle_kingside(Color::Black));
    }

    #[test]
    fn fen_error_display() {
        let err = FenError::InvalidPartCount(3);
        assert!(format!("{}", err).contains("3"));

        let err = FenError::InvalidActiveColor("x".to_string());
        assert!(format!("{}", err).contains("x"));

        let err = FenError::InvalidEnPassantSquare("z9".to_string());
        assert!(format!("{}", err).contains("z9"));
    }
}

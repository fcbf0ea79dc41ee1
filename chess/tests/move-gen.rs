//! Tests the attack tables and move generator (chess module)
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use chess::*;

lazy_static! {
    static ref TABLES: AttackTables = AttackTables::new();
}

fn board(fen: &str) -> BoardState {
    BoardState::from_fen_str(fen).unwrap()
}

mod attack_tables {
    use super::*;
    use chess::bitboard::{ray_cast, subsets};

    #[test]
    fn table_len_matches_blocker_count() {
        for &slider in &Slider::ALL {
            let mut total = 0;
            for sq in Square::all() {
                let mask = TABLES.blocker_mask(sq, slider);
                assert_eq!(TABLES.table_len(sq, slider), 1 << mask.len(), "{} on {}", slider, sq);
                assert!(!mask.contains(sq));
                assert!(mask.is_disjoint(!ray_cast(sq, Bitboard::new(), slider)));
                total += TABLES.table_len(sq, slider);
            }
            assert_eq!(TABLES.total_len(slider), total);
        }
    }

    #[test]
    fn known_table_sizes() {
        assert_eq!(TABLES.total_len(Slider::Rook), 102_400);
        assert_eq!(TABLES.total_len(Slider::Bishop), 5_248);
    }

    #[test]
    fn subsets_are_distinct() {
        for &slider in &Slider::ALL {
            for sq in Square::all() {
                let mask = TABLES.blocker_mask(sq, slider);
                let mut all = subsets(mask);
                assert_eq!(all.len(), 1 << mask.len());
                assert!(all.iter().all(|&occ| occ & !mask == Bitboard::new()));
                all.sort_by_key(|occ| occ.bits());
                all.dedup();
                assert_eq!(all.len(), 1 << mask.len());
            }
        }
    }

    #[test]
    fn lookups_agree_with_ray_casting() {
        for &slider in &Slider::ALL {
            for sq in Square::all() {
                let mask = TABLES.blocker_mask(sq, slider);
                for occ in subsets(mask) {
                    assert_eq!(TABLES.attacks(sq, occ, slider), ray_cast(sq, occ, slider));
                }
            }
        }
    }

    #[test]
    fn attacks_never_include_origin() {
        for sq in Square::all() {
            for &occ in &[Bitboard::new(), Bitboard::ALL, Bitboard::EDGES, Bitboard::from(sq)] {
                assert!(!TABLES.rook_attacks(sq, occ).contains(sq));
                assert!(!TABLES.bishop_attacks(sq, occ).contains(sq));
                assert!(!TABLES.queen_attacks(sq, occ).contains(sq));
            }
        }
    }

    #[test]
    fn squares_outside_the_mask_are_ignored() {
        let sq = Square::D4;
        let mask = TABLES.blocker_mask(sq, Slider::Rook);
        let occ = Bitboard::from(Square::B4) | Bitboard::from(Square::D7);
        assert_eq!(
            TABLES.rook_attacks(sq, occ),
            TABLES.rook_attacks(sq, occ | (Bitboard::ALL & !mask)),
        );
    }

    #[test]
    fn first_blocker_is_included() {
        let occ = Bitboard::from(Square::D6) | Bitboard::from(Square::F4) | Bitboard::from(Square::B2);
        let rook = TABLES.rook_attacks(Square::D4, occ);
        assert!(rook.contains(Square::D6));
        assert!(!rook.contains(Square::D7));
        assert!(!rook.contains(Square::D8));
        assert!(rook.contains(Square::F4));
        assert!(!rook.contains(Square::G4));
        assert!(rook.contains(Square::A4));
        assert!(rook.contains(Square::D1));
        assert_eq!(rook.len(), 2 + 2 + 3 + 3);

        let bishop = TABLES.bishop_attacks(Square::D4, occ);
        assert!(bishop.contains(Square::B2));
        assert!(!bishop.contains(Square::A1));
        assert!(bishop.contains(Square::H8));
        assert!(bishop.contains(Square::A7));
        assert!(bishop.contains(Square::G1));
    }

    #[test]
    fn rook_on_a1_with_empty_board() {
        let attacks = TABLES.rook_attacks(Square::A1, Bitboard::new());
        assert_eq!(attacks.len(), 14);
        assert_eq!(attacks, (Bitboard::FILE_A | Bitboard::RANK_1) & !Bitboard::from(Square::A1));
    }

    #[test]
    fn seeds_change_magics_but_not_attacks() {
        let other = AttackTableBuilder::new().seed(1).build();
        assert_ne!(
            Square::all().map(|sq| other.magic(sq, Slider::Rook)).collect::<Vec<_>>(),
            Square::all().map(|sq| TABLES.magic(sq, Slider::Rook)).collect::<Vec<_>>(),
        );
        for sq in Square::all() {
            for &occ in &[Bitboard::new(), Bitboard::EDGES, Bitboard::RANK_2 | Bitboard::RANK_7] {
                assert_eq!(other.queen_attacks(sq, occ), TABLES.queen_attacks(sq, occ));
            }
        }
    }
}

mod move_encoding {
    use super::*;

    #[test]
    fn every_field_survives_encoding() {
        let specials = [Special::Normal, Special::Promotion, Special::EnPassant, Special::Castling];
        for orig in Square::all() {
            for dest in Square::all() {
                for &promotion in &Promotion::ALL {
                    for &special in &specials {
                        let mv = Move::new(orig, dest, promotion, special);
                        assert_eq!(mv.origin(), orig);
                        assert_eq!(mv.destination(), dest);
                        assert_eq!(mv.promotion_selector(), promotion);
                        assert_eq!(mv.special(), special);
                        assert_eq!(Move::from_bits(mv.bits()), mv);
                    }
                }
            }
        }
    }

    #[test]
    fn field_layout() {
        let mv = Move::new(Square::A8, Square::H1, Promotion::ToRook, Special::Castling);
        assert_eq!(mv.bits(), 0xf03f);

        let mv = Move::new(Square::H1, Square::A8, Promotion::ToQueen, Special::Normal);
        assert_eq!(mv.bits(), 0x0fc0);
    }
}

mod move_gen {
    use super::*;

    fn moves(fen: &str) -> Vec<String> {
        MoveGenerator::new(&TABLES)
            .generate_for_turn(&board(fen))
            .iter()
            .map(|mv| mv.to_string())
            .collect()
    }

    #[test]
    fn start_position() {
        let list = MoveGenerator::new(&TABLES).generate(Color::White, &BoardState::new());
        assert_eq!(list.len(), 20);
        assert_eq!(list.iter().filter(|mv| mv.origin().rank() == Rank::R2).count(), 16);
        assert!(list.iter().all(|mv| mv.special() == Special::Normal));
        assert!(list.find("g1f3").is_ok());
        assert_eq!(list.find("e1g1"), Err(Error::UnknownMove));
    }

    #[test]
    fn bishop_stops_at_first_blocker() {
        let board = board("3k3r/pp2rp1p/3p4/2p1P1B1/1b6/3K3Q/PP3P2/n7 w - c6 0 23");
        let list = MoveGenerator::new(&TABLES).generate(Color::White, &board);
        let from_g5: Vec<_> = list.iter()
            .filter(|mv| mv.origin() == Square::G5)
            .map(|mv| mv.destination())
            .collect();

        assert!(from_g5.contains(&Square::F6));
        assert!(from_g5.contains(&Square::E7));
        assert!(!from_g5.contains(&Square::D8));
        assert!(!from_g5.contains(&Square::F7));
        assert!(from_g5.contains(&Square::H6));
        assert!(from_g5.contains(&Square::H4));
        assert!(from_g5.contains(&Square::D2));
        assert!(from_g5.contains(&Square::C1));
        assert_eq!(from_g5.len(), 8);
    }

    #[test]
    fn en_passant_needs_a_target_square() {
        let list = MoveGenerator::new(&TABLES)
            .generate_for_turn(&board("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2"));
        let ep: Vec<_> = list.iter().filter(|mv| mv.special() == Special::EnPassant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].origin(), Square::E5);
        assert_eq!(ep[0].destination(), Square::D6);

        let list = MoveGenerator::new(&TABLES)
            .generate_for_turn(&board("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2"));
        assert!(list.iter().all(|mv| mv.special() != Special::EnPassant));
    }

    #[test]
    fn only_the_target_square_is_captured_en_passant() {
        let all = moves("4k3/8/8/8/3PpP2/8/8/4K3 b - d3 0 1");
        assert!(!all.contains(&"e4f3".to_string()));
        assert!(all.contains(&"e4d3".to_string()));
        assert!(all.contains(&"e4e3".to_string()));

        assert_eq!(moves_with_ep("4k3/8/8/8/3PpP2/8/8/4K3 b - d3 0 1"), vec!["e4d3"]);
    }

    fn moves_with_ep(fen: &str) -> Vec<String> {
        MoveGenerator::new(&TABLES)
            .generate_for_turn(&board(fen))
            .iter()
            .filter(|mv| mv.special() == Special::EnPassant)
            .map(|mv| mv.to_string())
            .collect()
    }

    #[test]
    fn castling_follows_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let castles = |fen: &str, side: Color| -> Vec<String> {
            MoveGenerator::new(&TABLES)
                .generate(side, &board(fen))
                .iter()
                .filter(|mv| mv.special() == Special::Castling)
                .map(|mv| mv.to_string())
                .collect()
        };

        assert_eq!(castles(fen, Color::White), vec!["e1g1", "e1c1"]);
        assert_eq!(castles(fen, Color::Black), vec!["e8g8", "e8c8"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1", Color::White), vec!["e1g1"]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1", Color::Black), vec!["e8c8"]);
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1", Color::White).is_empty());

        // a piece between the king and rook blocks castling on that side only
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/RN2K2R w KQkq - 0 1", Color::White), vec!["e1g1"]);
        assert_eq!(castles("r3kb1r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Color::Black), vec!["e8c8"]);
    }

    #[test]
    fn castling_rights_can_be_added_and_removed() {
        let mut builder = BoardStateBuilder::new();
        builder
            .piece(Color::White, Piece::King, Square::E1)
            .piece(Color::White, Piece::Rook, Square::A1)
            .piece(Color::White, Piece::Rook, Square::H1)
            .piece(Color::Black, Piece::King, Square::E8);
        let generator = MoveGenerator::new(&TABLES);
        let castles = |board: &BoardState| {
            generator.generate(Color::White, board).iter()
                .filter(|mv| mv.special() == Special::Castling)
                .count()
        };

        assert_eq!(castles(&builder.build().unwrap()), 0);
        builder.can_castle_king_side(Color::White, true);
        assert_eq!(castles(&builder.build().unwrap()), 1);
        builder.can_castle_queen_side(Color::White, true);
        assert_eq!(castles(&builder.build().unwrap()), 2);
        builder.can_castle_king_side(Color::White, false);
        let board = builder.build().unwrap();
        assert_eq!(castles(&board), 1);
        assert_eq!(board.castling_rights(), CastlingRights::WHITE_QUEEN_SIDE);
    }

    #[test]
    fn underpromotions_are_optional() {
        let fen = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let board = board(fen);
        let mut generator = MoveGenerator::new(&TABLES);

        let count = |list: &MoveList| list.iter().filter(|mv| mv.is_promotion()).count();
        assert_eq!(count(&generator.generate(Color::White, &board)), 4);
        assert_eq!(count(&generator.underpromotions(true).generate(Color::White, &board)), 8);
    }

    #[test]
    fn moves_never_land_on_friendly_pieces() {
        for fen in &[
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "3k3r/pp2rp1p/3p4/2p1P1B1/1b6/3K3Q/PP3P2/n7 w - c6 0 23",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ] {
            let board = board(fen);
            for &side in &[Color::White, Color::Black] {
                let own = board.occupied_by(side);
                for mv in MoveGenerator::new(&TABLES).generate(side, &board).iter() {
                    assert!(own.contains(mv.origin()), "{} in {}", mv, fen);
                    assert!(!own.contains(mv.destination()), "{} in {}", mv, fen);
                }
            }
        }
    }

    #[test]
    fn kiwipete_pseudo_legal_count() {
        // 48 legal moves; none of the pseudo-legal ones leave the king in check here
        let board = board("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(MoveGenerator::new(&TABLES).generate(Color::White, &board).len(), 48);
    }

    #[test]
    fn generation_is_shared_across_threads() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "3k3r/pp2rp1p/3p4/2p1P1B1/1b6/3K3Q/PP3P2/n7 w - c6 0 23",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        ];
        let expected: Vec<_> = fens.iter()
            .map(|fen| MoveGenerator::new(&TABLES).generate_for_turn(&board(fen)))
            .collect();

        let handles: Vec<_> = fens.iter()
            .map(|&fen| std::thread::spawn(move || {
                MoveGenerator::new(&TABLES).generate_for_turn(&board(fen))
            }))
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

mod fen_errors {
    use super::*;

    #[test]
    fn failed_load_leaves_board_untouched() {
        let mut board = BoardState::new();
        assert_eq!(board.load_fen("8/8/8/8 w - - 0 1"), Err(Error::RankCount));
        assert_eq!(board, BoardState::new());

        assert_eq!(board.load_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), Ok(()));
        assert_eq!(board.occupied().len(), 2);

        board.reset();
        assert_eq!(board, BoardState::new());
    }

    #[test]
    fn each_field_reports_its_error() {
        use Error::*;
        let cases = [
            ("4k3/8/8/8/8/8/8/4K3", FieldCount),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1 2", FieldCount),
            ("4k3/8/8/8/8/8/4K3 w - - 0 1", RankCount),
            ("4k3/8/8/8/8/8/8/4K4 w - - 0 1", RankLength),
            ("4k3/8/8/8/8/8/8/4Z3 w - - 0 1", InvalidPiece),
            ("4k3/8/8/8/8/8/8/4K3 - - - 0 1", InvalidTurn),
            ("4k3/8/8/8/8/8/8/4K3 w Kx - 0 1", InvalidCastlingFlags),
            ("4k3/8/8/8/8/8/8/4K3 w K - 0 1", CastlingRightsMismatch),
            ("4k3/8/8/8/8/8/8/4K3 w - z9 0 1", InvalidEnPassantSquare),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", InvalidHalfMoveClock),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 x", InvalidFullMoveNumber),
            ("4k3/8/8/8/8/8/8/3PK3 w - - 0 1", InvalidPawnRank),
        ];
        for &(fen, err) in &cases {
            assert_eq!(BoardState::from_fen_str(fen), Err(err), "{}", fen);
            assert_eq!(fen.parse::<BoardState>(), Err(err), "{}", fen);
        }
    }
}

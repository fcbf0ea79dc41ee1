//! The magpie move generator.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::path::PathBuf;
use clap::{App, Arg, SubCommand, AppSettings, ArgMatches, crate_version};
use log::info;
use simplelog::{WriteLogger, LevelFilter, Config};
use chess::{AttackTables, AttackTableBuilder, BoardState, Color, MoveGenerator, Piece, Slider};
use settings::Settings;

mod settings;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn main() -> Result<(), Error> {
    let fen_arg = Arg::with_name("fen")
        .value_name("FEN_STRING")
        .default_value(START_FEN)
        .hide_default_value(true)
        .multiple(true)
        .help("Position in Forsyth-Edwards Notation (FEN), defaults to the starting position");

    let matches =
        App::new("Magpie")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Generates pseudo-legal chess moves using magic bitboards.")
            .setting(AppSettings::SubcommandRequired)
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("magpie.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("CONFIG_FILE")
                .takes_value(true)
                .help("Reads settings from a YAML file"))
            .arg(Arg::with_name("seed")
                .long("seed")
                .global(true)
                .value_name("SEED")
                .takes_value(true)
                .help("Seeds the magic number search"))
            .subcommand(SubCommand::with_name("board")
                .about("Prints a diagram of a position")
                .arg(fen_arg.clone()))
            .subcommand(SubCommand::with_name("moves")
                .about("Lists the pseudo-legal moves in a position")
                .arg(Arg::with_name("side")
                    .long("side")
                    .short("s")
                    .value_name("SIDE")
                    .takes_value(true)
                    .possible_values(&["w", "b"])
                    .help("The side to generate moves for (defaults to the side to move)"))
                .arg(Arg::with_name("underpromotions")
                    .long("underpromotions")
                    .short("u")
                    .help("Includes promotions to bishop and rook"))
                .arg(fen_arg.clone()))
            .subcommand(SubCommand::with_name("attacks")
                .about("Prints the squares attacked by every rook, bishop and queen in a position")
                .arg(fen_arg))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink())
    };

    let mut settings = match matches.value_of_os("config") {
        Some(path) => Settings::load(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    if let Some(seed) = matches.value_of("seed") {
        settings.seed = Some(parse_seed(seed)?);
    }

    match matches.subcommand() {
        ("board", Some(matches)) => {
            for board in positions(matches)? {
                println!("{}", board.diagram());
            }
        }
        ("moves", Some(matches)) => {
            if matches.is_present("underpromotions") {
                settings.underpromotions = true;
            }
            let side = match matches.value_of("side") {
                Some(side) => Some(side.parse::<Color>()?),
                None => None,
            };
            let tables = build_tables(&settings);
            let mut generator = MoveGenerator::new(&tables);
            generator.underpromotions(settings.underpromotions);

            for board in positions(matches)? {
                let moves = generator.generate(side.unwrap_or_else(|| board.turn()), &board);

                println!("{}", board);
                for mv in &moves {
                    println!("{:6}{:#06x}", mv.to_string(), mv.bits());
                }
                println!("Total:\t{}\n", moves.len());
            }
        }
        ("attacks", Some(matches)) => {
            let tables = build_tables(&settings);

            for board in positions(matches)? {
                print_attacks(&tables, &board);
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn positions(matches: &ArgMatches) -> Result<Vec<BoardState>, Error> {
    matches.values_of("fen")
        .expect("INFALLIBLE")
        .map(|fen| fen.parse().map_err(|err| Error(format!("{}: {}", fen, err))))
        .collect()
}

fn parse_seed(s: &str) -> Result<u64, Error> {
    let parsed = if s.starts_with("0x") || s.starts_with("0X") {
        u64::from_str_radix(&s[2..], 16)
    } else {
        s.parse()
    };
    parsed.map_err(|_| Error(format!("{}: seed must be an unsigned 64-bit integer", s)))
}

fn build_tables(settings: &Settings) -> AttackTables {
    info!("building attack tables with {:?}", settings);
    AttackTableBuilder::new().seed(settings.seed()).build()
}

fn print_attacks(tables: &AttackTables, board: &BoardState) {
    let occupied = board.occupied();

    println!("{}", board);
    for &color in &[Color::White, Color::Black] {
        for &piece in &[Piece::Rook, Piece::Bishop, Piece::Queen] {
            for sq in board.pieces(color, piece) {
                let attacks = match piece {
                    Piece::Rook => tables.attacks(sq, occupied, Slider::Rook),
                    Piece::Bishop => tables.attacks(sq, occupied, Slider::Bishop),
                    _ => tables.queen_attacks(sq, occupied),
                };
                println!("{} {} on {}: {} squares", color_name(color), piece_name(piece), sq,
                         attacks.len());
                println!("{}", attacks.diagram());
            }
        }
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn piece_name(piece: Piece) -> &'static str {
    match piece {
        Piece::Pawn => "pawn",
        Piece::Knight => "knight",
        Piece::Bishop => "bishop",
        Piece::Rook => "rook",
        Piece::Queen => "queen",
        Piece::King => "king",
    }
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error { }

impl From<chess::Error> for Error {
    fn from(err: chess::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

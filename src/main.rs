//! The woodpusher chessboard, terminal front door.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]

use std::collections::HashMap;
use std::fs::{read_to_string, File};
use std::path::{Path, PathBuf};
use clap::{App, Arg, SubCommand, crate_version};
use simplelog::{WriteLogger, LevelFilter};
use rand::seq::SliceRandom;
use woodpusher::chess::{Board, Game, PieceKind, PlayerMove, Square, STARTING_FEN};
use woodpusher::config::Config;

fn main() -> Result<(), Error> {
    let app_dir = dirs::home_dir()
        .map(|home| { home.join(".woodpusher") })
        .unwrap_or_else(|| PathBuf::from("."));

    let matches =
        App::new("Woodpusher")
            .version(crate_version!())
            .about("A point-and-click chessboard, from the terminal side")
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
                .default_value("woodpusher.log")
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
                .global(true)
                .value_name("CONFIG_FILE")
                .takes_value(true)
                .help("Sets the configuration file"))
            .subcommand(SubCommand::with_name("show")
                .about("Prints a board position")
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTING_FEN)
                    .hide_default_value(true)
                    .help("Position to print in Forsyth-Edwards Notation (FEN)"))
                .arg(Arg::with_name("position")
                    .long("position")
                    .short("p")
                    .value_name("NAME")
                    .takes_value(true)
                    .help("Prints a named position from the positions file"))
                .arg(Arg::with_name("positions")
                    .long("positions")
                    .value_name("FILE")
                    .takes_value(true)
                    .help("Overrides the positions file")))
            .subcommand(SubCommand::with_name("moves")
                .about("Lists the destinations available to the piece on a square")
                .arg(Arg::with_name("square")
                    .value_name("SQUARE")
                    .required(true)
                    .help("Square to inspect, like e2"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTING_FEN)
                    .hide_default_value(true)
                    .help("Position to inspect in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("play")
                .about("Plays a sequence of coordinate moves and prints the result")
                .arg(Arg::with_name("moves")
                    .value_name("MOVE")
                    .required(true)
                    .multiple(true)
                    .help("Moves in coordinate form, like e2e4 or e7e8q"))
                .arg(Arg::with_name("fen")
                    .long("fen")
                    .value_name("FEN_STRING")
                    .takes_value(true)
                    .default_value(STARTING_FEN)
                    .hide_default_value(true)
                    .help("Position to start from in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("random")
                .about("Plays random available moves and prints the result")
                .arg(Arg::with_name("count")
                    .long("count")
                    .short("n")
                    .value_name("COUNT")
                    .takes_value(true)
                    .default_value("10")
                    .help("Number of moves to play"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(STARTING_FEN)
                    .hide_default_value(true)
                    .help("Position to start from in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("config")
                .about("Prints the effective configuration as YAML"))
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
            simplelog::Config::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, simplelog::Config::default(), std::io::sink())
    };

    let config_path = matches.value_of_os("config")
        .map(PathBuf::from)
        .unwrap_or_else(|| app_dir.join("config.yaml"));
    let config = read_config(&config_path)?;

    match matches.subcommand() {
        (_, None) => println!("{}", Board::new()),
        ("show", Some(matches)) => {
            let board = if let Some(name) = matches.value_of("position") {
                let path = matches.value_of_os("positions")
                    .map(PathBuf::from)
                    .or_else(|| config.positions_file.clone())
                    .unwrap_or_else(|| app_dir.join("positions.yaml"));
                let positions = read_position_file(&path)?;
                let fen = positions.get(name)
                    .ok_or_else(|| Error(format!("{}: no such position", name)))?;
                parse_board(fen)?
            } else {
                parse_board(matches.value_of("fen").expect("INFALLIBLE"))?
            };
            println!("{}", board);
        },
        ("moves", Some(matches)) => {
            let board = parse_board(matches.value_of("fen").expect("INFALLIBLE"))?;
            let text = matches.value_of("square").expect("INFALLIBLE");
            let square: Square = text.parse()
                .map_err(|err| Error(format!("{}: {}", text, err)))?;

            match board.occupant(square) {
                Some(piece) => {
                    let mut dests: Vec<Square> = piece.moves(&board).into_iter().collect();
                    dests.sort();
                    if dests.is_empty() {
                        println!("{} {}: no moves", piece.symbol(), square);
                    } else {
                        let dests: Vec<String> =
                            dests.iter().map(|dest| dest.to_string()).collect();
                        println!("{} {}: {}", piece.symbol(), square, dests.join(" "));
                    }
                },
                None => println!("{}: empty square", square),
            }
        },
        ("play", Some(matches)) => {
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let mut game = Game::from_fen(fen)
                .map_err(|err| Error(format!("{}: {}", fen, err)))?;

            for text in matches.values_of("moves").expect("INFALLIBLE") {
                let mv: PlayerMove = text.parse()
                    .map_err(|err| Error(format!("{}: {}", text, err)))?;
                if !game.make_move(mv.origin, mv.dest) {
                    return Err(Error(format!("{}: move is not available", text)));
                }
                if let Some(kind) = mv.promotion {
                    promote_at(&mut game, mv.dest, kind)
                        .map_err(|err| Error(format!("{}: {}", text, err)))?;
                }
            }
            println!("{}", game.board());
            println!("{:?} to move", game.turn());
        },
        ("random", Some(matches)) => {
            let count: usize = matches.value_of("count").expect("INFALLIBLE")
                .parse()
                .map_err(|_| Error("count must be numeric".to_owned()))?;
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let mut game = Game::from_fen(fen)
                .map_err(|err| Error(format!("{}: {}", fen, err)))?;

            let mut rng = rand::thread_rng();
            let mut played = Vec::new();
            for _ in 0..count {
                let board = game.board();
                let mut options = Vec::new();
                for piece in board.pieces().filter(|piece| piece.color == game.turn()) {
                    let mut dests: Vec<Square> = piece.moves(board).into_iter().collect();
                    dests.sort();
                    for dest in dests {
                        options.push((piece.pos, dest));
                    }
                }
                match options.choose(&mut rng) {
                    Some(&(origin, dest)) => {
                        game.make_move(origin, dest);
                        played.push(format!("{}{}", origin, dest));
                    },
                    None => {
                        println!("no moves available for {:?}", game.turn());
                        break;
                    },
                }
            }
            println!("{}", game.board());
            if !played.is_empty() {
                println!("{}", played.join(" "));
            }
        },
        ("config", Some(_)) => {
            print!("{}", serde_yaml::to_string(&config)?);
        },
        _ => unreachable!(),
    }

    Ok(())
}

/// Promotes the pawn that just arrived on `square`, refusing if nothing there can promote.
fn promote_at(game: &mut Game, square: Square, kind: PieceKind) -> Result<(), Error> {
    let piece = game.board().occupant(square).expect("INFALLIBLE");
    if piece.kind != PieceKind::Pawn || (square.rank != 0 && square.rank != 7) {
        return Err(Error("promotion is not available".to_owned()));
    }
    game.promote(piece, kind).map_err(|err| Error(err.to_string()))?;
    Ok(())
}

fn read_config(path: &Path) -> Result<Config, Error> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = read_to_string(path)
        .map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
    Ok(serde_yaml::from_str(&s)?)
}

fn read_position_file(path: &Path) -> Result<HashMap<String, String>, Error> {
    let s = read_to_string(path)
        .map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
    Ok(serde_yaml::from_str(&s)?)
}

fn parse_board(fen: &str) -> Result<Board, Error> {
    fen.parse().map_err(|err| Error(format!("{}: {}", fen, err)))
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

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error(err.to_string())
    }
}

use std::time::Duration;

use remote_chess::coord::Coord;
use remote_chess::force::Force;
use remote_chess::util::{as_single_char, split_command};


pub const HELP: &str = "\
Moves:
  e2e4, e2 e4        move a piece
  ?e2                show where the piece on e2 can go
  -                  clear highlights
Commands:
  /reset             start a new game
  /undo, /redo       take back or replay a move
  /engine [color]    let the engine move (computer side by default)
  /random [color]    make a random move (computer side by default)
  /autoplay          let the engine make one autoplay step
  /autoplay <color>  toggle autoplay for a side
  /fen <FEN>         load a position
  /timelimit <dur>   engine think time, e.g. 2s
  /play <color>      play as white or black
  /pgn, /score       print PGN or score
  /lastmove          print the last autoplay move
  /details           toggle score breakdown
  /help, /quit";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Hover(Coord),
    MouseOut,
    Move { from: Coord, to: Coord },
    Reset,
    Undo,
    Redo,
    EngineMove(Option<Force>),
    RandomMove(Option<Force>),
    AutoplayStep,
    ToggleAutoplay(Force),
    ImportFen(String),
    SetTimeLimit(Duration),
    Play(Force),
    Pgn,
    Score,
    LastMove,
    ToggleDetails,
    Help,
    Quit,
}

fn parse_square(s: &str) -> Result<Coord, String> { s.parse() }

fn parse_force(s: &str) -> Result<Force, String> {
    s.parse().map_err(|_| format!("Expected \"white\" or \"black\", got \"{s}\""))
}

fn parse_optional_force(s: &str) -> Result<Option<Force>, String> {
    if s.is_empty() { Ok(None) } else { parse_force(s).map(Some) }
}

fn no_args(cmd: &str, args: &str, command: Command) -> Result<Command, String> {
    if args.is_empty() { Ok(command) } else { Err(format!("/{cmd} takes no arguments")) }
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    if let Some(cmd) = input.strip_prefix('/') {
        let (cmd, args) = split_command(cmd);
        return match cmd {
            "reset" => no_args(cmd, args, Command::Reset),
            "undo" => no_args(cmd, args, Command::Undo),
            "redo" => no_args(cmd, args, Command::Redo),
            "engine" => Ok(Command::EngineMove(parse_optional_force(args)?)),
            "random" => Ok(Command::RandomMove(parse_optional_force(args)?)),
            "autoplay" => Ok(match parse_optional_force(args)? {
                Some(force) => Command::ToggleAutoplay(force),
                None => Command::AutoplayStep,
            }),
            "fen" => {
                if args.is_empty() {
                    Err("Usage: /fen <FEN>".to_owned())
                } else {
                    Ok(Command::ImportFen(args.to_owned()))
                }
            }
            "timelimit" => humantime::parse_duration(args)
                .map(Command::SetTimeLimit)
                .map_err(|err| format!("Invalid duration \"{args}\": {err}")),
            "play" => Ok(Command::Play(parse_force(args)?)),
            "pgn" => no_args(cmd, args, Command::Pgn),
            "score" => no_args(cmd, args, Command::Score),
            "lastmove" => no_args(cmd, args, Command::LastMove),
            "details" => no_args(cmd, args, Command::ToggleDetails),
            "help" => no_args(cmd, args, Command::Help),
            "quit" => no_args(cmd, args, Command::Quit),
            _ => Err(format!("Unknown command: '{cmd}'")),
        };
    }
    if as_single_char(input) == Some('-') {
        return Ok(Command::MouseOut);
    }
    if let Some(square) = input.strip_prefix('?') {
        return Ok(Command::Hover(parse_square(square.trim())?));
    }
    let words: Vec<&str> = input.split_whitespace().collect();
    let (from, to) = match words[..] {
        [from, to] => (from, to),
        [squares] if squares.len() == 4 && squares.is_char_boundary(2) => squares.split_at(2),
        _ => return Err(format!("Cannot parse \"{input}\". Type /help for the list of commands.")),
    };
    Ok(Command::Move { from: parse_square(from)?, to: parse_square(to)? })
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn moves() {
        let e2e4 = Command::Move { from: sq("e2"), to: sq("e4") };
        assert_eq!(parse_command("e2e4"), Ok(e2e4.clone()));
        assert_eq!(parse_command("  e2 e4 "), Ok(e2e4));
        assert_eq!(parse_command("?g1"), Ok(Command::Hover(sq("g1"))));
        assert_eq!(parse_command("-"), Ok(Command::MouseOut));
        assert!(parse_command("e2e9").is_err());
        assert!(parse_command("Nf3").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn commands() {
        assert_eq!(parse_command("/undo"), Ok(Command::Undo));
        assert_eq!(parse_command("/engine"), Ok(Command::EngineMove(None)));
        assert_eq!(parse_command("/random White"), Ok(Command::RandomMove(Some(Force::White))));
        assert_eq!(parse_command("/autoplay"), Ok(Command::AutoplayStep));
        assert_eq!(parse_command("/autoplay black"), Ok(Command::ToggleAutoplay(Force::Black)));
        assert_eq!(
            parse_command("/fen 8/8/8/8/8/8/8/K6k w - - 0 1"),
            Ok(Command::ImportFen("8/8/8/8/8/8/8/K6k w - - 0 1".to_owned()))
        );
        assert_eq!(
            parse_command("/timelimit 1s 500ms"),
            Ok(Command::SetTimeLimit(Duration::from_millis(1500)))
        );
        assert_eq!(parse_command("/play black"), Ok(Command::Play(Force::Black)));
        assert!(parse_command("/play green").is_err());
        assert!(parse_command("/undo 2").is_err());
        assert!(parse_command("/fen").is_err());
        assert!(parse_command("/resign").is_err());
    }
}

// JSON documents exchanged with the remote chess authority. The client never owns any of
// them: each is a disposable copy of the latest successful read.
//
// Decoding is permissive about what is absent (missing numbers are zero, missing flags are
// false) but strict about what is present: a field of the wrong type is a parse error.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::coord::Coord;
use crate::grid::Grid;


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GameStatus {
    Play,
    PlayOpening,
    WhiteInCheck,
    BlackInCheck,
    WhiteWon,
    BlackWon,
    Draw,
    // The authority may grow new states; they are still shown verbatim.
    Other(String),
}

impl GameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            GameStatus::Play => "PLAY",
            GameStatus::PlayOpening => "PLAY_OPENING",
            GameStatus::WhiteInCheck => "WHITE_IN_CHECK",
            GameStatus::BlackInCheck => "BLACK_IN_CHECK",
            GameStatus::WhiteWon => "WHITE_WON",
            GameStatus::BlackWon => "BLACK_WON",
            GameStatus::Draw => "DRAW",
            GameStatus::Other(s) => s,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameStatus::WhiteWon | GameStatus::BlackWon | GameStatus::Draw)
    }
}

impl From<String> for GameStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PLAY" => GameStatus::Play,
            "PLAY_OPENING" => GameStatus::PlayOpening,
            "WHITE_IN_CHECK" => GameStatus::WhiteInCheck,
            "BLACK_IN_CHECK" => GameStatus::BlackInCheck,
            "WHITE_WON" => GameStatus::WhiteWon,
            "BLACK_WON" => GameStatus::BlackWon,
            "DRAW" => GameStatus::Draw,
            _ => GameStatus::Other(s),
        }
    }
}

impl From<GameStatus> for String {
    fn from(status: GameStatus) -> Self { status.as_str().to_owned() }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}


// Evaluation details as computed by the authority. Purely display data.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreBreakdown {
    pub white_score: i64,
    pub black_score: i64,

    #[serde(alias = "whitePawns")]
    pub white_pawns_amount_score: i64,
    #[serde(alias = "blackPawns")]
    pub black_pawns_amount_score: i64,
    #[serde(alias = "whiteKnights")]
    pub white_knights_amount_score: i64,
    #[serde(alias = "blackKnights")]
    pub black_knights_amount_score: i64,
    #[serde(alias = "whiteBishops")]
    pub white_bishops_amount_score: i64,
    #[serde(alias = "blackBishops")]
    pub black_bishops_amount_score: i64,
    #[serde(alias = "whiteRooks")]
    pub white_rooks_amount_score: i64,
    #[serde(alias = "blackRooks")]
    pub black_rooks_amount_score: i64,
    #[serde(alias = "whiteQueens")]
    pub white_queens_amount_score: i64,
    #[serde(alias = "blackQueens")]
    pub black_queens_amount_score: i64,

    pub agility_white: i64,
    pub agility_black: i64,

    pub white_center_pawn_bonus: i64,
    pub black_center_pawn_bonus: i64,
    pub white_doubled_pawn_penalty: i64,
    pub black_doubled_pawn_penalty: i64,
    pub white_isolated_pawn_penalty: i64,
    pub black_isolated_pawn_penalty: i64,
    pub white_rooks_half_open_file_bonus: i64,
    pub black_rooks_half_open_file_bonus: i64,
    pub white_rooks_open_file_bonus: i64,
    pub black_rooks_open_file_bonus: i64,

    pub white_pawns_position: i64,
    pub black_pawns_position: i64,
    pub white_knights_position: i64,
    pub black_knights_position: i64,
    pub white_bishops_position: i64,
    pub black_bishops_position: i64,
    pub white_rooks_position: i64,
    pub black_rooks_position: i64,
    pub white_queens_position: i64,
    pub black_queens_position: i64,
    pub white_kings_position: i64,
    pub black_kings_position: i64,

    pub white_starting_square_penalty: i64,
    pub black_starting_square_penalty: i64,
    pub white_state_bonus: i64,
    pub black_state_bonus: i64,

    pub score_difference: i64,
}

impl ScoreBreakdown {
    // Every field with a human-readable label, in display order.
    pub fn entries(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("White Score", self.white_score),
            ("Black Score", self.black_score),
            ("White Pawns", self.white_pawns_amount_score),
            ("Black Pawns", self.black_pawns_amount_score),
            ("White Knights", self.white_knights_amount_score),
            ("Black Knights", self.black_knights_amount_score),
            ("White Bishops", self.white_bishops_amount_score),
            ("Black Bishops", self.black_bishops_amount_score),
            ("White Rooks", self.white_rooks_amount_score),
            ("Black Rooks", self.black_rooks_amount_score),
            ("White Queens", self.white_queens_amount_score),
            ("Black Queens", self.black_queens_amount_score),
            ("Agility White", self.agility_white),
            ("Agility Black", self.agility_black),
            ("White Center Pawn Bonus", self.white_center_pawn_bonus),
            ("Black Center Pawn Bonus", self.black_center_pawn_bonus),
            ("White Doubled Pawn Penalty", self.white_doubled_pawn_penalty),
            ("Black Doubled Pawn Penalty", self.black_doubled_pawn_penalty),
            ("White Isolated Pawn Penalty", self.white_isolated_pawn_penalty),
            ("Black Isolated Pawn Penalty", self.black_isolated_pawn_penalty),
            ("White Rooks Half-Open File Bonus", self.white_rooks_half_open_file_bonus),
            ("Black Rooks Half-Open File Bonus", self.black_rooks_half_open_file_bonus),
            ("White Rooks Open File Bonus", self.white_rooks_open_file_bonus),
            ("Black Rooks Open File Bonus", self.black_rooks_open_file_bonus),
            ("White Pawns Position", self.white_pawns_position),
            ("Black Pawns Position", self.black_pawns_position),
            ("White Knights Position", self.white_knights_position),
            ("Black Knights Position", self.black_knights_position),
            ("White Bishops Position", self.white_bishops_position),
            ("Black Bishops Position", self.black_bishops_position),
            ("White Rooks Position", self.white_rooks_position),
            ("Black Rooks Position", self.black_rooks_position),
            ("White Queens Position", self.white_queens_position),
            ("Black Queens Position", self.black_queens_position),
            ("White King Position", self.white_kings_position),
            ("Black King Position", self.black_kings_position),
            ("White Starting Square Penalty", self.white_starting_square_penalty),
            ("Black Starting Square Penalty", self.black_starting_square_penalty),
            ("White State Bonus", self.white_state_bonus),
            ("Black State Bonus", self.black_state_bonus),
            ("Score Difference", self.score_difference),
        ]
    }
}


#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub state: GameStatus,
    #[serde(default)]
    pub score: ScoreBreakdown,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub in_state_check: bool,
    #[serde(default)]
    pub in_state_check_mate: bool,
    #[serde(default)]
    pub in_state_draw: bool,
    // Position hash -> number of times the position occurred.
    #[serde(default)]
    pub repetition_counter: BTreeMap<String, u32>,
}

// Response of `GET /state`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateDocument {
    // Principal variation computed by the engine, if any.
    #[serde(rename = "move", default)]
    pub calculated_line: Option<String>,
    pub game_state: GameState,
    #[serde(default)]
    pub score: f64,
    #[serde(default, deserialize_with = "deserialize_last_move")]
    pub last_move: Option<Coord>,
}

// Response of `GET /figure/frontend`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderBoardDocument {
    pub render_board: Grid,
}

// Response of `GET /score`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreSummary {
    #[serde(alias = "whiteScore")]
    pub score_white: i64,
    #[serde(alias = "blackScore")]
    pub score_black: i64,
}

// Response of `GET /pgn`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PgnDocument {
    pub pgn: String,
}

// Response of `GET /autoplay/lastMove`.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMoveDocument {
    pub current_state: GameStatus,
    pub from: Coord,
    pub to: Coord,
}

// Response of every mutating endpoint. Most of them answer with an empty body (decoded as
// `null`), move endpoints answer with a game state; only `state` is of interest.
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
pub struct MoveOutcome {
    pub state: Option<GameStatus>,
}

impl<'de> Deserialize<'de> for MoveOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Body {
            #[serde(default)]
            state: Option<GameStatus>,
        }
        let body: Option<Body> = Option::deserialize(deserializer)?;
        Ok(MoveOutcome { state: body.and_then(|b| b.state) })
    }
}


// One legal destination of a hovered piece.
//
// The authority's coordinate field names drifted over time: `{x, y}` in some versions and
// `{xachse, yachse}` in others, with the rank either a number or a string. All are accepted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Destination(pub Coord);

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Rank {
            Number(u32),
            Text(String),
        }
        #[derive(Deserialize)]
        struct RawDestination {
            #[serde(alias = "xachse", alias = "xAchse")]
            x: String,
            #[serde(alias = "yachse", alias = "yAchse")]
            y: Rank,
        }
        let raw = RawDestination::deserialize(deserializer)?;
        let rank = match raw.y {
            Rank::Number(n) => n.to_string(),
            Rank::Text(s) => s,
        };
        let square = format!("{}{}", raw.x, rank);
        square.parse().map(Destination).map_err(de::Error::custom)
    }
}

// The last move's target square. Backends report it as "e4", as a serialized position object
// ("Position(xAchse=e, yAchse=4)") or as a `{xAchse, yAchse}` map. It only drives the last-move
// marker, so anything unrecognized is dropped rather than failing the whole document.
fn deserialize_last_move<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Coord>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLastMove {
        Text(String),
        Square(Destination),
        Other(de::IgnoredAny),
    }
    let coord = match Option::<RawLastMove>::deserialize(deserializer)? {
        None => None,
        Some(RawLastMove::Text(s)) => parse_last_move(&s),
        Some(RawLastMove::Square(Destination(coord))) => Some(coord),
        Some(RawLastMove::Other(_)) => {
            log::debug!("Ignoring last move of unexpected type");
            None
        }
    };
    Ok(coord)
}

pub fn parse_last_move(s: &str) -> Option<Coord> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(coord) = s.parse() {
        return Some(coord);
    }
    let coord = s
        .strip_prefix("Position(")
        .and_then(|fields| fields.strip_suffix(')'))
        .and_then(|fields| {
            let mut file = None;
            let mut rank = None;
            for field in fields.split(',') {
                let (key, value) = field.split_once('=')?;
                match key.trim() {
                    "xAchse" | "xachse" | "x" => file = Some(value.trim()),
                    "yAchse" | "yachse" | "y" => rank = Some(value.trim()),
                    _ => {}
                }
            }
            format!("{}{}", file?, rank?).parse::<Coord>().ok()
        });
    if coord.is_none() {
        log::debug!("Ignoring unrecognized last move \"{s}\"");
    }
    coord
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn decode_game_state_document() {
        let doc: GameStateDocument = serde_json::from_str(indoc! {r#"
            {
                "move": "e2e4, e7e5",
                "lastMove": "e5",
                "score": -3.5,
                "gameState": {
                    "state": "WHITE_IN_CHECK",
                    "score": { "whiteScore": 3900, "blackScore": 3903, "whitePawns": 800 },
                    "gameOver": false,
                    "inStateCheck": true,
                    "repetitionCounter": { "-1234": 1, "98765": 2 }
                }
            }
        "#})
        .unwrap();
        assert_eq!(doc.calculated_line.as_deref(), Some("e2e4, e7e5"));
        assert_eq!(doc.last_move, Some(sq("e5")));
        assert_eq!(doc.score, -3.5);
        assert_eq!(doc.game_state.state, GameStatus::WhiteInCheck);
        assert!(doc.game_state.in_state_check);
        assert!(!doc.game_state.in_state_check_mate);
        assert_eq!(doc.game_state.score.white_score, 3900);
        assert_eq!(doc.game_state.score.white_pawns_amount_score, 800);
        assert_eq!(doc.game_state.score.black_queens_position, 0);
        assert_eq!(doc.game_state.repetition_counter.get("98765"), Some(&2));
    }

    #[test]
    fn minimal_game_state_document() {
        let doc: GameStateDocument =
            serde_json::from_str(r#"{"gameState": {"state": "PLAY"}}"#).unwrap();
        assert_eq!(doc.calculated_line, None);
        assert_eq!(doc.score, 0.0);
        assert_eq!(doc.game_state.score, ScoreBreakdown::default());
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        assert!(
            serde_json::from_str::<GameStateDocument>(
                r#"{"gameState": {"state": "PLAY", "gameOver": "yes"}}"#
            )
            .is_err()
        );
        assert!(serde_json::from_str::<GameStateDocument>(r#"{"score": 1}"#).is_err());
    }

    #[test]
    fn last_move_formats() {
        assert_eq!(parse_last_move("e4"), Some(sq("e4")));
        assert_eq!(parse_last_move("Position(xAchse=e, yAchse=4)"), Some(sq("e4")));
        assert_eq!(parse_last_move("e2-e4"), None);
        assert_eq!(parse_last_move(""), None);

        let last_move = |json: &str| {
            serde_json::from_str::<GameStateDocument>(&format!(
                r#"{{"gameState": {{"state": "PLAY"}}, "lastMove": {json}}}"#
            ))
            .unwrap()
            .last_move
        };
        assert_eq!(last_move(r#""Position(xAchse=h, yAchse=8)""#), Some(sq("h8")));
        assert_eq!(last_move(r#"{"xAchse": "c", "yAchse": 6}"#), Some(sq("c6")));
        assert_eq!(last_move(r#""e2-e4""#), None);
        assert_eq!(last_move("17"), None);
        assert_eq!(last_move("null"), None);
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: GameStatus = serde_json::from_str(r#""STALEMATE_PENDING""#).unwrap();
        assert_eq!(status, GameStatus::Other("STALEMATE_PENDING".to_owned()));
        assert_eq!(status.to_string(), "STALEMATE_PENDING");
    }

    #[test]
    fn destination_field_names() {
        let moves: Vec<Destination> = serde_json::from_str(
            r#"[{"x": "e", "y": 4}, {"xachse": "e", "yachse": 3}, {"xAchse": "d", "yAchse": "3"}]"#,
        )
        .unwrap();
        assert_eq!(
            moves,
            vec![Destination(sq("e4")), Destination(sq("e3")), Destination(sq("d3"))]
        );
        assert!(serde_json::from_str::<Destination>(r#"{"x": "e", "y": 9}"#).is_err());
        assert!(serde_json::from_str::<Destination>(r#"{"file": "e"}"#).is_err());
    }

    #[test]
    fn move_outcome() {
        let outcome: MoveOutcome = serde_json::from_str("null").unwrap();
        assert_eq!(outcome.state, None);
        let outcome: MoveOutcome =
            serde_json::from_str(r#"{"state": "BLACK_WON", "score": {}}"#).unwrap();
        assert_eq!(outcome.state, Some(GameStatus::BlackWon));
    }
}

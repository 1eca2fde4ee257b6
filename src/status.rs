// Pure mapping from a game state document to everything the status panel and the king glow
// show. Total over every state the authority can report, including unknown ones.

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;

use crate::document::{GameStateDocument, GameStatus};
use crate::force::Force;
use crate::view::KingGlow;


// Shown instead of the raw state while the game simply goes on.
pub const IDLE_HEADER: &str = "Drag a piece to make a move";

const NO_CALCULATED_LINE: &str = "No moves yet";

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScoreRow {
    pub label: String,
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ScoreTable {
    pub rows: Vec<ScoreRow>,
}

impl ScoreTable {
    fn push(&mut self, label: impl Into<String>, value: impl ToString) {
        self.rows.push(ScoreRow { label: label.into(), value: value.to_string() });
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|row| row.label == label).map(|row| row.value.as_str())
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct StatusView {
    pub header_text: String,
    pub glow: EnumMap<Force, KingGlow>,
    pub calculated_line: String,
    pub score_text: String,
    pub score_table: ScoreTable,
}

pub fn header_text(status: &GameStatus) -> String {
    match status {
        GameStatus::Play => IDLE_HEADER.to_owned(),
        _ => status.to_string(),
    }
}

pub fn king_glow(status: &GameStatus) -> EnumMap<Force, KingGlow> {
    use KingGlow::*;
    match status {
        GameStatus::WhiteInCheck => enum_map! { Force::White => InCheck, Force::Black => None },
        GameStatus::BlackInCheck => enum_map! { Force::White => None, Force::Black => InCheck },
        GameStatus::WhiteWon => enum_map! { Force::White => None, Force::Black => Defeated },
        GameStatus::BlackWon => enum_map! { Force::White => Defeated, Force::Black => None },
        GameStatus::Play
        | GameStatus::PlayOpening
        | GameStatus::Draw
        | GameStatus::Other(_) => enum_map! { _ => None },
    }
}

pub fn score_table(doc: &GameStateDocument) -> ScoreTable {
    let state = &doc.game_state;
    let mut table = ScoreTable::default();
    table.push("Game State", &state.state);
    table.push("Overall Score", doc.score);
    for (label, value) in state.score.entries() {
        table.push(label, value);
    }
    table.push("Game Over", state.game_over);
    table.push("In State Check", state.in_state_check);
    table.push("In State CheckMate", state.in_state_check_mate);
    table.push("In State Draw", state.in_state_draw);
    // BTreeMap iteration is already sorted by position hash.
    for (hash, count) in state.repetition_counter.iter() {
        table.push(format!("Repetition {hash}"), count);
    }
    table
}

pub fn reduce(doc: &GameStateDocument) -> StatusView {
    StatusView {
        header_text: header_text(&doc.game_state.state),
        glow: king_glow(&doc.game_state.state),
        calculated_line: format!(
            "Calculated Line: {}",
            doc.calculated_line.as_deref().filter(|line| !line.is_empty()).unwrap_or(NO_CALCULATED_LINE)
        ),
        score_text: format!("SCORE: {}", doc.score),
        score_table: score_table(doc),
    }
}

// For logs and the console client.
pub fn active_glow(glow: &EnumMap<Force, KingGlow>) -> Option<(Force, KingGlow)> {
    glow.iter().filter(|&(_, &g)| g != KingGlow::None).map(|(f, &g)| (f, g)).exactly_one().ok()
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::{GameState, ScoreBreakdown};

    fn doc(status: GameStatus) -> GameStateDocument {
        GameStateDocument {
            calculated_line: None,
            game_state: GameState {
                state: status,
                score: ScoreBreakdown::default(),
                game_over: false,
                in_state_check: false,
                in_state_check_mate: false,
                in_state_draw: false,
                repetition_counter: Default::default(),
            },
            score: 0.0,
            last_move: None,
        }
    }

    fn all_states() -> Vec<GameStatus> {
        vec![
            GameStatus::Play,
            GameStatus::PlayOpening,
            GameStatus::WhiteInCheck,
            GameStatus::BlackInCheck,
            GameStatus::WhiteWon,
            GameStatus::BlackWon,
            GameStatus::Draw,
            GameStatus::Other("SOMETHING_NEW".to_owned()),
        ]
    }

    #[test]
    fn header() {
        assert_eq!(reduce(&doc(GameStatus::Play)).header_text, IDLE_HEADER);
        assert_eq!(reduce(&doc(GameStatus::WhiteInCheck)).header_text, "WHITE_IN_CHECK");
        assert_eq!(reduce(&doc(GameStatus::Draw)).header_text, "DRAW");
        assert_eq!(
            reduce(&doc(GameStatus::Other("SOMETHING_NEW".to_owned()))).header_text,
            "SOMETHING_NEW"
        );
    }

    #[test]
    fn at_most_one_glow() {
        for status in all_states() {
            let view = reduce(&doc(status.clone()));
            let active = view.glow.values().filter(|&&g| g != KingGlow::None).count();
            assert!(active <= 1, "{status}");
            assert!(!view.header_text.is_empty(), "{status}");
        }
    }

    #[test]
    fn glow_mapping() {
        let glow = |status| active_glow(&reduce(&doc(status)).glow);
        assert_eq!(glow(GameStatus::WhiteInCheck), Some((Force::White, KingGlow::InCheck)));
        assert_eq!(glow(GameStatus::BlackInCheck), Some((Force::Black, KingGlow::InCheck)));
        assert_eq!(glow(GameStatus::WhiteWon), Some((Force::Black, KingGlow::Defeated)));
        assert_eq!(glow(GameStatus::BlackWon), Some((Force::White, KingGlow::Defeated)));
        assert_eq!(glow(GameStatus::Play), None);
        assert_eq!(glow(GameStatus::Draw), None);
    }

    #[test]
    fn texts() {
        let mut d = doc(GameStatus::Play);
        assert_eq!(reduce(&d).calculated_line, "Calculated Line: No moves yet");
        d.calculated_line = Some("e2e4 e7e5".to_owned());
        d.score = 1.5;
        let view = reduce(&d);
        assert_eq!(view.calculated_line, "Calculated Line: e2e4 e7e5");
        assert_eq!(view.score_text, "SCORE: 1.5");
    }

    #[test]
    fn table_rows() {
        let mut d = doc(GameStatus::BlackInCheck);
        d.score = -2.0;
        d.game_state.in_state_check = true;
        d.game_state.score.white_score = 3900;
        d.game_state.repetition_counter.insert("42".to_owned(), 2);
        d.game_state.repetition_counter.insert("17".to_owned(), 1);
        let table = score_table(&d);
        assert_eq!(table.get("Game State"), Some("BLACK_IN_CHECK"));
        assert_eq!(table.get("Overall Score"), Some("-2"));
        assert_eq!(table.get("White Score"), Some("3900"));
        assert_eq!(table.get("In State Check"), Some("true"));
        assert_eq!(table.get("Game Over"), Some("false"));
        let repetitions =
            table.rows.iter().filter(|r| r.label.starts_with("Repetition")).map(|r| &r.label).collect_vec();
        assert_eq!(repetitions, vec!["Repetition 17", "Repetition 42"]);
        assert_eq!(table.rows.len(), 2 + ScoreBreakdown::default().entries().len() + 4 + 2);
    }
}

// Pointer/drag state machine. Transitions are pure; `ClientSession` performs the requests and
// feeds the results back.
//
//   Idle ──mouseover──> Hovering(sq) ──moves arrived──> Hovering(sq)
//     ^                   │    │
//     └─────mouseout──────┘    └──drop──> Committing{from, to} ──response──> Idle

use crate::coord::Coord;


#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Hovering(Coord),
    Committing { from: Coord, to: Coord },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoverResolution {
    // The pointer has moved on; the response must not touch the board.
    Stale,
    // The piece cannot move (or there is no piece at all).
    NoMoves,
    Highlight,
}

impl InteractionState {
    pub fn is_committing(self) -> bool { matches!(self, InteractionState::Committing { .. }) }

    // Returns whether possible moves should be requested.
    pub fn on_mouseover(&mut self, coord: Coord) -> bool {
        if self.is_committing() {
            return false;
        }
        *self = InteractionState::Hovering(coord);
        true
    }

    pub fn on_mouseout(&mut self) {
        if let InteractionState::Hovering(_) = self {
            *self = InteractionState::Idle;
        }
    }

    pub fn on_moves_received(&mut self, origin: Coord, num_moves: usize) -> HoverResolution {
        if *self != InteractionState::Hovering(origin) {
            return HoverResolution::Stale;
        }
        if num_moves == 0 {
            *self = InteractionState::Idle;
            return HoverResolution::NoMoves;
        }
        HoverResolution::Highlight
    }

    // Returns whether the move should be sent. Dropping a piece back onto its own square
    // cancels the drag.
    pub fn on_drop(&mut self, from: Coord, to: Coord) -> bool {
        if self.is_committing() {
            return false;
        }
        if from == to {
            *self = InteractionState::Idle;
            return false;
        }
        *self = InteractionState::Committing { from, to };
        true
    }

    pub fn on_commit_finished(&mut self) { *self = InteractionState::Idle; }

    // Board changed under the pointer: any hover is meaningless now.
    pub fn on_board_changed(&mut self) {
        if let InteractionState::Hovering(_) = self {
            *self = InteractionState::Idle;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    #[test]
    fn hover_then_moves() {
        let mut state = InteractionState::Idle;
        assert!(state.on_mouseover(sq("e2")));
        assert_eq!(state, InteractionState::Hovering(sq("e2")));
        assert_eq!(state.on_moves_received(sq("e2"), 2), HoverResolution::Highlight);
        assert_eq!(state, InteractionState::Hovering(sq("e2")));
    }

    #[test]
    fn empty_moves_return_to_idle() {
        let mut state = InteractionState::Idle;
        state.on_mouseover(sq("a1"));
        assert_eq!(state.on_moves_received(sq("a1"), 0), HoverResolution::NoMoves);
        assert_eq!(state, InteractionState::Idle);
    }

    #[test]
    fn stale_response() {
        let mut state = InteractionState::Idle;
        state.on_mouseover(sq("e2"));
        state.on_mouseover(sq("d2"));
        assert_eq!(state.on_moves_received(sq("e2"), 2), HoverResolution::Stale);
        state.on_mouseout();
        assert_eq!(state.on_moves_received(sq("d2"), 2), HoverResolution::Stale);
    }

    #[test]
    fn drop_and_commit() {
        let mut state = InteractionState::Hovering(sq("e2"));
        assert!(state.on_drop(sq("e2"), sq("e4")));
        assert_eq!(state, InteractionState::Committing { from: sq("e2"), to: sq("e4") });
        assert!(!state.on_mouseover(sq("d2")));
        state.on_mouseout();
        assert!(state.is_committing());
        state.on_commit_finished();
        assert_eq!(state, InteractionState::Idle);
    }

    #[test]
    fn cancelled_drag() {
        let mut state = InteractionState::Hovering(sq("e2"));
        assert!(!state.on_drop(sq("e2"), sq("e2")));
        assert_eq!(state, InteractionState::Idle);
    }
}

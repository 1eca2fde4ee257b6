use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use crate::config::ClientOptions;
use crate::coord::Coord;
use crate::document::{
    Destination, GameStateDocument, GameStatus, LastMoveDocument, MoveOutcome, PgnDocument,
    RenderBoardDocument, ScoreSummary,
};
use crate::error::RequestError;
use crate::force::Force;
use crate::grid::Grid;
use crate::highlight::HighlightTracker;
use crate::interaction::{HoverResolution, InteractionState};
use crate::status;
use crate::transport::{ApiClient, EngineMoveKind, Endpoint, Transport};
use crate::view::{BoardWidget, SquareBackground, StatusPanel};


#[derive(Clone, PartialEq, Debug)]
pub enum NotableEvent {
    StatusChanged(GameStatus),
    GameOver(GameStatus),
}

// Client-side projection of the remote game. Nothing here is authoritative: the board and the
// game state are overwritten wholesale by every reconciliation.
//
// All methods take `&self`: the session is shared through `Rc` between the poll timer and UI
// event handlers, which run interleaved on a single thread. Interior borrows are never held
// across an `.await`.
pub struct ClientSession {
    api: ApiClient,
    options: ClientOptions,
    board: RefCell<Box<dyn BoardWidget>>,
    panel: RefCell<Box<dyn StatusPanel>>,
    highlights: RefCell<HighlightTracker>,
    interaction: Cell<InteractionState>,
    latest_board: RefCell<Option<Grid>>,
    latest_game_data: RefCell<Option<GameStateDocument>>,
    computer_force: Cell<Force>,
    // Sequence number of the latest reconciliation started.
    reconcile_seq: Cell<u64>,
    // Sequence numbers of the reconciliations whose board and game state are shown.
    applied_board_seq: Cell<u64>,
    applied_state_seq: Cell<u64>,
    notable_events: RefCell<VecDeque<NotableEvent>>,
}

impl ClientSession {
    pub fn new(
        options: ClientOptions, transport: Box<dyn Transport>, board: Box<dyn BoardWidget>,
        panel: Box<dyn StatusPanel>,
    ) -> Result<Self, RequestError> {
        let api = ApiClient::new(options.base_url.clone(), transport)?;
        Ok(ClientSession {
            api,
            computer_force: Cell::new(options.computer_force),
            options,
            board: RefCell::new(board),
            panel: RefCell::new(panel),
            highlights: RefCell::new(HighlightTracker::new()),
            interaction: Cell::new(InteractionState::Idle),
            latest_board: RefCell::new(None),
            latest_game_data: RefCell::new(None),
            reconcile_seq: Cell::new(0),
            applied_board_seq: Cell::new(0),
            applied_state_seq: Cell::new(0),
            notable_events: RefCell::new(VecDeque::new()),
        })
    }

    pub fn options(&self) -> &ClientOptions { &self.options }
    pub fn interaction_state(&self) -> InteractionState { self.interaction.get() }
    pub fn computer_force(&self) -> Force { self.computer_force.get() }
    pub fn latest_board(&self) -> Option<Grid> { self.latest_board.borrow().clone() }
    pub fn latest_game_data(&self) -> Option<GameStateDocument> { self.latest_game_data.borrow().clone() }
    pub fn highlighted_squares(&self) -> Vec<(Coord, SquareBackground)> {
        self.highlights.borrow().squares().collect()
    }

    pub fn next_notable_event(&self) -> Option<NotableEvent> {
        self.notable_events.borrow_mut().pop_front()
    }

    // Brings the board and the status panel in line with the authority: render board first,
    // then game state. Safe to call at any time and any number of times.
    pub async fn reconcile(&self) {
        let seq = self.reconcile_seq.get() + 1;
        self.reconcile_seq.set(seq);

        let Some(doc) = self.api.fetch::<RenderBoardDocument>(&Endpoint::RenderBoard).await else {
            return;
        };
        if self.is_fresh(&self.applied_board_seq, seq) {
            self.apply_board(doc.render_board);
        }

        let Some(doc) = self.api.fetch::<GameStateDocument>(&Endpoint::GameState).await else {
            return;
        };
        if self.is_fresh(&self.applied_state_seq, seq) {
            self.apply_game_state(doc);
        }
    }

    fn is_fresh(&self, applied_seq: &Cell<u64>, seq: u64) -> bool {
        if self.options.discard_stale_responses && seq < applied_seq.get() {
            log::debug!("Discarding response of reconciliation #{seq}, #{} already shown", applied_seq.get());
            return false;
        }
        applied_seq.set(seq.max(applied_seq.get()));
        true
    }

    fn apply_board(&self, grid: Grid) {
        let changed = self.latest_board.borrow().as_ref() != Some(&grid);
        let mut board = self.board.borrow_mut();
        if changed {
            self.highlights.borrow_mut().clear_all(&mut **board);
            self.update_interaction(|state| state.on_board_changed());
        }
        board.position(&grid);
        *self.latest_board.borrow_mut() = Some(grid);
    }

    fn apply_game_state(&self, doc: GameStateDocument) {
        let view = status::reduce(&doc);
        {
            let mut panel = self.panel.borrow_mut();
            panel.set_header(&view.header_text);
            panel.set_calculated_line(&view.calculated_line);
            panel.set_score(&view.score_text);
            panel.set_details(&view.score_table);
        }

        let previous = self.latest_game_data.borrow_mut().take();
        let previous_last_move = previous.as_ref().and_then(|prev| prev.last_move);
        let status = &doc.game_state.state;
        {
            let mut board = self.board.borrow_mut();
            for (force, glow) in view.glow {
                board.set_king_glow(force, glow);
            }
            if doc.last_move != previous_last_move {
                board.set_last_move(doc.last_move, *status == GameStatus::PlayOpening);
            }
        }
        if let Some(previous) = previous {
            let previous_status = &previous.game_state.state;
            if previous_status != status {
                log::info!("Game state: {previous_status} -> {status}");
                let mut events = self.notable_events.borrow_mut();
                events.push_back(NotableEvent::StatusChanged(status.clone()));
                if status.is_game_over() && !previous_status.is_game_over() {
                    events.push_back(NotableEvent::GameOver(status.clone()));
                }
            }
        }
        *self.latest_game_data.borrow_mut() = Some(doc);
    }

    fn update_interaction<R>(&self, f: impl FnOnce(&mut InteractionState) -> R) -> R {
        let mut state = self.interaction.get();
        let ret = f(&mut state);
        self.interaction.set(state);
        ret
    }

    fn clear_highlights(&self) {
        self.highlights.borrow_mut().clear_all(&mut **self.board.borrow_mut());
    }

    pub async fn mouseover(&self, coord: Coord) {
        if !self.update_interaction(|state| state.on_mouseover(coord)) {
            return;
        }
        let Some(moves) = self.api.fetch::<Vec<Destination>>(&Endpoint::PossibleMoves(coord)).await
        else {
            return;
        };
        match self.update_interaction(|state| state.on_moves_received(coord, moves.len())) {
            HoverResolution::Stale | HoverResolution::NoMoves => {}
            HoverResolution::Highlight => {
                let mut board = self.board.borrow_mut();
                let mut highlights = self.highlights.borrow_mut();
                highlights.clear_all(&mut **board);
                highlights.highlight(coord, &mut **board);
                for Destination(to) in moves {
                    highlights.highlight(to, &mut **board);
                }
            }
        }
    }

    pub fn mouseout(&self) {
        self.clear_highlights();
        self.update_interaction(|state| state.on_mouseout());
    }

    // A piece was dragged from `from` and released over `to`.
    pub async fn drop_piece(&self, from: Coord, to: Coord) {
        self.clear_highlights();
        if !self.update_interaction(|state| state.on_drop(from, to)) {
            return;
        }
        let outcome = self.api.fetch::<MoveOutcome>(&Endpoint::CommitMove { from, to }).await;
        self.update_interaction(|state| state.on_commit_finished());
        if let Some(outcome) = outcome {
            self.apply_outcome(&outcome);
            self.reconcile().await;
        }
    }

    fn apply_outcome(&self, outcome: &MoveOutcome) {
        if let Some(state) = &outcome.state {
            self.panel.borrow_mut().set_header(&status::header_text(state));
        }
    }

    async fn run_command(&self, endpoint: Endpoint) {
        log::info!("Command: {endpoint}");
        if let Some(outcome) = self.api.fetch::<MoveOutcome>(&endpoint).await {
            self.apply_outcome(&outcome);
            self.reconcile().await;
        }
    }

    pub async fn reset(&self) { self.run_command(Endpoint::Reset).await }
    pub async fn undo(&self) { self.run_command(Endpoint::Undo).await }
    pub async fn redo(&self) { self.run_command(Endpoint::Redo).await }
    pub async fn autoplay_step(&self) { self.run_command(Endpoint::AutoplayStep).await }
    pub async fn toggle_autoplay(&self, force: Force) {
        self.run_command(Endpoint::ToggleAutoplay(force)).await
    }
    pub async fn request_engine_move(&self, force: Force) {
        self.run_command(Endpoint::RequestMove { kind: EngineMoveKind::Intelligent, force }).await
    }
    pub async fn request_random_move(&self, force: Force) {
        self.run_command(Endpoint::RequestMove { kind: EngineMoveKind::Random, force }).await
    }
    pub async fn computer_move(&self) { self.request_engine_move(self.computer_force.get()).await }
    pub async fn import_fen(&self, fen: &str) {
        self.run_command(Endpoint::ImportFen(fen.trim().to_owned())).await
    }
    pub async fn set_time_limit(&self, limit: Duration) {
        self.run_command(Endpoint::SetTimeLimit(limit)).await
    }

    pub async fn fetch_pgn(&self) -> Option<String> {
        self.api.fetch::<PgnDocument>(&Endpoint::Pgn).await.map(|doc| doc.pgn)
    }
    pub async fn fetch_score(&self) -> Option<ScoreSummary> { self.api.fetch(&Endpoint::Score).await }
    pub async fn fetch_last_move(&self) -> Option<LastMoveDocument> {
        self.api.fetch(&Endpoint::LastMove).await
    }

    // The user plays `force`; the computer takes the other side.
    pub fn choose_force(&self, force: Force) {
        self.board.borrow_mut().orientation(force);
        self.computer_force.set(force.opponent());
    }
}

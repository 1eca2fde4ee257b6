use std::cell::RefCell;
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

use async_std::io;
use async_std::task;
use futures_util::future::{self, Either};
use remote_chess::client::{ClientSession, NotableEvent};
use remote_chess::config::ClientOptions;
use remote_chess::poll::poll_forever;

use crate::command::{Command, HELP, parse_command};
use crate::http_transport::ReqwestTransport;
use crate::tui::{ConsoleView, Screen};


const RENDER_INTERVAL: Duration = Duration::from_millis(100);

enum InputOutcome {
    Continue,
    Quit,
}

pub fn run(options: ClientOptions) -> anyhow::Result<()> {
    println!("Connecting to {}...", options.base_url);
    let screen = Rc::new(RefCell::new(Screen::new()));
    let view = ConsoleView::new(Rc::clone(&screen));
    let session = ClientSession::new(
        options,
        Box::new(ReqwestTransport::new()),
        Box::new(view.clone()),
        Box::new(view),
    )?;
    println!("Type /help for the list of commands.");

    task::block_on(async {
        let poll = pin!(poll_forever(&session, task::sleep));
        let render = pin!(render_loop(&session, &screen));
        let input = pin!(input_loop(&session, &screen));
        match future::select(input, future::select(poll, render)).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                anyhow::bail!(remote_chess::internal_error_message!("background loop terminated"))
            }
        }
    })
}

async fn render_loop(session: &ClientSession, screen: &RefCell<Screen>) {
    loop {
        if let Some(frame) = screen.borrow().take_frame() {
            println!("\n{frame}");
        }
        while let Some(event) = session.next_notable_event() {
            match event {
                NotableEvent::StatusChanged(_) => {}
                NotableEvent::GameOver(status) => {
                    println!("{}", console::style(format!("Game over: {status}")).magenta());
                }
            }
        }
        task::sleep(RENDER_INTERVAL).await;
    }
}

async fn input_loop(session: &ClientSession, screen: &RefCell<Screen>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line).await? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                if let InputOutcome::Quit = execute(session, screen, command).await {
                    return Ok(());
                }
            }
            Err(err) => println!("{}", console::style(err).red()),
        }
    }
}

async fn execute(session: &ClientSession, screen: &RefCell<Screen>, command: Command) -> InputOutcome {
    match command {
        Command::Hover(coord) => session.mouseover(coord).await,
        Command::MouseOut => session.mouseout(),
        Command::Move { from, to } => session.drop_piece(from, to).await,
        Command::Reset => session.reset().await,
        Command::Undo => session.undo().await,
        Command::Redo => session.redo().await,
        Command::EngineMove(None) => session.computer_move().await,
        Command::EngineMove(Some(force)) => session.request_engine_move(force).await,
        Command::RandomMove(force) => {
            session.request_random_move(force.unwrap_or(session.computer_force())).await
        }
        Command::AutoplayStep => session.autoplay_step().await,
        Command::ToggleAutoplay(force) => session.toggle_autoplay(force).await,
        Command::ImportFen(fen) => session.import_fen(&fen).await,
        Command::SetTimeLimit(limit) => session.set_time_limit(limit).await,
        Command::Play(force) => {
            session.choose_force(force);
            println!("Playing {force}, computer plays {}", session.computer_force());
        }
        Command::Pgn => match session.fetch_pgn().await {
            Some(pgn) => println!("{pgn}"),
            None => println!("PGN is not available"),
        },
        Command::Score => {
            if let Some(score) = session.fetch_score().await {
                println!("White: {}  Black: {}", score.score_white, score.score_black);
            }
        }
        Command::LastMove => {
            if let Some(last_move) = session.fetch_last_move().await {
                println!("{}-{} ({})", last_move.from, last_move.to, last_move.current_state);
            }
        }
        Command::ToggleDetails => screen.borrow_mut().toggle_details(),
        Command::Help => println!("{HELP}"),
        Command::Quit => return InputOutcome::Quit,
    }
    InputOutcome::Continue
}

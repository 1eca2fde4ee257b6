// Improvement potential. Redraw in place instead of printing a new board below the old one.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use console::Style;
use enum_map::EnumMap;
use itertools::Itertools;
use remote_chess::coord::{Col, Coord, Row};
use remote_chess::dirty::Dirty;
use remote_chess::force::Force;
use remote_chess::grid::Grid;
use remote_chess::piece::piece_to_pictogram;
use remote_chess::status::ScoreTable;
use remote_chess::view::{BoardWidget, GlowColor, KingGlow, SquareBackground, StatusPanel};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardScreen {
    pub grid: Grid,
    pub orientation: Force,
    pub backgrounds: BTreeMap<Coord, SquareBackground>,
    pub glow: EnumMap<Force, KingGlow>,
    pub last_move: Option<Coord>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct PanelScreen {
    pub header: String,
    pub calculated_line: String,
    pub score: String,
    pub details: ScoreTable,
}

#[derive(Debug)]
pub struct Screen {
    pub board: Dirty<BoardScreen>,
    pub panel: Dirty<PanelScreen>,
    pub show_details: bool,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            board: Dirty::new(BoardScreen {
                grid: Grid::new(),
                orientation: Force::White,
                backgrounds: BTreeMap::new(),
                glow: EnumMap::default(),
                last_move: None,
            }),
            panel: Dirty::new(PanelScreen::default()),
            show_details: false,
        }
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
        self.panel.mark_dirty();
    }

    // Returns the text to print if anything changed since the last call.
    pub fn take_frame(&self) -> Option<String> {
        // Evaluate both: each call resets its flag.
        let board_dirty = self.board.take_dirt();
        let panel_dirty = self.panel.take_dirt();
        if !board_dirty && !panel_dirty {
            return None;
        }
        let mut frame = format!("{}\n{}", render_board(&self.board), render_panel(&self.panel));
        if self.show_details {
            frame.push('\n');
            frame.push_str(&render_details(&self.panel.details));
        }
        Some(frame)
    }
}

// Board widget and status panel of the console client. Every update goes into the shared
// `Screen`; the render loop prints it.
#[derive(Clone)]
pub struct ConsoleView {
    screen: Rc<RefCell<Screen>>,
}

impl ConsoleView {
    pub fn new(screen: Rc<RefCell<Screen>>) -> Self { ConsoleView { screen } }
}

impl BoardWidget for ConsoleView {
    fn position(&mut self, grid: &Grid) {
        let mut screen = self.screen.borrow_mut();
        if screen.board.grid != *grid {
            screen.board.get_mut().grid = grid.clone();
        }
    }
    fn orientation(&mut self, force: Force) {
        let mut screen = self.screen.borrow_mut();
        if screen.board.orientation != force {
            screen.board.get_mut().orientation = force;
        }
    }
    fn set_square_background(&mut self, coord: Coord, background: Option<SquareBackground>) {
        let mut screen = self.screen.borrow_mut();
        if screen.board.backgrounds.get(&coord).copied() == background {
            return;
        }
        let backgrounds = &mut screen.board.get_mut().backgrounds;
        match background {
            Some(background) => backgrounds.insert(coord, background),
            None => backgrounds.remove(&coord),
        };
    }
    fn set_king_glow(&mut self, force: Force, glow: KingGlow) {
        let mut screen = self.screen.borrow_mut();
        if screen.board.glow[force] != glow {
            screen.board.get_mut().glow[force] = glow;
        }
    }
    fn set_last_move(&mut self, to: Option<Coord>, _is_opening: bool) {
        let mut screen = self.screen.borrow_mut();
        if screen.board.last_move != to {
            screen.board.get_mut().last_move = to;
        }
    }
}

impl StatusPanel for ConsoleView {
    fn set_header(&mut self, text: &str) {
        let mut screen = self.screen.borrow_mut();
        let panel = PanelScreen { header: text.to_owned(), ..(*screen.panel).clone() };
        screen.panel.set(panel);
    }
    fn set_calculated_line(&mut self, text: &str) {
        let mut screen = self.screen.borrow_mut();
        let panel = PanelScreen { calculated_line: text.to_owned(), ..(*screen.panel).clone() };
        screen.panel.set(panel);
    }
    fn set_score(&mut self, text: &str) {
        let mut screen = self.screen.borrow_mut();
        let panel = PanelScreen { score: text.to_owned(), ..(*screen.panel).clone() };
        screen.panel.set(panel);
    }
    fn set_details(&mut self, table: &ScoreTable) {
        let mut screen = self.screen.borrow_mut();
        let panel = PanelScreen { details: table.clone(), ..(*screen.panel).clone() };
        screen.panel.set(panel);
    }
}

fn square_style(board: &BoardScreen, coord: Coord) -> Style {
    let glow = [Force::White, Force::Black]
        .into_iter()
        .find(|&force| board.grid.find_king(force) == Some(coord))
        .and_then(|force| board.glow[force].color(force));
    let style = Style::new().color256(233);
    let style = match (glow, board.backgrounds.get(&coord)) {
        (Some(GlowColor::Blue), _) => style.on_color256(27),
        (Some(GlowColor::Red), _) => style.on_color256(196),
        (None, Some(SquareBackground::LightSkyBlue)) => style.on_color256(117),
        (None, Some(SquareBackground::Blue)) => style.on_color256(33),
        (None, None) => {
            let color_idx = (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2;
            if color_idx == 0 { style.on_color256(222) } else { style.on_color256(230) }
        }
    };
    if board.last_move == Some(coord) { style.underlined() } else { style }
}

pub fn render_board(board: &BoardScreen) -> String {
    let (rows, cols): (Vec<Row>, Vec<Col>) = match board.orientation {
        Force::White => (Row::all().rev().collect(), Col::all().collect()),
        Force::Black => (Row::all().collect(), Col::all().rev().collect()),
    };
    let col_header = format!(
        "{}{}{}",
        format_square(' '),
        cols.iter().map(|col| format_square(col.to_algebraic())).join(""),
        format_square(' ')
    );
    let mut ret = col_header.clone();
    ret.push('\n');
    for &row in &rows {
        ret.push_str(&format_square(row.to_algebraic()));
        for &col in &cols {
            let coord = Coord::new(row, col);
            let ch = board.grid[coord].map_or(' ', piece_to_pictogram);
            ret.push_str(&square_style(board, coord).apply_to(format_square(ch)).to_string());
        }
        ret.push_str(&format_square(row.to_algebraic()));
        ret.push('\n');
    }
    ret.push_str(&col_header);
    ret
}

pub fn render_panel(panel: &PanelScreen) -> String {
    format!(
        "{}\n{}\n{}",
        Style::new().bold().apply_to(&panel.header),
        panel.calculated_line,
        panel.score
    )
}

pub fn render_details(table: &ScoreTable) -> String {
    let width = table.rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    table.rows.iter().map(|row| format!("  {:<width$}  {}", row.label, row.value)).join("\n")
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }


#[cfg(test)]
mod tests {
    use remote_chess::fen::placement_to_grid;

    use super::*;

    fn sq(s: &str) -> Coord { s.parse().unwrap() }

    fn plain(s: String) -> String { console::strip_ansi_codes(&s).into_owned() }

    #[test]
    fn board_orientation() {
        let mut screen = Screen::new();
        screen.board.get_mut().grid = placement_to_grid("4k3/8/8/8/8/8/8/4K3").unwrap();
        let white_view = plain(render_board(&screen.board));
        let lines = white_view.lines().collect_vec();
        assert!(lines[1].starts_with(" 8 "));
        assert!(lines[1].contains('♚'));
        assert!(lines[8].contains('♔'));

        screen.board.get_mut().orientation = Force::Black;
        let black_view = plain(render_board(&screen.board));
        let lines = black_view.lines().collect_vec();
        assert!(lines[0].starts_with("    h "));
        assert!(lines[1].starts_with(" 1 "));
        assert!(lines[1].contains('♔'));
    }

    #[test]
    fn glow_color_follows_side() {
        let mut screen = Screen::new();
        let board = screen.board.get_mut();
        board.grid = placement_to_grid("4k3/8/8/8/8/8/8/4K3").unwrap();
        let red = Style::new().color256(233).on_color256(196);
        let blue = Style::new().color256(233).on_color256(27);

        board.glow[Force::Black] = KingGlow::InCheck;
        assert_eq!(square_style(board, sq("e8")), red);
        board.glow[Force::Black] = KingGlow::Defeated;
        assert_eq!(square_style(board, sq("e8")), blue);
        board.glow[Force::White] = KingGlow::InCheck;
        assert_eq!(square_style(board, sq("e1")), blue);
        board.glow[Force::White] = KingGlow::Defeated;
        assert_eq!(square_style(board, sq("e1")), red);
    }

    #[test]
    fn redraw_only_on_change() {
        let screen = Rc::new(RefCell::new(Screen::new()));
        let mut view = ConsoleView::new(Rc::clone(&screen));
        assert!(screen.borrow().take_frame().is_some());
        assert!(screen.borrow().take_frame().is_none());

        view.set_header("PLAY");
        view.position(&Grid::new());
        assert!(screen.borrow().take_frame().is_some());
        view.set_header("PLAY");
        view.set_square_background(sq("e2"), None);
        assert!(screen.borrow().take_frame().is_none());

        view.set_square_background(sq("e2"), Some(SquareBackground::Blue));
        assert!(screen.borrow().take_frame().is_some());
        view.set_king_glow(Force::White, KingGlow::InCheck);
        assert!(screen.borrow().take_frame().is_some());
    }

    #[test]
    fn details_table() {
        let mut table = ScoreTable::default();
        table.rows.push(remote_chess::status::ScoreRow { label: "Game Over".to_owned(), value: "false".to_owned() });
        table.rows.push(remote_chess::status::ScoreRow { label: "Score Difference".to_owned(), value: "-3".to_owned() });
        assert_eq!(render_details(&table), "  Game Over         false\n  Score Difference  -3");
    }
}

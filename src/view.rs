// Output surfaces of the client. The core never touches a concrete UI: the browser binds these
// traits to chessboard.js and the DOM, the console client to a text renderer, tests to a
// recorder.

use strum::{Display, IntoStaticStr};

use crate::coord::{Coord, SquareShade};
use crate::force::Force;
use crate::grid::Grid;
use crate::status::ScoreTable;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SquareBackground {
    // Used on dark squares.
    LightSkyBlue,
    // Used on light squares.
    Blue,
}

impl SquareBackground {
    pub fn for_shade(shade: SquareShade) -> Self {
        match shade {
            SquareShade::Dark => SquareBackground::LightSkyBlue,
            SquareShade::Light => SquareBackground::Blue,
        }
    }

    // CSS color name.
    pub fn css_color(self) -> &'static str { self.into() }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum KingGlow {
    #[default]
    None,
    InCheck,
    Defeated,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum GlowColor {
    Red,
    Blue,
}

impl KingGlow {
    // Blue for white in check or black defeated, red for the mirror cases.
    pub fn color(self, force: Force) -> Option<GlowColor> {
        match (force, self) {
            (_, KingGlow::None) => None,
            (Force::White, KingGlow::InCheck) | (Force::Black, KingGlow::Defeated) => Some(GlowColor::Blue),
            (Force::Black, KingGlow::InCheck) | (Force::White, KingGlow::Defeated) => Some(GlowColor::Red),
        }
    }
}

pub trait BoardWidget {
    fn position(&mut self, grid: &Grid);
    fn orientation(&mut self, force: Force);
    // `None` restores the default square color.
    fn set_square_background(&mut self, coord: Coord, background: Option<SquareBackground>);
    fn set_king_glow(&mut self, force: Force, glow: KingGlow);
    fn set_last_move(&mut self, to: Option<Coord>, is_opening: bool);
}

pub trait StatusPanel {
    fn set_header(&mut self, text: &str);
    fn set_calculated_line(&mut self, text: &str);
    fn set_score(&mut self, text: &str);
    fn set_details(&mut self, table: &ScoreTable);
}

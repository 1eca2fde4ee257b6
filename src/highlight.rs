use std::collections::BTreeMap;

use crate::coord::Coord;
use crate::view::{BoardWidget, SquareBackground};


// Squares currently painted by a hover. Every tracked square has its background applied on
// the widget; nothing else on the widget is painted by the tracker.
#[derive(Clone, Debug, Default)]
pub struct HighlightTracker {
    squares: BTreeMap<Coord, SquareBackground>,
}

impl HighlightTracker {
    pub fn new() -> Self { Self::default() }

    pub fn highlight(&mut self, coord: Coord, widget: &mut dyn BoardWidget) {
        let background = SquareBackground::for_shade(coord.shade());
        widget.set_square_background(coord, Some(background));
        self.squares.insert(coord, background);
    }

    pub fn clear_all(&mut self, widget: &mut dyn BoardWidget) {
        for coord in std::mem::take(&mut self.squares).into_keys() {
            widget.set_square_background(coord, None);
        }
    }

    pub fn is_empty(&self) -> bool { self.squares.is_empty() }
    pub fn get(&self, coord: Coord) -> Option<SquareBackground> { self.squares.get(&coord).copied() }
    pub fn squares(&self) -> impl Iterator<Item = (Coord, SquareBackground)> + '_ {
        self.squares.iter().map(|(&coord, &background)| (coord, background))
    }
}

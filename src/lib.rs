#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod client;
pub mod config;
pub mod coord;
pub mod dirty;
pub mod document;
pub mod error;
pub mod fen;
pub mod force;
pub mod grid;
pub mod highlight;
pub mod interaction;
pub mod piece;
pub mod poll;
pub mod status;
pub mod transport;
pub mod util;
pub mod view;

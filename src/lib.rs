//! Minesweeper game engine.
//!
//! A [`Session`] owns a square [`Board`] of [`Cell`]s and is driven by a front end
//! through synchronous commands (`reveal`, `toggle_flag`, `reset`, `tick`), each
//! returning the round [`Status`] and the cells to redraw. Nothing here renders;
//! [`render`] only reads session state.

mod board;
mod cell;
mod error;
mod level;
mod placement;
mod reveal;
mod session;

pub mod render;

pub use board::{Board, Coords};
pub use cell::{Cell, Exposure};
pub use error::{GameError, Result};
pub use level::Level;
pub use reveal::Step;
pub use session::{new_session, Outcome, Session, Status};

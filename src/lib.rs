pub mod error;
pub mod game;
pub mod ovc;
pub mod util;

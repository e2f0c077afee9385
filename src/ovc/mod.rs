pub mod ovc_game;

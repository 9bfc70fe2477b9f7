//! # CLI Module
//!
//! User-facing commands for sposplit. Each command loads the stored bearer
//! token, talks to the Spotify layer and presents results with tables,
//! spinners and the colored output macros.
//!
//! - [`playlists`] - Lists the user's playlists, optionally filtered
//! - [`split`] - Runs the splitting pipeline on one playlist and prints a
//!   per-genre report
//! - [`store_token`] - Stores an externally obtained bearer token so the
//!   other commands can use it
//!
//! Credential capture itself (the OAuth dance) is out of scope: the token
//! comes from any external authorization flow and is handed over via
//! `sposplit token`.

mod playlists;
mod split;
mod token;

pub use playlists::playlists;
pub use split::split;
pub use token::store_token;

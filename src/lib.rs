//! hexgrid - hex viewer layout engine
//!
//! Lays out a byte document as rows of numeric codes beside a text
//! preview, maps between document positions and pixels, and scrolls
//! documents of any size, including ones too tall for a native scrollbar.
//!
//! Pure Core / Impure Shell:
//! - `model`, `codec`, `view_state`: pure layout and coordinate mapping
//! - `source`, `config`, `logging`, `view`: file access, settings, terminal

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod view;
pub mod view_state;

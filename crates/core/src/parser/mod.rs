//! Low-level byte stream reading.

pub mod cursor;

pub use cursor::Cursor;

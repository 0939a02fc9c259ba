pub mod exports;

pub use exports::*;

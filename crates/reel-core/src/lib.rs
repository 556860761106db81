pub mod carousel;
pub mod macros;
pub mod motion;
pub mod protocol;
pub mod selection;
pub mod types;

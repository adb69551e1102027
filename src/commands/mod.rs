pub mod apply;
pub mod common;
pub mod list;
pub mod print;

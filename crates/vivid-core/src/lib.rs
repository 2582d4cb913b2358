pub mod color;
pub mod consts;
pub mod enhance;
pub mod error;
pub mod filters;
pub mod frame;
pub mod io;
pub mod pipeline;

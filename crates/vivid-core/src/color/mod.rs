pub mod boost;
pub mod hsv;
pub mod process;

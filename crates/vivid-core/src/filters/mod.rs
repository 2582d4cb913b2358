pub mod levels;
pub mod sharpen;

pub mod cookie;
pub mod log;
pub mod string;

pub mod hour;
pub mod training;

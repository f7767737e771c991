pub mod neighbors;
pub mod recommendations;
pub mod similarity;

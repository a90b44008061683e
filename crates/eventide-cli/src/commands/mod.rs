pub mod check;
pub mod deps;
pub mod resolve;

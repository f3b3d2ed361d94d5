pub mod adoptions;
pub mod ops;

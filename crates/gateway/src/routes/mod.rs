pub mod animals;
pub mod ops;

pub mod domain;
pub mod enums;
pub mod projections;
pub mod shared;

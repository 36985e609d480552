//! SeaORM entities.

pub mod ticket;

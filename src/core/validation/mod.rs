//! Validation steps
//!
//! Each validator is a small [`Step`](crate::core::pipeline::Step) that reads
//! the request payload (and, for guards, the located record) and either
//! passes or halts the pipeline with a 400 error. Validators never mutate
//! the store.

pub mod validators;

pub use validators::{
    CanDelete, Deletable, HasDishes, IdMatchesRoute, PriceIsValid, QuantityIsInteger,
    QuantityPositive, QuantityPresent, RequireField, StatusIsValid,
};

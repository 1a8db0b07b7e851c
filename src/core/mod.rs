//! Core module containing the building blocks shared by every resource

pub mod error;
pub mod id;
pub mod payload;
pub mod pipeline;
pub mod store;
pub mod validation;

pub use error::{BistroError, BistroResult};
pub use id::{IdGenerator, RecordId};
pub use payload::{Envelope, Payload};
pub use pipeline::{Pipeline, RequestContext, Step};
pub use store::{Collection, Record, RecordStore, ResourceExists};

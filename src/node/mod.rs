//! The Lark Authentication node: descriptor, parameter access, and the
//! per-item token exchange loop.

pub mod description;
pub mod error;
pub mod items;
pub mod parameters;
pub mod requester;

pub use description::NodeDescription;
pub use error::{ItemError, NodeApiError, ParameterError, RequestFailure};
pub use items::{parse_items, CredentialPayload, InputItem, OutputItem};
pub use parameters::{ItemParameters, NodeParameters};
pub use requester::TokenRequester;

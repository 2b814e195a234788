//! Domain types for the user resource.

pub mod user;

pub use user::{User, UserDraft, UserPatch};

pub mod folders;
pub mod introspection;
pub mod recordings;

mod command;
mod query;

pub mod commands;
pub mod queries;

pub use command::*;
pub use query::*;

/// Short name of a message type, used as log field and metric key.
pub fn action_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

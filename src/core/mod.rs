pub mod change;
pub mod console;
pub mod error;
pub mod options;
pub mod registry;
pub mod schema;
pub mod sync_impl;
pub mod validation;

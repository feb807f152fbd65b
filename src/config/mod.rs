//! Lock options for pidlock.
//!
//! `LockOptions` controls how long `PidLock::lock` waits and how often it
//! polls. It deserializes from YAML so host applications can embed it in
//! their own configuration files. Unknown fields are ignored for forward
//! compatibility.

mod model;
mod operations;


// Re-export public API
pub use model::LockOptions;

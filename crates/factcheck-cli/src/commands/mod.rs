//! Command implementations.

pub mod check;
pub mod history;
pub mod serve;

pub use self::check::execute_check;
pub use self::history::execute_history;
pub use self::serve::execute_serve;

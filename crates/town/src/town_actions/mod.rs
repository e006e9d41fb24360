pub mod commands;
pub mod events;
pub mod executor;
pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod results;

pub use commands::*;
pub use events::*;
pub use executor::execute_queued_commands;
pub use plugin::TownActionsPlugin;
pub use queue::*;
pub use result_log::CommandResultLog;
pub use results::*;

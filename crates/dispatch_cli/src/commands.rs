pub mod assign;
pub mod incidents;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

mod agent;
mod random;
mod scripted;

pub use agent::Agent;
pub use random::RandomAgent;
pub use scripted::ScriptedAgent;

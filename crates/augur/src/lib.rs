pub mod agent;
pub mod clients;
pub mod configs;
pub mod errors;
pub mod http;
pub mod instructions;
pub mod registry;
pub mod roster;
pub mod systems;
pub mod tool;

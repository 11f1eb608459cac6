pub mod agents;
pub mod call;
pub mod tools;
pub mod version;

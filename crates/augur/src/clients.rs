pub mod alpha_vantage;
pub mod google_chat;
pub mod scryfall;

pub use alpha_vantage::AlphaVantageClient;
pub use google_chat::GoogleChatClient;
pub use scryfall::ScryfallClient;

// Adapters layer: concrete implementations for external systems (Google OAuth2, Sheets API).

pub mod auth;
pub mod sheets_client;

pub use auth::GoogleAuth;
pub use sheets_client::SheetsClient;

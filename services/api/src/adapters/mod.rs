pub mod credentials;
pub mod session;
pub mod store;
pub mod transcriber;

pub use credentials::CredentialStore;
pub use session::MemorySessionManager;
pub use store::MemoryStore;
pub use transcriber::CommandTranscriber;

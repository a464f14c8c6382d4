pub mod errors;
pub mod remote;
pub mod session;

pub use errors::BrowserError;
pub use remote::{RemoteSession, RemoteSessionFactory};
pub use session::{
    ActOptions, AgentOutcome, BrowserSession, ObservedElement, SessionFactory, SessionSettings,
    Viewport,
};

pub mod connector;
pub mod credential_store;

pub use connector::{ClassroomConnector, OAuthClassroomConnector};
pub use credential_store::{CredentialStore, OAuthSession, TokenSource, SCOPES};

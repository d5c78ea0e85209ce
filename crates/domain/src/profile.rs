use crate::ReadError;

#[allow(async_fn_in_trait)]
pub trait ProfileService {
    async fn get_profile(&self) -> Result<Profile, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ProfileRepository {
    async fn read_profile(&self) -> Result<Profile, ReadError>;
}

/// Authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub subject: String,
    pub name: String,
    pub email: Option<String>,
}

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::{UserError, UserResult};

/// An authenticatable identity. Separate from [`crate::models::User`]: users
/// are the managed resource, principals are who may manage them.
#[derive(Debug, Clone)]
pub struct Principal {
    pub username: String,
    pub password_hash: String,
    pub disabled: bool,
}

/// Lookup of login principals by username.
pub trait PrincipalStore: Send + Sync {
    fn resolve(&self, username: &str) -> Option<Principal>;
}

/// Holds exactly one principal, configured at startup. There is no principal
/// persistence; the service authenticates a single operator account.
#[derive(Clone)]
pub struct FixedPrincipalStore {
    principal: Principal,
}

impl FixedPrincipalStore {
    pub fn new(username: &str, password: &str) -> UserResult<Self> {
        Ok(Self {
            principal: Principal {
                username: username.to_string(),
                password_hash: hash_password(password)?,
                disabled: false,
            },
        })
    }
}

impl PrincipalStore for FixedPrincipalStore {
    fn resolve(&self, username: &str) -> Option<Principal> {
        if self.principal.username == username {
            Some(self.principal.clone())
        } else {
            None
        }
    }
}

pub fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| UserError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

use mongodb::bson::oid::ObjectId;

use crate::utils::error::AppError;
use crate::utils::session::Claims;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
}

/// The verified identity a request acts as. Built from JWT claims by the
/// auth middleware; the core trusts it and never reads ids from request
/// bodies.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: ObjectId,
    pub roles: Vec<Role>,
}

impl Actor {
    pub fn new(id: ObjectId) -> Self {
        Self { id, roles: Vec::new() }
    }

    pub fn admin(id: ObjectId) -> Self {
        Self { id, roles: vec![Role::Admin] }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

impl TryFrom<&Claims> for Actor {
    type Error = AppError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        let id = ObjectId::parse_str(&claims.sub)
            .map_err(|_| AppError::AuthenticationError("Invalid subject in token".to_string()))?;
        let roles = claims
            .roles
            .iter()
            .filter_map(|role| match role.as_str() {
                "admin" => Some(Role::Admin),
                _ => None,
            })
            .collect();
        Ok(Self { id, roles })
    }
}

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Superadmin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            "superadmin" => Some(Role::Superadmin),
            _ => None,
        }
    }

    /// Admin console access (admin or superadmin).
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

/// Postal address, used both on the user profile and as the shipping address
/// snapshot on orders.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: String,
}

impl Address {
    /// An order cannot ship without the core fields.
    pub fn is_complete(&self) -> bool {
        !self.street.is_empty()
            && !self.city.is_empty()
            && !self.postal_code.is_empty()
            && !self.country.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_verified: bool,
    /// Set when the account was created or linked through Google OAuth
    pub google_id: Option<String>,
    pub address: Option<Address>,
    pub avatar: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl User {
    pub fn new(name: String, email: String, role: Role) -> Self {
        User {
            id: None,
            name,
            email,
            password_hash: String::new(),
            role,
            is_verified: false,
            google_id: None,
            address: None,
            avatar: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Admin, Role::Superadmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_admin_access() {
        assert!(!Role::User.is_admin());
        assert!(Role::Admin.is_admin());
        assert!(Role::Superadmin.is_admin());
    }

    #[test]
    fn test_address_completeness() {
        let mut address = Address {
            street: "12 Rue des Lilas".to_string(),
            city: "Lyon".to_string(),
            postal_code: "69003".to_string(),
            country: "France".to_string(),
            phone: String::new(),
        };
        assert!(address.is_complete());
        address.city = String::new();
        assert!(!address.is_complete());
    }
}

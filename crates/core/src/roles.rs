//! Well-known role name and ID constants.
//!
//! These must match the seed data in `20260301000002_create_roles.sql`.

use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_DESIGNER: &str = "designer";
pub const ROLE_CUSTOMER: &str = "customer";

pub const ROLE_ADMIN_ID: DbId = 1;
pub const ROLE_MANAGER_ID: DbId = 2;
pub const ROLE_DESIGNER_ID: DbId = 3;
pub const ROLE_CUSTOMER_ID: DbId = 4;

/// Staff are the back-office roles: admins and managers.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}

/// Whether `role` is one of the seeded role names.
pub fn is_known_role(role: &str) -> bool {
    matches!(
        role,
        ROLE_ADMIN | ROLE_MANAGER | ROLE_DESIGNER | ROLE_CUSTOMER
    )
}

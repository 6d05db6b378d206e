//! Announcement audiences and visibility.

use crate::error::CoreError;
use crate::roles::{is_staff, ROLE_ADMIN, ROLE_CUSTOMER, ROLE_DESIGNER, ROLE_MANAGER};

pub const AUDIENCE_ALL: &str = "all";
pub const AUDIENCE_CUSTOMERS: &str = "customers";
pub const AUDIENCE_DESIGNERS: &str = "designers";

pub const VALID_AUDIENCES: &[&str] = &[AUDIENCE_ALL, AUDIENCE_CUSTOMERS, AUDIENCE_DESIGNERS];

pub fn validate_audience(audience: &str) -> Result<(), CoreError> {
    if !VALID_AUDIENCES.contains(&audience) {
        return Err(CoreError::Validation(format!(
            "Invalid audience '{audience}'. Valid: {}",
            VALID_AUDIENCES.join(", ")
        )));
    }
    Ok(())
}

/// Audiences a user with `role` may read. Staff read everything.
pub fn audiences_for_role(role: &str) -> &'static [&'static str] {
    if is_staff(role) {
        return VALID_AUDIENCES;
    }
    match role {
        ROLE_CUSTOMER => &[AUDIENCE_ALL, AUDIENCE_CUSTOMERS],
        ROLE_DESIGNER => &[AUDIENCE_ALL, AUDIENCE_DESIGNERS],
        _ => &[AUDIENCE_ALL],
    }
}

pub fn is_visible_to(audience: &str, role: &str) -> bool {
    audiences_for_role(role).contains(&audience)
}

/// Roles whose holders are notified when an announcement is published.
pub fn roles_for_audience(audience: &str) -> &'static [&'static str] {
    match audience {
        AUDIENCE_CUSTOMERS => &[ROLE_CUSTOMER],
        AUDIENCE_DESIGNERS => &[ROLE_DESIGNER],
        _ => &[ROLE_ADMIN, ROLE_MANAGER, ROLE_DESIGNER, ROLE_CUSTOMER],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::ROLE_MANAGER;

    #[test]
    fn customers_do_not_see_designer_posts() {
        assert!(is_visible_to(AUDIENCE_ALL, ROLE_CUSTOMER));
        assert!(is_visible_to(AUDIENCE_CUSTOMERS, ROLE_CUSTOMER));
        assert!(!is_visible_to(AUDIENCE_DESIGNERS, ROLE_CUSTOMER));
    }

    #[test]
    fn staff_see_everything() {
        for audience in VALID_AUDIENCES {
            assert!(is_visible_to(audience, ROLE_MANAGER));
        }
    }

    #[test]
    fn targeted_audiences_notify_one_role() {
        assert_eq!(roles_for_audience(AUDIENCE_CUSTOMERS), &[ROLE_CUSTOMER]);
        assert_eq!(roles_for_audience(AUDIENCE_ALL).len(), 4);
    }

    #[test]
    fn audience_validation() {
        assert!(validate_audience("customers").is_ok());
        assert!(validate_audience("everyone").is_err());
    }
}

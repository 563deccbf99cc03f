//! Access scope resolution.
//!
//! Decides which companies a principal may see and which company an
//! upload may target. Group administrators see every company; everyone
//! else sees exactly their assigned company. None of these functions
//! touch storage.

#[cfg(test)]
mod props;

use sheetwise_shared::AppError;
use thiserror::Error;

use crate::auth::{Principal, Role};
use crate::records::{Company, ScopeFilter};

/// Errors raised when a principal targets a company outside their scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The principal may not write to this company.
    #[error("you cannot upload data for company {0}")]
    Forbidden(i32),

    /// A company must be named for this operation.
    #[error("a company_id is required")]
    MissingCompany,
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden(_) => Self::Forbidden(err.to_string()),
            AccessError::MissingCompany => Self::Validation(err.to_string()),
        }
    }
}

/// Returns the companies visible to `user` out of `all_companies`.
///
/// An absent or unknown company assignment yields an empty set for
/// non-administrators.
#[must_use]
pub fn visible_companies(user: &Principal, all_companies: &[Company]) -> Vec<Company> {
    all_companies
        .iter()
        .filter(|company| is_visible(user, company.id))
        .cloned()
        .collect()
}

/// Returns true if `company_id` is visible to `user`.
#[must_use]
pub fn is_visible(user: &Principal, company_id: i32) -> bool {
    user.is_group_admin() || user.company_id == Some(company_id)
}

/// Builds the store filter for a read, optionally narrowed to one company.
///
/// `None` means the caller may see nothing for this request: the requested
/// company is outside their scope, or they have no company at all. Callers
/// treat it as an empty result, not an error.
#[must_use]
pub fn scope_filter(user: &Principal, requested_company: Option<i32>) -> Option<ScopeFilter> {
    match requested_company {
        Some(id) if is_visible(user, id) => Some(ScopeFilter::Company(id)),
        Some(_) => None,
        None if user.is_group_admin() => Some(ScopeFilter::All),
        None => user.company_id.map(ScopeFilter::Company),
    }
}

/// Resolves the single company an extraction run writes to.
///
/// Non-administrators may only target their own company and default to
/// it; administrators must name one.
pub fn upload_target(user: &Principal, requested_company: Option<i32>) -> Result<i32, AccessError> {
    match (requested_company, user.company_id) {
        (Some(id), _) if is_visible(user, id) => Ok(id),
        (Some(id), _) => Err(AccessError::Forbidden(id)),
        (None, Some(own)) if !user.is_group_admin() => Ok(own),
        (None, _) => Err(AccessError::MissingCompany),
    }
}

/// Checks the company assignment invariant for a new user.
pub fn validate_assignment(role: Role, company_id: Option<i32>) -> Result<(), AccessError> {
    if role.requires_company() && company_id.is_none() {
        return Err(AccessError::MissingCompany);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn companies() -> Vec<Company> {
        ["Reliance Retail", "Jio Platforms", "Reliance Industries"]
            .iter()
            .zip(1..)
            .map(|(name, id)| Company {
                id,
                name: (*name).to_string(),
                parent_group: Some("Reliance Group".to_string()),
            })
            .collect()
    }

    fn analyst(company_id: Option<i32>) -> Principal {
        Principal::new(1, "rajiv", Role::Analyst, company_id)
    }

    fn admin() -> Principal {
        Principal::new(5, "ambani", Role::GroupAdmin, None)
    }

    #[rstest]
    #[case(Role::Analyst, 1)]
    #[case(Role::Ceo, 2)]
    fn test_non_admin_sees_only_own_company(#[case] role: Role, #[case] company_id: i32) {
        let user = Principal::new(9, "u", role, Some(company_id));

        let visible = visible_companies(&user, &companies());

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, company_id);
    }

    #[test]
    fn test_group_admin_sees_all_companies() {
        let all = companies();
        assert_eq!(visible_companies(&admin(), &all), all);
        assert!(is_visible(&admin(), 999));
    }

    #[test]
    fn test_missing_or_unknown_company_sees_nothing() {
        assert!(visible_companies(&analyst(None), &companies()).is_empty());
        assert!(visible_companies(&analyst(Some(42)), &companies()).is_empty());
    }

    #[test]
    fn test_scope_filter() {
        let user = analyst(Some(1));

        assert_eq!(scope_filter(&user, None), Some(ScopeFilter::Company(1)));
        assert_eq!(scope_filter(&user, Some(1)), Some(ScopeFilter::Company(1)));
        assert_eq!(scope_filter(&user, Some(2)), None);
        assert_eq!(scope_filter(&analyst(None), None), None);

        assert_eq!(scope_filter(&admin(), None), Some(ScopeFilter::All));
        assert_eq!(scope_filter(&admin(), Some(2)), Some(ScopeFilter::Company(2)));
    }

    #[test]
    fn test_upload_target() {
        let user = analyst(Some(1));

        assert_eq!(upload_target(&user, None), Ok(1));
        assert_eq!(upload_target(&user, Some(1)), Ok(1));
        assert_eq!(upload_target(&user, Some(2)), Err(AccessError::Forbidden(2)));

        assert_eq!(upload_target(&admin(), Some(3)), Ok(3));
        assert_eq!(upload_target(&admin(), None), Err(AccessError::MissingCompany));
        assert_eq!(
            upload_target(&analyst(None), None),
            Err(AccessError::MissingCompany)
        );
    }

    #[test]
    fn test_validate_assignment() {
        assert!(validate_assignment(Role::Analyst, Some(1)).is_ok());
        assert!(validate_assignment(Role::GroupAdmin, None).is_ok());
        assert_eq!(
            validate_assignment(Role::Ceo, None),
            Err(AccessError::MissingCompany)
        );
    }

    #[test]
    fn test_access_error_maps_to_app_error() {
        assert_eq!(AppError::from(AccessError::Forbidden(2)).status_code(), 403);
        assert_eq!(AppError::from(AccessError::MissingCompany).status_code(), 400);
    }
}

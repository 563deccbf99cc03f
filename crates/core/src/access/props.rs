//! Property-based tests for access scope resolution.

use proptest::prelude::*;

use super::{is_visible, scope_filter, upload_target, visible_companies};
use crate::auth::{Principal, Role};
use crate::records::{Company, ScopeFilter};

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Analyst), Just(Role::Ceo), Just(Role::GroupAdmin)]
}

fn principal_strategy() -> impl Strategy<Value = Principal> {
    (role_strategy(), proptest::option::of(1i32..20))
        .prop_map(|(role, company_id)| Principal::new(1, "user", role, company_id))
}

fn companies(count: i32) -> Vec<Company> {
    (1..=count)
        .map(|id| Company {
            id,
            name: format!("Company {id}"),
            parent_group: None,
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Non-administrators never see more than their own company.
    #[test]
    fn prop_visible_set_is_own_company_or_all(user in principal_strategy(), count in 0i32..15) {
        let all = companies(count);
        let visible = visible_companies(&user, &all);

        if user.is_group_admin() {
            prop_assert_eq!(visible, all);
        } else {
            prop_assert!(visible.len() <= 1);
            for company in &visible {
                prop_assert_eq!(Some(company.id), user.company_id);
            }
        }
    }

    /// Every company in the visible set passes `is_visible`, and no other does.
    #[test]
    fn prop_visible_set_agrees_with_is_visible(user in principal_strategy(), count in 0i32..15) {
        let all = companies(count);
        let visible = visible_companies(&user, &all);

        for company in &all {
            prop_assert_eq!(visible.contains(company), is_visible(&user, company.id));
        }
    }

    /// A read filter never names a company the caller cannot see.
    #[test]
    fn prop_scope_filter_stays_in_scope(user in principal_strategy(), requested in proptest::option::of(1i32..20)) {
        match scope_filter(&user, requested) {
            Some(ScopeFilter::Company(id)) => prop_assert!(is_visible(&user, id)),
            Some(ScopeFilter::All) => prop_assert!(user.is_group_admin()),
            None => prop_assert!(!user.is_group_admin()),
        }
    }

    /// An upload target, when granted, is always visible to the caller.
    #[test]
    fn prop_upload_target_is_visible(user in principal_strategy(), requested in proptest::option::of(1i32..20)) {
        if let Ok(id) = upload_target(&user, requested) {
            prop_assert!(is_visible(&user, id));
        }
    }
}

//! Account administration endpoints, shared by syndics and business admins.

use super::{
    client::{ApiClient, NO_BODY},
    errors::ApiError,
    messages,
    response::ApiResult,
    shapes::{resolve_item, resolve_list},
};
use crate::models::{Account, AccountId, BanRequest, BanUnit, Role, RoleChange};
use reqwest::Method;
use serde::Serialize;

/// Who is administering: a syndic manages one condominium, a business
/// admin the whole tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminScope {
    Syndic,
    Admin,
}

impl AdminScope {
    pub fn accounts_path(&self) -> &'static str {
        match self {
            AdminScope::Syndic => "/syndic/accounts",
            AdminScope::Admin => "/admin/accounts",
        }
    }

    /// Scope matching an account role, if the role administers accounts
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::Syndic => Some(AdminScope::Syndic),
            Role::Business => Some(AdminScope::Admin),
            Role::Resident | Role::Doorman | Role::Unknown => None,
        }
    }
}

impl ApiClient {
    async fn account_list(&self, token: &str, endpoint: &str) -> ApiResult<Vec<Account>> {
        self.call(
            Method::GET,
            endpoint,
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |body| resolve_list(&body, "accounts"),
        )
        .await
    }

    async fn account_command<B: Serialize>(
        &self,
        token: &str,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> ApiResult<()> {
        self.call(
            method,
            endpoint,
            body,
            Some(token),
            messages::REQUEST_REJECTED,
            |_| Ok(()),
        )
        .await
    }

    pub async fn list_accounts(&self, token: &str, scope: AdminScope) -> ApiResult<Vec<Account>> {
        self.account_list(token, scope.accounts_path()).await
    }

    /// Accounts waiting for approval
    pub async fn list_pending_accounts(
        &self,
        token: &str,
        scope: AdminScope,
    ) -> ApiResult<Vec<Account>> {
        self.account_list(token, &format!("{}/pendants", scope.accounts_path()))
            .await
    }

    pub async fn list_banned_accounts(
        &self,
        token: &str,
        scope: AdminScope,
    ) -> ApiResult<Vec<Account>> {
        self.account_list(token, &format!("{}/bans", scope.accounts_path()))
            .await
    }

    pub async fn get_account(
        &self,
        token: &str,
        scope: AdminScope,
        id: AccountId,
    ) -> ApiResult<Account> {
        self.call(
            Method::GET,
            &format!("{}/{}", scope.accounts_path(), id),
            NO_BODY,
            Some(token),
            messages::REQUEST_REJECTED,
            |body| resolve_item(&body, "account"),
        )
        .await
    }

    pub async fn delete_account(
        &self,
        token: &str,
        scope: AdminScope,
        id: AccountId,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/{}", scope.accounts_path(), id);
        self.account_command(token, Method::DELETE, &endpoint, NO_BODY)
            .await
    }

    pub async fn approve_account(
        &self,
        token: &str,
        scope: AdminScope,
        id: AccountId,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/approve/{}", scope.accounts_path(), id);
        self.account_command(token, Method::PATCH, &endpoint, NO_BODY)
            .await
    }

    /// Assign `role` to an account. [`Role::Unknown`] is refused without a request.
    pub async fn change_role(
        &self,
        token: &str,
        scope: AdminScope,
        id: AccountId,
        role: Role,
    ) -> ApiResult<()> {
        if !role.is_known() {
            return ApiError::InvalidRequest(messages::UNKNOWN_ROLE.to_string()).into();
        }
        let endpoint = format!("{}/role", scope.accounts_path());
        self.account_command(token, Method::PATCH, &endpoint, Some(&RoleChange { id, role }))
            .await
    }

    /// Ban an account for `duration` units of time.
    pub async fn ban_account(
        &self,
        token: &str,
        scope: AdminScope,
        id: AccountId,
        duration: u32,
        unit: BanUnit,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/ban", scope.accounts_path());
        let request = BanRequest { id, duration, unit };
        self.account_command(token, Method::PATCH, &endpoint, Some(&request))
            .await
    }

    pub async fn unban_account(
        &self,
        token: &str,
        scope: AdminScope,
        id: AccountId,
    ) -> ApiResult<()> {
        let endpoint = format!("{}/unban/{}", scope.accounts_path(), id);
        self.account_command(token, Method::PATCH, &endpoint, NO_BODY)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_for_role() {
        assert_eq!(AdminScope::for_role(Role::Syndic), Some(AdminScope::Syndic));
        assert_eq!(AdminScope::for_role(Role::Business), Some(AdminScope::Admin));
        assert_eq!(AdminScope::for_role(Role::Resident), None);
        assert_eq!(AdminScope::Admin.accounts_path(), "/admin/accounts");
    }
}

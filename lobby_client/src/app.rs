//! Command runner.
//!
//! Every command works against a [`SessionManager`]; commands that need an
//! account fail fast when nobody is signed in, and a 401 from the backend
//! signs the user out locally.

use crate::cli::Command;
use anyhow::{Context, Result, bail};
use lobby::api::ApiResult;
use lobby::auth::{Access, DashboardKind, SessionManager};
use lobby::models::{Account, Delivery, DeliveryScope, Plan, Role};
use std::io::Write;
use tracing::{debug, info};

/// Run `command` and write its output to `out`.
///
/// The session must already be restored for commands that need one.
///
/// # Errors
///
/// Fails when the command cannot be carried out; the error carries the
/// user-facing explanation.
pub async fn run<W: Write>(session: &SessionManager, command: Command, out: &mut W) -> Result<()> {
    debug!("Running {}", command_label(&command));

    match command {
        Command::Login { login, password } => {
            let password = password.unwrap_or_default();
            let account = session
                .sign_in(&login, &password)
                .await
                .into_result()
                .context("Sign-in failed")?;

            writeln!(out, "Signed in as {}", describe_account(&account))?;
            if session.access() == Access::Plans {
                writeln!(out, "No active subscription. Run 'plans' to choose one.")?;
            }
        }
        Command::Whoami => {
            let account = signed_in(session)?;
            writeln!(out, "{}", describe_account(&account))?;
            if !account.email.is_empty() {
                writeln!(out, "E-mail: {}", account.email)?;
            }
            if let Some(unit) = account_unit(&account) {
                writeln!(out, "Unit: {}", unit)?;
            }
            writeln!(out, "Dashboard: {}", describe_access(session.access()))?;
        }
        Command::Logout => {
            if session.is_authenticated() {
                session.logout().await;
                writeln!(out, "Signed out")?;
            } else {
                session.expire().await;
                writeln!(out, "Not signed in")?;
            }
        }
        Command::Deliveries => {
            let account = signed_in(session)?;
            let token = session_token(session)?;
            let scope = delivery_scope(account.role);

            let result = session.api().list_deliveries(&token, scope).await;
            let deliveries = settle(session, result)
                .await
                .context("Failed to load deliveries")?;

            if deliveries.is_empty() {
                writeln!(out, "No deliveries")?;
            }
            for delivery in &deliveries {
                writeln!(out, "{}", format_delivery(delivery))?;
            }
        }
        Command::Confirm { tracking_code } => {
            let account = signed_in(session)?;
            if account.role != Role::Doorman {
                bail!("Only doormen can confirm deliveries");
            }
            let token = session_token(session)?;

            let result = session.api().confirm_delivery(&token, &tracking_code).await;
            let message = result.message().map(str::to_string);
            settle(session, result)
                .await
                .with_context(|| format!("Failed to confirm delivery {}", tracking_code))?;

            info!("Delivery {} confirmed", tracking_code);
            writeln!(
                out,
                "{}",
                message.unwrap_or_else(|| format!("Delivery {} confirmed", tracking_code))
            )?;
        }
        Command::Plans => {
            let plans = session
                .api()
                .list_plans()
                .await
                .into_result()
                .context("Failed to load plans")?;

            if plans.is_empty() {
                writeln!(out, "No plans available")?;
            }
            for plan in &plans {
                writeln!(out, "{}", format_plan(plan))?;
            }
        }
        Command::ForgotPassword { email } => {
            let result = session.api().forgot_password(&email).await;
            let message = result.message().map(str::to_string);
            result
                .into_result()
                .context("Failed to request a password reset")?;

            writeln!(
                out,
                "{}",
                message.unwrap_or_else(|| format!("Password reset instructions sent to {}", email))
            )?;
        }
        Command::Help => {}
    }

    Ok(())
}

/// Current account, or an error telling the user to sign in
fn signed_in(session: &SessionManager) -> Result<Account> {
    match session.user() {
        Some(account) if session.is_authenticated() => Ok(account),
        _ => bail!("Not signed in. Run 'login <LOGIN>' first."),
    }
}

fn session_token(session: &SessionManager) -> Result<String> {
    session
        .token()
        .context("Not signed in. Run 'login <LOGIN>' first.")
}

/// Unwrap an authenticated call, signing out locally when the token was refused.
async fn settle<T>(session: &SessionManager, result: ApiResult<T>) -> Result<T> {
    if result.is_unauthorized() {
        session.expire().await;
        bail!("Session expired. Please sign in again.");
    }
    Ok(result.into_result()?)
}

/// Delivery view for an account role
pub fn delivery_scope(role: Role) -> DeliveryScope {
    match role {
        Role::Doorman => DeliveryScope::Doorman,
        Role::Syndic | Role::Business => DeliveryScope::Syndic,
        Role::Resident | Role::Unknown => DeliveryScope::Own,
    }
}

pub fn describe_account(account: &Account) -> String {
    format!("{} ({})", account.display_name(), account.role)
}

fn account_unit(account: &Account) -> Option<String> {
    let apartment = account.apartment_number.as_deref()?.trim();
    if apartment.is_empty() {
        return None;
    }
    match account.block.as_deref().map(str::trim) {
        Some(block) if !block.is_empty() => Some(format!("{}-{}", block, apartment)),
        _ => Some(apartment.to_string()),
    }
}

pub fn describe_access(access: Access) -> &'static str {
    match access {
        Access::Loading => "loading",
        Access::SignIn => "sign-in",
        Access::Plans => "plan selection",
        Access::Dashboard(DashboardKind::Resident) => "resident",
        Access::Dashboard(DashboardKind::Doorman) => "doorman",
        Access::Dashboard(DashboardKind::Syndic) => "syndic",
        Access::Dashboard(DashboardKind::Admin) => "admin",
    }
}

/// One-line delivery summary
pub fn format_delivery(delivery: &Delivery) -> String {
    let state = if delivery.is_withdrawn() {
        match delivery.withdrawn_at() {
            Some(at) => format!("withdrawn {}", at.format("%Y-%m-%d %H:%M")),
            None => "withdrawn".to_string(),
        }
    } else {
        match delivery.arrived_at() {
            Some(at) => format!("waiting since {}", at.format("%Y-%m-%d %H:%M")),
            None => "waiting".to_string(),
        }
    };

    let recipient = if delivery.recipient_name.is_empty() {
        "-"
    } else {
        delivery.recipient_name.as_str()
    };

    let unit = delivery.unit();
    if unit.is_empty() {
        format!("{:<16} {:<24} {}", delivery.tracking_code, recipient, state)
    } else {
        format!(
            "{:<16} {:<24} {:<8} {}",
            delivery.tracking_code, recipient, unit, state
        )
    }
}

/// One-line plan summary
pub fn format_plan(plan: &Plan) -> String {
    let mut line = format!("{:<12} {:<20} R$ {:>8.2}/month", plan.id, plan.name, plan.price);
    if plan.is_popular {
        line.push_str("  [popular]");
    }
    if !plan.features.is_empty() {
        line.push_str(&format!("\n    {}", plan.features.join(", ")));
    }
    line
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } => "login",
        Command::Whoami => "whoami",
        Command::Logout => "logout",
        Command::Deliveries => "deliveries",
        Command::Confirm { .. } => "confirm",
        Command::Plans => "plans",
        Command::ForgotPassword { .. } => "forgot-password",
        Command::Help => "help",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobby::ApiClient;
    use lobby::auth::MemoryTokenStore;
    use serde_json::json;
    use std::sync::Arc;

    fn delivery(value: serde_json::Value) -> Delivery {
        serde_json::from_value(value).unwrap()
    }

    fn offline_session() -> SessionManager {
        SessionManager::new(
            ApiClient::new("http://127.0.0.1:9/api/v1"),
            Arc::new(MemoryTokenStore::new()),
        )
    }

    #[test]
    fn test_delivery_scope_by_role() {
        assert_eq!(delivery_scope(Role::Resident), DeliveryScope::Own);
        assert_eq!(delivery_scope(Role::Doorman), DeliveryScope::Doorman);
        assert_eq!(delivery_scope(Role::Syndic), DeliveryScope::Syndic);
        assert_eq!(delivery_scope(Role::Business), DeliveryScope::Syndic);
        assert_eq!(delivery_scope(Role::Unknown), DeliveryScope::Own);
    }

    #[test]
    fn test_format_waiting_delivery() {
        let line = format_delivery(&delivery(json!({
            "id": 1,
            "trackingCode": "BR123",
            "recipientName": "Ana",
            "block": "B",
            "apartmentNumber": "101",
            "arrivalDate": "2025-02-01T09:30:00"
        })));

        assert!(line.starts_with("BR123"));
        assert!(line.contains("Ana"));
        assert!(line.contains("B-101"));
        assert!(line.ends_with("waiting since 2025-02-01 09:30"));
    }

    #[test]
    fn test_format_withdrawn_delivery_without_unit() {
        let line = format_delivery(&delivery(json!({
            "id": 2,
            "trackingCode": "BR9",
            "withdrawalDate": "2025-02-02T18:05:00Z"
        })));

        assert!(line.contains(" - "));
        assert!(line.ends_with("withdrawn 2025-02-02 18:05"));
    }

    #[test]
    fn test_format_plan() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "pro",
            "name": "Pro",
            "price": 99.9,
            "features": ["Unlimited units", "Reports"],
            "isPopular": true
        }))
        .unwrap();

        let line = format_plan(&plan);
        assert!(line.contains("R$    99.90/month"));
        assert!(line.contains("[popular]"));
        assert!(line.ends_with("Unlimited units, Reports"));
    }

    #[test]
    fn test_describe_account_and_unit() {
        let account: Account = serde_json::from_value(json!({
            "id": 4,
            "username": "ana",
            "role": "RESIDENT",
            "block": "C",
            "apartmentNumber": "12"
        }))
        .unwrap();

        assert_eq!(describe_account(&account), "ana (RESIDENT)");
        assert_eq!(account_unit(&account).as_deref(), Some("C-12"));
    }

    #[tokio::test]
    async fn test_account_commands_require_sign_in() {
        let session = offline_session();
        session.restore().await;
        let mut out = Vec::new();

        for command in [
            Command::Whoami,
            Command::Deliveries,
            Command::Confirm {
                tracking_code: "BR1".to_string(),
            },
        ] {
            let err = run(&session, command, &mut out).await.unwrap_err();
            assert!(err.to_string().contains("Not signed in"));
        }
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_logout_when_signed_out() {
        let session = offline_session();
        session.restore().await;
        let mut out = Vec::new();

        run(&session, Command::Logout, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Not signed in\n");
    }

    #[tokio::test]
    async fn test_sign_in_failure_reports_connection_problem() {
        let session = offline_session();
        let mut out = Vec::new();

        let err = run(
            &session,
            Command::Login {
                login: "ana".to_string(),
                password: Some("pw".to_string()),
            },
            &mut out,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "Sign-in failed");
        assert_eq!(
            err.root_cause().to_string(),
            lobby::api::messages::CONNECTION_ERROR
        );
        assert!(!session.is_authenticated());
    }
}

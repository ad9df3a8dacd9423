//! Login, signup, logout and whoami.

use api_types::{Role, SignupRequest};
use clap::Args;
use tracing::info;

use super::prompt_password;
use crate::app::{AppState, CliError, CliResult, OrFail};
use crate::output;

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,
    #[arg(short, long)]
    pub email: String,
    /// Read from FOOD_DELIVERY_PASSWORD or prompted when omitted
    #[arg(short, long, env = "FOOD_DELIVERY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// customer, restaurant-owner, delivery-partner, customer-care or admin
    #[arg(long, default_value = "customer")]
    pub role: Role,
    #[arg(long)]
    pub pin_code: String,
}

pub async fn login(state: &AppState, email: &str, password: Option<String>) -> CliResult<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password")?,
    };

    let user = state.session.login(email, &password).await.or_fail("Login failed")?;
    info!(user_id = user.id, "Login complete");
    state.success(&format!("Logged in as {} ({}).", user.name, user.role));
    Ok(())
}

pub async fn signup(state: &AppState, args: SignupArgs) -> CliResult<()> {
    let password = match args.password {
        Some(password) => password,
        None => {
            let password = prompt_password("Password")?;
            if prompt_password("Confirm password")? != password {
                return Err(CliError::Usage("Passwords do not match".to_string()));
            }
            password
        }
    };

    let request = SignupRequest {
        name: args.name,
        email: args.email,
        password_confirm: password.clone(),
        password,
        role: args.role,
        pin_code: args.pin_code,
    };

    let response = state.session.signup(&request).await.or_fail("Signup failed")?;
    state.emit(&response, |r| {
        let mut text = format!("{}\n", r.message.as_deref().unwrap_or("Account created."));
        if r.access.is_some() {
            text.push_str(&format!("Logged in as {} ({}).\n", r.user.name, r.user.role));
        } else {
            text.push_str(&format!(
                "Run `food-delivery login --email {}` to sign in.\n",
                r.user.email
            ));
        }
        text
    });
    Ok(())
}

pub fn logout(state: &AppState) -> CliResult<()> {
    state.session.logout()?;
    state.success("Logged out.");
    Ok(())
}

pub async fn whoami(state: &AppState) -> CliResult<()> {
    let user = state
        .session
        .current_user()
        .await
        .or_fail("Could not load your account")?;
    let server = state.config.api_base_url.as_str();
    state.emit(&user, |u| format!("{}  server: {server}\n", output::user(u)));
    Ok(())
}

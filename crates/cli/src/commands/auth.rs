//! Session, login, signup, verification, and logout commands.

use ecom_account_client::Screen;
use ecom_account_client::controllers::{AuthFlow, HomeView};
use ecom_account_core::{LoginForm, SignUpForm};

use super::{App, CommandError};

/// Report whether a saved session exists.
pub fn session(app: &App) {
    let flow = AuthFlow::new(app.ctx.clone());
    match flow.check_session() {
        Screen::Home => tracing::info!("Signed in"),
        screen => tracing::info!(screen = %screen, "Signed out"),
    }
}

/// Log in with email and password.
pub async fn login(app: &App, email: &str, password: &str) -> Result<(), CommandError> {
    let flow = AuthFlow::new(app.ctx.clone());
    flow.login(&LoginForm::new(email, password)).await?;
    tracing::info!(screen = %app.screen(), "Logged in");
    Ok(())
}

/// Create an account and print the verification code to use next.
pub async fn sign_up(app: &App, form: &SignUpForm) -> Result<(), CommandError> {
    let flow = AuthFlow::new(app.ctx.clone());
    let code = flow.sign_up(form).await?;
    tracing::info!("Account created. Confirm it with: account-cli verify {code}");
    Ok(())
}

/// Confirm an account created by `signup`.
pub async fn verify(app: &App, code: &str) -> Result<(), CommandError> {
    let flow = AuthFlow::new(app.ctx.clone());
    flow.open_verification(code)?;
    flow.verify(code).await?;
    Ok(())
}

/// Clear the saved session.
pub fn logout(app: &App) -> Result<(), CommandError> {
    HomeView::new(app.ctx.clone()).logout()?;
    tracing::info!(screen = %app.screen(), "Logged out");
    Ok(())
}

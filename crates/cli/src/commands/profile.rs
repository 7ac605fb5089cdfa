//! Profile commands.

use clap::Args;

use ecom_account_client::controllers::{HomeView, ProfileEditor};
use ecom_account_core::ProfileField;

use super::{App, CommandError};

/// Fields to change with `profile edit`. Unset flags keep their value.
#[derive(Debug, Default, Args)]
pub struct ProfileChanges {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    /// Country code (IN, US). Clears the state unless --state is given.
    #[arg(long)]
    country: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    postcode: Option<String>,

    /// Full street address
    #[arg(long)]
    address: Option<String>,

    /// Current password, required to set a new one
    #[arg(long, env = "ACCOUNT_OLD_PASSWORD", hide_env_values = true)]
    old_password: Option<String>,

    #[arg(long, env = "ACCOUNT_NEW_PASSWORD", hide_env_values = true)]
    new_password: Option<String>,

    #[arg(long, env = "ACCOUNT_CONFIRM_PASSWORD", hide_env_values = true)]
    confirm_password: Option<String>,
}

impl ProfileChanges {
    /// Requested changes in the order they must be applied.
    ///
    /// Country comes before state since setting the country clears the
    /// state.
    fn in_order(&self) -> Vec<(ProfileField, &str)> {
        [
            (ProfileField::Name, &self.name),
            (ProfileField::Email, &self.email),
            (ProfileField::Phone, &self.phone),
            (ProfileField::Country, &self.country),
            (ProfileField::State, &self.state),
            (ProfileField::City, &self.city),
            (ProfileField::Postcode, &self.postcode),
            (ProfileField::FullAddress, &self.address),
            (ProfileField::OldPassword, &self.old_password),
            (ProfileField::NewPassword, &self.new_password),
            (ProfileField::ConfirmPassword, &self.confirm_password),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}

/// Log the signed-in profile.
pub async fn show(app: &App) -> Result<(), CommandError> {
    let profile = HomeView::new(app.ctx.clone()).refresh().await?;
    tracing::info!(
        name = %profile.name,
        email = %profile.email,
        phone = %profile.phone,
        country = %profile.country,
        state = %profile.state,
        city = %profile.city,
        postcode = %profile.postcode,
        address = %profile.full_address,
        "Profile"
    );
    Ok(())
}

/// Load the profile, apply `changes`, and save.
pub async fn edit(app: &App, changes: &ProfileChanges) -> Result<(), CommandError> {
    let changes = changes.in_order();
    if changes.is_empty() {
        tracing::warn!("Nothing to change");
        return Ok(());
    }

    let editor = ProfileEditor::new(app.ctx.clone());
    editor.load().await?;
    for (field, value) in changes {
        if field.is_secret() {
            tracing::debug!(field = %field, "Set");
        } else {
            tracing::debug!(field = %field, value, "Set");
        }
        editor.change_field(field, value);
    }

    editor.save().await?;
    Ok(())
}

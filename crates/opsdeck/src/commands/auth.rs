//! Session command handlers: login, logout, whoami.

use secrecy::SecretString;

use opsdeck_core::UserProfile;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Context;

fn detail(p: &UserProfile) -> String {
    format!(
        "Username:    {}\nName:        {}\nEmail:       {}\nDepartment:  {}",
        p.username, p.name, p.email, p.dept
    )
}

pub async fn login(
    ctx: &Context,
    username: String,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let password = SecretString::from(rpassword::prompt_password("Password: ")?);
    let profile = ctx.session.login(&username, &password).await?;

    if !global.quiet {
        eprintln!("Logged in as {}.", profile.username);
    }
    Ok(())
}

pub fn logout(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    ctx.session.logout();
    if !global.quiet {
        eprintln!("Logged out.");
    }
    Ok(())
}

pub fn whoami(ctx: &Context, global: &GlobalOpts) -> Result<(), CliError> {
    let state = ctx.session.current();
    let profile = state.profile().ok_or(CliError::NoSession)?;
    let out = output::render_single(&global.output, profile, detail, |p| p.username.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

//! Check command - evaluates a signup form offline

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use serde::Serialize;

use crate::domain::signup::{SessionError, SessionOptions, SignupSession};
use crate::domain::{FormData, User, ValidationReport};

/// Arguments for the check command
#[derive(Args, Clone, Debug)]
pub struct CheckArgs {
    /// JSON file holding the form values
    #[arg(long)]
    pub form: PathBuf,

    /// JSON array of existing users to validate referrals against
    #[arg(long)]
    pub users: Option<PathBuf>,
}

/// Outcome printed to stdout
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    Accepted { user: User },
    Rejected { report: ValidationReport },
}

/// Run the check command; fails when the form would be rejected
pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();

    let form: FormData = read_json(&args.form)?;
    let users: Vec<User> = match &args.users {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let outcome = evaluate(form, &users, config.signup.session_options())?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let CheckOutcome::Rejected { report } = outcome {
        let invalid: Vec<&str> = report.errors.keys().map(|f| f.as_str()).collect();
        bail!("form rejected: {}", invalid.join(", "));
    }

    Ok(())
}

/// Submit the form once against the given users
pub fn evaluate(
    form: FormData,
    users: &[User],
    options: SessionOptions,
) -> anyhow::Result<CheckOutcome> {
    let mut session = SignupSession::with_form(users, form, options);

    match session.attempt_submit() {
        Ok(user) => Ok(CheckOutcome::Accepted { user }),
        Err(SessionError::Rejected(state)) => Ok(CheckOutcome::Rejected {
            report: state.report(session.form()),
        }),
        Err(err) => Err(err.into()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

//! Account commands - sign up and identify.

use todokv::{CreateUserInput, Store, User, UserRepository};

use crate::cli::CredentialArgs;
use crate::output::{OutputFormat, format_timestamp, print_json};

/// Run the `signup` command
pub fn signup(
    store: &Store,
    args: &CredentialArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = CreateUserInput::new(args.username.as_str(), args.password.as_str());
    input.validate()?;

    let user = UserRepository::new(store.clone()).create(&input)?;
    tracing::info!(user_id = user.user_id, "Signed up {}", user.username);
    print_user(&user, format)
}

/// Run the `whoami` command
pub fn whoami(
    store: &Store,
    args: &CredentialArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let users = UserRepository::new(store.clone());
    let principal = users.authenticate(&args.username, &args.password)?;
    let user = users.find_by_principal(&principal)?;
    print_user(&user, format)
}

fn print_user(user: &User, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            println!("User ID:     {}", user.user_id);
            println!("Username:    {}", user.username);
            println!("Created:     {}", format_timestamp(user.created_at));
            Ok(())
        }
        OutputFormat::Json => print_json(user),
    }
}

//! Store info command - shows store location and user/todo counts.

use todokv::{Namespace, Store};

use crate::output::{OutputFormat, print_json};

/// Run the info command
pub fn run(store: &Store, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let (users, todos) = store.read(|txn| {
        Ok((
            txn.bucket(Namespace::Users)?.len()?,
            txn.bucket(Namespace::Todos)?.len()?,
        ))
    })?;
    let location = store.location().to_string();

    match format {
        OutputFormat::Human => {
            println!("Store:       {location}");
            println!("Users:       {users}");
            println!("Todos:       {todos}");
            Ok(())
        }
        OutputFormat::Json => print_json(&serde_json::json!({
            "store": location,
            "users": users,
            "todos": todos,
        })),
    }
}

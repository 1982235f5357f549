//! Todo commands. Every action runs as the user the credentials sign in as.

use todokv::{CreateTodoInput, Principal, Store, Todo, TodoList, TodoRepository, UserRepository};

use crate::cli::{TodoAction, TodoArgs};
use crate::output::{OutputFormat, format_timestamp, print_json, print_todos};

/// Run the `todo` command
pub fn run(
    store: &Store,
    args: &TodoArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let principal = UserRepository::new(store.clone())
        .authenticate(&args.credentials.username, &args.credentials.password)?;
    let todos = TodoRepository::new(store.clone());

    match &args.action {
        TodoAction::Add {
            title,
            description,
            completed,
        } => add(&todos, &principal, title, description, *completed, format),
        TodoAction::List => list(&todos, &principal, format),
        TodoAction::Get { id } => {
            let todo = todos.find_by_id(principal.user_id(), *id)?;
            print_todo(&todo, format)
        }
        TodoAction::Toggle { id } => {
            let todo = todos.toggle_completed(principal.user_id(), *id)?;
            print_todo(&todo, format)
        }
        TodoAction::Delete { id } => {
            todos.delete(principal.user_id(), *id)?;
            match format {
                OutputFormat::Human => println!("Deleted todo {id}"),
                OutputFormat::Json => print_json(&serde_json::json!({ "deleted": id }))?,
            }
            Ok(())
        }
    }
}

fn add(
    todos: &TodoRepository,
    principal: &Principal,
    title: &str,
    description: &str,
    completed: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = CreateTodoInput::new(principal, title)
        .with_description(description)
        .with_completed(completed);
    input.validate()?;

    let todo = todos.create(input)?;
    print_todo(&todo, format)
}

/// Run the `todo list` command
fn list(
    todos: &TodoRepository,
    principal: &Principal,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut all = todos.find_by_owner(principal.user_id())?;
    // Storage order is lexicographic by id; show creation order instead.
    all.sort_by_key(|todo| todo.id);
    let list = TodoList::partition(all);

    match format {
        OutputFormat::Human => {
            if list.is_empty() {
                println!("No todos found.");
                return Ok(());
            }
            println!("Incomplete ({}):", list.incomplete.len());
            print_todos(&list.incomplete);
            println!();
            println!("Complete ({}):", list.complete.len());
            print_todos(&list.complete);
            Ok(())
        }
        OutputFormat::Json => print_json(&list),
    }
}

fn print_todo(todo: &Todo, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            println!("ID:          {}", todo.id);
            println!("Title:       {}", todo.title);
            if !todo.description.is_empty() {
                println!("Description: {}", todo.description);
            }
            println!("Completed:   {}", if todo.completed { "yes" } else { "no" });
            println!("Created:     {}", format_timestamp(todo.created_at));
            println!("Updated:     {}", format_timestamp(todo.last_updated));
            Ok(())
        }
        OutputFormat::Json => print_json(todo),
    }
}

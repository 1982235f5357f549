//! Store opening for the CLI.

use todokv::Store;

use crate::cli::StoreArgs;

/// Open the store file named on the command line, creating its parent
/// directory first if needed.
pub fn open_store(args: &StoreArgs) -> Result<Store, Box<dyn std::error::Error>> {
    if let Some(parent) = args.db.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!("Using store file at {}", args.db.display());
    match Store::open(&args.db) {
        Ok(store) => Ok(store),
        Err(e) if e.is_engine_error() => Err(format!(
            "Failed to open store at {} (is another todokv process using it?): {e}",
            args.db.display()
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}

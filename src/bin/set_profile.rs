//! Utility to set the user profile in the database
//!
//! Usage: set_profile <name> [default_age]

use vismaya::config::Config;
use vismaya::db::{self, Database};
use vismaya::models::UserProfile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(name) = args.first() else {
        eprintln!("Usage: set_profile <name> [default_age]");
        std::process::exit(2);
    };
    let default_age = match args.get(1) {
        Some(raw) => Some(
            raw.parse::<u32>()
                .ok()
                .filter(|age| *age > 0)
                .ok_or_else(|| format!("default_age must be a positive whole number, got '{}'", raw))?,
        ),
        None => None,
    };

    let config = Config::from_env();
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    println!("Database path: {}", config.database_path.display());

    let database = Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let profile = UserProfile::set(conn, name, default_age)?;
        println!("Profile set:");
        println!("  Name: {}", profile.name);
        match profile.default_age {
            Some(age) => println!("  Default age: {}", age),
            None => println!("  Default age: (none)"),
        }
        println!("  Updated: {}", profile.updated_at);
        Ok(())
    })?;

    Ok(())
}

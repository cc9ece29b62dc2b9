//! Prints the environment lines for the bootstrap administrator.
//!
//! The API creates an administrator on startup when both `ADMIN_USERNAME`
//! and `ADMIN_PASSWORD_HASH` are set and no account of that name exists.
//!
//! Usage:
//!     cargo run --bin generate_admin_hash

use std::io::{self, BufRead, Write};

const COST: u32 = 12;

fn prompt(stdin: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    stdin.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> io::Result<()> {
    let mut stdin = io::stdin().lock();

    let username = prompt(&mut stdin, "Administrator username")?;
    let username = username.trim();
    if username.is_empty() || username.chars().count() > 32 {
        eprintln!("Username must be between 1 and 32 characters.");
        std::process::exit(1);
    }

    let password = prompt(&mut stdin, "Password")?;
    if password.is_empty() {
        eprintln!("Password is required.");
        std::process::exit(1);
    }
    let confirmation = prompt(&mut stdin, "Confirm password")?;
    if password != confirmation {
        eprintln!("Passwords do not match.");
        std::process::exit(1);
    }

    match bcrypt::hash(&password, COST) {
        Ok(hash) => {
            println!();
            println!("# Add to .env or the deployment environment:");
            println!("ADMIN_USERNAME={}", username);
            println!("ADMIN_PASSWORD_HASH='{}'", hash);
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to hash password: {}", e);
            std::process::exit(1);
        }
    }
}

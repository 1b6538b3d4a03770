//! Print an Argon2id hash for a password
//!
//! Used to seed or reset `users.password_hash` by hand. Only the hash is
//! printed, never the password.
//!
//! ```text
//! echo -n 'password123!' | hash-password
//! hash-password --password 'password123!' --memory-kib 19456
//! ```

use anyhow::{bail, Context, Result};
use clap::Parser;
use shopfront_backend::{auth::CredentialVerifier, config::PasswordConfig};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "hash-password", version, about = "Hash a password for the users table")]
struct Cli {
    /// Password to hash. Read from stdin when omitted.
    #[arg(long, env = "SHOP_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Argon2 memory cost in KiB
    #[arg(long, default_value_t = PasswordConfig::default().memory_kib)]
    memory_kib: u32,

    /// Argon2 iterations
    #[arg(long, default_value_t = PasswordConfig::default().iterations)]
    iterations: u32,

    /// Argon2 lanes
    #[arg(long, default_value_t = PasswordConfig::default().parallelism)]
    parallelism: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let password = match cli.password {
        Some(password) => password,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read password from stdin")?;
            input.trim_end_matches(&['\r', '\n'][..]).to_string()
        }
    };

    if password.is_empty() {
        bail!("refusing to hash an empty password");
    }

    let verifier = CredentialVerifier::new(PasswordConfig {
        memory_kib: cli.memory_kib,
        iterations: cli.iterations,
        parallelism: cli.parallelism,
    })?;

    println!("{}", verifier.hash_password(&password)?);
    Ok(())
}

use anyhow::Result;
use std::io::Read;

use tern_auth::credential::hash_credential;

/// Print the hex digest of a secret for the `sha256` credential scheme.
///
/// Reads the secret from stdin when no argument is given, so it stays out
/// of shell history.
pub fn run(secret: Option<&str>) -> Result<()> {
    let secret = match secret {
        Some(s) => s.to_string(),
        None => {
            eprintln!("Enter secret: ");
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if secret.is_empty() {
        anyhow::bail!("secret must not be empty");
    }

    println!("{}", hash_credential(&secret));
    Ok(())
}

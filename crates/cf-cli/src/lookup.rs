//! # Lookup Subcommand
//!
//! Resolves a place name to its cadastral code without running the
//! full pipeline. Useful for checking what a backend actually holds.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

/// Arguments for the `cf lookup` subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Place name to resolve, matched case-insensitively.
    pub name: String,

    /// Place lookup file (JSON array of {nome, codiceCatastale}).
    #[arg(long, conflicts_with = "database_url")]
    pub places_file: Option<PathBuf>,

    /// Postgres connection string; falls back to DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Execute the lookup subcommand.
///
/// Prints the cadastral code on a hit. A miss is reported on stderr
/// and mapped to exit code 1 so scripts can branch on it.
pub async fn run_lookup(args: &LookupArgs) -> Result<u8> {
    if args.name.trim().is_empty() {
        bail!("place name must not be empty");
    }

    let resolver =
        crate::build_resolver(args.places_file.as_deref(), args.database_url.as_deref()).await?;

    match resolver.resolve(&args.name).await? {
        Some(code) => {
            println!("{code}");
            Ok(0)
        }
        None => {
            eprintln!("no known place matches {:?}", args.name);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(name: &str, places_file: PathBuf) -> LookupArgs {
        LookupArgs {
            name: name.to_string(),
            places_file: Some(places_file),
            database_url: None,
        }
    }

    fn lookup_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("places.json");
        std::fs::write(
            &path,
            r#"[
                { "nome": "Roma", "codiceCatastale": "H501" },
                { "nome": "Milano", "codiceCatastale": "F205" }
            ]"#,
        )
        .unwrap();
        path
    }

    #[tokio::test]
    async fn hit_exits_zero() {
        let dir = tempfile::tempdir().unwrap();
        let exit = run_lookup(&args_for("roma", lookup_file(&dir))).await.unwrap();
        assert_eq!(exit, 0);
    }

    #[tokio::test]
    async fn miss_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let exit = run_lookup(&args_for("Atlantide", lookup_file(&dir))).await.unwrap();
        assert_eq!(exit, 1);
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_lookup(&args_for("   ", lookup_file(&dir))).await.unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }
}

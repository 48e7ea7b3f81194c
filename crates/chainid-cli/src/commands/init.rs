//! `chainid init`: Write a default configuration file.

use clap::Args;
use std::path::PathBuf;

use chainid_core::ChainIdConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path of the configuration file to write.
    #[arg(short, long, default_value = "chainid.toml")]
    pub config: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    if args.config.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.config.display()
        );
    }

    let config = ChainIdConfig::default();
    config.save(&args.config)?;

    println!("Wrote default config to {}", args.config.display());
    println!(
        "  network: {} (chain id {})",
        config.network.name, config.network.chain_id
    );
    println!("  rpc:     {}", config.network.rpc_url);
    Ok(())
}

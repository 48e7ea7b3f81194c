//! `chainid revoke`: Seed an identity and revoke it.

use clap::Args;

use chainid_core::WalletAddress;
use chainid_identity::AuthSession;
use chainid_validation::RegistrationInput;

use super::demo_stack;

#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Wallet address of the identity to revoke.
    #[arg(short, long)]
    pub wallet: String,

    /// Full legal name for the seeded profile.
    #[arg(long)]
    pub full_name: String,

    /// Date of birth for the seeded profile (YYYY-MM-DD).
    #[arg(long)]
    pub date_of_birth: String,

    /// Country for the seeded profile.
    #[arg(long)]
    pub country: String,
}

pub async fn run(args: &RevokeArgs) -> anyhow::Result<()> {
    let wallet = WalletAddress::new(args.wallet.clone())?;
    let session = AuthSession::establish(wallet);
    let stack = demo_stack();

    let input = RegistrationInput {
        full_name: args.full_name.clone(),
        date_of_birth: args.date_of_birth.clone(),
        country: args.country.clone(),
        government_id: None,
        selfie: None,
    };
    let identity = stack.registration.register(&session, &input).await?;
    println!(
        "Registered identity {} ({})",
        identity.token_id, identity.status
    );

    let revoked = stack.registration.revoke(&session, identity).await?;
    println!(
        "Revoked identity {} ({})",
        revoked.token_id, revoked.status
    );

    Ok(())
}

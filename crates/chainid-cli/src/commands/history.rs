//! `chainid history`: Seed an identity, run a verification per
//! attribute, and print the recorded history.

use clap::Args;

use chainid_core::{AttributeType, VerificationRequest, WalletAddress};
use chainid_identity::AuthSession;
use chainid_validation::RegistrationInput;

use super::demo_stack;

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Wallet address of the user.
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

pub async fn run(args: &HistoryArgs) -> anyhow::Result<()> {
    let wallet = WalletAddress::new(args.wallet.clone())?;
    let stack = demo_stack();

    let session = AuthSession::establish(wallet.clone());
    let input = RegistrationInput {
        full_name: args.full_name.clone(),
        date_of_birth: args.date_of_birth.clone(),
        country: args.country.clone(),
        government_id: None,
        selfie: None,
    };
    stack.registration.register(&session, &input).await?;

    for attribute in AttributeType::all() {
        let request = VerificationRequest {
            user_address: wallet.clone(),
            attribute: *attribute,
            dapp_id: "chainid-cli".into(),
            session_id: None,
        };
        stack.verification.verify(&request).await?;
    }

    let events = stack.verification.history(&wallet).await?;
    println!("Verification history for {}", wallet);
    println!();
    for event in &events {
        let outcome = if event.result { "PASS" } else { "FAIL" };
        println!(
            "  [{}] {} via {} at {}",
            outcome,
            event.attribute.label(),
            event.dapp,
            event.timestamp.to_rfc3339()
        );
    }

    Ok(())
}

use clap::Args;

use atelier_app::{auth::promote_user, database};

#[derive(Debug, Args)]
pub(crate) struct PromoteAdminArgs {
    /// Email of the account to promote
    #[arg(long)]
    email: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: PromoteAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let user = promote_user(&pool, &args.email)
        .await
        .map_err(|error| format!("failed to promote account: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("email: {}", user.email);
    println!("role: {}", user.role.as_str());

    Ok(())
}

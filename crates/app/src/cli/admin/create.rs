use clap::Args;

use atelier_app::{
    auth::{NewUser, create_admin_user},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Display name for the account
    #[arg(long)]
    name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// Initial password
    #[arg(long)]
    password: String,

    /// Contact phone number (10-15 digits)
    #[arg(long, default_value = "0000000000")]
    phone: String,

    /// Organization shown on the profile
    #[arg(long, default_value = "Atelier Studio")]
    organization: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let admin = create_admin_user(
        &pool,
        NewUser {
            name: args.name,
            email: args.email,
            password: args.password,
            phone: args.phone,
            organization: args.organization,
        },
    )
    .await
    .map_err(|error| format!("failed to create admin account: {error}"))?;

    println!("user_uuid: {}", admin.uuid);
    println!("email: {}", admin.email);
    println!("role: {}", admin.role.as_str());

    Ok(())
}

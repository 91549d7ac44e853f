use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use migration::MigratorTrait;
use tracing::info;

use service::auth::domain::StaffInput;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::service::{AuthConfig, AuthService};
use service::catalog::{self, ServiceInput};

#[derive(Parser)]
#[command(
    name = "manage",
    about = "Operator tasks for the booking service",
    version,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations.
    Migrate,

    /// Create a staff account that can manage orders.
    CreateStaff {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        /// Also mark the account as superuser.
        #[arg(long, action = ArgAction::SetTrue)]
        superuser: bool,
    },

    /// Add a bookable service to the catalog.
    CreateService {
        #[arg(long)]
        name: String,
        /// Price in whole currency units.
        #[arg(long)]
        price: i32,
        #[arg(long)]
        description: String,
        /// Relative image path, e.g. services/cleaning.png
        #[arg(long)]
        picture: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = configs::AppConfig::load_and_validate().context("load configuration")?;
    common::utils::logging::init_logging(&cfg.logging.format);

    let db = models::db::connect_with_config(&cfg.database).await.context("connect database")?;

    match cli.command {
        Commands::Migrate => {
            migration::Migrator::up(&db, None).await.context("apply migrations")?;
            info!(event = "migrated", "database schema up to date");
        }
        Commands::CreateStaff { username, email, password, first_name, last_name, superuser } => {
            let auth = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db)), AuthConfig::default());
            let user = auth
                .create_staff(StaffInput { username, email, password, first_name, last_name, superuser })
                .await
                .context("create staff account")?;
            println!("created staff user {} (id {})", user.username, user.id);
        }
        Commands::CreateService { name, price, description, picture } => {
            let created = catalog::create_service(&db, ServiceInput { name, price, description, picture })
                .await
                .context("create service")?;
            println!("created service {} (id {})", created.name, created.id);
        }
    }
    Ok(())
}

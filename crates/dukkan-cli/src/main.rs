use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dukkan")]
#[command(about = "Dukkan CLI - browse the marketplace and manage your listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, with optional filters
    Products(commands::browse::ProductArgs),
    /// List shops
    Shops {
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show search suggestions for a partial query
    Suggest {
        /// Partial search text
        query: String,
    },
    /// Store an API token for authenticated requests
    Login {
        /// Bearer token issued by the API
        token: String,
    },
    /// Remove the stored API token
    Logout,
    /// Manage your own shop's listings
    Vendor {
        #[command(subcommand)]
        action: VendorAction,
    },
}

#[derive(Subcommand)]
enum VendorAction {
    /// Create a product listing
    Create(commands::vendor::CreateArgs),
    /// Toggle a product between active and inactive
    Toggle {
        /// Your shop's slug
        #[arg(long)]
        shop: String,
        /// Product id
        id: u64,
    },
    /// Delete a product listing (asks for confirmation)
    Delete {
        /// Your shop's slug
        #[arg(long)]
        shop: String,
        /// Product id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Upload an image for a product
    UploadImage {
        /// Your shop's slug
        #[arg(long)]
        shop: String,
        /// Product id
        id: u64,
        /// Path to the image file
        path: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Products(args) => commands::browse::products(args).await?,
        Commands::Shops { page } => commands::browse::shops(page).await?,
        Commands::Suggest { query } => commands::browse::suggest(&query).await?,
        Commands::Login { token } => commands::auth::login(&token)?,
        Commands::Logout => commands::auth::logout()?,
        Commands::Vendor { action } => match action {
            VendorAction::Create(args) => commands::vendor::create(args).await?,
            VendorAction::Toggle { shop, id } => commands::vendor::toggle(&shop, id).await?,
            VendorAction::Delete { shop, id, yes } => {
                commands::vendor::delete(&shop, id, yes).await?
            }
            VendorAction::UploadImage { shop, id, path } => {
                commands::vendor::upload_image(&shop, id, &path).await?
            }
        },
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, HttpProductService, ProductService};
use shared::domain::{Product, ProductId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    /// Overrides catalog.toml and the environment.
    #[arg(long)]
    service_url: Option<String>,
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Create {
        name: String,
        category_id: String,
        price: String,
    },
    Update {
        product_id: String,
        name: String,
        category_id: String,
        price: String,
    },
    Delete {
        product_id: String,
    },
}

fn print_row(product: &Product) {
    let product_id = product.id().map(ProductId::as_str).unwrap_or("-");
    println!(
        "{product_id}\t{}\t{}\t{}",
        product.name, product.category_id, product.price
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(service_url) = cli.service_url {
        settings.service_url = service_url;
    }
    if let Some(timeout) = cli.request_timeout_secs {
        settings.request_timeout_secs = Some(timeout);
    }
    tracing::debug!(service_url = %settings.service_url, "using product service");
    let service = HttpProductService::new(&settings).context("invalid service configuration")?;

    match cli.command {
        Command::List => {
            let products = service.list_all().await.context("failed to list products")?;
            for product in &products {
                print_row(product);
            }
        }
        Command::Create {
            name,
            category_id,
            price,
        } => {
            let saved = service
                .save(&Product::draft(name, category_id, price))
                .await
                .context("failed to create product")?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        Command::Update {
            product_id,
            name,
            category_id,
            price,
        } => {
            let product =
                Product::draft(name, category_id, price).with_id(ProductId::new(product_id));
            service
                .update(&product)
                .await
                .context("failed to update product")?;
            print_row(&product);
        }
        Command::Delete { product_id } => {
            let product_id = ProductId::new(product_id);
            service
                .delete(&product_id)
                .await
                .with_context(|| format!("failed to delete product {product_id}"))?;
            println!("deleted product_id={product_id}");
        }
    }

    Ok(())
}

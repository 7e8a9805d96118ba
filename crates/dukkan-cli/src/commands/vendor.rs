use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use tokio::sync::mpsc::UnboundedReceiver;

use dukkan_controller::{
    ControllerEvent, ListController, MutationApplier, Phase, ProductFetcher, channel,
};
use dukkan_core::catalog::{NewProduct, Product, VendorCatalog};
use dukkan_core::filter::FilterSet;

use super::{connect, settled};

#[derive(Args)]
pub struct CreateArgs {
    /// Your shop's slug
    #[arg(long)]
    pub shop: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long, default_value = "TRY")]
    pub currency: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub stock: Option<u32>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub subcategory: Option<String>,
}

pub async fn create(args: CreateArgs) -> Result<()> {
    let api = connect()?;
    let product = NewProduct {
        name: args.name,
        description: args.description,
        price: args.price,
        currency: args.currency,
        stock: args.stock,
        category_slug: args.category,
        subcategory_slug: args.subcategory,
    };
    let created = api.vendor.create_product(&args.shop, &product).await?;
    println!("Created product {} ({})", created.id, created.slug);
    Ok(())
}

pub async fn toggle(shop: &str, id: u64) -> Result<()> {
    let api = connect()?;
    let (events, mut events_rx) = channel();
    let (controller, applier) = vendor_dashboard(&api, shop, events).await?;
    find_on_some_page(&controller, id).await?;

    applier.toggle_active(id).await;
    if let Some(message) = first_notice(&mut events_rx) {
        bail!("{message}");
    }
    let state = match controller.snapshot() {
        Phase::Ready { items, .. } => items
            .iter()
            .find(|p| p.id == id)
            .map(|p| if p.is_active { "active" } else { "inactive" }),
        _ => None,
    };
    println!("Product {id} is now {}.", state.unwrap_or("updated"));
    Ok(())
}

pub async fn delete(shop: &str, id: u64, yes: bool) -> Result<()> {
    let api = connect()?;
    let (events, mut events_rx) = channel();
    let (controller, applier) = vendor_dashboard(&api, shop, events).await?;
    find_on_some_page(&controller, id).await?;

    if !yes && !confirmed_on_stdin(shop, id)? {
        println!("Aborted.");
        return Ok(());
    }

    applier.delete(id).confirm().await;
    if let Some(message) = first_notice(&mut events_rx) {
        bail!("{message}");
    }
    println!("Deleted product {id}.");
    Ok(())
}

pub async fn upload_image(shop: &str, id: u64, path: &Path) -> Result<()> {
    let api = connect()?;
    let (events, mut events_rx) = channel();
    let (controller, applier) = vendor_dashboard(&api, shop, events).await?;
    find_on_some_page(&controller, id).await?;

    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("image path has no file name")?;

    applier.upload_image(id, filename, bytes).await;
    if let Some(message) = first_notice(&mut events_rx) {
        bail!("{message}");
    }
    println!("Uploaded {filename} for product {id}.");
    Ok(())
}

/// Loads the vendor's product list and pairs it with a mutation applier.
async fn vendor_dashboard(
    api: &super::Api,
    shop: &str,
    events: tokio::sync::mpsc::UnboundedSender<ControllerEvent>,
) -> Result<(ListController<Product>, MutationApplier)> {
    let controller = ListController::new(
        Arc::new(ProductFetcher(api.catalog.clone())),
        events.clone(),
    )
    .with_slug_resolver(api.catalog.clone())
    .with_token_store(api.tokens.clone());
    controller.load(FilterSet::new(), Some(shop.to_string()), 1).await;
    settled(controller.snapshot())?;

    let applier = MutationApplier::new(controller.clone(), api.vendor.clone(), shop, events);
    Ok((controller, applier))
}

/// Pages forward until the product shows up in the loaded items.
async fn find_on_some_page(controller: &ListController<Product>, id: u64) -> Result<()> {
    loop {
        let (items, meta) = settled(controller.snapshot())?;
        if items.iter().any(|p| p.id == id) {
            return Ok(());
        }
        if !meta.has_next_page() {
            bail!("product {id} not found in this shop");
        }
        controller.set_page(meta.current_page + 1).await;
    }
}

fn confirmed_on_stdin(shop: &str, id: u64) -> Result<bool> {
    print!("Delete product {id} from {shop}? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn first_notice(rx: &mut UnboundedReceiver<ControllerEvent>) -> Option<String> {
    while let Ok(event) = rx.try_recv() {
        if let ControllerEvent::Notice { message, .. } = event {
            return Some(message);
        }
    }
    None
}

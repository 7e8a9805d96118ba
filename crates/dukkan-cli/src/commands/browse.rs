use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::Args;

use dukkan_controller::{ListController, ProductFetcher, ShopFetcher, channel};
use dukkan_core::catalog::CatalogSource;
use dukkan_core::filter::{FilterSet, SortOrder, codec};

use super::{connect, print_page_line, settled};

#[derive(Args)]
pub struct ProductArgs {
    /// Start from a saved query string, e.g. "search=jeans&category=clothes"
    #[arg(long)]
    pub query: Option<String>,
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
    /// Category slug
    #[arg(long)]
    pub category: Option<String>,
    /// Subcategory slug (only meaningful together with --category)
    #[arg(long)]
    pub subcategory: Option<String>,
    /// Restrict to one shop, by slug
    #[arg(long)]
    pub shop: Option<String>,
    #[arg(long)]
    pub min_price: Option<f64>,
    #[arg(long)]
    pub max_price: Option<f64>,
    /// Only products currently in stock
    #[arg(long)]
    pub in_stock: bool,
    /// One of: newest, price_asc, price_desc, popular
    #[arg(long)]
    pub sort: Option<String>,
    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

impl ProductArgs {
    /// Builds the filter set: the saved query string first, explicit
    /// flags layered on top.
    fn filters(&self) -> Result<(FilterSet, u32)> {
        let base = self
            .query
            .as_deref()
            .map(codec::decode)
            .unwrap_or_default();
        let page = if self.page != 1 {
            self.page
        } else {
            base.page.unwrap_or(1)
        };

        let mut filters = base;
        if let Some(search) = &self.search {
            filters = filters.with_search(search);
        }
        if let Some(category) = &self.category {
            filters = filters.with_category(category);
        }
        if let Some(subcategory) = &self.subcategory {
            filters = filters.with_subcategory(subcategory);
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            filters = filters.with_price_range(self.min_price, self.max_price);
        }
        if self.in_stock {
            filters = filters.with_in_stock(true);
        }
        if let Some(sort) = &self.sort {
            let sort = SortOrder::parse(sort)
                .ok_or_else(|| anyhow!("unknown sort order: {sort}"))?;
            filters = filters.with_sort(sort);
        }
        Ok((filters, page))
    }
}

pub async fn products(args: ProductArgs) -> Result<()> {
    let api = connect()?;
    let (filters, page) = args.filters()?;

    let (events, _events_rx) = channel();
    let controller = ListController::new(Arc::new(ProductFetcher(api.catalog.clone())), events)
        .with_slug_resolver(api.catalog.clone())
        .with_token_store(api.tokens.clone());
    controller.load(filters, args.shop.clone(), page).await;

    let (items, meta) = settled(controller.snapshot())?;
    for product in &items {
        let stock = product
            .stock
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>6}  {:<30} {:>10.2} {}  stock {:>4}  {}",
            product.id,
            product.name,
            product.price,
            product.currency,
            stock,
            if product.is_active { "" } else { "(inactive)" },
        );
    }
    print_page_line(&meta);
    println!("query: {}", codec::encode(&controller.filters().with_page(meta.current_page)));
    Ok(())
}

pub async fn shops(page: u32) -> Result<()> {
    let api = connect()?;

    let (events, _events_rx) = channel();
    let controller = ListController::new(Arc::new(ShopFetcher(api.catalog.clone())), events)
        .with_token_store(api.tokens.clone());
    controller.load(FilterSet::new(), None, page).await;

    let (items, meta) = settled(controller.snapshot())?;
    for shop in &items {
        println!(
            "{:<24} {:<30} {}",
            shop.slug,
            shop.name,
            shop.city.as_deref().unwrap_or("-"),
        );
    }
    print_page_line(&meta);
    Ok(())
}

pub async fn suggest(query: &str) -> Result<()> {
    let api = connect()?;
    let suggestions = api.catalog.suggestions(query).await?;
    if suggestions.is_empty() {
        println!("no suggestions for {query:?}");
        return Ok(());
    }
    for suggestion in &suggestions {
        println!("{:<10} {}", format!("{:?}", suggestion.kind).to_lowercase(), suggestion.text);
    }
    Ok(())
}

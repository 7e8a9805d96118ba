//! REST implementation of the vendor write side.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use dukkan_core::catalog::{NewProduct, Product, ProductImage, VendorCatalog};
use dukkan_core::error::Result;

use crate::http::{HttpClient, ItemEnvelope};

#[derive(Serialize)]
struct ToggleStatusBody {
    is_active: bool,
}

/// [`VendorCatalog`] backed by the Dukkan REST API.
#[derive(Clone)]
pub struct ApiVendor {
    http: HttpClient,
}

impl ApiVendor {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    fn product_path(shop_slug: &str, product_slug: &str) -> String {
        format!("/vendor/shops/{shop_slug}/products/{product_slug}")
    }
}

#[async_trait]
impl VendorCatalog for ApiVendor {
    async fn create_product(&self, shop_slug: &str, product: &NewProduct) -> Result<Product> {
        let path = format!("/vendor/shops/{shop_slug}/products");
        let envelope: ItemEnvelope<Product> = self.http.post_json(&path, product).await?;
        Ok(envelope.data)
    }

    async fn set_product_active(
        &self,
        shop_slug: &str,
        product_slug: &str,
        active: bool,
    ) -> Result<()> {
        let path = format!("{}/toggle-status", Self::product_path(shop_slug, product_slug));
        self.http
            .post_unit(&path, &ToggleStatusBody { is_active: active })
            .await
    }

    async fn delete_product(&self, shop_slug: &str, product_slug: &str) -> Result<()> {
        self.http
            .delete(&Self::product_path(shop_slug, product_slug))
            .await
    }

    async fn upload_image(
        &self,
        shop_slug: &str,
        product_slug: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ProductImage> {
        let path = format!("{}/images", Self::product_path(shop_slug, product_slug));
        // Pass-through upload: the bytes go to the server untouched.
        let part = Part::bytes(bytes).file_name(filename.to_string());
        let form = Form::new().part("image", part);
        let envelope: ItemEnvelope<ProductImage> = self.http.post_multipart(&path, form).await?;
        Ok(envelope.data)
    }

    async fn delete_image(
        &self,
        shop_slug: &str,
        product_slug: &str,
        image_id: u64,
    ) -> Result<()> {
        let path = format!(
            "{}/images/{image_id}",
            Self::product_path(shop_slug, product_slug)
        );
        self.http.delete(&path).await
    }
}

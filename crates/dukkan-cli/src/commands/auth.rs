use anyhow::Result;

use dukkan_core::catalog::TokenStore;

use super::connect;

pub fn login(token: &str) -> Result<()> {
    let api = connect()?;
    api.tokens.set(token)?;
    println!("Token stored.");
    Ok(())
}

pub fn logout() -> Result<()> {
    let api = connect()?;
    api.tokens.clear()?;
    println!("Token removed.");
    Ok(())
}

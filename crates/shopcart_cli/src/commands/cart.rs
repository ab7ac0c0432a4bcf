//! Item commands: add, remove, list, update, total, count, get, refresh.

use super::CommandResult;
use clap::Args;
use shopcart_core::{parse_price, AuditSink, Cart, CartStore, ItemValidationError};
use std::io::Write;

/// Price given on the command line, together with the text as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceArg {
    pub text: String,
    pub value: f64,
}

pub fn parse_price_arg(text: &str) -> Result<PriceArg, ItemValidationError> {
    let value = parse_price(text)?;
    Ok(PriceArg {
        text: text.trim().to_string(),
        value,
    })
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Item name
    pub item: String,
    /// Item price
    pub price: String,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Item name
    pub item: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Current item name
    pub item: String,
    /// New item name
    #[arg(long)]
    pub name: Option<String>,
    /// New item price
    #[arg(long, value_parser = parse_price_arg)]
    pub price: Option<PriceArg>,
}

pub fn add<S: CartStore, A: AuditSink>(
    cart: &mut Cart<S, A>,
    args: AddArgs,
    out: &mut impl Write,
) -> CommandResult {
    let price = parse_price(&args.price).map_err(|_| {
        format!(
            "Invalid price provided for {}. Please provide a valid number.",
            args.item
        )
    })?;
    cart.add(args.item.as_str(), price)?;
    writeln!(
        out,
        "Added {} with price {} to the cart.",
        args.item,
        args.price.trim()
    )?;
    Ok(())
}

pub fn remove<S: CartStore, A: AuditSink>(
    cart: &mut Cart<S, A>,
    args: NameArgs,
    out: &mut impl Write,
) -> CommandResult {
    if cart.remove(&args.item)? > 0 {
        writeln!(out, "Removed {} from the cart.", args.item)?;
    } else {
        writeln!(out, "Item {} not found in the cart.", args.item)?;
    }
    Ok(())
}

pub fn list<S: CartStore, A: AuditSink>(cart: &Cart<S, A>, out: &mut impl Write) -> CommandResult {
    for item in cart.items() {
        writeln!(out, "{} - {:.2} $", item.name, item.price)?;
    }
    Ok(())
}

pub fn update<S: CartStore, A: AuditSink>(
    cart: &mut Cart<S, A>,
    args: UpdateArgs,
    out: &mut impl Write,
) -> CommandResult {
    if args.name.is_none() && args.price.is_none() {
        cart.update(&args.item, None, None)?;
        writeln!(out, "No updates provided for {}.", args.item)?;
        return Ok(());
    }

    let new_price = args.price.as_ref().map(|price| price.value);
    let changed = cart.update(&args.item, args.name.as_deref(), new_price)?;
    if changed == 0 {
        writeln!(out, "Item {} not found in the cart.", args.item)?;
        return Ok(());
    }

    let price_text = args.price.as_ref().map_or("unchanged", |price| price.text.as_str());
    writeln!(
        out,
        "Updated item {} to {} with price {} in the cart.",
        args.item,
        args.name.as_deref().unwrap_or(&args.item),
        price_text
    )?;
    Ok(())
}

pub fn total<S: CartStore, A: AuditSink>(cart: &Cart<S, A>, out: &mut impl Write) -> CommandResult {
    writeln!(out, "Total price of all items: {:.2} $", cart.total())?;
    Ok(())
}

pub fn count<S: CartStore, A: AuditSink>(cart: &Cart<S, A>, out: &mut impl Write) -> CommandResult {
    writeln!(out, "Total number of items in the cart: {}", cart.count())?;
    Ok(())
}

pub fn get<S: CartStore, A: AuditSink>(
    cart: &Cart<S, A>,
    args: NameArgs,
    out: &mut impl Write,
) -> CommandResult {
    match cart.get(&args.item) {
        Some(item) => writeln!(out, "Item: {}, Price: {:.2} $", item.name, item.price)?,
        None => writeln!(out, "Item {} not found in the cart.", args.item)?,
    }
    Ok(())
}

pub fn refresh<S: CartStore, A: AuditSink>(
    cart: &mut Cart<S, A>,
    out: &mut impl Write,
) -> CommandResult {
    cart.refresh()?;
    writeln!(
        out,
        "Refreshed the internal list of items from the database."
    )?;
    Ok(())
}
